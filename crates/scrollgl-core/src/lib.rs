//! Platform-free core of scrollgl.
//!
//! Maps DOM layout onto a pixel-calibrated 3D scene, smooths scroll input and
//! drives the render loop. Nothing here touches the browser; the web
//! front-end supplies media elements, a [`RenderBackend`] and a
//! [`FrameScheduler`].

pub mod backend;
pub mod compositor;
pub mod constants;
pub mod cover;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod media;
pub mod render_loop;
pub mod scheduler;
pub mod scroll;
pub mod settings;
pub mod viewport;

pub use backend::*;
pub use compositor::Compositor;
pub use constants::*;
pub use cover::{aspect_ratio, cover_scale};
pub use debounce::Debounce;
pub use error::{ConfigError, LayoutError};
pub use geometry::PlaneGeometry;
pub use media::*;
pub use render_loop::{LoopPhase, RenderLoop, TickTrigger};
pub use scheduler::FrameScheduler;
pub use scroll::{ScrollBridge, ScrollEvent, ScrollState};
pub use settings::{Settings, Tunables, SETTING_KEYS};
pub use viewport::*;
