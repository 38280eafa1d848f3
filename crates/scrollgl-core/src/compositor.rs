//! Orchestrates viewport, scroll, media planes and the render loop.

use crate::backend::{BackgroundUniforms, RenderBackend};
use crate::geometry::PlaneGeometry;
use crate::media::{MediaElement, MediaPlane, MediaPlaneRegistry};
use crate::render_loop::{LoopPhase, RenderLoop, TickTrigger};
use crate::scheduler::FrameScheduler;
use crate::scroll::{ScrollBridge, ScrollEvent, ScrollState};
use crate::settings::{Settings, Tunables};
use crate::viewport::{CameraState, ViewportController, ViewportState};

/// Composites a fixed set of media elements as planes over their DOM
/// positions.
///
/// Every mutation happens through `&mut self` on the host UI thread; the
/// host funnels both the frame scheduler and scroll events into
/// [`Compositor::tick`].
pub struct Compositor<E, B, S> {
    settings: Settings,
    viewport: ViewportController,
    scroll: ScrollBridge,
    registry: MediaPlaneRegistry<E>,
    render_loop: RenderLoop,
    backend: B,
    scheduler: S,
    layout_dirty: bool,
}

impl<E, B, S> Compositor<E, B, S>
where
    E: MediaElement,
    B: RenderBackend<E>,
    S: FrameScheduler,
{
    /// Create one plane per element. Layout-dependent state is established
    /// by the first [`Compositor::resize`].
    pub fn new<I>(settings: Settings, elements: I, mut backend: B, scheduler: S) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let viewport = ViewportController::new(
            settings.camera_distance,
            settings.near,
            settings.far,
            settings.max_pixel_ratio,
        );
        let template = PlaneGeometry::new(settings.plane_segments);
        let registry = MediaPlaneRegistry::discover(elements, template, &mut backend);
        Self {
            settings,
            viewport,
            scroll: ScrollBridge::new(),
            registry,
            render_loop: RenderLoop::new(),
            backend,
            scheduler,
            layout_dirty: true,
        }
    }

    /// Re-derive every layout-dependent value from current measurements.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        if self.render_loop.is_destroyed() {
            return;
        }
        let surface = match self.viewport.resize(width, height, device_pixel_ratio) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[viewport] resize skipped: {e}");
                return;
            }
        };
        log::debug!(
            "[viewport] {}x{} css, {}x{} px, fov {:.3}",
            width,
            height,
            surface.width,
            surface.height,
            self.viewport.camera().fov_degrees
        );
        self.backend.resize_surface(surface);
        self.backend.set_camera(self.viewport.camera());
        self.refresh_layout();
        self.backend.set_background_uniforms(&BackgroundUniforms::new(
            self.viewport.resolution(),
            self.scroll.state().speed,
        ));
    }

    /// Start the render loop. No-op unless idle.
    pub fn run(&mut self) -> bool {
        let started = self.render_loop.run(&mut self.scheduler);
        if started {
            log::info!("[loop] running with {} planes", self.registry.len());
        }
        started
    }

    /// Apply a scroll event and render immediately so visuals never trail
    /// the scroll engine.
    pub fn on_scroll(&mut self, ev: ScrollEvent) -> bool {
        if self.render_loop.is_destroyed() || !self.scroll.apply(ev) {
            return false;
        }
        self.layout_dirty = true;
        self.tick(TickTrigger::External)
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        if self.render_loop.is_destroyed() {
            return;
        }
        self.registry.pointer_move(client_x, client_y);
    }

    /// The single render entry point. Returns whether a frame was rendered.
    pub fn tick(&mut self, trigger: TickTrigger) -> bool {
        if !self.render_loop.begin_tick(trigger, &mut self.scheduler) {
            return false;
        }
        let time = self.render_loop.advance(self.settings.time_step);
        let speed = self.scroll.smooth(self.settings.speed_smoothing);
        if self.layout_dirty {
            self.refresh_layout();
        }
        self.registry.ease_hover(self.settings.hover_ease);

        let resolution = self.viewport.resolution();
        let offset_y = self.scroll.state().offset_y;
        for plane in self.registry.planes() {
            let u = plane.uniforms(time, speed, resolution, offset_y);
            self.backend.set_plane_uniforms(plane.handle(), &u);
        }
        self.backend
            .set_background_uniforms(&BackgroundUniforms::new(resolution, speed));
        self.backend.render();
        self.render_loop.end_tick(&mut self.scheduler);
        true
    }

    /// Stop rendering for good, detach all planes and release the backend.
    /// Idempotent.
    pub fn destroy(&mut self) {
        if !self.render_loop.destroy() {
            return;
        }
        self.registry.clear(&mut self.backend);
        self.backend.release();
        log::info!("[compositor] destroyed");
    }

    pub fn set_tunables(&mut self, tunables: Tunables) {
        self.settings.set_tunables(tunables);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn viewport(&self) -> Option<ViewportState> {
        self.viewport.state()
    }
    pub fn camera(&self) -> &CameraState {
        self.viewport.camera()
    }
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }
    pub fn planes(&self) -> &[MediaPlane<E>] {
        self.registry.planes()
    }
    pub fn phase(&self) -> LoopPhase {
        self.render_loop.phase()
    }
    pub fn time(&self) -> f32 {
        self.render_loop.time()
    }
    pub fn is_destroyed(&self) -> bool {
        self.render_loop.is_destroyed()
    }
    pub fn backend(&self) -> &B {
        &self.backend
    }
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn refresh_layout(&mut self) {
        // Until the first successful resize there is nothing to map against.
        let Some(viewport) = self.viewport.state() else {
            return;
        };
        self.registry
            .update_all(&viewport, self.scroll.state().offset_y, &mut self.backend);
        self.layout_dirty = false;
    }
}
