// Default tunables shared by the core components and the web front-end.

// Camera
pub const CAMERA_DISTANCE: f32 = 300.0; // camera-to-plane distance, world units
pub const CAMERA_NEAR: f32 = 200.0;
pub const CAMERA_FAR: f32 = 1000.0;

// Surface
pub const MAX_PIXEL_RATIO: f32 = 2.0; // clamp for devicePixelRatio

// Render loop
pub const TIME_STEP: f32 = 0.05; // fixed per-tick advance of the `time` uniform
pub const SPEED_SMOOTHING: f32 = 3.0; // speed += (target - speed) / SPEED_SMOOTHING
pub const HOVER_EASE: f32 = 0.1; // fraction of the hover gap closed per tick

// Host resize handling
pub const RESIZE_DEBOUNCE_MS: u32 = 300;
pub const MAX_RESIZE_DEBOUNCE_MS: u32 = 60_000;

// Plane tessellation (quads per side)
pub const PLANE_SEGMENTS: u32 = 10;

// Neutral cover scale used when a media element has no usable natural size
pub const NEUTRAL_COVER_SCALE: [f32; 2] = [1.0, 1.0];
