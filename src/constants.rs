// DOM integration constants for the web front-end.

// Discovery
pub const MEDIA_SELECTOR: &str = "img";
pub const IMAGE_SETTLE_EVENTS: [&str; 2] = ["load", "error"]; // either ends the wait
pub const SETTINGS_ATTR_PREFIX: &str = "data-scrollgl-"; // + kebab-case setting key

// Canvas sits behind the page content and never scrolls with it
pub const CANVAS_STYLE: &str = "position:fixed;top:0;left:0;z-index:-1;display:block;";

// Scroll engine event carrying `{ speed, scroll: { y } }`
pub const SCROLL_EVENT: &str = "scroll";

// Substitute texel for images whose pixels cannot be read (e.g. tainted by CORS)
pub const PLACEHOLDER_PIXEL: [u8; 4] = [200, 200, 200, 255];

// Debug pane bindings: (key, min, max)
pub const PANE_TIME_STEP: (&str, f64, f64) = ("timeStep", 0.001, 0.5); // must stay > 0
pub const PANE_SPEED_SMOOTHING: (&str, f64, f64) = ("speedSmoothing", 1.0, 20.0);
pub const PANE_HOVER_EASE: (&str, f64, f64) = ("hoverEase", 0.0, 1.0);
