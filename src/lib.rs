#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod debug;
mod dom;
mod events;
mod render;
mod resize;
mod scheduler;
mod scroll;
mod sketch;

pub use debug::Pane;
pub use scroll::ScrollEngine;
pub use sketch::Sketch;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scrollgl-web starting");
    Ok(())
}

/// Page bootstrap: build a [`Sketch`] over `container`, start its loop as
/// soon as it is initialized and keep it sized to the window.
#[wasm_bindgen]
pub fn mount(container: web::HtmlElement, scroll: ScrollEngine, pane: Option<Pane>) -> Sketch {
    let sketch = Sketch::new(container, scroll, pane);
    sketch.run();
    sketch.watch_window_resize();
    sketch
}
