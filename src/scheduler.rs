use scrollgl_core::FrameScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame` scheduler. Every request invokes the same
/// callback; the id of the latest request is kept for cancellation.
pub struct RafScheduler {
    callback: Closure<dyn FnMut()>,
    handle: Option<i32>,
}

impl RafScheduler {
    pub fn new(mut on_frame: impl FnMut() + 'static) -> Self {
        Self {
            callback: Closure::wrap(Box::new(move || on_frame()) as Box<dyn FnMut()>),
            handle: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&mut self) {
        let Some(w) = web::window() else {
            return;
        };
        match w.request_animation_frame(self.callback.as_ref().unchecked_ref()) {
            Ok(id) => self.handle = Some(id),
            Err(e) => log::error!("[raf] request failed: {:?}", e),
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        // A frame firing after the closure is gone would throw.
        self.cancel_pending();
    }
}
