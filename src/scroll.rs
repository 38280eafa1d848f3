use crate::constants::SCROLL_EVENT;
use js_sys::Reflect;
use scrollgl_core::ScrollEvent;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Smooth-scroll engine handle. Only `on`/`off` event subscription is
    /// used; momentum and easing stay inside the engine.
    pub type ScrollEngine;

    #[wasm_bindgen(method, catch)]
    fn on(this: &ScrollEngine, event: &str, callback: &js_sys::Function) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn off(this: &ScrollEngine, event: &str, callback: &js_sys::Function) -> Result<(), JsValue>;
}

/// Read `{ speed, scroll: { y } }`. A missing speed counts as 0; a missing
/// offset makes the payload unusable.
pub fn parse_scroll_event(data: &JsValue) -> Option<ScrollEvent> {
    let speed = Reflect::get(data, &JsValue::from_str("speed"))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let scroll = Reflect::get(data, &JsValue::from_str("scroll")).ok()?;
    let y = Reflect::get(&scroll, &JsValue::from_str("y")).ok()?.as_f64()?;
    Some(ScrollEvent {
        speed: speed as f32,
        y: y as f32,
    })
}

/// Live subscription to the engine's scroll event; unsubscribes on drop.
pub struct ScrollSubscription {
    engine: ScrollEngine,
    closure: Closure<dyn FnMut(JsValue)>,
}

impl ScrollSubscription {
    pub fn subscribe(
        engine: &ScrollEngine,
        mut handler: impl FnMut(ScrollEvent) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(move |data: JsValue| match parse_scroll_event(&data) {
            Some(ev) => handler(ev),
            None => log::warn!("[scroll] malformed event payload: {:?}", data),
        }) as Box<dyn FnMut(JsValue)>);
        match engine.on(SCROLL_EVENT, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                engine: engine.clone(),
                closure,
            }),
            Err(e) => {
                log::error!("[scroll] subscribe failed: {:?}", e);
                None
            }
        }
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Err(e) = self
            .engine
            .off(SCROLL_EVENT, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("[scroll] unsubscribe failed: {:?}", e);
        }
    }
}
