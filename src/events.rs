use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A DOM event listener that is removed when dropped.
pub struct EventSubscription {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventSubscription {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::warn!("[events] cannot listen for `{event}`: {:?}", e);
                None
            }
        }
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Window-level `pointermove` forwarded as client coordinates.
pub fn wire_pointer_move(mut on_move: impl FnMut(f32, f32) + 'static) -> Option<EventSubscription> {
    let window = web::window()?;
    EventSubscription::new(window.as_ref(), "pointermove", move |ev| {
        if let Some(pe) = ev.dyn_ref::<web::PointerEvent>() {
            on_move(pe.client_x() as f32, pe.client_y() as f32);
        }
    })
}
