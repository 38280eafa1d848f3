use crate::events::EventSubscription;
use instant::Instant;
use scrollgl_core::Debounce;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct ResizeTimer {
    debounce: Debounce,
    timeout_id: Option<i32>,
    fire: Option<Closure<dyn FnMut()>>,
}

impl ResizeTimer {
    /// (Re)arm the timeout for whatever is left of the debounce window.
    fn arm(&mut self, window: &web::Window, delay_ms: i32) {
        if let Some(id) = self.timeout_id.take() {
            window.clear_timeout_with_handle(id);
        }
        let Some(fire) = &self.fire else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            fire.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            Ok(id) => self.timeout_id = Some(id),
            Err(e) => log::warn!("[resize] setTimeout failed: {:?}", e),
        }
    }
}

/// Debounced window `resize`: each event restarts the delay and the handler
/// runs once the burst has been quiet for the whole delay.
pub struct ResizeSubscription {
    _listener: EventSubscription,
    timer: Rc<RefCell<ResizeTimer>>,
}

pub fn wire_debounced_resize(
    delay_ms: u32,
    mut on_resize: impl FnMut() + 'static,
) -> Option<ResizeSubscription> {
    let window = web::window()?;
    let timeout_ms = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    let timer = Rc::new(RefCell::new(ResizeTimer {
        debounce: Debounce::from_millis(delay_ms),
        timeout_id: None,
        fire: None,
    }));

    let weak: Weak<RefCell<ResizeTimer>> = Rc::downgrade(&timer);
    let fire = Closure::wrap(Box::new(move || {
        let Some(timer) = weak.upgrade() else {
            return;
        };
        let ready = {
            let mut t = timer.borrow_mut();
            t.timeout_id = None;
            let now = Instant::now();
            if t.debounce.poll(now) {
                true
            } else {
                // Timer fired a hair early; wait out the remainder.
                if let (Some(remaining), Some(w)) = (t.debounce.remaining(now), web::window()) {
                    t.arm(&w, i32::try_from(remaining.as_millis()).unwrap_or(i32::MAX - 1) + 1);
                }
                false
            }
        };
        if ready {
            on_resize();
        }
    }) as Box<dyn FnMut()>);
    timer.borrow_mut().fire = Some(fire);

    let listener_timer = timer.clone();
    let listener = EventSubscription::new(window.as_ref(), "resize", move |_ev| {
        let Some(w) = web::window() else {
            return;
        };
        let mut t = listener_timer.borrow_mut();
        t.debounce.trigger(Instant::now());
        t.arm(&w, timeout_ms);
    })?;

    Some(ResizeSubscription {
        _listener: listener,
        timer,
    })
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        let mut t = self.timer.borrow_mut();
        if let (Some(id), Some(w)) = (t.timeout_id.take(), web::window()) {
            w.clear_timeout_with_handle(id);
        }
        t.debounce.cancel();
    }
}
