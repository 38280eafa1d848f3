use crate::constants::*;
use js_sys::{Object, Reflect};
use scrollgl_core::Tunables;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Debug control pane (Tweakpane-style `addBinding(target, key, params)`).
    pub type Pane;

    #[wasm_bindgen(method, catch, js_name = addBinding)]
    fn add_binding(this: &Pane, target: &Object, key: &str, params: &Object) -> Result<JsValue, JsValue>;
}

/// Live tunables exposed through the pane. The pane edits a plain JS object
/// in place; [`DebugPane::tunables`] reads it back once per frame.
pub struct DebugPane {
    _pane: Pane,
    params: Object,
}

fn set_number(obj: &Object, key: &str, value: f64) {
    _ = Reflect::set(obj, &JsValue::from_str(key), &JsValue::from_f64(value));
}

fn get_number(obj: &Object, key: &str) -> Option<f64> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

impl DebugPane {
    pub fn bind(pane: Pane, initial: Tunables) -> Self {
        let params = Object::new();
        set_number(&params, PANE_TIME_STEP.0, initial.time_step as f64);
        set_number(&params, PANE_SPEED_SMOOTHING.0, initial.speed_smoothing as f64);
        set_number(&params, PANE_HOVER_EASE.0, initial.hover_ease as f64);
        for (key, min, max) in [PANE_TIME_STEP, PANE_SPEED_SMOOTHING, PANE_HOVER_EASE] {
            let opts = Object::new();
            set_number(&opts, "min", min);
            set_number(&opts, "max", max);
            if let Err(e) = pane.add_binding(&params, key, &opts) {
                log::warn!("[debug] cannot bind `{key}`: {:?}", e);
            }
        }
        Self {
            _pane: pane,
            params,
        }
    }

    pub fn tunables(&self, current: Tunables) -> Tunables {
        let read = |key: &str, fallback: f32| {
            get_number(&self.params, key)
                .map(|v| v as f32)
                .unwrap_or(fallback)
        };
        Tunables {
            time_step: read(PANE_TIME_STEP.0, current.time_step),
            speed_smoothing: read(PANE_SPEED_SMOOTHING.0, current.speed_smoothing),
            hover_ease: read(PANE_HOVER_EASE.0, current.hover_ease),
        }
    }
}
