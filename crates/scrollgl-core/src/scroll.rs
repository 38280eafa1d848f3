//! Scroll state fed by the external smooth-scroll engine.

/// Payload of the engine's `scroll` event: `{ speed, scroll: { y } }`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollEvent {
    pub speed: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub speed_target: f32,
    pub speed: f32,
    pub offset_y: f32,
}

#[derive(Debug, Default)]
pub struct ScrollBridge {
    state: ScrollState,
    events: u64,
}

impl ScrollBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite target speed and offset verbatim. Non-finite values are
    /// dropped so a bad payload cannot poison the smoothed speed.
    pub fn apply(&mut self, ev: ScrollEvent) -> bool {
        if !(ev.speed.is_finite() && ev.y.is_finite()) {
            log::warn!("[scroll] ignoring non-finite event {:?}", ev);
            return false;
        }
        self.state.speed_target = ev.speed;
        self.state.offset_y = ev.y;
        self.events += 1;
        true
    }

    /// One tick of exponential smoothing toward the latest target.
    #[inline]
    pub fn smooth(&mut self, divisor: f32) -> f32 {
        let s = &mut self.state;
        s.speed += (s.speed_target - s.speed) / divisor;
        s.speed
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn event_count(&self) -> u64 {
        self.events
    }
}
