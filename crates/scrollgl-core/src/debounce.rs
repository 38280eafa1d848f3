use instant::{Duration, Instant};

/// Collapses a burst of triggers into a single action that fires once
/// `delay` has elapsed since the last trigger.
///
/// The host arms a timer of `delay` on every trigger and calls
/// [`Debounce::poll`] when it fires; stale timers from earlier in the burst
/// see an unexpired deadline and do nothing.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn from_millis(ms: u32) -> Self {
        Self::new(Duration::from_millis(ms as u64))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start or restart the delay window.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per burst, when `now` has reached the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, `None` when not armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|d| if d > now { d - now } else { Duration::ZERO })
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
