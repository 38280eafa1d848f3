//! Self-rescheduling render loop state machine.
//!
//! The loop does not render by itself; the compositor brackets each frame
//! with [`RenderLoop::begin_tick`] and [`RenderLoop::end_tick`]. Both the
//! scheduled path and the external (scroll) path go through `begin_tick`,
//! which cancels the outstanding scheduled frame so overlapping triggers
//! collapse into one render.

use crate::scheduler::FrameScheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    Idle,
    Running,
    /// Terminal.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickTrigger {
    /// Fired by the frame scheduler.
    Scheduled,
    /// Forced from outside the loop, e.g. by a scroll event.
    External,
}

#[derive(Debug)]
pub struct RenderLoop {
    phase: LoopPhase,
    destroyed: bool,
    pending: bool,
    in_tick: bool,
    time: f32,
    frames: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            phase: LoopPhase::Idle,
            destroyed: false,
            pending: false,
            in_tick: false,
            time: 0.0,
            frames: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
    pub fn has_pending(&self) -> bool {
        self.pending
    }
    pub fn time(&self) -> f32 {
        self.time
    }
    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Idle -> Running and schedule the first tick. Returns false (and does
    /// nothing) in any other phase or after destroy.
    pub fn run<S: FrameScheduler>(&mut self, scheduler: &mut S) -> bool {
        if self.phase != LoopPhase::Idle || self.destroyed {
            return false;
        }
        self.phase = LoopPhase::Running;
        self.pending = true;
        scheduler.schedule();
        true
    }

    /// Decide whether a tick may render. On `true` the caller must render
    /// exactly once and then call [`RenderLoop::end_tick`].
    pub fn begin_tick<S: FrameScheduler>(&mut self, trigger: TickTrigger, scheduler: &mut S) -> bool {
        if trigger == TickTrigger::Scheduled {
            // The request that fired this tick is no longer outstanding.
            self.pending = false;
        }
        if self.destroyed {
            if trigger == TickTrigger::Scheduled && self.phase == LoopPhase::Running {
                self.phase = LoopPhase::Stopped;
                log::info!("[loop] stopped after {} frames", self.frames);
            }
            return false;
        }
        if self.phase != LoopPhase::Running || self.in_tick {
            return false;
        }
        if self.pending {
            scheduler.cancel_pending();
            self.pending = false;
        }
        self.in_tick = true;
        true
    }

    /// Advance the time accumulator by a fixed step.
    #[inline]
    pub fn advance(&mut self, step: f32) -> f32 {
        self.time += step;
        self.time
    }

    pub fn end_tick<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if !self.in_tick {
            return;
        }
        self.in_tick = false;
        self.frames += 1;
        if self.destroyed || self.phase != LoopPhase::Running {
            return;
        }
        self.pending = true;
        scheduler.schedule();
    }

    /// Set the terminal flag. A running loop stops at its next scheduled
    /// tick; an idle loop stops immediately. Returns false when already
    /// destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        if self.phase == LoopPhase::Idle || (self.phase == LoopPhase::Running && !self.pending) {
            self.phase = LoopPhase::Stopped;
        }
        true
    }
}
