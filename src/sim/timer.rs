//! Cancellable scheduled transitions
//!
//! Delayed state changes (expression revert, capture-lock expiry, ...) are
//! deadlines in a fixed-slot queue rather than host timers: one slot per
//! class, so scheduling a class replaces whatever was pending for it and an
//! old deadline can never fire after a newer event superseded it. The queue
//! is plain data owned by the engine; dropping the engine drops every
//! pending deadline with it.

/// One slot per delayed-transition class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerClass {
    /// Fleeing expression reverts to normal
    ExpressionRevert,
    /// Capture lock clears and the body respawns
    CaptureLockExpiry,
    /// The last score gain stops being shown
    ScoreDeltaClear,
    /// Hard difficulty's delayed follow-up kick
    HardExtraImpulse,
}

const CLASS_COUNT: usize = 4;

const ALL_CLASSES: [TimerClass; CLASS_COUNT] = [
    TimerClass::ExpressionRevert,
    TimerClass::CaptureLockExpiry,
    TimerClass::ScoreDeltaClear,
    TimerClass::HardExtraImpulse,
];

/// Pending deadlines, at most one per class
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    deadlines: [Option<f64>; CLASS_COUNT],
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `class` to fire at `at_ms`, replacing any pending deadline
    pub fn schedule(&mut self, class: TimerClass, at_ms: f64) {
        self.deadlines[class as usize] = Some(at_ms);
    }

    /// Cancel a pending deadline; cancelling an empty slot is a no-op
    pub fn cancel(&mut self, class: TimerClass) {
        self.deadlines[class as usize] = None;
    }

    /// The pending deadline for `class`, if any
    pub fn pending(&self, class: TimerClass) -> Option<f64> {
        self.deadlines[class as usize]
    }

    /// Remove and return the earliest deadline that is due at `now_ms`
    ///
    /// Call in a loop to drain all due timers in deadline order.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<TimerClass> {
        let mut best: Option<(TimerClass, f64)> = None;
        for class in ALL_CLASSES {
            if let Some(at) = self.deadlines[class as usize] {
                if at <= now_ms && best.is_none_or(|(_, t)| at < t) {
                    best = Some((class, at));
                }
            }
        }
        let (class, _) = best?;
        self.deadlines[class as usize] = None;
        Some(class)
    }
}
