//! Session state machine
//!
//! Tracks the target's expression (normal, fleeing, caught), the score, and
//! the capture lock. All mutation goes through the transition methods; the
//! engine owns the delayed transitions (expression revert, lock expiry) via
//! its timer queue.

use serde::Serialize;

/// The target's current expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    #[default]
    Normal,
    Fleeing,
    Caught,
}

/// Score, expression and capture-lock state for one session
///
/// Lives for the whole session; the score survives everything except an
/// explicit [`reset`](SessionState::reset).
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    expression: Expression,
    score: u64,
    /// When the last flee fired; `None` until the first flee and after a
    /// difficulty switch, which clears the cooldown entirely
    last_escape_ms: Option<f64>,
    capture_locked: bool,
    /// Most recent gain, shown to the player until its clear timer fires
    score_delta: Option<u32>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn expression(&self) -> Expression {
        self.expression
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn last_escape_ms(&self) -> Option<f64> {
        self.last_escape_ms
    }

    #[inline]
    pub fn capture_locked(&self) -> bool {
        self.capture_locked
    }

    #[inline]
    pub fn score_delta(&self) -> Option<u32> {
        self.score_delta
    }

    /// A flee fired at `now_ms`
    ///
    /// Records the cooldown stamp before any impulse is applied, so a second
    /// qualifying sample in the same tick cannot trigger again.
    pub(crate) fn begin_flee(&mut self, now_ms: f64) {
        self.last_escape_ms = Some(now_ms);
        self.expression = Expression::Fleeing;
    }

    /// The fleeing expression timed out
    pub(crate) fn revert_expression(&mut self) {
        self.expression = Expression::Normal;
    }

    /// A capture landed; caller must verify the lock is clear first
    pub(crate) fn begin_capture(&mut self, gain: u32) {
        self.score += u64::from(gain);
        self.score_delta = Some(gain);
        self.capture_locked = true;
        self.expression = Expression::Caught;
    }

    /// The capture lock expired
    pub(crate) fn end_capture_lock(&mut self) {
        self.capture_locked = false;
        self.expression = Expression::Normal;
    }

    pub(crate) fn clear_score_delta(&mut self) {
        self.score_delta = None;
    }

    /// Zero the score and drop the gain cue; expression and lock unchanged
    pub fn reset(&mut self) {
        self.score = 0;
        self.score_delta = None;
    }

    /// The player switched difficulty: clear the cooldown and calm the
    /// expression, but keep the score and any running capture lock
    pub(crate) fn on_difficulty_switch(&mut self) {
        self.last_escape_ms = None;
        self.expression = Expression::Normal;
    }
}
