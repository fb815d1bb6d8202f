//! Engine composition root
//!
//! Owns the physics world, the session state machine, the timer queue and
//! the master RNG, and routes every input operation through them in a fixed
//! order. One `step` call is one physics tick: due timers fire first (in
//! deadline order), then the world integrates.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::body::Bounds;
use super::evasion::{self, EvasionDecision};
use super::session::{Expression, SessionState};
use super::timer::{TimerClass, TimerQueue};
use super::world::PhysicsWorld;
use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyProfile};

/// Presentation cues emitted by the engine
///
/// Hints for a renderer's one-shot effects (shake, confetti, sounds); all
/// durable state lives in the frame snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The target bolted away from the pointer
    Fled,
    /// A capture landed, worth `gain` points
    Captured { gain: u32 },
    /// The capture lock expired and the target respawned
    LockExpired,
}

/// Read-only per-frame state published to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub position: Vec2,
    pub angle: f32,
    pub expression: Expression,
    pub score: u64,
    /// Most recent gain while its display window is open
    pub score_delta: Option<u32>,
    pub capture_locked: bool,
}

/// The interaction engine for one session
pub struct Engine {
    world: PhysicsWorld,
    session: SessionState,
    difficulty: Difficulty,
    timers: TimerQueue,
    rng: Pcg32,
    events: Vec<EngineEvent>,
}

impl Engine {
    /// Create an engine for a validated play area
    pub fn new(bounds: Bounds, difficulty: Difficulty, seed: u64) -> Self {
        log::info!(
            "engine up: {}x{} play area, {} difficulty",
            bounds.width,
            bounds.height,
            difficulty.as_str()
        );
        Self {
            world: PhysicsWorld::new(bounds),
            session: SessionState::new(),
            difficulty,
            timers: TimerQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Advance one fixed physics tick at `now_ms`
    pub fn step(&mut self, now_ms: f64) {
        while let Some(class) = self.timers.pop_due(now_ms) {
            self.fire_timer(class);
        }
        self.world.step(&mut self.rng);
    }

    fn fire_timer(&mut self, class: TimerClass) {
        match class {
            TimerClass::ExpressionRevert => self.session.revert_expression(),
            TimerClass::CaptureLockExpiry => {
                self.session.end_capture_lock();
                let position = self.world.random_spawn(&mut self.rng);
                let velocity = Vec2::new(
                    (self.rng.random::<f32>() - 0.5) * TELEPORT_BOUNCE,
                    (self.rng.random::<f32>() - 0.5) * TELEPORT_BOUNCE,
                );
                let spin = (self.rng.random::<f32>() - 0.5) * TELEPORT_SPIN;
                self.world.teleport(position, velocity, spin);
                self.events.push(EngineEvent::LockExpired);
                log::debug!("capture lock expired, respawned at {position}");
            }
            TimerClass::ScoreDeltaClear => self.session.clear_score_delta(),
            TimerClass::HardExtraImpulse => {
                let kick = evasion::extra_kick(self.world.body_mass(), &mut self.rng);
                self.world.apply_impulse(kick);
            }
        }
    }

    /// Feed one pointer/touch sample
    ///
    /// On a flee the cooldown stamp is recorded before the impulse goes out,
    /// so two qualifying samples in one tick trigger exactly once.
    pub fn pointer_sample(&mut self, pointer: Vec2, now_ms: f64) -> EvasionDecision {
        let decision = evasion::evaluate(
            pointer,
            self.world.position(),
            &self.session,
            self.profile(),
            now_ms,
        );
        if decision.flee {
            self.session.begin_flee(now_ms);
            self.timers
                .schedule(TimerClass::ExpressionRevert, now_ms + EXPRESSION_REVERT_MS);

            let flee = evasion::flee_impulse(self.profile(), self.world.body_mass(), &mut self.rng);
            self.world.apply_impulse(flee.impulse);
            self.world.set_angular_velocity(flee.spin);

            if self.difficulty == Difficulty::Hard {
                self.timers
                    .schedule(TimerClass::HardExtraImpulse, now_ms + HARD_EXTRA_DELAY_MS);
            }

            self.events.push(EngineEvent::Fled);
            log::debug!("fled from pointer at {pointer}");
        }
        decision
    }

    /// Attempt a capture; returns whether it landed
    ///
    /// A no-op while the capture lock is held.
    pub fn capture(&mut self, now_ms: f64) -> bool {
        if self.session.capture_locked() {
            return false;
        }
        let gain = self.profile().score_value;
        self.session.begin_capture(gain);
        self.timers.cancel(TimerClass::ExpressionRevert);
        self.timers
            .schedule(TimerClass::CaptureLockExpiry, now_ms + CAPTURE_LOCK_MS);
        self.timers
            .schedule(TimerClass::ScoreDeltaClear, now_ms + SCORE_DELTA_MS);
        self.events.push(EngineEvent::Captured { gain });
        log::debug!("captured for {gain}, score now {}", self.session.score());
        true
    }

    /// Zero the score; everything else keeps running
    pub fn reset(&mut self) {
        self.session.reset();
        self.timers.cancel(TimerClass::ScoreDeltaClear);
        log::info!("score reset");
    }

    /// Switch profiles mid-session
    ///
    /// Clears the evasion cooldown and calms the expression; the score and
    /// any running capture lock are untouched.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.session.on_difficulty_switch();
        self.timers.cancel(TimerClass::ExpressionRevert);
        log::info!("difficulty -> {}", difficulty.as_str());
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[inline]
    pub fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }

    #[inline]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        self.world.bounds()
    }

    /// Disable or re-enable the cosmetic turbulence gusts
    pub fn set_turbulence(&mut self, on: bool) {
        self.world.turbulence = on;
    }

    /// The read-only state a renderer needs for this frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let pose = self.world.current_pose();
        FrameSnapshot {
            position: pose.position,
            angle: pose.angle,
            expression: self.session.expression(),
            score: self.session.score(),
            score_delta: self.session.score_delta(),
            capture_locked: self.session.capture_locked(),
        }
    }

    /// Take all presentation cues emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(difficulty: Difficulty) -> Engine {
        let mut engine = Engine::new(Bounds::new(800.0, 600.0).unwrap(), difficulty, 42);
        engine.set_turbulence(false);
        engine
    }

    fn center() -> Vec2 {
        Vec2::new(400.0, 300.0)
    }

    #[test]
    fn test_flee_sets_expression_and_kicks_body() {
        let mut e = engine(Difficulty::Normal);
        let decision = e.pointer_sample(center(), 0.0);
        assert!(decision.flee);
        assert_eq!(e.session().expression(), Expression::Fleeing);
        let snap = e.snapshot();
        assert_eq!(snap.expression, Expression::Fleeing);
        assert_eq!(e.drain_events(), vec![EngineEvent::Fled]);
    }

    #[test]
    fn test_expression_reverts_after_timeout() {
        let mut e = engine(Difficulty::Normal);
        e.pointer_sample(center(), 0.0);
        e.step(999.0);
        assert_eq!(e.session().expression(), Expression::Fleeing);
        e.step(1000.0);
        assert_eq!(e.session().expression(), Expression::Normal);
    }

    #[test]
    fn test_capture_scores_and_locks() {
        let mut e = engine(Difficulty::Normal);
        assert!(e.capture(0.0));
        let snap = e.snapshot();
        assert_eq!(snap.score, 3);
        assert_eq!(snap.score_delta, Some(3));
        assert!(snap.capture_locked);
        assert_eq!(snap.expression, Expression::Caught);
        assert_eq!(e.drain_events(), vec![EngineEvent::Captured { gain: 3 }]);
    }

    #[test]
    fn test_capture_while_locked_is_noop() {
        let mut e = engine(Difficulty::Normal);
        assert!(e.capture(0.0));
        e.drain_events();
        assert!(!e.capture(1000.0));
        let snap = e.snapshot();
        assert_eq!(snap.score, 3);
        assert_eq!(snap.expression, Expression::Caught);
        assert!(e.drain_events().is_empty());
    }

    #[test]
    fn test_lock_expiry_respawns_in_bounds() {
        let mut e = engine(Difficulty::Normal);
        e.capture(0.0);
        e.step(2999.0);
        assert!(e.session().capture_locked());
        e.step(3000.0);
        let snap = e.snapshot();
        assert!(!snap.capture_locked);
        assert_eq!(snap.expression, Expression::Normal);
        assert!(e.bounds().contains(snap.position));
        assert!(e.drain_events().contains(&EngineEvent::LockExpired));
    }

    #[test]
    fn test_score_delta_clears_after_display_window() {
        let mut e = engine(Difficulty::Normal);
        e.capture(0.0);
        e.step(1999.0);
        assert_eq!(e.snapshot().score_delta, Some(3));
        e.step(2000.0);
        assert_eq!(e.snapshot().score_delta, None);
    }

    #[test]
    fn test_evasion_suppressed_while_locked() {
        let mut e = engine(Difficulty::Normal);
        e.capture(0.0);
        let decision = e.pointer_sample(center(), 100.0);
        assert!(!decision.flee);
    }

    #[test]
    fn test_reset_only_zeroes_score() {
        let mut e = engine(Difficulty::Normal);
        e.capture(0.0);
        e.reset();
        let snap = e.snapshot();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.score_delta, None);
        assert!(snap.capture_locked);
        assert_eq!(snap.expression, Expression::Caught);
    }

    #[test]
    fn test_difficulty_switch_keeps_score_clears_cooldown() {
        let mut e = engine(Difficulty::Normal);
        e.pointer_sample(center(), 0.0);
        e.capture(10.0);
        e.step(3010.0); // lock expires, expression normal
        e.pointer_sample(e.snapshot().position, 3020.0); // flee, cooldown stamped

        e.set_difficulty(Difficulty::Hard);
        assert_eq!(e.session().last_escape_ms(), None);
        assert_eq!(e.session().expression(), Expression::Normal);
        assert_eq!(e.session().score(), 3);
        // Cooldown is gone: the very next qualifying sample flees
        let decision = e.pointer_sample(e.snapshot().position, 3021.0);
        assert!(decision.flee);
    }

    #[test]
    fn test_hard_mode_lands_extra_kick() {
        let mut a = engine(Difficulty::Hard);
        let mut b = engine(Difficulty::Hard);
        assert!(a.pointer_sample(center(), 0.0).flee);
        assert!(b.pointer_sample(center(), 0.0).flee);

        // a steps before the follow-up deadline, b after it
        a.step(50.0);
        b.step(150.0);
        let va = a.snapshot();
        let vb = b.snapshot();
        // Same seed, same flee; only the extra kick separates them
        assert_ne!(va.position, vb.position);
    }

    #[test]
    fn test_normal_mode_has_no_extra_kick() {
        let mut a = engine(Difficulty::Normal);
        let mut b = engine(Difficulty::Normal);
        assert!(a.pointer_sample(center(), 0.0).flee);
        assert!(b.pointer_sample(center(), 0.0).flee);
        a.step(50.0);
        b.step(150.0);
        assert_eq!(a.snapshot().position, b.snapshot().position);
    }

    #[test]
    fn test_flee_cooldown_triggers_once_per_window() {
        let mut e = engine(Difficulty::Normal);
        assert!(e.pointer_sample(center(), 0.0).flee);
        // Same tick, second qualifying sample: cooldown already stamped
        let body = e.snapshot().position;
        assert!(!e.pointer_sample(body, 0.0).flee);
        assert_eq!(e.drain_events(), vec![EngineEvent::Fled]);
    }
}
