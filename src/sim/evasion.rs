//! Evasion decisions and flee impulses
//!
//! Given a pointer sample and the current body position, decide whether the
//! target should bolt, honoring the active profile's sensitivity radius and
//! cooldown. The decision itself is pure; the randomized launch vectors are
//! generated separately so the engine controls when the RNG is consumed.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::session::{Expression, SessionState};
use crate::consts::*;
use crate::difficulty::DifficultyProfile;

/// Outcome of evaluating one pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvasionDecision {
    pub flee: bool,
}

/// Decide whether a pointer sample at `now_ms` should trigger a flee
///
/// Never triggers while the capture lock is held. The cooldown is the
/// profile's escape delay, capped at [`FLEEING_COOLDOWN_CAP_MS`] while the
/// target is already mid-flee so it can keep dodging a pursuing pointer.
pub fn evaluate(
    pointer: Vec2,
    body_pos: Vec2,
    session: &SessionState,
    profile: &DifficultyProfile,
    now_ms: f64,
) -> EvasionDecision {
    if session.capture_locked() {
        return EvasionDecision { flee: false };
    }

    if let Some(last) = session.last_escape_ms() {
        let cooldown = if session.expression() == Expression::Fleeing {
            profile.escape_delay_ms.min(FLEEING_COOLDOWN_CAP_MS)
        } else {
            profile.escape_delay_ms
        };
        if now_ms - last < cooldown {
            return EvasionDecision { flee: false };
        }
    }

    EvasionDecision {
        flee: pointer.distance(body_pos) < profile.escape_distance,
    }
}

/// A randomized flee launch: linear impulse plus a spin flourish
#[derive(Debug, Clone, Copy)]
pub struct FleeImpulse {
    /// Linear impulse (momentum units)
    pub impulse: Vec2,
    /// Spin to overwrite on the body (rad/s)
    pub spin: f32,
}

/// Roll a flee launch for the given profile
///
/// Direction is uniform over the circle; magnitude is the profile's base
/// launch speed scaled up by as much as 40%, with a small constant upward
/// bias so the button tends to hop rather than burrow.
pub fn flee_impulse(profile: &DifficultyProfile, mass: f32, rng: &mut Pcg32) -> FleeImpulse {
    let angle = rng.random_range(0.0..TAU);
    let magnitude = profile.move_impulse * (1.0 + rng.random::<f32>() * FLEE_VARIANCE);
    let mut launch = Vec2::new(angle.cos(), angle.sin()) * magnitude;
    launch.y -= FLEE_UPWARD_BIAS;

    let spin_magnitude = rng.random_range(FLEE_SPIN_MIN..FLEE_SPIN_MAX);
    let spin = if rng.random_bool(0.5) {
        -spin_magnitude
    } else {
        spin_magnitude
    };

    FleeImpulse {
        impulse: launch * mass,
        spin,
    }
}

/// Roll hard difficulty's small delayed follow-up kick
pub fn extra_kick(mass: f32, rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        (rng.random::<f32>() - 0.5) * HARD_EXTRA_KICK,
        (rng.random::<f32>() - 0.5) * HARD_EXTRA_KICK,
    ) * mass
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn idle_session() -> SessionState {
        SessionState::new()
    }

    fn fled_at(ms: f64) -> SessionState {
        let mut session = SessionState::new();
        session.begin_flee(ms);
        session
    }

    #[test]
    fn test_first_sample_can_flee_immediately() {
        let profile = Difficulty::Normal.profile();
        let body = Vec2::new(400.0, 300.0);
        let decision = evaluate(body, body, &idle_session(), profile, 0.0);
        assert!(decision.flee);
    }

    #[test]
    fn test_cooldown_blocks_second_flee() {
        let profile = Difficulty::Normal.profile();
        let body = Vec2::new(400.0, 300.0);
        let mut session = fled_at(0.0);
        session.revert_expression();
        // Expression is back to normal, so the full 900 ms delay applies
        assert!(!evaluate(body, body, &session, profile, 500.0).flee);
        assert!(evaluate(body, body, &session, profile, 900.0).flee);
    }

    #[test]
    fn test_cooldown_is_capped_while_fleeing() {
        let profile = Difficulty::Normal.profile();
        let body = Vec2::new(400.0, 300.0);
        let session = fled_at(0.0);
        assert!(!evaluate(body, body, &session, profile, 99.0).flee);
        assert!(evaluate(body, body, &session, profile, 100.0).flee);
    }

    #[test]
    fn test_capture_lock_suppresses_evasion() {
        let profile = Difficulty::Normal.profile();
        let body = Vec2::new(400.0, 300.0);
        let mut session = idle_session();
        session.begin_capture(3);
        assert!(!evaluate(body, body, &session, profile, 10_000.0).flee);
    }

    #[test]
    fn test_extra_kick_is_small() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            let kick = extra_kick(1.0, &mut rng);
            assert!(kick.x.abs() <= HARD_EXTRA_KICK / 2.0);
            assert!(kick.y.abs() <= HARD_EXTRA_KICK / 2.0);
        }
    }

    proptest! {
        #[test]
        fn prop_never_flees_at_or_beyond_escape_distance(
            angle in 0.0f32..TAU,
            extra in 0.01f32..500.0,
        ) {
            let profile = Difficulty::Normal.profile();
            let body = Vec2::new(400.0, 300.0);
            let dist = profile.escape_distance + extra;
            let pointer = body + Vec2::new(angle.cos(), angle.sin()) * dist;
            let decision = evaluate(pointer, body, &idle_session(), profile, 0.0);
            prop_assert!(!decision.flee);
        }

        #[test]
        fn prop_flees_inside_escape_distance_once_cooldown_elapsed(
            angle in 0.0f32..TAU,
            frac in 0.0f32..0.95f32,
        ) {
            let profile = Difficulty::Normal.profile();
            let body = Vec2::new(400.0, 300.0);
            let pointer = body + Vec2::new(angle.cos(), angle.sin()) * (profile.escape_distance * frac);
            let decision = evaluate(pointer, body, &idle_session(), profile, 0.0);
            prop_assert!(decision.flee);
        }

        #[test]
        fn prop_cooldown_window_yields_exactly_one_flee(
            dt in 0.0f64..100.0,
        ) {
            // Two qualifying samples inside the capped window: only the first fires
            let profile = Difficulty::Normal.profile();
            let body = Vec2::new(400.0, 300.0);
            let mut session = idle_session();

            let first = evaluate(body, body, &session, profile, 0.0);
            prop_assert!(first.flee);
            session.begin_flee(0.0);

            let second = evaluate(body, body, &session, profile, dt * 0.999);
            prop_assert!(!second.flee);
        }

        #[test]
        fn prop_flee_launch_speed_is_within_variance_band(seed in 0u64..1000) {
            let profile = Difficulty::Hard.profile();
            let mut rng = Pcg32::seed_from_u64(seed);
            let flee = flee_impulse(profile, 1.0, &mut rng);
            // Speed before the upward bias is in [base, base * 1.4]
            let unbiased = flee.impulse + Vec2::new(0.0, FLEE_UPWARD_BIAS);
            let speed = unbiased.length();
            prop_assert!(speed >= profile.move_impulse * 0.999);
            prop_assert!(speed <= profile.move_impulse * (1.0 + FLEE_VARIANCE) * 1.001);
            prop_assert!(flee.spin.abs() >= FLEE_SPIN_MIN);
            prop_assert!(flee.spin.abs() <= FLEE_SPIN_MAX);
        }
    }
}
