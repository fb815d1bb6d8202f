//! Minimal rigid-body world for the target
//!
//! One dynamic body under gentle gravity inside four boundary walls. The
//! integrator is deliberately small: semi-implicit Euler with per-step drag,
//! and wall contact resolved by clamping the body's half-extent box to the
//! play area with restitution on the normal component and friction on the
//! tangential one. Walls are modeled as an infinitely thick band, so the
//! body cannot tunnel out at any speed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::body::{Body, Bounds};
use crate::consts::*;

/// Read-only pose snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
}

/// Owner of the dynamic body and its integration
///
/// The body is mutated only by [`step`](PhysicsWorld::step) and by the
/// explicit impulse/teleport/spin calls; callers read poses, never body
/// internals.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    bounds: Bounds,
    body: Body,
    /// Cosmetic random gusts; disable for bit-exact stepping
    pub turbulence: bool,
}

impl PhysicsWorld {
    /// Create a world with the target body centered in `bounds`
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            body: Body::new(bounds.center()),
            turbulence: true,
        }
    }

    /// Advance exactly one fixed tick
    pub fn step(&mut self, rng: &mut Pcg32) {
        let dt = SIM_DT;
        let body = &mut self.body;

        body.velocity.y += GRAVITY_Y * dt;

        // Tiny gust so the body looks alive even when nobody is chasing it
        if self.turbulence && rng.random_bool(TURBULENCE_CHANCE) {
            body.velocity += Vec2::new(
                (rng.random::<f32>() - 0.5) * TURBULENCE_KICK,
                (rng.random::<f32>() - 0.5) * TURBULENCE_KICK,
            );
        }

        body.velocity *= 1.0 - body.air_friction;
        body.angular_velocity *= 1.0 - body.air_friction;

        body.position += body.velocity * dt;
        body.angle += body.angular_velocity * dt;

        self.resolve_walls();
    }

    /// Reflect off any play-area edge the body has crossed
    fn resolve_walls(&mut self) {
        let body = &mut self.body;
        let restitution = body.restitution.max(WALL_RESTITUTION);
        let friction = body.friction.min(WALL_FRICTION);
        let min = body.half_extents;
        let max = Vec2::new(self.bounds.width, self.bounds.height) - body.half_extents;

        let mut bounce_x = false;
        let mut bounce_y = false;

        if body.position.x < min.x {
            body.position.x = min.x;
            bounce_x = body.velocity.x < 0.0;
        } else if body.position.x > max.x {
            body.position.x = max.x;
            bounce_x = body.velocity.x > 0.0;
        }
        if body.position.y < min.y {
            body.position.y = min.y;
            bounce_y = body.velocity.y < 0.0;
        } else if body.position.y > max.y {
            body.position.y = max.y;
            bounce_y = body.velocity.y > 0.0;
        }

        if bounce_x {
            body.velocity.x = -body.velocity.x * restitution;
            body.velocity.y *= 1.0 - friction;
        }
        if bounce_y {
            body.velocity.y = -body.velocity.y * restitution;
            body.velocity.x *= 1.0 - friction;
        }
        if bounce_x || bounce_y {
            // Scraping a wall bleeds off some spin
            body.angular_velocity *= 1.0 - friction;
        }
    }

    /// Add a linear impulse (momentum units) at the center of mass
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        let body = &mut self.body;
        body.velocity += impulse / body.mass();
    }

    /// Overwrite the spin instantaneously
    ///
    /// Not integrated through the step: this is the flourish that makes the
    /// button twirl away.
    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.body.angular_velocity = angular_velocity;
    }

    /// Relocate the body and reset its kinematics in one move
    ///
    /// Skips collision response for this call; the target position is
    /// clamped into the play area instead.
    pub fn teleport(&mut self, position: Vec2, velocity: Vec2, angular_velocity: f32) {
        let body = &mut self.body;
        let min = body.half_extents;
        let max = Vec2::new(self.bounds.width, self.bounds.height) - body.half_extents;
        body.position = position.clamp(min, max);
        body.velocity = velocity;
        body.angular_velocity = angular_velocity;
    }

    /// Current pose snapshot
    pub fn current_pose(&self) -> Pose {
        Pose {
            position: self.body.position,
            angle: self.body.angle,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    #[inline]
    pub fn body_mass(&self) -> f32 {
        self.body.mass()
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// A uniformly random spawn position fully inside the walls
    pub fn random_spawn(&self, rng: &mut Pcg32) -> Vec2 {
        let half = self.body.half_extents;
        Vec2::new(
            half.x + rng.random::<f32>() * (self.bounds.width - half.x * 2.0),
            half.y + rng.random::<f32>() * (self.bounds.height - half.y * 2.0),
        )
    }
}
