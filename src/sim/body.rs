//! Play-area bounds and the dynamic target body

use glam::Vec2;

use crate::consts::*;
use crate::error::EngineError;

/// Validated play-area dimensions
///
/// Construction is the only fallible step in setting up a simulation:
/// a `Bounds` value always describes a usable play area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Result<Self, EngineError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(EngineError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside the play area
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// The dynamic target body
///
/// Position is the body center; the collision footprint is the unrotated
/// half-extent box, which keeps the wall response independent of spin.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    /// Linear velocity (px/s)
    pub velocity: Vec2,
    /// Orientation (radians)
    pub angle: f32,
    /// Spin (rad/s)
    pub angular_velocity: f32,
    pub restitution: f32,
    pub friction: f32,
    /// Velocity fraction lost to drag each step
    pub air_friction: f32,
    pub density: f32,
    /// Half width / half height (px)
    pub half_extents: Vec2,
}

impl Body {
    /// A target body at rest at the given position
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            restitution: BUTTON_RESTITUTION,
            friction: BUTTON_FRICTION,
            air_friction: BUTTON_AIR_FRICTION,
            density: BUTTON_DENSITY,
            half_extents: Vec2::new(BUTTON_WIDTH / 2.0, BUTTON_HEIGHT / 2.0),
        }
    }

    /// Mass from density and footprint area
    #[inline]
    pub fn mass(&self) -> f32 {
        self.density * (self.half_extents.x * 2.0) * (self.half_extents.y * 2.0)
    }
}
