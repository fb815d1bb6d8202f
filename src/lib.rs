//! Nigeru - a button that runs away
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, evasion, session state)
//! - `game_loop`: Fixed-timestep frame driver
//! - `difficulty`: Named difficulty profiles
//! - `settings`: User preferences
//!
//! The crate is a pure interaction engine: it knows nothing about rendering,
//! sound playback or menus. A host feeds it pointer samples and capture
//! attempts, drives the loop once per display frame, and draws whatever the
//! frame snapshot says.

pub mod difficulty;
pub mod error;
pub mod game_loop;
pub mod settings;
pub mod sim;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::EngineError;
pub use game_loop::GameLoop;
pub use settings::Settings;

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Target body dimensions (px)
    pub const BUTTON_WIDTH: f32 = 120.0;
    pub const BUTTON_HEIGHT: f32 = 48.0;

    /// Target body material
    pub const BUTTON_RESTITUTION: f32 = 0.65;
    pub const BUTTON_FRICTION: f32 = 0.45;
    /// Velocity fraction lost to drag each step
    pub const BUTTON_AIR_FRICTION: f32 = 0.012;
    /// Mass = density * area
    pub const BUTTON_DENSITY: f32 = 0.001;

    /// Boundary wall material
    pub const WALL_RESTITUTION: f32 = 0.8;
    pub const WALL_FRICTION: f32 = 0.3;
    /// Nominal wall band (px), thick enough that the body cannot tunnel out
    pub const WALL_THICKNESS: f32 = 50.0;

    /// Gentle downward gravity (px/s^2)
    pub const GRAVITY_Y: f32 = 300.0;

    /// Per-step chance of a tiny cosmetic gust
    pub const TURBULENCE_CHANCE: f64 = 0.05;
    /// Gust velocity span per axis (px/s, centered on zero)
    pub const TURBULENCE_KICK: f32 = 1.5;

    /// Random flee-strength variance: magnitude scales by 1.0..=1.4
    pub const FLEE_VARIANCE: f32 = 0.4;
    /// Constant upward component subtracted from every flee launch (px/s)
    pub const FLEE_UPWARD_BIAS: f32 = 30.0;
    /// Flee spin magnitude range (rad/s, sign randomized)
    pub const FLEE_SPIN_MIN: f32 = 6.0;
    pub const FLEE_SPIN_MAX: f32 = 24.0;

    /// Hard difficulty lands one extra kick this long after a flee
    pub const HARD_EXTRA_DELAY_MS: f64 = 100.0;
    /// Extra-kick velocity span per axis (px/s, centered on zero)
    pub const HARD_EXTRA_KICK: f32 = 8.0;

    /// Fleeing expression reverts to normal after this long
    pub const EXPRESSION_REVERT_MS: f64 = 1000.0;
    /// While already fleeing, the evasion cooldown is capped at this
    pub const FLEEING_COOLDOWN_CAP_MS: f64 = 100.0;
    /// Post-capture window during which clicks and evasion are suppressed
    pub const CAPTURE_LOCK_MS: f64 = 3000.0;
    /// How long the last score gain stays visible in the snapshot
    pub const SCORE_DELTA_MS: f64 = 2000.0;
    /// Shake cue duration, for renderers reacting to a flee event
    pub const SHAKE_MS: f64 = 300.0;

    /// Post-teleport bounce velocity span per axis (px/s, centered on zero)
    pub const TELEPORT_BOUNCE: f32 = 120.0;
    /// Post-teleport spin span (rad/s, centered on zero)
    pub const TELEPORT_SPIN: f32 = 12.0;
}
