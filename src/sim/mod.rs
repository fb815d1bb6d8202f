//! Deterministic simulation module
//!
//! All interaction logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Host-supplied timestamps, never wall-clock reads
//! - No rendering or platform dependencies

pub mod body;
pub mod engine;
pub mod evasion;
pub mod session;
pub mod timer;
pub mod world;

pub use body::{Body, Bounds};
pub use engine::{Engine, EngineEvent, FrameSnapshot};
pub use evasion::{EvasionDecision, FleeImpulse, evaluate, extra_kick, flee_impulse};
pub use session::{Expression, SessionState};
pub use timer::{TimerClass, TimerQueue};
pub use world::{PhysicsWorld, Pose};
