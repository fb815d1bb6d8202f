//! Fixed-timestep frame driver
//!
//! The host calls [`advance`](GameLoop::advance) once per display frame with
//! the wall-clock interval since the previous frame; the loop converts that
//! variable interval into zero or more fixed engine ticks and hands back the
//! frame snapshot. Input forwarders stamp the loop's own clock so event
//! timing and physics share one timeline.

use glam::Vec2;

use crate::consts::*;
use crate::difficulty::Difficulty;
use crate::sim::{Engine, EngineEvent, EvasionDecision, FrameSnapshot};

/// Drives an [`Engine`] at a fixed logical rate
///
/// `start`/`stop` are idempotent. While stopped, `advance` does nothing, so
/// a host can keep its frame callback wired up across pauses. Dropping the
/// loop drops the engine and every pending delayed transition with it.
pub struct GameLoop {
    engine: Engine,
    running: bool,
    accumulator: f32,
    now_ms: f64,
}

impl GameLoop {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            running: false,
            accumulator: 0.0,
            now_ms: 0.0,
        }
    }

    /// Begin ticking; a no-op if already running
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            log::info!("game loop started");
        }
    }

    /// Stop ticking; a no-op if already stopped
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("game loop stopped");
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The loop's logical clock (ms since start)
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Consume one display frame's interval and publish the frame snapshot
    ///
    /// Returns `None` while stopped. The interval is clamped to 100 ms and
    /// at most [`MAX_SUBSTEPS`] fixed ticks run per call, so a long hitch
    /// slows the simulation down instead of spiraling.
    pub fn advance(&mut self, frame_dt: f32) -> Option<FrameSnapshot> {
        if !self.running {
            return None;
        }

        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.now_ms += SIM_DT_MS;
            self.engine.step(self.now_ms);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        Some(self.engine.snapshot())
    }

    /// Feed a pointer/touch sample at the loop's current time
    pub fn pointer_sample(&mut self, pointer: Vec2) -> EvasionDecision {
        self.engine.pointer_sample(pointer, self.now_ms)
    }

    /// Attempt a capture at the loop's current time
    pub fn capture(&mut self) -> bool {
        self.engine.capture(self.now_ms)
    }

    /// Zero the score
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Switch difficulty profiles
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.engine.set_difficulty(difficulty);
    }

    /// Take pending presentation cues
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.engine.drain_events()
    }

    #[inline]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[inline]
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}
