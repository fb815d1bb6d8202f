//! Nigeru headless demo
//!
//! Runs a scripted session in the terminal: a synthetic pointer chases the
//! button around an 800x600 play area at 60 fps wall clock, clicking
//! whenever it gets on top of it. Watch with `RUST_LOG=debug` to see every
//! flee; the periodic snapshot lines show the chase converging.

use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;

use nigeru::sim::{Bounds, Engine, EngineEvent};
use nigeru::{GameLoop, Settings};

/// How fast the scripted pointer moves (px/s)
const CHASE_SPEED: f32 = 420.0;
/// The pointer clicks when it gets this close to the body center (px)
const CLICK_RANGE: f32 = 12.0;
/// Total demo runtime
const DEMO_FRAMES: u32 = 60 * 20;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = Settings::load();
    let bounds = Bounds::new(800.0, 600.0)?;
    let seed = rand::random::<u64>();
    let engine = Engine::new(bounds, settings.difficulty, seed);

    let mut game = GameLoop::new(engine);
    game.start();

    let mut pointer = Vec2::new(40.0, 40.0);
    let mut last_frame = Instant::now();

    for frame in 0..DEMO_FRAMES {
        thread::sleep(Duration::from_micros(16_667));
        let now = Instant::now();
        let frame_dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        let Some(snapshot) = game.advance(frame_dt) else {
            break;
        };

        // Chase the button; while it is caught there is nothing to chase
        if !snapshot.capture_locked {
            let to_body = snapshot.position - pointer;
            let step = CHASE_SPEED * frame_dt;
            if to_body.length() > step {
                pointer += to_body.normalize() * step;
            } else {
                pointer = snapshot.position;
            }

            game.pointer_sample(pointer);
            if pointer.distance(snapshot.position) < CLICK_RANGE {
                game.capture();
            }
        }

        for event in game.drain_events() {
            match event {
                EngineEvent::Fled => log::debug!("the button slipped away"),
                EngineEvent::Captured { gain } => {
                    if settings.sound_enabled {
                        log::info!("caught it! +{gain} (applause)");
                    } else {
                        log::info!("caught it! +{gain}");
                    }
                }
                EngineEvent::LockExpired => log::debug!("button is back in play"),
            }
        }

        if frame % 60 == 0 {
            log::info!(
                "t={:>5.1}s score={} pos=({:>5.1},{:>5.1}) {:?}",
                game.now_ms() / 1000.0,
                snapshot.score,
                snapshot.position.x,
                snapshot.position.y,
                snapshot.expression,
            );
        }
    }

    game.stop();
    let final_score = game.engine().snapshot().score;
    log::info!(
        "demo over: {} points on {} difficulty",
        final_score,
        game.engine().difficulty().as_str()
    );
    Ok(())
}
