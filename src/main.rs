//! Brick Breaker headless driver
//!
//! Plays one session on a fixed tick loop with the paddle chasing the ball,
//! then prints the final render snapshot as JSON. Optional argument: path
//! to a settings JSON file.

use std::path::PathBuf;

use brick_breaker::consts::TICK_MS;
use brick_breaker::{Session, SessionState, Settings};

/// Stop after this many ticks if the session has not ended
const MAX_TICKS: u64 = 100_000;

/// Paddle travel per tick, matching a held arrow key
const PADDLE_STEP: f32 = 20.0;

fn main() {
    env_logger::init();

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut session = match Session::new(settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut ticks = 0;
    while ticks < MAX_TICKS && !session.state().is_terminal() {
        match session.state() {
            SessionState::Ready => {
                session.start();
            }
            SessionState::BallLost => {
                session.respawn();
            }
            _ => {}
        }

        if let Some(ball) = session.arena().ball.as_ref() {
            let offset = (ball.pos.x - session.arena().paddle.pos.x).clamp(-PADDLE_STEP, PADDLE_STEP);
            session.move_paddle(offset);
        }

        let outcome = session.tick();
        if outcome.level_advanced {
            log::info!("Level {} after {} ticks", outcome.level, ticks);
        }
        ticks += 1;
    }

    log::info!(
        "Stopped in {:?} after {} ticks ({:.1}s simulated)",
        session.state(),
        ticks,
        (ticks * TICK_MS) as f64 / 1000.0
    );

    match serde_json::to_string_pretty(&session.render_state()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize render state: {}", e),
    }
}
