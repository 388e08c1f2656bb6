//! Fixed timestep simulation step
//!
//! One call advances the ball once and resolves what it touched. Order
//! within a step is fixed: walls, escape, move, paddle, bricks.

use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Axis, HasBounds, reflect};
use super::state::{Arena, BallUpdate};
use crate::consts::BRICK_SCORE;
use crate::settings::Settings;

/// A brick struck during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickHit {
    pub id: u32,
    /// Box of the brick at the moment it was struck
    pub bounds: Aabb,
    /// Hits left after this one (0 = removed)
    pub hits_remaining: u8,
}

impl BrickHit {
    pub fn destroyed(&self) -> bool {
        self.hits_remaining == 0
    }
}

/// What one step did to the arena
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResult {
    /// Ball escaped past the paddle; nothing else was resolved
    pub ball_lost: bool,
    pub paddle_hit: bool,
    pub brick_hit: Option<BrickHit>,
    /// The brick hit this step emptied the board
    pub cleared: bool,
}

/// Advance the arena by one tick. A missing ball makes this a no-op.
pub fn step(arena: &mut Arena, settings: &Settings) -> StepResult {
    let mut result = StepResult::default();
    let (width, height) = (arena.width, arena.height);

    let Some(ball) = arena.ball.as_mut() else {
        return result;
    };

    if ball.update(width, height) == BallUpdate::Lost {
        result.ball_lost = true;
        return result;
    }

    // Paddle
    if ball.intersects(&arena.paddle) {
        ball.bounce_off_paddle(settings.paddle_speed_increment, settings.max_ball_speed);
        result.paddle_hit = true;
        log::debug!("Paddle hit, ball speed now {:.2}", ball.speed);
    }

    // Bricks: first overlap in id order wins, one per step
    let ball_box = ball.bounds();
    if let Some(idx) = arena.bricks.iter().position(|b| b.bounds().overlaps(&ball_box)) {
        let brick = &mut arena.bricks[idx];
        let bounds = brick.bounds();
        let destroyed = brick.hit();
        let hit = BrickHit {
            id: brick.id,
            bounds,
            hits_remaining: brick.hits_remaining,
        };
        if destroyed {
            arena.bricks.remove(idx);
        }

        ball.direction = reflect(ball.direction, Axis::Y);
        arena.score += BRICK_SCORE;
        log::debug!(
            "Brick {} hit ({} left), score {}",
            hit.id,
            hit.hits_remaining,
            arena.score
        );

        result.cleared = arena.is_cleared();
        result.brick_hit = Some(hit);
    }

    result
}
