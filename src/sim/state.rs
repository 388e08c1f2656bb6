//! Entities and arena state
//!
//! The arena owns every piece of mutable simulation state. Entities are
//! plain structs; the shared overlap capability comes from `HasBounds`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Axis, HasBounds, reflect};
use crate::consts::MAX_TIER;
use crate::settings::Settings;

/// Brick strength category; also selects the display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tier(u8);

impl Tier {
    /// Tier for a brick with `hits` remaining (None outside 1..=3)
    pub fn new(hits: u8) -> Option<Self> {
        (1..=MAX_TIER).contains(&hits).then_some(Self(hits))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// RGB color for this tier
    pub fn color(&self) -> u32 {
        match self.0 {
            1 => 0x4535AA,
            2 => 0xED639E,
            _ => 0x8FE1A2,
        }
    }
}

/// Result of advancing the ball by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallUpdate {
    Moved,
    /// Bottom edge reached the arena floor; the ball did not move
    Lost,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    /// Unit components (each ±1); displacement is `direction * speed`
    pub direction: Vec2,
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, direction: Vec2, speed: f32) -> Self {
        Self {
            pos,
            radius,
            direction,
            speed,
        }
    }

    /// Displacement applied by one tick
    #[inline]
    pub fn step(&self) -> Vec2 {
        self.direction * self.speed
    }

    /// Bounce off walls using the current box, then move unless escaped
    pub fn update(&mut self, arena_width: f32, arena_height: f32) -> BallUpdate {
        let bounds = self.bounds();

        if bounds.left <= 0.0 || bounds.right >= arena_width {
            self.direction = reflect(self.direction, Axis::X);
        }
        if bounds.top <= 0.0 {
            self.direction = reflect(self.direction, Axis::Y);
        }
        if bounds.bottom >= arena_height {
            return BallUpdate::Lost;
        }

        self.pos += self.step();
        BallUpdate::Moved
    }

    /// Send the ball upward off the paddle and speed it up
    pub fn bounce_off_paddle(&mut self, increment: f32, max_speed: f32) {
        self.direction.y = -self.direction.y.abs();
        self.speed = (self.speed + increment).min(max_speed).max(self.speed);
    }
}

impl HasBounds for Ball {
    /// Enclosing square of the circle
    fn bounds(&self) -> Aabb {
        let size = self.radius * 2.0;
        Aabb::from_center(self.pos, size, size)
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center; y never changes
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self { pos, width, height }
    }

    /// Shift horizontally, clamped so the paddle stays within `[0, arena_width]`
    pub fn move_by(&mut self, offset: f32, arena_width: f32) {
        let half = self.width / 2.0;
        self.pos.x = (self.pos.x + offset).clamp(half, arena_width - half);
    }

    /// Top edge, where a new ball is served from
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }
}

impl HasBounds for Paddle {
    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.width, self.height)
    }
}

/// A brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub hits_remaining: u8,
}

impl Brick {
    /// Take one hit; returns true once the brick is used up
    pub fn hit(&mut self) -> bool {
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        self.hits_remaining == 0
    }

    /// Current tier (None once destroyed)
    pub fn tier(&self) -> Option<Tier> {
        Tier::new(self.hits_remaining)
    }
}

impl HasBounds for Brick {
    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.width, self.height)
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub paddle: Paddle,
    /// At most one ball in play
    pub ball: Option<Ball>,
    /// Active bricks, kept sorted by id
    pub bricks: Vec<Brick>,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Lives left; -1 only once the game is over
    pub lives: i32,
    /// Next entity ID
    next_id: u32,
}

impl Arena {
    /// Empty arena with the paddle centered; no ball, no bricks
    pub fn new(settings: &Settings) -> Self {
        let paddle = Paddle::new(
            Vec2::new(settings.arena_width / 2.0, settings.paddle_y),
            settings.paddle_width,
            settings.paddle_height,
        );
        Self {
            width: settings.arena_width,
            height: settings.arena_height,
            paddle,
            ball: None,
            bricks: Vec::new(),
            level: 1,
            score: 0,
            lives: settings.lives,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace any ball with a fresh one resting above the paddle
    pub fn spawn_ball(&mut self, radius: f32, gap: f32, direction: Vec2, speed: f32) {
        let pos = Vec2::new(self.paddle.pos.x, self.paddle.top() - gap - radius);
        self.ball = Some(Ball::new(pos, radius, direction, speed));
    }

    /// Keep bricks sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bricks.sort_by_key(|b| b.id);
    }

    pub fn is_cleared(&self) -> bool {
        self.bricks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32, direction: Vec2) -> Ball {
        Ball::new(Vec2::new(x, y), 10.0, direction, 5.0)
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(Tier::new(1).map(|t| t.color()), Some(0x4535AA));
        assert_eq!(Tier::new(2).map(|t| t.color()), Some(0xED639E));
        assert_eq!(Tier::new(3).map(|t| t.color()), Some(0x8FE1A2));
        assert_eq!(Tier::new(0), None);
        assert_eq!(Tier::new(4), None);
    }

    #[test]
    fn test_ball_moves_by_direction_times_speed() {
        let mut ball = ball_at(250.0, 250.0, Vec2::new(1.0, -1.0));
        assert_eq!(ball.update(500.0, 500.0), BallUpdate::Moved);
        assert_eq!(ball.pos, Vec2::new(255.0, 245.0));
    }

    #[test]
    fn test_ball_bounces_off_side_walls_before_moving() {
        // Left edge exactly on the wall
        let mut ball = ball_at(10.0, 250.0, Vec2::new(-1.0, -1.0));
        ball.update(500.0, 500.0);
        assert_eq!(ball.direction, Vec2::new(1.0, -1.0));
        assert_eq!(ball.pos, Vec2::new(15.0, 245.0));

        let mut ball = ball_at(491.0, 250.0, Vec2::new(1.0, 1.0));
        ball.update(500.0, 500.0);
        assert_eq!(ball.direction.x, -1.0);
    }

    #[test]
    fn test_ball_bounces_off_ceiling() {
        let mut ball = ball_at(250.0, 9.0, Vec2::new(1.0, -1.0));
        ball.update(500.0, 500.0);
        assert_eq!(ball.direction, Vec2::new(1.0, 1.0));
        assert_eq!(ball.pos, Vec2::new(255.0, 14.0));
    }

    #[test]
    fn test_ball_lost_does_not_move() {
        let mut ball = ball_at(250.0, 490.0, Vec2::new(1.0, 1.0));
        assert_eq!(ball.update(500.0, 500.0), BallUpdate::Lost);
        assert_eq!(ball.pos, Vec2::new(250.0, 490.0));
    }

    #[test]
    fn test_paddle_bounce_points_up_and_caps_speed() {
        let mut ball = ball_at(250.0, 465.0, Vec2::new(1.0, 1.0));
        ball.bounce_off_paddle(0.1, 12.0);
        assert_eq!(ball.direction, Vec2::new(1.0, -1.0));
        assert!((ball.speed - 5.1).abs() < 1e-5);

        // Already rising: stays rising
        ball.bounce_off_paddle(0.1, 12.0);
        assert_eq!(ball.direction.y, -1.0);

        ball.speed = 11.95;
        ball.bounce_off_paddle(0.1, 12.0);
        assert_eq!(ball.speed, 12.0);
    }

    #[test]
    fn test_paddle_move_clamps() {
        let mut paddle = Paddle::new(Vec2::new(250.0, 480.0), 100.0, 10.0);
        paddle.move_by(20.0, 500.0);
        assert_eq!(paddle.pos.x, 270.0);

        paddle.move_by(1000.0, 500.0);
        assert_eq!(paddle.pos.x, 450.0);
        assert_eq!(paddle.bounds().right, 500.0);

        paddle.move_by(-1000.0, 500.0);
        assert_eq!(paddle.bounds().left, 0.0);
        assert_eq!(paddle.pos.y, 480.0);
    }

    #[test]
    fn test_brick_hits_and_tier() {
        let mut brick = Brick {
            id: 1,
            pos: Vec2::new(100.0, 50.0),
            width: 60.0,
            height: 20.0,
            hits_remaining: 3,
        };
        assert!(!brick.hit());
        assert_eq!(brick.tier().map(|t| t.get()), Some(2));
        assert!(!brick.hit());
        assert_eq!(brick.tier().map(|t| t.get()), Some(1));
        assert!(brick.hit());
        assert_eq!(brick.tier(), None);
    }

    #[test]
    fn test_spawn_ball_above_paddle() {
        let mut arena = Arena::new(&Settings::default());
        arena.spawn_ball(10.0, 5.0, Vec2::new(1.0, -1.0), 5.0);
        let ball = arena.ball.as_ref().unwrap();
        assert_eq!(ball.pos, Vec2::new(250.0, 460.0));
        assert!(!ball.intersects(&arena.paddle));
    }
}
