//! Session state machine
//!
//! A `Session` owns the arena and sequences Ready, Playing, BallLost,
//! LevelTransition and the terminal Win/GameOver states around the
//! simulation step. The caller drives it with one `tick` per fixed step and
//! reads `render_state` between ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::Settings;
use crate::sim::{Aabb, Arena, HasBounds, generate_level, step};

pub use crate::sim::BrickHit;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for `start`
    Ready,
    /// Ball in play
    Playing,
    /// Board cleared; the next tick builds the next level
    LevelTransition,
    /// Ball escaped with lives to spare; waiting for `respawn`
    BallLost,
    /// Final level cleared
    Win,
    /// Ball escaped with no lives left
    GameOver,
}

impl SessionState {
    /// No further tick changes anything
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Win | SessionState::GameOver)
    }
}

/// What a single tick did, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub ball_position: Option<Vec2>,
    pub brick_hit: Option<BrickHit>,
    pub paddle_hit: bool,
    pub life_lost: bool,
    pub level_advanced: bool,
    pub game_over: bool,
    pub won: bool,
    pub score: u64,
    pub lives: i32,
    pub level: u32,
    pub state: SessionState,
}

/// A brick as it should be drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub id: u32,
    pub bounds: Aabb,
    pub tier: u8,
    pub color: u32,
}

/// Read-only snapshot for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub paddle: Aabb,
    pub ball: Option<Aabb>,
    pub bricks: Vec<BrickView>,
    pub score: u64,
    pub lives: i32,
    pub level: u32,
    pub state: SessionState,
}

/// One continuous play-through
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    arena: Arena,
    state: SessionState,
    rng: Pcg32,
}

impl Session {
    /// Validate settings and lay out level 1. The session starts in `Ready`.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let mut arena = Arena::new(&settings);
        generate_level(&mut arena, &settings, &mut rng);

        log::info!(
            "Session created: arena {}x{}, seed {}, {} lives",
            settings.arena_width,
            settings.arena_height,
            settings.seed,
            settings.lives
        );

        Ok(Self {
            settings,
            arena,
            state: SessionState::Ready,
            rng,
        })
    }

    /// Session with default settings apart from the four given values
    pub fn start_session(
        arena_width: f32,
        arena_height: f32,
        base_ball_speed: f32,
        base_paddle_width: f32,
    ) -> Result<Self, ConfigError> {
        Self::new(Settings::new(
            arena_width,
            arena_height,
            base_ball_speed,
            base_paddle_width,
        ))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Shift the paddle horizontally, clamped to the arena. Ignored once the
    /// session has ended.
    pub fn move_paddle(&mut self, offset: f32) {
        if self.state.is_terminal() {
            return;
        }
        self.arena.paddle.move_by(offset, self.arena.width);
    }

    /// Serve the first ball. Returns false outside `Ready`.
    pub fn start(&mut self) -> bool {
        if self.state != SessionState::Ready {
            return false;
        }
        self.serve();
        self.state = SessionState::Playing;
        log::info!("Session started");
        true
    }

    /// Serve a new ball after a lost one. Returns false outside `BallLost`.
    pub fn respawn(&mut self) -> bool {
        if self.state != SessionState::BallLost {
            return false;
        }
        self.serve();
        self.state = SessionState::Playing;
        true
    }

    /// Build the next level now instead of on the next tick. Returns false
    /// outside `LevelTransition`.
    pub fn advance_level(&mut self) -> bool {
        if self.state != SessionState::LevelTransition {
            return false;
        }
        self.arena.level += 1;
        generate_level(&mut self.arena, &self.settings, &mut self.rng);
        self.serve();
        self.state = SessionState::Playing;
        log::info!(
            "Advanced to level {}, ball speed {:.2}",
            self.arena.level,
            self.settings.level_base_speed(self.arena.level)
        );
        true
    }

    /// Advance one fixed step
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = self.outcome();

        match self.state {
            SessionState::Playing => {}
            SessionState::LevelTransition => {
                outcome.level_advanced = self.advance_level();
                return self.finish(outcome);
            }
            SessionState::Ready
            | SessionState::BallLost
            | SessionState::Win
            | SessionState::GameOver => return outcome,
        }

        let result = step(&mut self.arena, &self.settings);
        outcome.paddle_hit = result.paddle_hit;
        outcome.brick_hit = result.brick_hit;

        if result.ball_lost {
            outcome.life_lost = true;
            self.arena.lives -= 1;
            if self.arena.lives < 0 {
                // Ball stays where it escaped, frozen
                self.state = SessionState::GameOver;
                outcome.game_over = true;
                log::info!(
                    "Game over on level {} with score {}",
                    self.arena.level,
                    self.arena.score
                );
            } else {
                self.arena.ball = None;
                self.state = SessionState::BallLost;
                log::info!("Ball lost, {} lives left", self.arena.lives);
            }
        } else if result.cleared {
            if self.settings.max_levels.is_some_and(|max| self.arena.level >= max) {
                self.state = SessionState::Win;
                outcome.won = true;
                log::info!("Won on level {} with score {}", self.arena.level, self.arena.score);
            } else {
                self.state = SessionState::LevelTransition;
                log::info!("Level {} cleared", self.arena.level);
            }
        }

        self.finish(outcome)
    }

    /// Snapshot for drawing
    pub fn render_state(&self) -> RenderState {
        RenderState {
            paddle: self.arena.paddle.bounds(),
            ball: self.arena.ball.as_ref().map(|b| b.bounds()),
            bricks: self
                .arena
                .bricks
                .iter()
                .filter_map(|brick| {
                    brick.tier().map(|tier| BrickView {
                        id: brick.id,
                        bounds: brick.bounds(),
                        tier: tier.get(),
                        color: tier.color(),
                    })
                })
                .collect(),
            score: self.arena.score,
            lives: self.arena.lives,
            level: self.arena.level,
            state: self.state,
        }
    }

    /// New ball above the paddle at the current level's base speed
    fn serve(&mut self) {
        let dx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let speed = self.settings.level_base_speed(self.arena.level);
        self.arena.spawn_ball(
            self.settings.ball_radius,
            self.settings.ball_spawn_gap,
            Vec2::new(dx, -1.0),
            speed,
        );
    }

    /// Outcome with no events, reflecting the current state
    fn outcome(&self) -> TickOutcome {
        TickOutcome {
            ball_position: self.arena.ball.as_ref().map(|b| b.pos),
            brick_hit: None,
            paddle_hit: false,
            life_lost: false,
            level_advanced: false,
            game_over: false,
            won: false,
            score: self.arena.score,
            lives: self.arena.lives,
            level: self.arena.level,
            state: self.state,
        }
    }

    /// Copy post-tick counters into `outcome`
    fn finish(&self, outcome: TickOutcome) -> TickOutcome {
        TickOutcome {
            ball_position: self.arena.ball.as_ref().map(|b| b.pos),
            score: self.arena.score,
            lives: self.arena.lives,
            level: self.arena.level,
            state: self.state,
            ..outcome
        }
    }
}
