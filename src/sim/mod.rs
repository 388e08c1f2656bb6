//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per call, no clock
//! - Seeded RNG only
//! - Stable iteration order (bricks by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Axis, HasBounds, reflect};
pub use level::generate_level;
pub use state::{Arena, Ball, BallUpdate, Brick, Paddle, Tier};
pub use tick::{BrickHit, StepResult, step};
