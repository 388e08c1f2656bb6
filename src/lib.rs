//! Brick Breaker - a bounded-arena brick breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level layout, tick)
//! - `session`: Ready/Playing/BallLost/LevelTransition state machine
//! - `settings`: Validated session configuration
//! - `error`: Configuration errors

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use session::{BrickHit, BrickView, RenderState, Session, SessionState, TickOutcome};
pub use settings::{Settings, TierPattern};

/// Game configuration constants
pub mod consts {
    /// Points awarded per brick hit, regardless of tier
    pub const BRICK_SCORE: u64 = 10;

    /// Highest brick tier (hits needed to destroy)
    pub const MAX_TIER: u8 = 3;

    /// Reference tick interval used by the headless driver (20 Hz)
    pub const TICK_MS: u64 = 50;
}
