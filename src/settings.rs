//! Session settings
//!
//! Everything that shapes a session is fixed at construction and validated
//! once. Loaded from JSON by the headless driver; missing fields take their
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How brick tiers are assigned when a level is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TierPattern {
    /// Each brick rolls 1..=3 from the session RNG
    #[default]
    Random,
    /// Top row 3 hits, second row 2, everything below 1
    ByRow,
}

impl TierPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierPattern::Random => "Random",
            TierPattern::ByRow => "ByRow",
        }
    }
}

/// Gameplay settings for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Ball ===
    /// Speed of the ball on level 1
    pub base_ball_speed: f32,
    pub ball_radius: f32,
    /// Vertical gap between the paddle top and a freshly spawned ball
    pub ball_spawn_gap: f32,
    /// Added to ball speed on every paddle hit
    pub paddle_speed_increment: f32,
    /// Ceiling for paddle speed-ups
    pub max_ball_speed: f32,
    /// Added to the base speed for every level advanced
    pub level_speed_increment: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Fixed center y of the paddle
    pub paddle_y: f32,

    // === Bricks ===
    /// Rows on level L = base_rows + L
    pub base_rows: u32,
    pub columns: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    /// Horizontal distance between the left edges of neighbouring bricks
    pub column_spacing: f32,
    /// Vertical distance between the top edges of neighbouring rows
    pub row_spacing: f32,
    pub left_margin: f32,
    pub top_margin: f32,
    /// Free space kept above the paddle; rows reaching into it are dropped
    pub paddle_clearance: f32,
    pub tier_pattern: TierPattern,

    // === Session ===
    /// Lives before the next escape ends the game
    pub lives: i32,
    /// Clearing this level wins the game (None = endless)
    pub max_levels: Option<u32>,
    /// RNG seed for serve direction and brick tiers
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: 500.0,
            arena_height: 500.0,

            base_ball_speed: 5.0,
            ball_radius: 10.0,
            ball_spawn_gap: 5.0,
            paddle_speed_increment: 0.1,
            max_ball_speed: 12.0,
            level_speed_increment: 1.0,

            paddle_width: 100.0,
            paddle_height: 10.0,
            paddle_y: 480.0,

            base_rows: 5,
            columns: 7,
            brick_width: 60.0,
            brick_height: 20.0,
            column_spacing: 70.0,
            row_spacing: 30.0,
            left_margin: 15.0,
            top_margin: 30.0,
            paddle_clearance: 40.0,
            tier_pattern: TierPattern::Random,

            lives: 3,
            max_levels: None,
            seed: 0,
        }
    }
}

impl Settings {
    /// Defaults with the four session-defining values overridden
    pub fn new(arena_width: f32, arena_height: f32, base_ball_speed: f32, paddle_width: f32) -> Self {
        Self {
            arena_width,
            arena_height,
            base_ball_speed,
            paddle_width,
            ..Self::default()
        }
    }

    /// Ball speed at the start of `level` (1-based)
    pub fn level_base_speed(&self, level: u32) -> f32 {
        let advanced = level.saturating_sub(1) as f32;
        self.base_ball_speed + advanced * self.level_speed_increment
    }

    /// Lowest y a brick may reach before it intrudes on the paddle zone
    pub fn brick_floor(&self) -> f32 {
        self.paddle_y - self.paddle_height / 2.0 - self.paddle_clearance
    }

    /// Check every field a session depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("ball_radius", self.ball_radius)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("brick_width", self.brick_width)?;
        positive("brick_height", self.brick_height)?;
        non_negative("base_ball_speed", self.base_ball_speed)?;
        non_negative("paddle_speed_increment", self.paddle_speed_increment)?;
        non_negative("level_speed_increment", self.level_speed_increment)?;
        non_negative("ball_spawn_gap", self.ball_spawn_gap)?;
        non_negative("left_margin", self.left_margin)?;
        non_negative("top_margin", self.top_margin)?;
        non_negative("paddle_clearance", self.paddle_clearance)?;

        if !self.max_ball_speed.is_finite() || self.max_ball_speed < self.base_ball_speed {
            return Err(ConfigError::invalid(
                "max_ball_speed",
                "must be finite and at least base_ball_speed",
            ));
        }
        if self.paddle_width > self.arena_width {
            return Err(ConfigError::invalid("paddle_width", "must fit inside the arena"));
        }
        if self.paddle_y + self.paddle_height / 2.0 > self.arena_height
            || self.paddle_y - self.paddle_height / 2.0 < 0.0
        {
            return Err(ConfigError::invalid("paddle_y", "paddle must lie inside the arena"));
        }
        let spawn_top =
            self.paddle_y - self.paddle_height / 2.0 - self.ball_spawn_gap - 2.0 * self.ball_radius;
        if spawn_top <= 0.0 {
            return Err(ConfigError::invalid("ball_spawn_gap", "ball must spawn inside the arena"));
        }
        if !self.column_spacing.is_finite() || self.column_spacing < self.brick_width {
            return Err(ConfigError::invalid("column_spacing", "must be at least brick_width"));
        }
        if !self.row_spacing.is_finite() || self.row_spacing < self.brick_height {
            return Err(ConfigError::invalid("row_spacing", "must be at least brick_height"));
        }
        if self.columns == 0 {
            return Err(ConfigError::invalid("columns", "must be at least 1"));
        }
        if self.left_margin + self.brick_width > self.arena_width {
            return Err(ConfigError::invalid("brick_width", "no brick column fits the arena"));
        }
        if self.top_margin + self.brick_height > self.brick_floor() {
            return Err(ConfigError::invalid("brick_height", "no brick row fits above the paddle"));
        }
        if self.lives < 0 {
            return Err(ConfigError::invalid("lives", "must not be negative"));
        }
        if self.max_levels == Some(0) {
            return Err(ConfigError::invalid("max_levels", "must be at least 1 when set"));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be positive and finite"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be non-negative and finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_arena() {
        let settings = Settings::new(0.0, 500.0, 5.0, 100.0);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidConfiguration { field: "arena_width", .. })
        ));

        let settings = Settings::new(500.0, -1.0, 5.0, 100.0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let settings = Settings::new(500.0, 500.0, 5.0, 0.0);
        assert!(settings.validate().is_err());

        let settings = Settings {
            ball_radius: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidConfiguration { field: "ball_radius", .. })
        ));

        let settings = Settings {
            arena_width: f32::NAN,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_paddle_wider_than_arena() {
        let settings = Settings::new(80.0, 500.0, 5.0, 100.0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_spacing_smaller_than_brick() {
        let settings = Settings {
            column_spacing: 10.0,
            row_spacing: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidConfiguration { field: "column_spacing", .. })
        ));

        let settings = Settings {
            row_spacing: 19.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidConfiguration { field: "row_spacing", .. })
        ));

        // Bricks may sit flush against each other
        let settings = Settings {
            column_spacing: 60.0,
            row_spacing: 20.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_level_base_speed() {
        let settings = Settings::default();
        assert_eq!(settings.level_base_speed(1), 5.0);
        assert_eq!(settings.level_base_speed(2), 6.0);
        assert_eq!(settings.level_base_speed(4), 8.0);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"lives": 1, "tier_pattern": "ByRow"}"#).unwrap();
        assert_eq!(settings.lives, 1);
        assert_eq!(settings.tier_pattern, TierPattern::ByRow);
        assert_eq!(settings.arena_width, 500.0);
    }

    #[test]
    fn test_from_json_validates() {
        let result = Settings::from_json(r#"{"arena_height": 0.0}"#);
        assert!(matches!(result, Err(ConfigError::InvalidConfiguration { .. })));

        let result = Settings::from_json("not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load(Path::new("/nonexistent/brick-breaker/settings.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
