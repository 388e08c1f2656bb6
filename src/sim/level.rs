//! Brick layout generation
//!
//! Level L gets `base_rows + L` rows of `columns` bricks. Columns that would
//! cross the right wall and rows that would reach into the paddle zone are
//! left out, so a valid configuration always yields at least one brick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Arena, Brick};
use crate::consts::MAX_TIER;
use crate::settings::{Settings, TierPattern};

/// Replace the arena's bricks with a fresh grid for `arena.level`
pub fn generate_level(arena: &mut Arena, settings: &Settings, rng: &mut Pcg32) {
    arena.bricks.clear();

    let rows = settings.base_rows.saturating_add(arena.level);
    let floor = settings.brick_floor();

    for row in 0..rows {
        let top = settings.top_margin + row as f32 * settings.row_spacing;
        if top + settings.brick_height > floor {
            break;
        }

        for col in 0..settings.columns {
            let left = settings.left_margin + col as f32 * settings.column_spacing;
            if left + settings.brick_width > arena.width {
                break;
            }

            let hits_remaining = match settings.tier_pattern {
                TierPattern::Random => rng.random_range(1..=MAX_TIER),
                TierPattern::ByRow if row < u32::from(MAX_TIER) => MAX_TIER - row as u8,
                TierPattern::ByRow => 1,
            };

            let id = arena.next_entity_id();
            arena.bricks.push(Brick {
                id,
                pos: Vec2::new(
                    left + settings.brick_width / 2.0,
                    top + settings.brick_height / 2.0,
                ),
                width: settings.brick_width,
                height: settings.brick_height,
                hits_remaining,
            });
        }
    }

    arena.normalize_order();
    log::info!(
        "Level {}: {} bricks ({} rows requested, pattern {})",
        arena.level,
        arena.bricks.len(),
        rows,
        settings.tier_pattern.as_str()
    );
}
