//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{UVec2, Vec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the canvas, in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(505, 606);

/// The number of rows on the game board. Row 1 is the water (goal) row.
pub const BOARD_ROWS: u32 = 6;
/// The number of columns on the game board.
pub const BOARD_COLUMNS: u32 = 5;

/// The size of each cell, in pixels.
pub const CELL_SIZE: Vec2 = Vec2::new(101.0, 83.0);

/// The bounding box of a piece's sprite, in pixels.
pub const PIECE_SIZE: Vec2 = Vec2::new(101.0, 171.0);

/// Sprites are taller than a cell; this lifts the insertion point so the visible
/// part of the sprite sits inside its cell.
pub const SPRITE_INSERTION_LIFT: f32 = 40.0;

/// The limits the player's top-left corner is clamped to.
pub mod bounds {
    pub const LEFT: f32 = 0.0;
    pub const RIGHT: f32 = 404.0;
    pub const UP: f32 = -10.0;
    pub const DOWN: f32 = 402.0;
}

/// Horizontal speeds, in pixels per second.
pub mod speed {
    pub const PIECE: f32 = 100.0;
    pub const ENEMY: f32 = 200.0;
}

pub mod player {
    /// The cell the player starts each round on.
    pub const START_ROW: i32 = 5;
    pub const START_COL: i32 = 3;
    /// Reaching this row wins the round.
    pub const WIN_ROW: i32 = 1;
}

pub mod spawn {
    use std::ops::RangeInclusive;

    /// How many enemies a round starts with.
    pub const ENEMY_COUNT: RangeInclusive<i32> = 3..=6;
    /// Enemies only ever travel along the stone rows.
    pub const ENEMY_ROWS: RangeInclusive<i32> = 2..=4;
    /// Multiplier applied to a random x inside the board, pushing most enemies off to the right
    /// so they enter from the left after their first wrap.
    pub const ENEMY_START_FACTOR: RangeInclusive<i32> = 1..=10;
    /// Speed multiplier given to every odd-numbered enemy, drawn from `[min, max)`.
    pub const ENEMY_SPEED_BOOST: (f32, f32) = (1.5, 3.0);

    /// How many collectibles a round starts with.
    pub const COLLECTIBLE_COUNT: RangeInclusive<i32> = 2..=3;
    pub const COLLECTIBLE_ROWS: RangeInclusive<i32> = 2..=4;
    /// Gems are drawn slightly higher than other pieces so they sit centered on the stone.
    pub const COLLECTIBLE_LIFT: f32 = 25.0;
}

pub mod scoring {
    pub const COLLECTIBLE_POINTS: i64 = 1000;
    pub const WIN_BONUS: i64 = 10_000;
    pub const LOSS_PENALTY: i64 = 10_000;
}
