//! Grid geometry: how pixel coordinates map onto board cells and back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_COLUMNS, BOARD_ROWS, CELL_SIZE, SPRITE_INSERTION_LIFT};

/// A cell on the board, 1-based. Pieces that have drifted off the left edge can report
/// column 0 or below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// How a piece's column is derived from its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnRule {
    /// `ceil(x / cell_width) + 1`: the column the sprite's center falls into.
    #[default]
    Centered,
    /// `ceil(x / cell_width)`: the column the sprite's leading edge has entered, one cell
    /// ahead of [`ColumnRule::Centered`]. Enemies use this so they hit as soon as they touch.
    LeadingEdge,
}

/// The fixed logical grid. Dimensions never change after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    rows: u32,
    columns: u32,
    cell_size: Vec2,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLUMNS, CELL_SIZE)
    }
}

impl Board {
    pub const fn new(rows: u32, columns: u32, cell_size: Vec2) -> Self {
        Self { rows, columns, cell_size }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Derives the cell a piece at `coords` occupies. Both axes are capped at the last
    /// row/column of the board.
    pub fn location_of(&self, coords: Vec2, rule: ColumnRule) -> Location {
        let row = (coords.y / self.cell_size.y).ceil() as i32 + 1;
        let col = match rule {
            ColumnRule::Centered => (coords.x / self.cell_size.x).ceil() as i32 + 1,
            ColumnRule::LeadingEdge => (coords.x / self.cell_size.x).ceil() as i32,
        };

        Location {
            row: row.min(self.rows as i32),
            col: col.min(self.columns as i32),
        }
    }

    /// The top-left pixel position a sprite of `sprite_size` is drawn at so that it
    /// appears inside the given cell.
    pub fn cell_origin(&self, location: Location, sprite_size: Vec2) -> Vec2 {
        Vec2::new(
            self.column_origin(location.col, sprite_size.x),
            self.row_origin(location.row, sprite_size.y),
        )
    }

    pub fn column_origin(&self, col: i32, sprite_width: f32) -> f32 {
        col as f32 * self.cell_size.x - self.cell_size.x / 2.0 - sprite_width / 2.0
    }

    pub fn row_origin(&self, row: i32, sprite_height: f32) -> f32 {
        row as f32 * self.cell_size.y - self.cell_size.y / 2.0 - (sprite_height / 2.0 - SPRITE_INSERTION_LIFT)
    }

    /// Top-left pixel of a background tile, for 0-based grid indices.
    pub fn tile_origin(&self, row: u32, col: u32) -> Vec2 {
        Vec2::new(col as f32 * self.cell_size.x, row as f32 * self.cell_size.y)
    }
}
