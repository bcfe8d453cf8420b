//! Runtime configuration.
//!
//! Every value has a default taken from [`crate::constants`]; any of them can be overridden
//! through `FROGGER_`-prefixed environment variables, with `__` separating nested keys
//! (for example `FROGGER_GAME__BOARD__ROWS=7` or `FROGGER_RUN__SEED=42`).

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::player::START_COL;
use crate::constants::{bounds, BOARD_ROWS, PIECE_SIZE};
use crate::error::ConfigError;

/// The row layout (water, three stone rows, two grass rows) is fixed, so the board needs at
/// least this many rows.
const MIN_ROWS: u32 = BOARD_ROWS;

/// The player starts in this column, so the board must have at least this many.
const MIN_COLUMNS: u32 = START_COL as u32;

/// Enemies start somewhere in `[1, right]`, so the right bound must reach at least this far.
const MIN_RIGHT_BOUND: f32 = 1.0;

/// The limits the player's top-left corner is clamped to, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundLimits {
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
}

impl Default for BoundLimits {
    fn default() -> Self {
        Self {
            left: bounds::LEFT,
            right: bounds::RIGHT,
            up: bounds::UP,
            down: bounds::DOWN,
        }
    }
}

/// Immutable game configuration, constructed once and shared by reference with the board,
/// pieces and pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: Board,
    pub bounds: BoundLimits,
    pub piece_size: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: Board::default(),
            bounds: BoundLimits::default(),
            piece_size: PIECE_SIZE,
        }
    }
}

impl GameConfig {
    /// Rejects boards the game cannot be played on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cell = self.board.cell_size();
        let finite = [
            ("board.cell_size", cell.is_finite()),
            ("piece_size", self.piece_size.is_finite()),
            ("bounds.left", self.bounds.left.is_finite()),
            ("bounds.right", self.bounds.right.is_finite()),
            ("bounds.up", self.bounds.up.is_finite()),
            ("bounds.down", self.bounds.down.is_finite()),
        ];
        if let Some((field, _)) = finite.into_iter().find(|(_, ok)| !ok) {
            return Err(ConfigError::NotFinite(field));
        }

        if self.board.rows() < MIN_ROWS {
            return Err(ConfigError::TooFewRows {
                min: MIN_ROWS,
                found: self.board.rows(),
            });
        }
        if self.board.columns() < MIN_COLUMNS {
            return Err(ConfigError::TooFewColumns {
                min: MIN_COLUMNS,
                found: self.board.columns(),
            });
        }

        if cell.x <= 0.0 || cell.y <= 0.0 {
            return Err(ConfigError::InvalidCellSize {
                width: cell.x,
                height: cell.y,
            });
        }

        if self.bounds.left >= self.bounds.right {
            return Err(ConfigError::InvalidBounds(format!(
                "left ({}) must be less than right ({})",
                self.bounds.left, self.bounds.right
            )));
        }
        if self.bounds.up >= self.bounds.down {
            return Err(ConfigError::InvalidBounds(format!(
                "up ({}) must be less than down ({})",
                self.bounds.up, self.bounds.down
            )));
        }
        if self.bounds.right < MIN_RIGHT_BOUND {
            return Err(ConfigError::InvalidBounds(format!(
                "right ({}) must be at least {MIN_RIGHT_BOUND}",
                self.bounds.right
            )));
        }

        // Every position inside the bounds has to map onto a real cell.
        let first_col = (self.bounds.left / cell.x).ceil() + 1.0;
        let last_col = (self.bounds.right / cell.x).ceil() + 1.0;
        if first_col < 1.0 || last_col > self.board.columns() as f32 {
            return Err(ConfigError::InvalidBounds(format!(
                "left/right ({}, {}) reach columns {first_col}..={last_col}, outside 1..={}",
                self.bounds.left,
                self.bounds.right,
                self.board.columns()
            )));
        }
        let first_row = (self.bounds.up / cell.y).ceil() + 1.0;
        let last_row = (self.bounds.down / cell.y).ceil() + 1.0;
        if first_row < 1.0 || last_row > self.board.rows() as f32 {
            return Err(ConfigError::InvalidBounds(format!(
                "up/down ({}, {}) reach rows {first_row}..={last_row}, outside 1..={}",
                self.bounds.up,
                self.bounds.down,
                self.board.rows()
            )));
        }

        Ok(())
    }
}

/// Settings for the headless runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of rounds to play before exiting.
    pub rounds: u32,
    /// Fixed RNG seed; a fresh OS seed is used when absent.
    pub seed: Option<u64>,
    /// How often the autopilot presses a key.
    pub key_interval_ms: u64,
    /// A round is abandoned after this many frames.
    pub max_frames_per_round: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rounds: 3,
            seed: None,
            key_interval_ms: 350,
            max_frames_per_round: 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub run: RunConfig,
}

impl Settings {
    /// The provider stack: defaults, then environment overrides.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default())).merge(Env::prefixed("FROGGER_").split("__"))
    }

    /// Loads settings from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Extracts and validates settings from an arbitrary provider stack.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract()?;
        settings.game.validate()?;
        Ok(settings)
    }
}
