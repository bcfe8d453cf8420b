//! Centralized error types for the game.
//!
//! Gameplay itself never fails: bad input, missing pieces and exhausted spawn ranges are
//! ignored. The errors here cover setup only (configuration and asset sources).

use crate::asset::Sprite;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Board must have at least {min} rows, found {found}")]
    TooFewRows { min: u32, found: u32 },

    #[error("Board must have at least {min} columns, found {found}")]
    TooFewColumns { min: u32, found: u32 },

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("Cell size must be positive, found {width}x{height}")]
    InvalidCellSize { width: f32, height: f32 },

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Extract(Box::new(e))
    }
}

/// Errors reported by an image source while resolving a sprite.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(Sprite),

    #[error("Failed to decode {sprite}: {reason}")]
    Decode { sprite: Sprite, reason: String },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
