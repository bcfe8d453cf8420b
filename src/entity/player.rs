use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::asset::{CharacterKind, Sprite};
use crate::config::GameConfig;
use crate::constants::player::{START_COL, START_ROW, WIN_ROW};
use crate::entity::direction::Direction;
use crate::entity::piece::{GamePiece, Movement, PieceSpec};
use crate::input::{arrow_keys, KeyCode};

/// The player-controlled piece. Moves one cell per key press and keeps the running score.
#[derive(Debug, Clone)]
pub struct Player {
    piece: GamePiece,
    score: i64,
    allowed_keys: HashMap<KeyCode, Direction>,
}

impl Player {
    pub fn new(config: Rc<GameConfig>, character: CharacterKind) -> Self {
        let piece = GamePiece::new(
            config,
            PieceSpec {
                row: START_ROW,
                col: START_COL,
                speed: 0.0,
                sprite: Some(Sprite::Character(character)),
                movement: Movement::Stepped,
                ..PieceSpec::default()
            },
        );

        Self {
            piece,
            score: 0,
            allowed_keys: arrow_keys(),
        }
    }

    pub fn piece(&self) -> &GamePiece {
        &self.piece
    }

    pub fn piece_mut(&mut self) -> &mut GamePiece {
        &mut self.piece
    }

    pub fn is_valid_move_command(&self, key: KeyCode) -> bool {
        self.allowed_keys.contains_key(&key)
    }

    /// Moves one cell in the direction bound to `key`. Unknown keys are ignored.
    pub fn handle_input(&mut self, key: KeyCode) {
        if let Some(&direction) = self.allowed_keys.get(&key) {
            self.step(direction);
        }
    }

    /// Moves one cell. Each axis stops at its bound rather than leaving the board.
    pub fn step(&mut self, direction: Direction) {
        let cell = self.piece.config().board.cell_size();
        let bounds = self.piece.config().bounds;
        let coords = self.piece.coords_mut();

        match direction {
            Direction::Left => coords.x = (coords.x - cell.x).max(bounds.left),
            Direction::Up => coords.y = (coords.y - cell.y).max(bounds.up),
            Direction::Right => coords.x = (coords.x + cell.x).min(bounds.right),
            Direction::Down => coords.y = (coords.y + cell.y).min(bounds.down),
        }

        self.piece.update_location();
        trace!(direction = direction.as_ref(), location = ?self.piece.cached_location(), "Player moved");
    }

    /// Whether the player stands on the goal row, judged by the cached location.
    pub fn has_won(&self) -> bool {
        self.piece.cached_location().row == WIN_ROW
    }

    /// Adds to the score; negative values subtract.
    pub fn add_score(&mut self, points: i64) {
        self.score += points;
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}
