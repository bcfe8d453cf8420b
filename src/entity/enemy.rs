use std::rc::Rc;

use crate::asset::Sprite;
use crate::board::ColumnRule;
use crate::config::GameConfig;
use crate::constants::speed;
use crate::entity::piece::{GamePiece, Movement, PieceSpec};

/// Builds an enemy bug travelling along `row`, starting at pixel `start_x`.
///
/// Enemies drift right and wrap around. Their column is judged by the sprite's leading
/// edge, so they register a hit one cell earlier than a centered piece would.
pub fn new_enemy(config: Rc<GameConfig>, row: i32, start_x: f32) -> GamePiece {
    GamePiece::new(
        config,
        PieceSpec {
            row,
            start_x: Some(start_x),
            speed: speed::ENEMY,
            sprite: Some(Sprite::EnemyBug),
            movement: Movement::Drift,
            column_rule: ColumnRule::LeadingEdge,
            ..PieceSpec::default()
        },
    )
}
