//! Key codes and the bindings that turn them into game commands.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::asset::CharacterKind;
use crate::entity::direction::Direction;

/// A host key code, as delivered by key-up events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const DIGIT_1: KeyCode = KeyCode(49);
    pub const Q: KeyCode = KeyCode(81);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MovePlayer(Direction),
    NewGame,
    SelectCharacter(CharacterKind),
    Exit,
}

/// The arrow keys and the direction each one steps the player.
pub fn arrow_keys() -> HashMap<KeyCode, Direction> {
    HashMap::from([
        (KeyCode::LEFT, Direction::Left),
        (KeyCode::UP, Direction::Up),
        (KeyCode::RIGHT, Direction::Right),
        (KeyCode::DOWN, Direction::Down),
    ])
}

#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<KeyCode, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        for (key, direction) in arrow_keys() {
            key_bindings.insert(key, GameCommand::MovePlayer(direction));
        }

        // Game actions
        key_bindings.insert(KeyCode::ENTER, GameCommand::NewGame);
        key_bindings.insert(KeyCode::SPACE, GameCommand::NewGame);
        key_bindings.insert(KeyCode::ESCAPE, GameCommand::Exit);
        key_bindings.insert(KeyCode::Q, GameCommand::Exit);

        // Character selection on the number row
        for (offset, character) in CharacterKind::iter().enumerate() {
            key_bindings.insert(
                KeyCode(KeyCode::DIGIT_1.0 + offset as u32),
                GameCommand::SelectCharacter(character),
            );
        }

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn command_for(&self, key: KeyCode) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }
}
