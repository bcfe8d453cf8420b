//! The positional entity every player, enemy and collectible is built from.

use std::rc::Rc;

use glam::Vec2;
use tracing::trace;

use crate::asset::{AssetStore, ReadyCallback, Sprite};
use crate::board::{ColumnRule, Location};
use crate::config::GameConfig;
use crate::constants::speed;
use crate::view::{draw_sprite, Surface};

/// Identity of a piece within its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceId(pub u32);

/// How a piece moves between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Movement {
    /// Continuous horizontal travel at `speed`, wrapping back to the left edge once the
    /// piece has fully left the board on the right.
    #[default]
    Drift,
    /// Frame updates never move the piece; it only moves in whole cells on command.
    Stepped,
}

/// Construction parameters for a [`GamePiece`].
///
/// The starting position is derived from `row`/`col`, unless `start_x`/`start_y` pin an
/// axis to an explicit pixel value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceSpec {
    pub row: i32,
    pub col: i32,
    pub start_x: Option<f32>,
    pub start_y: Option<f32>,
    pub speed: f32,
    pub sprite: Option<Sprite>,
    pub movement: Movement,
    pub column_rule: ColumnRule,
}

impl Default for PieceSpec {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            start_x: None,
            start_y: None,
            speed: speed::PIECE,
            sprite: None,
            movement: Movement::Drift,
            column_rule: ColumnRule::Centered,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GamePiece {
    id: PieceId,
    config: Rc<GameConfig>,
    coords: Vec2,
    starting_position: Vec2,
    size: Vec2,
    speed: f32,
    sprite: Option<Sprite>,
    points: i64,
    location: Location,
    movement: Movement,
    column_rule: ColumnRule,
}

impl GamePiece {
    pub fn new(config: Rc<GameConfig>, spec: PieceSpec) -> Self {
        let size = config.piece_size;
        let starting_position = Vec2::new(
            spec.start_x
                .unwrap_or_else(|| config.board.column_origin(spec.col, size.x)),
            spec.start_y.unwrap_or_else(|| config.board.row_origin(spec.row, size.y)),
        );

        let mut piece = Self {
            id: PieceId::default(),
            config,
            coords: starting_position,
            starting_position,
            size,
            speed: spec.speed,
            sprite: spec.sprite,
            points: 0,
            location: Location::default(),
            movement: spec.movement,
            column_rule: spec.column_rule,
        };
        piece.update_location();
        piece
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: PieceId) {
        self.id = id;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn coords(&self) -> Vec2 {
        self.coords
    }

    pub(crate) fn coords_mut(&mut self) -> &mut Vec2 {
        &mut self.coords
    }

    /// Moves the piece to an arbitrary pixel position and refreshes its location.
    pub fn place_at(&mut self, coords: Vec2) {
        self.coords = coords;
        self.update_location();
    }

    pub fn starting_position(&self) -> Vec2 {
        self.starting_position
    }

    /// Shifts both the starting position and the current position.
    pub fn shift_start(&mut self, delta: Vec2) {
        self.starting_position += delta;
        self.coords = self.starting_position;
        self.update_location();
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn sprite(&self) -> Option<Sprite> {
        self.sprite
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn set_points(&mut self, points: i64) {
        self.points = points;
    }

    pub fn column_rule(&self) -> ColumnRule {
        self.column_rule
    }

    /// Returns the piece's cell. Unless `use_cache` is set, the cell is first recomputed
    /// from the current coordinates.
    pub fn location(&mut self, use_cache: bool) -> Location {
        if !use_cache {
            self.update_location();
        }
        self.location
    }

    /// The last computed cell, which may lag behind the coordinates.
    pub fn cached_location(&self) -> Location {
        self.location
    }

    pub fn update_location(&mut self) {
        self.location = self.config.board.location_of(self.coords, self.column_rule);
    }

    /// Advances the piece by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.movement == Movement::Stepped || self.speed == 0.0 {
            return;
        }

        let new_x = self.coords.x + dt * self.speed;
        let wrap_at = self.config.bounds.right + self.size.x;

        self.coords.x = if new_x < wrap_at { new_x } else { -self.size.x };
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, assets: &dyn AssetStore) {
        if let Some(sprite) = self.sprite {
            draw_sprite(surface, assets, sprite, self.coords);
        }
    }

    /// Returns the piece to where it was created.
    pub fn reset(&mut self) {
        self.coords = self.starting_position;
        self.update_location();
    }

    /// Swaps the piece's sprite and requests it from the asset store. `on_ready`, if given,
    /// runs once every pending sprite (this one included) has loaded.
    pub fn set_sprite(&mut self, sprite: Sprite, assets: &mut dyn AssetStore, on_ready: Option<ReadyCallback>) {
        trace!(piece = self.id.0, %sprite, "Setting sprite");
        self.sprite = Some(sprite);
        assets.load(&[sprite]);

        if let Some(callback) = on_ready {
            assets.on_ready(callback);
        }
    }
}
