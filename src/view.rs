//! Presentation collaborators: the drawing surface, the board backdrop with its score
//! readout, and the modal dialogs. None of these carry game logic.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use thousands::Separable;
use tracing::{debug, trace};

use crate::asset::{AssetStore, CharacterKind, Image, Sprite, TileSprite};
use crate::board::Board;

/// Something images can be drawn onto at their natural size.
pub trait Surface {
    fn draw_image(&mut self, image: &Image, position: Vec2);
}

/// Draws `sprite` at `position` if it has finished loading; unloaded sprites are skipped.
pub fn draw_sprite<S: Surface + ?Sized>(surface: &mut S, assets: &dyn AssetStore, sprite: Sprite, position: Vec2) {
    match assets.get(sprite) {
        Some(image) => surface.draw_image(image, position),
        None => trace!(%sprite, "Sprite not ready, skipping draw"),
    }
}

/// The tile a board row is painted with: water on top, grass on the bottom two rows,
/// stone in between.
pub fn row_tile(row: u32, rows: u32) -> TileSprite {
    if row == 0 {
        TileSprite::Water
    } else if row + 2 >= rows {
        TileSprite::Grass
    } else {
        TileSprite::Stone
    }
}

/// The board backdrop and the score readout next to it.
#[derive(Debug)]
pub struct GameBoard {
    board: Board,
    displayed_score: i64,
}

impl GameBoard {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            displayed_score: 0,
        }
    }

    /// Sprites needed to paint the backdrop.
    pub fn sprites(&self) -> Vec<Sprite> {
        (0..self.board.rows())
            .map(|row| Sprite::Tile(row_tile(row, self.board.rows())))
            .collect()
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, assets: &dyn AssetStore) {
        let rows = self.board.rows();
        for row in 0..rows {
            let sprite = Sprite::Tile(row_tile(row, rows));
            for col in 0..self.board.columns() {
                draw_sprite(surface, assets, sprite, self.board.tile_origin(row, col));
            }
        }
    }

    pub fn update_score(&mut self, score: i64) {
        self.displayed_score = score;
    }

    pub fn displayed_score(&self) -> i64 {
        self.displayed_score
    }

    /// The readout as shown to the player, e.g. `12,000`.
    pub fn score_text(&self) -> String {
        self.displayed_score.separate_with_commas()
    }
}

/// Handle to a modal's play button, shareable with asset-ready callbacks.
#[derive(Debug, Clone, Default)]
pub struct PlayButton(Rc<Cell<bool>>);

impl PlayButton {
    pub fn reveal(&self) {
        self.0.set(true);
    }

    pub fn is_visible(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ModalKind {
    Setup,
    WonGame,
    LostGame,
}

/// A dialog shown over the board.
#[derive(Debug)]
pub struct Modal {
    kind: ModalKind,
    active: bool,
    score: Option<i64>,
    selected: Option<CharacterKind>,
    play_button: PlayButton,
}

impl Modal {
    pub fn new(kind: ModalKind) -> Self {
        Self {
            kind,
            active: false,
            score: None,
            selected: None,
            play_button: PlayButton::default(),
        }
    }

    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn show(&mut self, score: Option<i64>) {
        debug!(modal = self.kind.as_ref(), score, "Showing modal");
        self.score = score;
        self.active = true;
    }

    pub fn hide(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The score the modal was last shown with.
    pub fn score(&self) -> Option<i64> {
        self.score
    }

    pub fn set_selected_option(&mut self, character: CharacterKind) {
        self.selected = Some(character);
    }

    pub fn selected_option(&self) -> Option<CharacterKind> {
        self.selected
    }

    pub fn show_play_button(&self) {
        self.play_button.reveal();
    }

    pub fn play_button(&self) -> PlayButton {
        self.play_button.clone()
    }
}

/// The three dialogs the game uses.
#[derive(Debug)]
pub struct Modals {
    pub setup: Modal,
    pub won: Modal,
    pub lost: Modal,
}

impl Default for Modals {
    fn default() -> Self {
        Self {
            setup: Modal::new(ModalKind::Setup),
            won: Modal::new(ModalKind::WonGame),
            lost: Modal::new(ModalKind::LostGame),
        }
    }
}

impl Modals {
    pub fn hide_all(&mut self) {
        self.setup.hide();
        self.won.hide();
        self.lost.hide();
    }
}
