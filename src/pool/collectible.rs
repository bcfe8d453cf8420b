use glam::Vec2;
use strum::IntoEnumIterator;
use tracing::trace;

use crate::asset::{GemKind, Sprite};
use crate::constants::scoring::COLLECTIBLE_POINTS;
use crate::constants::spawn::{COLLECTIBLE_LIFT, COLLECTIBLE_ROWS};
use crate::entity::piece::{GamePiece, PieceSpec};
use crate::pool::{GamePiecePool, PieceFactory, Spawner};

/// Spawns one stationary gem per catalog entry, each on its own cell.
#[derive(Debug, Clone)]
pub struct CollectibleFactory {
    catalog: Vec<GemKind>,
}

impl Default for CollectibleFactory {
    fn default() -> Self {
        Self::new(GemKind::iter().collect())
    }
}

impl CollectibleFactory {
    pub fn new(catalog: Vec<GemKind>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &[GemKind] {
        &self.catalog
    }
}

impl PieceFactory for CollectibleFactory {
    fn create_piece(&mut self, pool_index: usize, spawner: &mut Spawner) -> Option<GamePiece> {
        let gem = *self.catalog.get(pool_index.checked_sub(1)?)?;

        let columns = spawner.config().board.columns() as i32;
        let location = spawner.generate_unique_coords(COLLECTIBLE_ROWS, 1..=columns)?;

        let mut piece = GamePiece::new(
            spawner.config().clone(),
            PieceSpec {
                row: location.row,
                col: location.col,
                speed: 0.0,
                sprite: Some(Sprite::Gem(gem)),
                ..PieceSpec::default()
            },
        );
        piece.shift_start(Vec2::new(0.0, -COLLECTIBLE_LIFT));
        piece.set_points(COLLECTIBLE_POINTS);

        trace!(gem = gem.as_ref(), ?location, "Collectible placed");
        Some(piece)
    }
}

pub type CollectiblePool = GamePiecePool<CollectibleFactory>;
