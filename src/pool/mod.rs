//! Managed collections of game pieces.
//!
//! A [`GamePiecePool`] owns its pieces in creation order and fans frame updates, rendering and
//! resets out to them. What a pool spawns is decided by its [`PieceFactory`]; the pool only
//! supplies the factory with a [`Spawner`] (shared config, randomness and the record of cells
//! already handed out).

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::rc::Rc;

use tracing::debug;

use crate::asset::AssetStore;
use crate::board::Location;
use crate::config::GameConfig;
use crate::entity::piece::{GamePiece, PieceId};
use crate::view::Surface;

pub mod collectible;
pub mod enemy;
pub mod random;

pub use collectible::{CollectibleFactory, CollectiblePool};
pub use enemy::{EnemyFactory, EnemyPool};
pub use random::Random;

/// Builds the pieces a pool is filled with.
pub trait PieceFactory {
    /// Builds the piece for the 1-based `pool_index`, or `None` when nothing should be
    /// created for that slot.
    fn create_piece(&mut self, pool_index: usize, spawner: &mut Spawner) -> Option<GamePiece>;
}

/// Everything a factory needs to place a new piece.
#[derive(Debug)]
pub struct Spawner {
    config: Rc<GameConfig>,
    random: Random,
    unique_coords: HashSet<Location>,
}

impl Spawner {
    pub fn new(config: Rc<GameConfig>, random: Random) -> Self {
        Self {
            config,
            random,
            unique_coords: HashSet::new(),
        }
    }

    pub fn config(&self) -> &Rc<GameConfig> {
        &self.config
    }

    /// Draws a uniformly random integer in `range`.
    pub fn generate_random(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.random.int(range)
    }

    /// Draws a uniformly random real in `[min, max]`.
    pub fn generate_random_float(&mut self, min: f32, max: f32) -> f32 {
        self.random.float(min, max)
    }

    /// Draws a uniformly random real in `[min, max)`.
    pub fn generate_random_float_below(&mut self, min: f32, max: f32) -> f32 {
        self.random.float_below(min, max)
    }

    /// Draws a cell from the given row and column ranges that this spawner has not issued
    /// before, and records it.
    ///
    /// Returns `None` once every cell in the ranges has been issued (or a range is empty).
    pub fn generate_unique_coords(
        &mut self,
        rows: RangeInclusive<i32>,
        cols: RangeInclusive<i32>,
    ) -> Option<Location> {
        let capacity = rows.clone().count() * cols.clone().count();
        let issued = self
            .unique_coords
            .iter()
            .filter(|location| rows.contains(&location.row) && cols.contains(&location.col))
            .count();
        if issued >= capacity {
            debug!(?rows, ?cols, issued, "No free cells left to spawn on");
            return None;
        }

        loop {
            let location = Location::new(self.random.int(rows.clone()), self.random.int(cols.clone()));
            if self.unique_coords.insert(location) {
                return Some(location);
            }
        }
    }

    /// Forgets every issued cell.
    pub fn clear(&mut self) {
        self.unique_coords.clear();
    }
}

/// An ordered pool of pieces built by a [`PieceFactory`].
#[derive(Debug)]
pub struct GamePiecePool<F> {
    pieces: Vec<GamePiece>,
    spawner: Spawner,
    factory: F,
    next_id: u32,
}

impl<F: PieceFactory> GamePiecePool<F> {
    pub fn new(config: Rc<GameConfig>, random: Random, factory: F) -> Self {
        Self {
            pieces: Vec::new(),
            spawner: Spawner::new(config, random),
            factory,
            next_id: 1,
        }
    }

    /// Asks the factory for `qty` pieces. Slots the factory declines are skipped.
    /// Returns how many pieces were actually added.
    pub fn create(&mut self, qty: usize) -> usize {
        let before = self.pieces.len();

        for pool_index in 1..=qty {
            if let Some(mut piece) = self.factory.create_piece(pool_index, &mut self.spawner) {
                piece.assign_id(PieceId(self.next_id));
                self.next_id += 1;
                self.pieces.push(piece);
            }
        }

        let created = self.pieces.len() - before;
        debug!(requested = qty, created, "Pool populated");
        created
    }

    /// Removes the piece with the given id, keeping the order of the rest.
    /// Returns `None` if no such piece is in the pool.
    pub fn delete(&mut self, id: PieceId) -> Option<GamePiece> {
        let index = self.pieces.iter().position(|piece| piece.id() == id)?;
        Some(self.pieces.remove(index))
    }

    pub fn get(&self, id: PieceId) -> Option<&GamePiece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GamePiece> {
        self.pieces.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, GamePiece> {
        self.pieces.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn update(&mut self, dt: f32) {
        for piece in &mut self.pieces {
            piece.update(dt);
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, assets: &dyn AssetStore) {
        for piece in &self.pieces {
            piece.render(surface, assets);
        }
    }

    /// Empties the pool for the next round. Issued cells are forgotten along with the pieces.
    pub fn reset(&mut self) {
        self.pieces.clear();
        self.spawner.clear();
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<'a, F> IntoIterator for &'a GamePiecePool<F> {
    type Item = &'a GamePiece;
    type IntoIter = std::slice::Iter<'a, GamePiece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}

impl<'a, F> IntoIterator for &'a mut GamePiecePool<F> {
    type Item = &'a mut GamePiece;
    type IntoIter = std::slice::IterMut<'a, GamePiece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter_mut()
    }
}
