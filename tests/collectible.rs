use std::collections::HashSet;

use frogger::asset::{GemKind, Sprite};
use frogger::board::Location;
use frogger::constants::{scoring, PIECE_SIZE};
use frogger::pool::{CollectibleFactory, CollectiblePool, Random};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn pool(seed: u64) -> CollectiblePool {
    CollectiblePool::new(common::config(), Random::seeded(seed), CollectibleFactory::default())
}

#[test]
fn test_create_is_bounded_by_catalog() {
    let mut pool = pool(common::SEED);
    assert_eq!(pool.create(5), 3);
    assert_eq!(pool.len(), 3);

    let sprites: Vec<_> = pool.iter().filter_map(|piece| piece.sprite()).collect();
    assert_eq!(
        sprites,
        vec![
            Sprite::Gem(GemKind::Blue),
            Sprite::Gem(GemKind::Green),
            Sprite::Gem(GemKind::Orange)
        ]
    );
}

#[test]
fn test_collectibles_are_worth_points_on_distinct_cells() {
    for seed in 0..25 {
        let mut pool = pool(seed);
        pool.create(5);

        let cells: HashSet<Location> = pool.iter().map(|piece| piece.cached_location()).collect();
        assert_eq!(cells.len(), 3, "seed {seed}");

        for piece in pool.iter() {
            assert_eq!(piece.points(), scoring::COLLECTIBLE_POINTS);
            assert_eq!(piece.speed(), 0.0);
            let location = piece.cached_location();
            assert_that(&(2..=4).contains(&location.row)).is_true();
            assert_that(&(1..=5).contains(&location.col)).is_true();
        }
    }
}

#[test]
fn test_collectibles_are_lifted_within_their_cell() {
    let mut pool = pool(5);
    pool.create(3);
    let board = common::config().board;

    for piece in pool.iter_mut() {
        let location = piece.cached_location();
        let unlifted = board.cell_origin(location, PIECE_SIZE);

        assert_eq!(piece.starting_position().y, unlifted.y - 25.0);
        assert_eq!(piece.coords(), piece.starting_position());
        assert_eq!(piece.location(false), location);
    }
}

#[test]
fn test_small_catalog_limits_pool() {
    let mut pool = CollectiblePool::new(common::config(), Random::seeded(1), CollectibleFactory::new(vec![GemKind::Orange]));
    assert_eq!(pool.create(3), 1);
    assert_eq!(pool.factory().catalog(), &[GemKind::Orange]);
}

#[test]
fn test_reset_allows_fresh_round() {
    let mut pool = pool(8);
    pool.create(3);
    pool.reset();
    assert_that(&pool.is_empty()).is_true();
    assert_eq!(pool.create(3), 3);
}
