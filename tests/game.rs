use std::time::{Duration, Instant};

use frogger::asset::{CharacterKind, Sprite, SpriteCache};
use frogger::board::Location;
use frogger::constants::PIECE_SIZE;
use frogger::entity::direction::Direction;
use frogger::game::{GameController, GameState, KeyOutcome, PoolKind};
use frogger::input::KeyCode;
use frogger::platform::NaturalSizeSource;
use frogger::pool::Random;
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{controller, RecordingSurface, SEED};

/// Walks the player from the start cell onto the water row.
fn walk_to_water(controller: &mut common::TestController) {
    for _ in 0..4 {
        controller.player_mut().step(Direction::Up);
    }
    assert_that(&controller.player().has_won()).is_true();
}

#[test]
fn test_controller_waits_on_setup() {
    let controller = controller(SEED);
    assert_eq!(controller.state(), GameState::Idle);
    assert_that(&controller.modals().setup.is_active()).is_true();
    assert_that(&controller.enemies().is_empty()).is_true();
}

#[test]
fn test_start_new_game_populates_pools() {
    for seed in 0..20 {
        let mut controller = controller(seed);
        let ticket = controller.start_new_game(Instant::now());

        assert_eq!(controller.state(), GameState::Playing);
        assert_eq!(ticket.generation(), 1);
        assert_that(&(3..=6).contains(&controller.enemies().len())).is_true();
        assert_that(&(2..=3).contains(&controller.collectibles().len())).is_true();
        assert_that(&controller.modals().setup.is_active()).is_false();
        assert_eq!(controller.player().piece().cached_location(), Location::new(5, 3));
    }
}

#[test]
fn test_first_frame_draws_board_then_pieces() {
    let mut controller = controller(SEED);
    controller.start_new_game(Instant::now());

    let surface = controller.surface();
    let pieces = 1 + controller.enemies().len() + controller.collectibles().len();
    assert_eq!(surface.draws.len(), 30 + pieces);
    assert_eq!(surface.draws[30].0, Sprite::Character(CharacterKind::Boy));
    assert_eq!(surface.count(Sprite::EnemyBug), controller.enemies().len());
}

#[test]
fn test_play_returns_next_ticket_while_playing() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let ticket = controller.start_new_game(start);

    let next = controller.play(ticket, start);
    assert_eq!(next, Some(ticket));
    assert_eq!(controller.state(), GameState::Playing);
}

#[test]
fn test_play_moves_enemies_by_elapsed_time() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let ticket = controller.start_new_game(start);

    // Park every enemy on the far left of its row so a short frame cannot wrap or hit anyone.
    for enemy in controller.enemies_mut().iter_mut() {
        let y = enemy.coords().y;
        enemy.place_at(Vec2::new(-101.0, y));
    }
    let speeds: Vec<f32> = controller.enemies().iter().map(|enemy| enemy.speed()).collect();

    controller.play(ticket, start + Duration::from_millis(100));

    for (enemy, speed) in controller.enemies().iter().zip(speeds) {
        let expected = -101.0 + 0.1 * speed;
        assert_that(&(enemy.coords().x - expected).abs()).is_less_than(0.01);
    }
}

#[test]
fn test_enemy_collision_beats_win() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let ticket = controller.start_new_game(start);
    controller.player_mut().add_score(2000);

    walk_to_water(&mut controller);
    let player_coords = controller.player().piece().coords();
    let enemy = controller.enemies_mut().iter_mut().next().unwrap();
    // Leading-edge column 3 on the water row.
    enemy.place_at(Vec2::new(250.0, player_coords.y));

    assert_that(&controller.has_collided(PoolKind::Enemies).is_some()).is_true();
    assert_eq!(controller.play(ticket, start), None);
    assert_eq!(controller.state(), GameState::Lost);
    assert_eq!(controller.player().score(), 0);
    assert_that(&controller.modals().lost.is_active()).is_true();
    assert_that(&controller.modals().won.is_active()).is_false();
}

#[test]
fn test_reaching_water_wins_bonus() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let ticket = controller.start_new_game(start);

    walk_to_water(&mut controller);
    assert_eq!(controller.play(ticket, start), None);
    assert_eq!(controller.state(), GameState::Won);
    assert_eq!(controller.player().score(), 10_000);
    assert_eq!(controller.board().displayed_score(), 10_000);
    assert_eq!(controller.modals().won.score(), Some(10_000));
}

#[test]
fn test_finished_round_ignores_further_frames() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let ticket = controller.start_new_game(start);
    walk_to_water(&mut controller);
    controller.play(ticket, start);

    assert_eq!(controller.play(ticket, start), None);
    assert_eq!(controller.player().score(), 10_000);
}

#[test]
fn test_loss_with_large_score_takes_penalty() {
    let mut controller = controller(SEED);
    controller.start_new_game(Instant::now());
    controller.player_mut().add_score(15_000);

    controller.game_over(false);
    assert_eq!(controller.player().score(), 5_000);
    assert_eq!(controller.modals().lost.score(), Some(5_000));
    assert_eq!(controller.board().score_text(), "5,000");
}

#[test]
fn test_loss_with_small_score_zeroes_it() {
    let mut controller = controller(SEED);
    controller.start_new_game(Instant::now());
    controller.player_mut().add_score(500);

    controller.game_over(false);
    assert_eq!(controller.player().score(), 0);
    assert_eq!(controller.state(), GameState::Lost);
}

#[test]
fn test_loss_at_exactly_penalty_zeroes_score() {
    let mut controller = controller(SEED);
    controller.player_mut().add_score(10_000);
    controller.game_over(false);
    assert_eq!(controller.player().score(), 0);
}

#[test]
fn test_collectible_is_picked_up_once() {
    let mut controller = controller(SEED);
    controller.start_new_game(Instant::now());
    let before = controller.collectibles().len();

    let target = controller.collectibles().iter().next().unwrap().cached_location();
    let origin = controller.config().board.cell_origin(target, PIECE_SIZE);
    controller.player_mut().piece_mut().place_at(origin);

    controller.check_collectible();
    assert_eq!(controller.player().score(), 1_000);
    assert_eq!(controller.board().displayed_score(), 1_000);
    assert_eq!(controller.collectibles().len(), before - 1);

    controller.check_collectible();
    assert_eq!(controller.player().score(), 1_000);
}

#[test]
fn test_frame_picks_up_gem_under_player() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let ticket = controller.start_new_game(start);
    controller.enemies_mut().reset();
    let before = controller.collectibles().len();

    let target = controller.collectibles().iter().next().unwrap().cached_location();
    let origin = controller.config().board.cell_origin(target, PIECE_SIZE);
    controller.player_mut().piece_mut().place_at(origin);

    assert_eq!(controller.play(ticket, start + Duration::from_millis(16)), Some(ticket));
    assert_eq!(controller.state(), GameState::Playing);
    assert_eq!(controller.player().score(), 1_000);
    assert_eq!(controller.board().displayed_score(), 1_000);
    assert_eq!(controller.collectibles().len(), before - 1);
}

#[test]
fn test_enemy_on_gem_cell_ends_round_before_pickup() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let ticket = controller.start_new_game(start);
    let before = controller.collectibles().len();

    let target = controller.collectibles().iter().next().unwrap().cached_location();
    let origin = controller.config().board.cell_origin(target, PIECE_SIZE);
    controller.player_mut().piece_mut().place_at(origin);

    // Half a cell right of the player puts the enemy's leading edge in the player's column.
    let cell_width = controller.config().board.cell_size().x;
    let enemy = controller.enemies_mut().iter_mut().next().unwrap();
    enemy.place_at(Vec2::new(origin.x + cell_width / 2.0, origin.y));
    assert_eq!(enemy.cached_location(), target);

    assert_eq!(controller.play(ticket, start), None);
    assert_eq!(controller.state(), GameState::Lost);
    assert_eq!(controller.player().score(), 0);
    assert_eq!(controller.collectibles().len(), before);
}

#[test]
fn test_has_collided_without_overlap() {
    let mut controller = controller(SEED);
    controller.start_new_game(Instant::now());
    assert_eq!(controller.has_collided(PoolKind::Collectibles), None);
    assert_eq!(controller.has_collided(PoolKind::Enemies), None);
}

#[test]
fn test_restart_invalidates_old_ticket() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let old = controller.start_new_game(start);
    let fresh = controller.start_new_game(start);

    assert_that(&old.generation()).is_less_than(fresh.generation());
    assert_eq!(controller.play(old, start), None);
    assert_eq!(controller.state(), GameState::Playing);
    assert_eq!(controller.play(fresh, start), Some(fresh));
}

#[test]
fn test_score_carries_into_next_round() {
    let mut controller = controller(SEED);
    let start = Instant::now();
    let ticket = controller.start_new_game(start);
    walk_to_water(&mut controller);
    controller.play(ticket, start);

    controller.start_new_game(start);
    assert_eq!(controller.player().score(), 10_000);
    assert_eq!(controller.board().displayed_score(), 10_000);
    assert_that(&controller.modals().won.is_active()).is_false();
    assert_eq!(controller.player().piece().cached_location(), Location::new(5, 3));
}

#[test]
fn test_move_keys_ignored_until_playing() {
    let mut controller = controller(SEED);
    let now = Instant::now();
    let before = controller.player().piece().coords();

    assert_eq!(controller.handle_key(KeyCode::UP, now), KeyOutcome::Ignored);
    assert_eq!(controller.player().piece().coords(), before);

    let outcome = controller.handle_key(KeyCode::ENTER, now);
    assert_that(&matches!(outcome, KeyOutcome::Started(_))).is_true();
    assert_eq!(controller.handle_key(KeyCode::UP, now), KeyOutcome::Handled);
    assert_eq!(controller.player().piece().cached_location(), Location::new(4, 3));
}

#[test]
fn test_unbound_and_exit_keys() {
    let mut controller = controller(SEED);
    let now = Instant::now();
    assert_eq!(controller.handle_key(KeyCode(0), now), KeyOutcome::Ignored);
    assert_eq!(controller.handle_key(KeyCode::ESCAPE, now), KeyOutcome::ExitRequested);
    assert_eq!(controller.handle_key(KeyCode::Q, now), KeyOutcome::ExitRequested);
}

#[test]
fn test_character_selection_reveals_play_button_once_loaded() {
    let mut controller = GameController::new(common::config(), SpriteCache::new(), RecordingSurface::default(), Random::seeded(SEED));

    controller.select_character(CharacterKind::HornGirl);
    assert_eq!(controller.modals().setup.selected_option(), Some(CharacterKind::HornGirl));
    assert_eq!(
        controller.player().piece().sprite(),
        Some(Sprite::Character(CharacterKind::HornGirl))
    );
    assert_that(&controller.modals().setup.play_button().is_visible()).is_false();

    controller.assets_mut().pump(&mut NaturalSizeSource).unwrap();
    assert_that(&controller.modals().setup.play_button().is_visible()).is_true();
}

#[test]
fn test_character_keys_ignored_mid_round() {
    let mut controller = controller(SEED);
    let now = Instant::now();
    assert_eq!(controller.handle_key(KeyCode(50), now), KeyOutcome::Handled);
    controller.start_new_game(now);
    assert_eq!(controller.handle_key(KeyCode(51), now), KeyOutcome::Ignored);
    assert_eq!(controller.modals().setup.selected_option(), Some(CharacterKind::CatGirl));
}
