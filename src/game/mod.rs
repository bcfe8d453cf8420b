//! This module contains the main game logic: the round lifecycle and the per-frame
//! update, render and collision cycle.

use std::rc::Rc;
use std::time::Instant;

use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::asset::{AssetStore, CharacterKind, GemKind, Sprite};
use crate::board::Location;
use crate::config::GameConfig;
use crate::constants::scoring::{LOSS_PENALTY, WIN_BONUS};
use crate::constants::spawn::{COLLECTIBLE_COUNT, ENEMY_COUNT};
use crate::entity::piece::PieceId;
use crate::entity::player::Player;
use crate::input::{Bindings, GameCommand, KeyCode};
use crate::pool::{CollectibleFactory, CollectiblePool, EnemyFactory, EnemyPool, GamePiecePool, PieceFactory, Random};
use crate::view::{GameBoard, Modals, Surface};

pub mod state;

pub use state::{FrameTicket, GameState};

/// Which of the controller's pools to test the player against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Enemies,
    Collectibles,
}

/// What a key press led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Unbound key, or a command that does not apply in the current state.
    Ignored,
    Handled,
    /// A new round started; drive it with this ticket.
    Started(FrameTicket),
    ExitRequested,
}

/// Owns every piece of mutable game state and runs the round lifecycle.
///
/// The host drives it by calling [`GameController::start_new_game`] and then feeding each
/// returned [`FrameTicket`] back into [`GameController::play`] once per displayed frame.
pub struct GameController<S, A> {
    config: Rc<GameConfig>,
    state: GameState,
    player: Player,
    enemies: EnemyPool,
    collectibles: CollectiblePool,
    board: GameBoard,
    modals: Modals,
    bindings: Bindings,
    assets: A,
    surface: S,
    random: Random,
    last_time: Option<Instant>,
    generation: u64,
}

impl<S: Surface, A: AssetStore> GameController<S, A> {
    pub fn new(config: Rc<GameConfig>, mut assets: A, surface: S, mut random: Random) -> Self {
        let board = GameBoard::new(config.board);

        let mut preload = board.sprites();
        preload.push(Sprite::EnemyBug);
        preload.extend(GemKind::iter().map(Sprite::Gem));
        preload.extend(CharacterKind::iter().map(Sprite::Character));
        assets.load(&preload);

        let enemies = GamePiecePool::new(config.clone(), random.fork(), EnemyFactory);
        let collectibles = GamePiecePool::new(config.clone(), random.fork(), CollectibleFactory::default());

        let mut modals = Modals::default();
        modals.setup.show(None);

        Self {
            player: Player::new(config.clone(), CharacterKind::default()),
            config,
            state: GameState::Idle,
            enemies,
            collectibles,
            board,
            modals,
            bindings: Bindings::default(),
            assets,
            surface,
            random,
            last_time: None,
            generation: 0,
        }
    }

    /// Starts a fresh round and returns the ticket for its first frame. Any ticket from an
    /// earlier round stops working.
    pub fn start_new_game(&mut self, now: Instant) -> FrameTicket {
        self.reset();

        let enemy_count = self.random.int(ENEMY_COUNT) as usize;
        let collectible_count = self.random.int(COLLECTIBLE_COUNT) as usize;
        self.enemies.create(enemy_count);
        self.collectibles.create(collectible_count);

        self.update_pieces(0.0);
        self.render();

        self.last_time = Some(now);
        self.generation += 1;
        self.state = GameState::Playing;

        debug!(
            generation = self.generation,
            enemies = self.enemies.len(),
            collectibles = self.collectibles.len(),
            "New game started"
        );
        FrameTicket {
            generation: self.generation,
        }
    }

    /// Runs one frame: moves everything by the time elapsed since the previous frame, draws,
    /// then settles the round. An enemy hit is checked before the win row, so a frame that
    /// does both is a loss.
    ///
    /// Returns the ticket for the next frame, or `None` once the round is over or if the
    /// ticket belongs to an earlier round.
    pub fn play(&mut self, ticket: FrameTicket, now: Instant) -> Option<FrameTicket> {
        if ticket.generation != self.generation || self.state != GameState::Playing {
            trace!(
                ticket = ticket.generation,
                current = self.generation,
                state = self.state.as_ref(),
                "Ignoring stale frame"
            );
            return None;
        }

        let dt = self
            .last_time
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last_time = Some(now);

        self.update_pieces(dt);
        self.render();

        if self.has_collided(PoolKind::Enemies).is_some() {
            self.game_over(false);
            return None;
        }

        if self.player.has_won() {
            self.game_over(true);
            return None;
        }

        self.check_collectible();
        Some(ticket)
    }

    /// Collects the gem the player is standing on, if any.
    pub fn check_collectible(&mut self) {
        let Some(id) = self.has_collided(PoolKind::Collectibles) else {
            return;
        };

        if let Some(collectible) = self.collectibles.delete(id) {
            self.player.add_score(collectible.points());
            self.board.update_score(self.player.score());
            debug!(
                points = collectible.points(),
                score = self.player.score(),
                "Collectible picked up"
            );
        }
    }

    /// The first piece in `pool` (in pool order) sharing the player's cell.
    ///
    /// The player's cached cell is compared against each piece's freshly computed one.
    pub fn has_collided(&mut self, pool: PoolKind) -> Option<PieceId> {
        let player_location = self.player.piece().cached_location();
        let hit = match pool {
            PoolKind::Enemies => first_on_location(&mut self.enemies, player_location),
            PoolKind::Collectibles => first_on_location(&mut self.collectibles, player_location),
        };

        if let Some(id) = hit {
            trace!(?pool, piece = id.0, ?player_location, "Player shares a cell");
        }
        hit
    }

    /// Settles the score and shows the matching end-of-round modal.
    ///
    /// A win adds a flat bonus. A loss takes the same amount off, but never drops the score
    /// below zero.
    pub fn game_over(&mut self, won: bool) {
        let score = self.player.score();
        let points = if won {
            WIN_BONUS
        } else if score > LOSS_PENALTY {
            -LOSS_PENALTY
        } else {
            -score
        };

        self.player.add_score(points);
        let score = self.player.score();
        self.board.update_score(score);

        if won {
            self.state = GameState::Won;
            self.modals.won.show(Some(score));
        } else {
            self.state = GameState::Lost;
            self.modals.lost.show(Some(score));
        }
        debug!(won, score, "Game over");
    }

    /// Hides the modals and returns the board, pools and player to their pre-round state.
    /// The player's score carries over.
    pub fn reset(&mut self) {
        self.modals.hide_all();
        self.board.update_score(self.player.score());
        self.enemies.reset();
        self.player.piece_mut().reset();
        self.collectibles.reset();
    }

    /// Marks the character on the setup screen and swaps the player's sprite. The setup
    /// screen's play button appears once the new sprite has loaded.
    pub fn select_character(&mut self, character: CharacterKind) {
        self.modals.setup.set_selected_option(character);

        let play_button = self.modals.setup.play_button();
        self.player.piece_mut().set_sprite(
            Sprite::Character(character),
            &mut self.assets,
            Some(Box::new(move || play_button.reveal())),
        );
    }

    /// Moves the player for an arrow key. Ignored outside of a running round.
    pub fn handle_player_move(&mut self, key: KeyCode) -> bool {
        if self.state != GameState::Playing || !self.player.is_valid_move_command(key) {
            return false;
        }
        self.player.handle_input(key);
        true
    }

    /// Routes a key-up event through the key bindings.
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) -> KeyOutcome {
        let Some(command) = self.bindings.command_for(key) else {
            return KeyOutcome::Ignored;
        };

        match command {
            GameCommand::MovePlayer(_) => {
                if self.handle_player_move(key) {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }
            }
            GameCommand::NewGame => KeyOutcome::Started(self.start_new_game(now)),
            GameCommand::SelectCharacter(character) => {
                if self.state == GameState::Playing {
                    return KeyOutcome::Ignored;
                }
                self.select_character(character);
                KeyOutcome::Handled
            }
            GameCommand::Exit => KeyOutcome::ExitRequested,
        }
    }

    /// Draws the board, then the player, enemies and collectibles on top.
    pub fn render(&mut self) {
        self.board.render(&mut self.surface, &self.assets);
        self.player.piece().render(&mut self.surface, &self.assets);
        self.enemies.render(&mut self.surface, &self.assets);
        self.collectibles.render(&mut self.surface, &self.assets);
    }

    fn update_pieces(&mut self, dt: f32) {
        self.enemies.update(dt);
        self.player.piece_mut().update(dt);
        self.collectibles.update(dt);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &EnemyPool {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut EnemyPool {
        &mut self.enemies
    }

    pub fn collectibles(&self) -> &CollectiblePool {
        &self.collectibles
    }

    pub fn collectibles_mut(&mut self) -> &mut CollectiblePool {
        &mut self.collectibles
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn modals(&self) -> &Modals {
        &self.modals
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

fn first_on_location<F: PieceFactory>(pool: &mut GamePiecePool<F>, location: Location) -> Option<PieceId> {
    pool.iter_mut()
        .find_map(|piece| (piece.location(false) == location).then(|| piece.id()))
}
