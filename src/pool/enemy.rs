use crate::constants::spawn::{ENEMY_ROWS, ENEMY_SPEED_BOOST, ENEMY_START_FACTOR};
use crate::entity::enemy::new_enemy;
use crate::entity::piece::GamePiece;
use crate::pool::{GamePiecePool, PieceFactory, Spawner};

/// Spawns enemy bugs on random stone rows, most of them starting off the right edge.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnemyFactory;

impl PieceFactory for EnemyFactory {
    fn create_piece(&mut self, pool_index: usize, spawner: &mut Spawner) -> Option<GamePiece> {
        let row = spawner.generate_random(ENEMY_ROWS);
        let right = spawner.config().bounds.right;
        let start_x = spawner.generate_random_float(1.0, right) * spawner.generate_random(ENEMY_START_FACTOR) as f32;

        let mut enemy = new_enemy(spawner.config().clone(), row, start_x);

        // Odd-numbered enemies get a speed boost
        if pool_index % 2 != 0 {
            let (min, max) = ENEMY_SPEED_BOOST;
            let boost = spawner.generate_random_float_below(min, max);
            enemy.set_speed(enemy.speed() * boost);
        }

        Some(enemy)
    }
}

pub type EnemyPool = GamePiecePool<EnemyFactory>;
