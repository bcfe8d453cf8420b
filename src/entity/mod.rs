pub mod direction;
pub mod enemy;
pub mod piece;
pub mod player;
