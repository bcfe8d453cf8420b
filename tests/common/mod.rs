#![allow(dead_code)]

use std::rc::Rc;

use frogger::asset::{AssetStore, Image, Sprite, SpriteCache};
use frogger::config::GameConfig;
use frogger::game::GameController;
use frogger::platform::NaturalSizeSource;
use frogger::pool::Random;
use frogger::view::Surface;
use glam::Vec2;

pub const SEED: u64 = 0x5EED;

/// A surface that remembers every draw call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub draws: Vec<(Sprite, Vec2)>,
}

impl RecordingSurface {
    pub fn count(&self, sprite: Sprite) -> usize {
        self.draws.iter().filter(|(drawn, _)| *drawn == sprite).count()
    }
}

impl Surface for RecordingSurface {
    fn draw_image(&mut self, image: &Image, position: Vec2) {
        self.draws.push((image.sprite, position));
    }
}

pub fn config() -> Rc<GameConfig> {
    Rc::new(GameConfig::default())
}

/// A cache with the given sprites already loaded.
pub fn loaded_cache(sprites: &[Sprite]) -> SpriteCache {
    let mut cache = SpriteCache::new();
    cache.load(sprites);
    cache.pump(&mut NaturalSizeSource).unwrap();
    cache
}

pub type TestController = GameController<RecordingSurface, SpriteCache>;

/// A controller with every preloaded sprite resolved.
pub fn controller(seed: u64) -> TestController {
    let mut controller = GameController::new(config(), SpriteCache::new(), RecordingSurface::default(), Random::seeded(seed));
    controller.assets_mut().pump(&mut NaturalSizeSource).unwrap();
    controller
}
