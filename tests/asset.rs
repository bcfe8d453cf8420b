use std::cell::RefCell;
use std::rc::Rc;

use frogger::asset::{AssetStore, GemKind, Image, ImageSource, Sprite, SpriteCache};
use frogger::error::AssetError;
use frogger::platform::NaturalSizeSource;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

/// Fails on one sprite and resolves the rest.
struct FailingSource {
    broken: Sprite,
}

impl ImageSource for FailingSource {
    fn fetch(&mut self, sprite: Sprite) -> Result<Image, AssetError> {
        if sprite == self.broken {
            Err(AssetError::NotFound(sprite))
        } else {
            Ok(Image::new(sprite, sprite.natural_size()))
        }
    }
}

fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) -> Box<dyn FnOnce()>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let handle = log.clone();
    let make = move |id: u32| {
        let log = handle.clone();
        Box::new(move || log.borrow_mut().push(id)) as Box<dyn FnOnce()>
    };
    (log, make)
}

#[test]
fn test_get_is_none_until_loaded() {
    let mut cache = SpriteCache::new();
    assert_that(&cache.get(Sprite::EnemyBug)).is_none();

    cache.load(&[Sprite::EnemyBug]);
    assert_that(&cache.get(Sprite::EnemyBug)).is_none();
    assert_that(&cache.is_ready()).is_false();

    cache.pump(&mut NaturalSizeSource).unwrap();
    assert_eq!(
        cache.get(Sprite::EnemyBug),
        Some(&Image::new(Sprite::EnemyBug, Sprite::EnemyBug.natural_size()))
    );
}

#[test]
fn test_ready_callbacks_fire_once_in_order() {
    let (log, make) = recorder();
    let mut cache = SpriteCache::new();
    cache.load(&[Sprite::EnemyBug, Sprite::Gem(GemKind::Blue)]);
    cache.on_ready(make(1));
    cache.on_ready(make(2));

    cache.complete(Sprite::EnemyBug, Image::new(Sprite::EnemyBug, Sprite::EnemyBug.natural_size()));
    assert_that(&log.borrow().is_empty()).is_true();

    let gem = Sprite::Gem(GemKind::Blue);
    cache.complete(gem, Image::new(gem, gem.natural_size()));
    assert_eq!(*log.borrow(), vec![1, 2]);

    // A later load/ready cycle must not replay the earlier callbacks.
    let green = Sprite::Gem(GemKind::Green);
    cache.load(&[green]);
    cache.on_ready(make(3));
    cache.pump(&mut NaturalSizeSource).unwrap();
    assert_eq!(*log.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_callback_on_ready_store_runs_immediately() {
    let (log, make) = recorder();
    let mut cache = SpriteCache::new();
    cache.on_ready(make(7));
    assert_eq!(*log.borrow(), vec![7]);
}

#[test]
fn test_pump_resolves_everything_pending() {
    let mut cache = SpriteCache::new();
    cache.load(&[Sprite::EnemyBug, Sprite::Gem(GemKind::Orange), Sprite::EnemyBug]);
    assert_eq!(cache.pending(), 2);

    assert_eq!(cache.pump(&mut NaturalSizeSource).unwrap(), 2);
    assert_eq!(cache.pending(), 0);
    assert_that(&cache.is_ready()).is_true();
}

#[test]
fn test_failed_sprite_is_dropped() {
    let (log, make) = recorder();
    let mut cache = SpriteCache::new();
    cache.load(&[Sprite::EnemyBug]);
    cache.on_ready(make(1));

    let result = cache.pump(&mut FailingSource {
        broken: Sprite::EnemyBug,
    });
    assert_that(&matches!(result, Err(AssetError::NotFound(Sprite::EnemyBug)))).is_true();
    assert_that(&cache.get(Sprite::EnemyBug)).is_none();
    assert_that(&cache.is_ready()).is_true();
    assert_eq!(*log.borrow(), vec![1]);
}

#[test]
fn test_requests_behind_a_failure_stay_queued() {
    let mut cache = SpriteCache::new();
    let gem = Sprite::Gem(GemKind::Blue);
    cache.load(&[Sprite::EnemyBug, gem]);

    let mut source = FailingSource {
        broken: Sprite::EnemyBug,
    };
    assert_that(&cache.pump(&mut source).is_err()).is_true();
    assert_eq!(cache.pending(), 1);

    assert_eq!(cache.pump(&mut source).unwrap(), 1);
    assert_that(&cache.get(gem)).is_some();
}
