//! Sprite catalog and the image cache the pieces draw from.
//!
//! Loading is asynchronous from the game's point of view: [`AssetStore::load`] only requests
//! a sprite, and the host later resolves outstanding requests by pumping the cache with an
//! [`ImageSource`]. Anything that must wait for a sprite registers a ready callback instead
//! of blocking.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use glam::UVec2;
use strum_macros::{AsRefStr, EnumCount, EnumIter};
use tracing::{debug, trace, warn};

use crate::error::AssetError;

/// The background tiles the board is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TileSprite {
    Water,
    Stone,
    Grass,
}

/// The gem catalog. Its size bounds how many collectibles a round can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, EnumCount)]
#[strum(serialize_all = "lowercase")]
pub enum GemKind {
    Blue,
    Green,
    Orange,
}

/// Player characters offered on the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIter, EnumCount)]
#[strum(serialize_all = "kebab-case")]
pub enum CharacterKind {
    #[default]
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    PrincessGirl,
}

/// Every sprite in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Tile(TileSprite),
    EnemyBug,
    Gem(GemKind),
    Character(CharacterKind),
}

impl Sprite {
    /// Generates the asset path for the sprite.
    pub fn to_path(self) -> String {
        match self {
            Sprite::Tile(tile) => format!("images/{}-block.png", tile.as_ref()),
            Sprite::EnemyBug => "images/enemy-bug.png".to_string(),
            Sprite::Gem(gem) => format!("images/gem-{}.png", gem.as_ref()),
            Sprite::Character(character) => format!("images/char-{}.png", character.as_ref()),
        }
    }

    /// The pixel size the artwork ships at. All of the game's sprites share one canvas size.
    pub fn natural_size(self) -> UVec2 {
        UVec2::new(101, 171)
    }
}

impl fmt::Display for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// A decoded, drawable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    pub sprite: Sprite,
    pub size: UVec2,
}

impl Image {
    pub fn new(sprite: Sprite, size: UVec2) -> Self {
        Self { sprite, size }
    }
}

/// Work deferred until every requested sprite has loaded.
pub type ReadyCallback = Box<dyn FnOnce()>;

/// The image-loading collaborator the game draws through.
pub trait AssetStore {
    /// Requests sprites. Requesting a sprite that is already cached or in flight is a no-op.
    fn load(&mut self, sprites: &[Sprite]);

    /// Returns the image for a sprite, or `None` while it is still loading (or was never requested).
    fn get(&self, sprite: Sprite) -> Option<&Image>;

    /// Registers a callback that runs once every requested sprite has loaded. Callbacks run
    /// once each, in registration order. If nothing is pending the callback runs immediately.
    fn on_ready(&mut self, callback: ReadyCallback);

    /// True when no requested sprite is still loading.
    fn is_ready(&self) -> bool;
}

/// Resolves a sprite request into an image; the host's decoder.
pub trait ImageSource {
    fn fetch(&mut self, sprite: Sprite) -> Result<Image, AssetError>;
}

enum Slot {
    Pending,
    Ready(Image),
}

/// In-memory [`AssetStore`] with a request queue and a one-shot ready observer list.
#[derive(Default)]
pub struct SpriteCache {
    slots: HashMap<Sprite, Slot>,
    queue: VecDeque<Sprite>,
    ready_callbacks: Vec<ReadyCallback>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sprites requested but not yet resolved.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Resolves every outstanding request through `source`.
    ///
    /// A sprite the source fails on is dropped from the cache (so the store can still become
    /// ready) and the error is returned; requests behind it stay queued for the next pump.
    pub fn pump(&mut self, source: &mut dyn ImageSource) -> Result<usize, AssetError> {
        let mut resolved = 0;
        while let Some(sprite) = self.queue.pop_front() {
            match source.fetch(sprite) {
                Ok(image) => {
                    self.complete(sprite, image);
                    resolved += 1;
                }
                Err(e) => {
                    warn!(%sprite, error = %e, "Sprite failed to load");
                    self.slots.remove(&sprite);
                    self.notify_if_ready();
                    return Err(e);
                }
            }
        }
        Ok(resolved)
    }

    /// Marks a single sprite as loaded, firing ready callbacks if it was the last one pending.
    pub fn complete(&mut self, sprite: Sprite, image: Image) {
        self.queue.retain(|queued| *queued != sprite);
        self.slots.insert(sprite, Slot::Ready(image));
        trace!(%sprite, "Sprite loaded");
        self.notify_if_ready();
    }

    fn notify_if_ready(&mut self) {
        if !self.is_ready() || self.ready_callbacks.is_empty() {
            return;
        }

        // Drain before calling so a callback can never observe (or re-run) itself.
        let callbacks = std::mem::take(&mut self.ready_callbacks);
        debug!(count = callbacks.len(), "All sprites ready, running callbacks");
        for callback in callbacks {
            callback();
        }
    }
}

impl AssetStore for SpriteCache {
    fn load(&mut self, sprites: &[Sprite]) {
        for &sprite in sprites {
            if self.slots.contains_key(&sprite) {
                continue;
            }
            self.slots.insert(sprite, Slot::Pending);
            self.queue.push_back(sprite);
            trace!(%sprite, "Sprite requested");
        }
    }

    fn get(&self, sprite: Sprite) -> Option<&Image> {
        match self.slots.get(&sprite) {
            Some(Slot::Ready(image)) => Some(image),
            _ => None,
        }
    }

    fn on_ready(&mut self, callback: ReadyCallback) {
        if self.is_ready() {
            callback();
        } else {
            self.ready_callbacks.push(callback);
        }
    }

    fn is_ready(&self) -> bool {
        self.slots.values().all(|slot| matches!(slot, Slot::Ready(_)))
    }
}
