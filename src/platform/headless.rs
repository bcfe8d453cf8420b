use glam::Vec2;
use tracing::trace;

use crate::asset::{Image, ImageSource, Sprite};
use crate::error::AssetError;
use crate::view::Surface;

/// A surface that draws nowhere. Each draw call is counted and traced.
#[derive(Debug, Default)]
pub struct TraceSurface {
    draws: u64,
}

impl TraceSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total draw calls received.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl Surface for TraceSurface {
    fn draw_image(&mut self, image: &Image, position: Vec2) {
        self.draws += 1;
        trace!(sprite = %image.sprite, x = position.x, y = position.y, "draw");
    }
}

/// Resolves every sprite immediately at its natural size, without touching any files.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalSizeSource;

impl ImageSource for NaturalSizeSource {
    fn fetch(&mut self, sprite: Sprite) -> Result<Image, AssetError> {
        Ok(Image::new(sprite, sprite.natural_size()))
    }
}
