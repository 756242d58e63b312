use glam::DVec2;

use crate::world::texture::{Texture, TextureId};

/// Billboard placed in the world; read-only to the projector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteState {
    pub pos: DVec2,
    pub texture: TextureId,
    /// Source image size in texels.
    pub image_w: usize,
    pub image_h: usize,
    /// Height on screen relative to a wall at the same depth.
    pub scale: f64,
    /// Vertical offset as a fraction of the projected height (+ = down).
    pub shift: f64,
}

impl SpriteState {
    pub fn new(pos: DVec2, texture: TextureId, image: &Texture) -> Self {
        Self {
            pos,
            texture,
            image_w: image.w,
            image_h: image.h,
            scale: 0.5,
            shift: 0.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    /// Width over height of the source image.
    #[inline]
    pub fn aspect(&self) -> f64 {
        self.image_w as f64 / self.image_h.max(1) as f64
    }

    #[inline]
    pub fn half_image_width(&self) -> f64 {
        (self.image_w / 2) as f64
    }
}
