use std::time::Duration;

use crate::world::{SpriteState, TextureId};

/// What the sprite projector sees of an entity.
#[derive(Debug, Clone, Copy)]
pub struct Billboard(pub SpriteState);

/// Cycles an entity's billboard through a fixed list of images.
#[derive(Debug, Clone)]
pub struct FrameCycle {
    frames: Vec<TextureId>,
    current: usize,
    interval: Duration,
    last_swap: Duration,
}

impl FrameCycle {
    /// `None` when `frames` is empty.
    pub fn new(frames: Vec<TextureId>, interval: Duration) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self {
            frames,
            current: 0,
            interval,
            last_swap: Duration::ZERO,
        })
    }

    #[inline]
    pub fn frame(&self) -> TextureId {
        self.frames[self.current]
    }

    /// Advance one image once more than `interval` has passed since the
    /// last swap.  Returns `true` when the image changed.
    pub fn update(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_swap) <= self.interval {
            return false;
        }
        self.last_swap = now;
        self.current = (self.current + 1) % self.frames.len();
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    pub forward: f64, // –1 … +1
    pub strafe: f64,  // –1 … +1  (left / right)
    pub turn: f64,    // –1 … +1  (left / right)
    pub mouse_dx: f64, // relative pixels since the last frame
}
