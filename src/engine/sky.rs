use crate::world::TextureId;

/// Horizontal pixels the sky moves per unit of relative mouse motion.
pub const SKY_SCROLL: f64 = 4.5;

/// Scrolling panorama drawn behind everything above the horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sky {
    pub tex: TextureId,
    offset: f64,
}

impl Sky {
    pub fn new(tex: TextureId) -> Self {
        Self { tex, offset: 0.0 }
    }

    /// Current scroll in screen pixels, always in `[0, width)`.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Scroll along with the mouse; the result wraps around the screen width.
    pub fn advance(&mut self, mouse_dx: f64, width: usize) {
        let width = width.max(1) as f64;
        let next = (self.offset + SKY_SCROLL * mouse_dx).rem_euclid(width);
        // rem_euclid can round up to `width` for tiny negative inputs
        self.offset = if next >= width { 0.0 } else { next };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_wraps_both_ways() {
        let mut sky = Sky::new(3);
        sky.advance(10.0, 100);
        assert_eq!(sky.offset(), 45.0);
        sky.advance(20.0, 100);
        assert_eq!(sky.offset(), 35.0);
        sky.advance(-10.0, 100);
        assert_eq!(sky.offset(), 90.0);
    }

    #[test]
    fn fast_drag_scrolls_by_clamped_amount() {
        use crate::config::PlayerSettings;

        let player = PlayerSettings::default();
        let mut sky = Sky::new(0);
        sky.advance(player.clamp_mouse(400.0), 1000);
        assert_eq!(sky.offset(), 180.0);
    }

    #[test]
    fn tiny_negative_stays_in_range() {
        let mut sky = Sky::new(0);
        sky.advance(-1e-18, 640);
        assert!((0.0..640.0).contains(&sky.offset()));
    }
}
