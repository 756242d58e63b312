use crate::engine::types::DrawItem;

/// Merge walls and sprites into one far-to-near list for the painter's
/// algorithm.  Equal depths come out in no particular order.
pub fn composite(
    walls: impl IntoIterator<Item = DrawItem>,
    sprites: impl IntoIterator<Item = DrawItem>,
) -> Vec<DrawItem> {
    let mut items: Vec<DrawItem> = walls.into_iter().chain(sprites).collect();
    items.sort_unstable_by(|a, b| b.depth().total_cmp(&a.depth()));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Rect, SpriteQuad, WallSlice};

    fn wall(depth: f64) -> DrawItem {
        DrawItem::Wall(WallSlice {
            column: 0,
            depth,
            tex: 1,
            src: Rect::default(),
            dst: Rect::default(),
        })
    }

    fn sprite(depth: f64) -> DrawItem {
        DrawItem::Sprite(SpriteQuad {
            depth,
            tex: 2,
            src: Rect::default(),
            dst: Rect::default(),
        })
    }

    fn depths(items: &[DrawItem]) -> Vec<f64> {
        items.iter().map(DrawItem::depth).collect()
    }

    #[test]
    fn farthest_first() {
        let none: [DrawItem; 0] = [];
        let out = composite([wall(5.0), wall(1.0), wall(3.0)], none);
        assert_eq!(depths(&out), [5.0, 3.0, 1.0]);
    }

    #[test]
    fn sprites_interleave_with_walls() {
        let out = composite([wall(4.0), wall(1.5)], [sprite(2.0), sprite(9.0)]);
        assert_eq!(depths(&out), [9.0, 4.0, 2.0, 1.5]);
        assert!(matches!(out[0], DrawItem::Sprite(_)));
        assert!(matches!(out[3], DrawItem::Wall(_)));
    }

    #[test]
    fn empty_inputs() {
        assert!(composite(Vec::<DrawItem>::new(), Vec::<DrawItem>::new()).is_empty());
    }
}
