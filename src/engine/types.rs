use crate::world::{MaterialId, TextureId};

/// Result of one screen-column ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Perpendicular distance to the view plane (fisheye corrected).
    pub depth: f64,
    /// Wall column height in pixels.
    pub projected_height: f64,
    pub material: MaterialId,
    /// Horizontal texture coordinate, `0..=1`.
    pub offset: f64,
}

/// Axis-aligned rectangle in pixels (screen) or texels (source).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// One textured wall column ready to blit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSlice {
    pub column: usize,
    pub depth: f64,
    pub tex: TextureId,
    pub src: Rect,
    pub dst: Rect,
}

/// A projected billboard ready to blit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteQuad {
    pub depth: f64,
    pub tex: TextureId,
    pub src: Rect,
    pub dst: Rect,
}

/// Everything the renderer draws on top of the background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawItem {
    Wall(WallSlice),
    Sprite(SpriteQuad),
}

impl DrawItem {
    /// Sort key: distance from the view plane.
    #[inline]
    pub fn depth(&self) -> f64 {
        match self {
            DrawItem::Wall(w) => w.depth,
            DrawItem::Sprite(s) => s.depth,
        }
    }

    #[inline]
    pub fn tex(&self) -> TextureId {
        match self {
            DrawItem::Wall(w) => w.tex,
            DrawItem::Sprite(s) => s.tex,
        }
    }

    #[inline]
    pub fn src(&self) -> Rect {
        match self {
            DrawItem::Wall(w) => w.src,
            DrawItem::Sprite(s) => s.src,
        }
    }

    #[inline]
    pub fn dst(&self) -> Rect {
        match self {
            DrawItem::Wall(w) => w.dst,
            DrawItem::Sprite(s) => s.dst,
        }
    }
}

/// Output of one engine pass; rebuilt from scratch every frame.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub hits: Vec<RayHit>,
    /// Far-to-near.
    pub items: Vec<DrawItem>,
}
