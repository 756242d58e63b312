//! Billboard projection.
//!
//! A sprite is placed on screen by its bearing from the viewer, converted
//! to a fractional ray index, and sized like a wall column at the same
//! perpendicular depth so both can share one painter's sort.

use std::f64::consts::{PI, TAU};

use crate::{
    config::RenderConfig,
    engine::types::{DrawItem, Rect, SpriteQuad},
    world::{SpriteState, Viewer},
};

/// Sprites at or inside this corrected depth are culled.
pub const NEAR_CLIP: f64 = 0.5;

/// Screen-space placement before the visibility test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bearing {
    /// Angle from the view direction, unwrapped across the atan2 seam.
    pub delta: f64,
    /// Horizontal centre on screen, in pixels.
    pub screen_x: f64,
    /// Fisheye-corrected distance.
    pub depth: f64,
}

/// Where `sprite` sits relative to the viewer's field of view.
pub fn bearing(sprite: &SpriteState, viewer: &Viewer, cfg: &RenderConfig) -> Bearing {
    let d = sprite.pos - viewer.position();
    let theta = d.y.atan2(d.x);
    let angle = viewer.angle();

    let mut delta = theta - angle;
    if (d.x > 0.0 && angle > PI) || (d.x < 0.0 && d.y < 0.0) {
        delta += TAU;
    }

    let delta_rays = delta / cfg.delta_angle;
    let screen_x = (cfg.half_num_rays as f64 + delta_rays) * cfg.scale as f64;

    let distance = d.x.hypot(d.y);
    Bearing {
        delta,
        screen_x,
        depth: distance * delta.cos(),
    }
}

/// Project `sprite` into a draw item, or `None` when it is off-screen or
/// too close.
pub fn project_sprite(
    sprite: &SpriteState,
    viewer: &Viewer,
    cfg: &RenderConfig,
) -> Option<DrawItem> {
    let b = bearing(sprite, viewer, cfg);

    let half_img = sprite.half_image_width();
    let on_screen = -half_img < b.screen_x && b.screen_x < cfg.width as f64 + half_img;
    if !on_screen || b.depth <= NEAR_CLIP {
        return None;
    }

    let proj = cfg.screen_dist / b.depth * sprite.scale;
    let proj_w = proj * sprite.aspect();
    let proj_h = proj;

    let half_w = (proj_w / 2.0).floor();
    let shift = proj_h * sprite.shift;

    Some(DrawItem::Sprite(SpriteQuad {
        depth: b.depth,
        tex: sprite.texture,
        src: Rect::new(0.0, 0.0, sprite.image_w as f64, sprite.image_h as f64),
        dst: Rect::new(
            b.screen_x - half_w,
            cfg.half_height - (proj_h / 2.0).floor() + shift,
            proj_w,
            proj_h,
        ),
    }))
}
