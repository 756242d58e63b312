//! Rendering abstraction layer.
//!
//! *The engine never touches a pixel buffer directly.*
//! It produces a far-to-near list of [`DrawItem`]s and hands them, together
//! with the background, to a type that implements [`Renderer`].
//!
//! * Back-ends only need to blit rectangles; all projection maths lives in
//!   [`crate::engine`].
//! * The blanket-impl [`RendererExt`] adds `draw_frame` so call-sites stay
//!   short.

use crate::{
    config::{DebugFlags, RenderConfig},
    engine::{DrawItem, Frame, Sky},
    world::{GridMap, TextureBank, Viewer},
};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

const OVERLAY_WALL: Rgba = 0xFF_A9_A9_A9;
const OVERLAY_VIEWER: Rgba = 0xFF_00_C8_00;
const OVERLAY_RAY: Rgba = 0xFF_FF_D7_00;

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Sky above the horizon scrolled by `sky.offset()`, `floor` below it.
    fn draw_background(&mut self, sky: &Sky, floor: Rgba, bank: &TextureBank);

    /// Blit one wall slice or sprite.  Items must arrive far-to-near.
    fn draw_item(&mut self, item: &DrawItem, bank: &TextureBank);

    /// Debug primitive: 1-pixel line, clipped to the buffer.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgba);

    /// Debug primitive: filled rectangle, clipped to the buffer.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, col: Rgba);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Everything one frame needs besides the texture bank.
pub struct Scene<'a> {
    pub frame: &'a Frame,
    pub sky: &'a Sky,
    pub floor: Rgba,
    pub map: &'a GridMap,
    pub viewer: &'a Viewer,
    pub debug: DebugFlags,
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(&mut self, cfg: &RenderConfig, scene: &Scene, bank: &TextureBank, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(cfg.width, cfg.height);
        self.draw_background(scene.sky, scene.floor, bank);
        for item in &scene.frame.items {
            self.draw_item(item, bank);
        }
        if scene.debug.intersects(DebugFlags::MINIMAP | DebugFlags::RAYS) {
            self.draw_overlay(cfg, scene);
        }
        self.end_frame(submit);
    }

    /// Top-down map in the upper-left corner.
    fn draw_overlay(&mut self, cfg: &RenderConfig, scene: &Scene) {
        let map = scene.map;
        let tile = minimap_tile(cfg, map);

        if scene.debug.contains(DebugFlags::MINIMAP) {
            for (cell, _) in map.walls() {
                self.fill_rect(cell.x * tile, cell.y * tile, tile - 1, tile - 1, OVERLAY_WALL);
            }
        }

        let eye = scene.viewer.position() * tile as f64;
        if scene.debug.contains(DebugFlags::RAYS) {
            for (i, hit) in scene.frame.hits.iter().enumerate() {
                let angle = crate::engine::ray_angle(scene.viewer, cfg, i);
                // undo the fisheye correction to reach the wall along the ray
                let along = hit.depth / (scene.viewer.angle() - angle).cos();
                let end = eye + glam::DVec2::new(angle.cos(), angle.sin()) * along * tile as f64;
                self.draw_line(
                    eye.x as i32,
                    eye.y as i32,
                    end.x as i32,
                    end.y as i32,
                    OVERLAY_RAY,
                );
            }
        }

        let r = (tile / 4).max(1);
        self.fill_rect(eye.x as i32 - r, eye.y as i32 - r, 2 * r, 2 * r, OVERLAY_VIEWER);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

/// Minimap cell size: the whole map fits in a quarter of the screen height.
fn minimap_tile(cfg: &RenderConfig, map: &GridMap) -> i32 {
    let rows = map.height().max(1);
    ((cfg.height / 4 / rows) as i32).max(2)
}

pub mod software;
pub use software::Software;
