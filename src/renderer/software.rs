//! ---------------------------------------------------------------------------
//! Classic software (CPU) blit renderer
//!
//! * Fills an owned scratch buffer in **0xAARRGGBB** format.
//! * Relies on the engine to feed *far-to-near* [`DrawItem`]s, so no Z-buffer
//!   is needed: nearer items simply overwrite farther ones.
//! * Every item is a nearest-neighbour scaled copy of a source rectangle into
//!   a destination rectangle clipped to the screen.
//! ---------------------------------------------------------------------------

use crate::{
    engine::{DrawItem, Rect, Sky},
    renderer::{Renderer, Rgba},
    world::{Texture, TextureBank},
};

const CLEAR: Rgba = 0xFF_20_20_20;

/// Distance darkening applied per item when shading is on.
#[inline]
pub fn shade_factor(depth: f64) -> f64 {
    1.0 / (1.0 + depth.powi(5) * 2e-5)
}

#[inline]
fn shade(px: Rgba, k: f64) -> Rgba {
    let ch = |shift: u32| ((((px >> shift) & 0xFF) as f64 * k) as u32).min(0xFF) << shift;
    (px & 0xFF_00_00_00) | ch(16) | ch(8) | ch(0)
}

#[derive(Default)]
pub struct Software {
    pub scratch: Vec<Rgba>,
    pub width: usize,
    pub height: usize,
    pub shading: bool,
}

impl Software {
    pub fn new(shading: bool) -> Self {
        Self {
            shading,
            ..Self::default()
        }
    }

    /// Scaled copy of `src` (texels) into `dst` (pixels).  Texels with
    /// alpha 0 are skipped; `k` multiplies the colour channels.
    fn blit(&mut self, tex: &Texture, src: Rect, dst: Rect, k: Option<f64>) {
        if dst.w <= 0.0 || dst.h <= 0.0 || src.w <= 0.0 || src.h <= 0.0 {
            return;
        }

        let x0 = dst.x.floor().max(0.0) as usize;
        let y0 = dst.y.floor().max(0.0) as usize;
        let x1 = ((dst.x + dst.w).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((dst.y + dst.h).ceil().max(0.0) as usize).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let sx = src.w / dst.w;
        let sy = src.h / dst.h;

        for y in y0..y1 {
            let v = src.y + (y as f64 + 0.5 - dst.y) * sy;
            if v < src.y || v >= src.y + src.h {
                continue;
            }
            let ty = v.max(0.0) as usize;
            let row = y * self.width;
            for x in x0..x1 {
                let u = src.x + (x as f64 + 0.5 - dst.x) * sx;
                if u < src.x || u >= src.x + src.w {
                    continue;
                }
                let px = tex.texel(u.max(0.0) as usize, ty);
                if px >> 24 == 0 {
                    continue;
                }
                self.scratch[row + x] = match k {
                    Some(k) => shade(px, k),
                    None => px,
                };
            }
        }
    }
}

impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(CLEAR);
    }

    fn draw_background(&mut self, sky: &Sky, floor: Rgba, bank: &TextureBank) {
        let half_h = self.height / 2;
        let w = self.width as f64;
        let tex = bank.texture_or_missing(sky.tex);
        let src = Rect::new(0.0, 0.0, tex.w as f64, tex.h as f64);

        // two copies side by side cover the wrap-around
        let off = sky.offset();
        self.blit(tex, src, Rect::new(-off, 0.0, w, half_h as f64), None);
        self.blit(tex, src, Rect::new(w - off, 0.0, w, half_h as f64), None);

        self.scratch[half_h * self.width..].fill(floor);
    }

    fn draw_item(&mut self, item: &DrawItem, bank: &TextureBank) {
        let tex = bank.texture_or_missing(item.tex());
        let k = self.shading.then(|| shade_factor(item.depth()));
        self.blit(tex, item.src(), item.dst(), k);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgba) {
        let mut x0 = x0;
        let mut y0 = y0;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if (0..self.width as i32).contains(&x0) && (0..self.height as i32).contains(&y0) {
                self.scratch[y0 as usize * self.width + x0 as usize] = col;
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, col: Rgba) {
        let x0 = x.clamp(0, self.width as i32) as usize;
        let x1 = (x + w).clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as usize;
        let y1 = (y + h).clamp(0, self.height as i32) as usize;
        for row in y0..y1 {
            self.scratch[row * self.width + x0..row * self.width + x1].fill(col);
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
