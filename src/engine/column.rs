use crate::{
    config::RenderConfig,
    engine::types::{RayHit, Rect, WallSlice},
    world::TextureBank,
};

/// Source strip and screen placement for the wall column of ray `column`.
///
/// Columns shorter than the screen take the full texture height.  Taller
/// ones only sample the vertically centred part that stays visible and
/// fill the whole screen height.
pub fn wall_slice(column: usize, hit: &RayHit, cfg: &RenderConfig) -> Blit {
    let size = cfg.texture_size as f64;
    let scale = cfg.scale as f64;
    let height = cfg.height as f64;
    let ph = hit.projected_height;

    let tex_x = hit.offset.clamp(0.0, 1.0) * (size - scale);
    let x = (column * cfg.scale) as f64;

    if ph <= height {
        Blit {
            src: Rect::new(tex_x, 0.0, scale, size),
            dst: Rect::new(x, cfg.half_height - (ph / 2.0).floor(), scale, ph),
        }
    } else {
        let tex_h = size * height / ph;
        Blit {
            src: Rect::new(
                tex_x,
                cfg.half_texture_size as f64 - (tex_h / 2.0).floor(),
                scale,
                tex_h,
            ),
            dst: Rect::new(x, 0.0, scale, height),
        }
    }
}

/// Source and destination of one blit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blit {
    pub src: Rect,
    pub dst: Rect,
}

/// One [`WallSlice`] per ray, textured through the material bindings of
/// `bank`.
pub fn wall_slices(hits: &[RayHit], cfg: &RenderConfig, bank: &TextureBank) -> Vec<WallSlice> {
    hits.iter()
        .enumerate()
        .map(|(column, hit)| {
            let Blit { src, dst } = wall_slice(column, hit, cfg);
            WallSlice {
                column,
                depth: hit.depth,
                tex: bank.wall(hit.material),
                src,
                dst,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn cfg() -> RenderConfig {
        RenderConfig::new(640, 480, PI / 3.0, 320, 20, 256)
    }

    fn hit(projected_height: f64, offset: f64) -> RayHit {
        RayHit {
            depth: 1.0,
            projected_height,
            material: 1,
            offset,
        }
    }

    #[test]
    fn short_column_uses_full_texture() {
        let cfg = cfg();
        let r = wall_slice(10, &hit(101.0, 0.25), &cfg);
        assert_eq!(r.src, Rect::new(0.25 * 254.0, 0.0, 2.0, 256.0));
        assert_eq!(r.dst, Rect::new(20.0, 240.0 - 50.0, 2.0, 101.0));
    }

    #[test]
    fn tall_column_crops_texture() {
        let cfg = cfg();
        let r = wall_slice(0, &hit(960.0, 0.0), &cfg);
        // half the wall is visible -> half the texture height, centred
        assert_eq!(r.src, Rect::new(0.0, 128.0 - 64.0, 2.0, 128.0));
        assert_eq!(r.dst, Rect::new(0.0, 0.0, 2.0, 480.0));
    }

    #[test]
    fn exact_screen_height_is_not_cropped() {
        let cfg = cfg();
        let r = wall_slice(3, &hit(480.0, 1.0), &cfg);
        assert_eq!(r.src.h, 256.0);
        assert_eq!(r.src.x, 254.0);
        assert_eq!(r.dst.y, 0.0);
    }

    #[test]
    fn slices_follow_material_bindings() {
        let cfg = cfg();
        let bank = TextureBank::procedural(256).unwrap();
        let hits = [hit(100.0, 0.5), RayHit { material: 3, ..hit(50.0, 0.5) }];
        let slices = wall_slices(&hits, &cfg, &bank);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].tex, bank.wall(1));
        assert_eq!(slices[1].tex, bank.wall(3));
        assert_eq!(slices[1].column, 1);
        assert_eq!(slices[1].dst.x, 2.0);
    }
}
