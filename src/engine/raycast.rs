//! Per-column ray/grid intersection.
//!
//! Every ray is scanned twice: once across the horizontal grid lines
//! (`y = k`) and once across the vertical ones (`x = k`).  The nearer of
//! the two hits wins.  Both scans are bounded by `max_depth` steps.

use glam::{DVec2, IVec2};

use crate::{
    config::RenderConfig,
    engine::types::RayHit,
    world::{DEFAULT_MATERIAL, GridMap, MaterialId, Viewer},
};

/// Added to the first ray angle so no ray is exactly axis-aligned.
pub const RAY_EPSILON: f64 = 1e-4;

/// Added to the corrected depth before dividing by it.
pub const DEPTH_EPSILON: f64 = 1e-4;

/// Pulls a negative-direction start line back inside the viewer's tile.
const EDGE_NUDGE: f64 = 1e-6;

/// Smallest magnitude a sine/cosine divisor may take.
const MIN_DIVISOR: f64 = 1e-12;

/// Which family of grid lines the ray struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    /// A line `x = k` (wall face looking east or west).
    Vertical,
    /// A line `y = k` (wall face looking north or south).
    Horizontal,
}

/// Radial (uncorrected) result of a single ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trace {
    pub depth: f64,
    pub material: MaterialId,
    pub offset: f64,
    pub face: Face,
}

/// One scan along a family of grid lines.
#[derive(Clone, Copy, Debug)]
struct Scan {
    depth: f64,
    /// Coordinate along the struck line (x for horizontal, y for vertical).
    along: f64,
    material: MaterialId,
}

#[inline]
fn guard(v: f64) -> f64 {
    if v.abs() < MIN_DIVISOR {
        MIN_DIVISOR.copysign(v)
    } else {
        v
    }
}

/// Step through horizontal grid lines until a wall tile is entered.
fn scan_horizontal(
    origin: DVec2,
    tile: IVec2,
    sin_a: f64,
    cos_a: f64,
    map: &GridMap,
    max_depth: usize,
) -> Scan {
    let (mut y, dy) = if sin_a > 0.0 {
        (tile.y as f64 + 1.0, 1.0)
    } else {
        (tile.y as f64 - EDGE_NUDGE, -1.0)
    };

    let mut depth = (y - origin.y) / sin_a;
    let mut x = origin.x + depth * cos_a;

    let delta_depth = dy / sin_a;
    let dx = delta_depth * cos_a;

    let mut material = DEFAULT_MATERIAL;
    for _ in 0..max_depth {
        if let Some(m) = map.lookup(x.floor() as i32, y.floor() as i32) {
            material = m;
            break;
        }
        x += dx;
        y += dy;
        depth += delta_depth;
    }
    Scan {
        depth,
        along: x,
        material,
    }
}

/// Step through vertical grid lines until a wall tile is entered.
fn scan_vertical(
    origin: DVec2,
    tile: IVec2,
    sin_a: f64,
    cos_a: f64,
    map: &GridMap,
    max_depth: usize,
) -> Scan {
    let (mut x, dx) = if cos_a > 0.0 {
        (tile.x as f64 + 1.0, 1.0)
    } else {
        (tile.x as f64 - EDGE_NUDGE, -1.0)
    };

    let mut depth = (x - origin.x) / cos_a;
    let mut y = origin.y + depth * sin_a;

    let delta_depth = dx / cos_a;
    let dy = delta_depth * sin_a;

    let mut material = DEFAULT_MATERIAL;
    for _ in 0..max_depth {
        if let Some(m) = map.lookup(x.floor() as i32, y.floor() as i32) {
            material = m;
            break;
        }
        x += dx;
        y += dy;
        depth += delta_depth;
    }
    Scan {
        depth,
        along: y,
        material,
    }
}

/// Pick the nearer of the two scans and derive its texture offset.
///
/// Ties resolve to the horizontal scan (`vertical < horizontal` is strict).
fn nearer(hor: Scan, vert: Scan, sin_a: f64, cos_a: f64) -> Trace {
    if vert.depth < hor.depth {
        let y = vert.along.rem_euclid(1.0);
        Trace {
            depth: vert.depth,
            material: vert.material,
            offset: if cos_a > 0.0 { y } else { 1.0 - y },
            face: Face::Vertical,
        }
    } else {
        let x = hor.along.rem_euclid(1.0);
        Trace {
            depth: hor.depth,
            material: hor.material,
            offset: if sin_a > 0.0 { 1.0 - x } else { x },
            face: Face::Horizontal,
        }
    }
}

/// Cast one ray from the viewer at absolute angle `ray_angle`.
///
/// Depth is the radial distance along the ray.
pub fn trace(viewer: &Viewer, map: &GridMap, ray_angle: f64, max_depth: usize) -> Trace {
    let origin = viewer.position();
    let tile = viewer.tile();
    let (sin_a, cos_a) = ray_angle.sin_cos();
    let (sin_a, cos_a) = (guard(sin_a), guard(cos_a));

    let hor = scan_horizontal(origin, tile, sin_a, cos_a, map, max_depth);
    let vert = scan_vertical(origin, tile, sin_a, cos_a, map, max_depth);
    nearer(hor, vert, sin_a, cos_a)
}

/// Angle of ray `i` in the fan described by `cfg`.
#[inline]
pub fn ray_angle(viewer: &Viewer, cfg: &RenderConfig, i: usize) -> f64 {
    viewer.angle() - cfg.half_fov + RAY_EPSILON + i as f64 * cfg.delta_angle
}

/// Cast `cfg.num_rays` rays left to right across the field of view.
pub fn cast_rays(viewer: &Viewer, map: &GridMap, cfg: &RenderConfig) -> Vec<RayHit> {
    (0..cfg.num_rays)
        .map(|i| {
            let angle = ray_angle(viewer, cfg, i);
            let hit = trace(viewer, map, angle, cfg.max_depth);

            // radial -> perpendicular distance
            let depth = hit.depth * (viewer.angle() - angle).cos();

            RayHit {
                depth,
                projected_height: cfg.screen_dist / (depth + DEPTH_EPSILON),
                material: hit.material,
                offset: hit.offset,
            }
        })
        .collect()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
