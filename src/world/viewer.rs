use std::f64::consts::TAU;

use glam::{DVec2, IVec2};

/// Player view-point on the tile grid.
///
/// * Only **yaw** is simulated; there is no pitch.
/// * `angle` is kept in `[0, 2π)`; 0 looks along +X and angles grow
///   towards +Y (screen-down on the minimap).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewer {
    pos: DVec2,
    angle: f64,
}

impl Viewer {
    pub fn new(pos: DVec2, angle: f64) -> Self {
        Self {
            pos,
            angle: normalize(angle),
        }
    }

    /// Continuous position in grid units.
    #[inline]
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    /// Tile containing the viewer.
    #[inline]
    pub fn tile(&self) -> IVec2 {
        self.pos.floor().as_ivec2()
    }

    /// Heading in radians, `[0, 2π)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn forward(&self) -> DVec2 {
        let (s, c) = self.angle.sin_cos();
        DVec2::new(c, s)
    }

    /// Unit vector to the viewer's right.
    #[inline]
    pub fn right(&self) -> DVec2 {
        self.forward().perp()
    }

    /// Translate by `delta` without any collision test.
    pub fn translate(&mut self, delta: DVec2) {
        self.pos += delta;
    }

    /// Rotate by `delta` radians (positive = clockwise on screen).
    pub fn turn(&mut self, delta: f64) {
        self.angle = normalize(self.angle + delta);
    }
}

/// Wrap into `[0, 2π)`.
#[inline]
fn normalize(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn tile_truncates_position() {
        let v = Viewer::new(DVec2::new(1.5, 5.0), 0.0);
        assert_eq!(v.tile(), IVec2::new(1, 5));
        let v = Viewer::new(DVec2::new(3.999, 0.2), 0.0);
        assert_eq!(v.tile(), IVec2::new(3, 0));
    }

    #[test]
    fn angle_is_normalised() {
        let mut v = Viewer::new(DVec2::ZERO, -FRAC_PI_2);
        assert!((v.angle() - 3.0 * FRAC_PI_2).abs() < 1e-12);
        v.turn(PI);
        assert!((v.angle() - FRAC_PI_2).abs() < 1e-12);
        v.turn(-1e-20);
        assert!(v.angle() >= 0.0 && v.angle() < TAU);
        let mut w = Viewer::new(DVec2::ZERO, 0.0);
        w.turn(-1e-18);
        assert!(w.angle() >= 0.0 && w.angle() < TAU);
    }

    #[test]
    fn tiny_negative_heading_wraps_to_zero() {
        let v = Viewer::new(DVec2::ZERO, -1e-18);
        assert!(v.angle() >= 0.0 && v.angle() < TAU, "{}", v.angle());
        assert_eq!(v.angle(), 0.0);
    }

    #[test]
    fn forward_and_right_are_orthonormal() {
        let v = Viewer::new(DVec2::ZERO, 0.3);
        let f = v.forward();
        let r = v.right();
        assert!((f.length() - 1.0).abs() < 1e-12);
        assert!((r.length() - 1.0).abs() < 1e-12);
        assert!(f.dot(r).abs() < 1e-12);
    }
}
