use std::time::Duration;

use glam::DVec2;
use hecs::World;

use super::components::{Billboard, FrameCycle, InputCmd};
use crate::{
    config::PlayerSettings,
    world::{GridMap, Viewer},
};

/* ── Animation system ─────────────────────────────────────────────── */
pub fn animation(world: &mut World, now: Duration) {
    for (_, (cycle, board)) in world.query_mut::<(&mut FrameCycle, &mut Billboard)>() {
        if cycle.update(now) {
            board.0.texture = cycle.frame();
        }
    }
}

/* ── Player movement ──────────────────────────────────────────────── */

/// Move and turn the viewer for one frame of `dt_ms` milliseconds.
///
/// Collision probes each axis on its own, so a blocked axis does not stop
/// motion along the other one (wall sliding).
pub fn apply_input(
    viewer: &mut Viewer,
    cmd: InputCmd,
    dt_ms: f64,
    player: &PlayerSettings,
    map: &GridMap,
) {
    if dt_ms <= 0.0 {
        return;
    }

    let speed = player.speed * dt_ms;
    let delta = (viewer.forward() * cmd.forward + viewer.right() * cmd.strafe) * speed;
    if delta != DVec2::ZERO {
        slide(viewer, delta, player.size_scale / dt_ms, map);
    }

    let mut turn = cmd.turn * player.rot_speed * dt_ms;
    if cmd.mouse_dx != 0.0 {
        turn += player.clamp_mouse(cmd.mouse_dx) * player.mouse_sensitivity * dt_ms;
    }
    if turn != 0.0 {
        viewer.turn(turn);
    }
}

fn slide(viewer: &mut Viewer, delta: DVec2, scale: f64, map: &GridMap) {
    let p = viewer.position();
    let probe_x = (p.x + delta.x * scale).floor() as i32;
    if map.is_open(probe_x, p.y.floor() as i32) {
        viewer.translate(DVec2::new(delta.x, 0.0));
    }

    let p = viewer.position();
    let probe_y = (p.y + delta.y * scale).floor() as i32;
    if map.is_open(p.x.floor() as i32, probe_y) {
        viewer.translate(DVec2::new(0.0, delta.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{MaterialId, Texture};
    use std::f64::consts::{FRAC_PI_4, PI, TAU};

    fn room() -> GridMap {
        let rows: [[MaterialId; 5]; 5] = [
            [1, 1, 1, 1, 1],
            [1, 0, 0, 0, 1],
            [1, 0, 0, 0, 1],
            [1, 0, 0, 0, 1],
            [1, 1, 1, 1, 1],
        ];
        GridMap::from_rows(&rows).unwrap()
    }

    fn forward() -> InputCmd {
        InputCmd {
            forward: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn walks_forward_in_open_space() {
        let player = PlayerSettings::default();
        let mut v = Viewer::new(DVec2::new(2.0, 2.5), 0.0);
        apply_input(&mut v, forward(), 16.0, &player, &room());
        let moved = v.position() - DVec2::new(2.0, 2.5);
        assert!((moved.x - 0.004 * 16.0).abs() < 1e-12);
        assert!(moved.y.abs() < 1e-12);
    }

    #[test]
    fn strafe_right_is_perpendicular() {
        let player = PlayerSettings::default();
        let mut v = Viewer::new(DVec2::new(2.5, 2.0), 0.0);
        let cmd = InputCmd {
            strafe: 1.0,
            ..Default::default()
        };
        apply_input(&mut v, cmd, 10.0, &player, &room());
        assert!((v.position().y - 2.04).abs() < 1e-12);
        assert!((v.position().x - 2.5).abs() < 1e-12);
    }

    #[test]
    fn wall_blocks_one_axis_and_slides_on_the_other() {
        let player = PlayerSettings::default();
        // close to the east wall, heading south-east
        let mut v = Viewer::new(DVec2::new(3.9, 2.0), FRAC_PI_4);
        apply_input(&mut v, forward(), 16.0, &player, &room());
        assert_eq!(v.position().x, 3.9);
        assert!(v.position().y > 2.0);
    }

    #[test]
    fn look_ahead_is_frame_rate_independent() {
        let player = PlayerSettings::default();
        // probe reach is speed * size_scale = 0.24 tiles whatever dt is
        for dt in [1.0, 16.0, 50.0] {
            let mut v = Viewer::new(DVec2::new(3.8, 2.5), 0.0);
            apply_input(&mut v, forward(), dt, &player, &room());
            assert_eq!(v.position().x, 3.8, "dt {dt}");

            let mut v = Viewer::new(DVec2::new(3.8, 2.5), PI);
            apply_input(&mut v, forward(), dt, &player, &room());
            assert!(v.position().x < 3.8, "dt {dt}");
        }
    }

    #[test]
    fn turning_wraps_heading() {
        let player = PlayerSettings::default();
        let mut v = Viewer::new(DVec2::new(2.5, 2.5), 0.01);
        let cmd = InputCmd {
            turn: -1.0,
            ..Default::default()
        };
        apply_input(&mut v, cmd, 10.0, &player, &room());
        assert!((v.angle() - (TAU - 0.01)).abs() < 1e-12);
    }

    #[test]
    fn mouse_motion_is_clamped() {
        let player = PlayerSettings::default();
        let mut a = Viewer::new(DVec2::new(2.5, 2.5), 1.0);
        let mut b = a;
        let cmd = |dx| InputCmd {
            mouse_dx: dx,
            ..Default::default()
        };
        apply_input(&mut a, cmd(40.0), 10.0, &player, &room());
        apply_input(&mut b, cmd(400.0), 10.0, &player, &room());
        assert_eq!(a.angle(), b.angle());
        assert!((a.angle() - (1.0 + 40.0 * 0.0003 * 10.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let player = PlayerSettings::default();
        let mut v = Viewer::new(DVec2::new(2.5, 2.5), 1.0);
        let before = v;
        apply_input(&mut v, forward(), 0.0, &player, &room());
        assert_eq!(v, before);
    }

    #[test]
    fn animation_swaps_billboard_image() {
        use crate::world::SpriteState;

        let mut world = World::new();
        let img = Texture::solid("F", 4, 4, 0xFF_FF_FF_FF);
        let sprite = SpriteState::new(DVec2::new(1.0, 1.0), 10, &img);
        let cycle = FrameCycle::new(vec![10, 11], Duration::from_millis(100)).unwrap();
        let e = world.spawn((Billboard(sprite), cycle));

        animation(&mut world, Duration::from_millis(50));
        assert_eq!(world.get::<&Billboard>(e).unwrap().0.texture, 10);
        animation(&mut world, Duration::from_millis(100));
        assert_eq!(world.get::<&Billboard>(e).unwrap().0.texture, 10);
        animation(&mut world, Duration::from_millis(120));
        assert_eq!(world.get::<&Billboard>(e).unwrap().0.texture, 11);
    }
}
