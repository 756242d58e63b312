use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::Parser;
use glam::DVec2;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};
use tracing_subscriber::EnvFilter;

use wolfcast_rs::{
    config::{DebugFlags, Settings},
    engine::{Sky, build_frame},
    renderer::{RendererExt, Scene, Software},
    sim::{FrameCycle, InputCmd, TicRunner, apply_input},
    world::{GridMap, SpriteState, TextureBank, Viewer},
};

#[derive(Parser)]
#[command(name = "view_sw", about = "Software raycasting viewer")]
struct Cli {
    /// YAML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text map (digits are walls, `.` is open floor)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Show the top-down minimap
    #[arg(long)]
    minimap: bool,

    /// Draw every ray on the minimap
    #[arg(long)]
    rays: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

const FLAME_FRAME: Duration = Duration::from_millis(120);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let cfg = settings.render_config()?;
    let mut debug = settings.debug_flags();
    if cli.minimap {
        debug.insert(DebugFlags::MINIMAP);
    }
    if cli.rays {
        debug.insert(DebugFlags::RAYS);
    }

    let map = match &cli.map {
        Some(path) => GridMap::load(path)?,
        None => GridMap::default_level(),
    };
    tracing::info!(
        width = cfg.width,
        height = cfg.height,
        rays = cfg.num_rays,
        cols = map.width(),
        rows = map.height(),
        "starting viewer"
    );

    let bank = TextureBank::procedural(settings.texture_size)?;
    bank.check_map(&map)?;
    let mut sky = Sky::new(bank.id_or_missing("SKY"));

    /* ---------------------------- sprites ----------------------------- */
    let mut sim = TicRunner::new();
    let heart = bank.id_or_missing("HEART");
    sim.spawn_sprite(SpriteState::new(
        DVec2::new(10.5, 3.5),
        heart,
        bank.texture_or_missing(heart),
    ));

    let flames: Vec<_> = (0..3)
        .map(|i| bank.id_or_missing(&format!("FLAME{i}")))
        .collect();
    if let Some(cycle) = FrameCycle::new(flames.clone(), FLAME_FRAME) {
        let flame = SpriteState::new(
            DVec2::new(11.5, 6.5),
            flames[0],
            bank.texture_or_missing(flames[0]),
        )
        .with_scale(0.7)
        .with_shift(0.27);
        sim.spawn_animated(flame, cycle);
    }

    let p = &settings.player;
    let mut viewer = Viewer::new(DVec2::new(p.pos[0], p.pos[1]), p.angle);

    let mut renderer = Software::new(debug.contains(DebugFlags::SHADING));

    let mut win = Window::new(
        "wolfcast: software raycaster",
        cfg.width,
        cfg.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(settings.fps);
    win.set_cursor_visibility(false);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let mut last_frame = Instant::now();
    let mut last_mouse_x = win.get_mouse_pos(MouseMode::Pass).map(|(x, _)| x);

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;

        /* --------------- build one InputCmd per frame --------------------- */
        let mut cmd = InputCmd::default();
        if win.is_key_down(Key::W) || win.is_key_down(Key::Up) {
            cmd.forward += 1.0;
        }
        if win.is_key_down(Key::S) || win.is_key_down(Key::Down) {
            cmd.forward -= 1.0;
        }
        if win.is_key_down(Key::A) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::D) {
            cmd.strafe += 1.0;
        }
        if win.is_key_down(Key::Left) {
            cmd.turn -= 1.0;
        }
        if win.is_key_down(Key::Right) {
            cmd.turn += 1.0;
        }

        let mouse_x = win.get_mouse_pos(MouseMode::Pass).map(|(x, _)| x);
        if let (Some(prev), Some(cur)) = (last_mouse_x, mouse_x) {
            cmd.mouse_dx = f64::from(cur - prev);
        }
        last_mouse_x = mouse_x;

        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            debug.toggle(DebugFlags::MINIMAP);
        }
        if win.is_key_pressed(Key::R, KeyRepeat::No) {
            debug.toggle(DebugFlags::RAYS);
        }

        apply_input(&mut viewer, cmd, dt_ms, &settings.player, &map);
        sky.advance(settings.player.clamp_mouse(cmd.mouse_dx), cfg.width);
        sim.pump();

        /* ------------------------------ draw ------------------------------ */
        let t0 = Instant::now();
        let sprites = sim.sprites();
        let frame = build_frame(&cfg, &viewer, &map, &bank, &sprites);
        let scene = Scene {
            frame: &frame,
            sky: &sky,
            floor: settings.floor_color,
            map: &map,
            viewer: &viewer,
            debug,
        };

        let mut shown = Ok(());
        renderer.draw_frame(&cfg, &scene, &bank, |fb, w, h| {
            shown = win.update_with_buffer(fb, w, h);
        });
        shown?;

        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_print.elapsed() >= Duration::from_secs(1) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            tracing::debug!(
                fps = acc_frames,
                avg_ms,
                items = frame.items.len(),
                "frame stats"
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    Ok(())
}
