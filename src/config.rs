//! Start-up configuration.
//!
//! [`Settings`] is what a user edits (YAML, every field optional);
//! [`RenderConfig`] is the immutable set of derived constants the engine
//! reads every frame.  Build the latter once with
//! [`Settings::render_config`] and pass it by reference.

use std::{f64::consts::PI, fs, io, path::Path};

use bitflags::bitflags;
use serde::Deserialize;
use thiserror::Error;

use crate::renderer::Rgba;

/// Things that can go wrong while reading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("bad settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("screen size {width}x{height} must be non-zero")]
    ZeroScreen { width: usize, height: usize },

    #[error("ray count {rays} must be in 1..={width}")]
    BadRayCount { rays: usize, width: usize },

    #[error("field of view {0}° must be inside (0, 180)")]
    BadFov(f64),

    #[error("max depth must be at least 1")]
    ZeroDepth,

    #[error("texture size {size} is narrower than one column ({column} px)")]
    TextureTooSmall { size: usize, column: usize },
}

bitflags! {
    /// Optional render passes on top of the 3-D view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DebugFlags: u8 {
        /// 2-D map of wall tiles plus the viewer dot.
        const MINIMAP = 0x01;
        /// One line per cast ray on the minimap.
        const RAYS    = 0x02;
        /// Darken walls and sprites with distance.
        const SHADING = 0x04;
    }
}

/// Movement tuning; speeds are per millisecond of frame time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub pos: [f64; 2],
    pub angle: f64,
    pub speed: f64,
    pub rot_speed: f64,
    /// Look-ahead factor for wall collision (scaled by `1 / dt`).
    pub size_scale: f64,
    pub mouse_sensitivity: f64,
    pub mouse_max_rel: f64,
}

impl PlayerSettings {
    /// Relative mouse motion limited to `±mouse_max_rel`; drives both
    /// turning and the sky scroll.
    #[inline]
    pub fn clamp_mouse(&self, dx: f64) -> f64 {
        dx.clamp(-self.mouse_max_rel, self.mouse_max_rel)
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            pos: [1.5, 5.0],
            angle: 0.0,
            speed: 0.004,
            rot_speed: 0.002,
            size_scale: 60.0,
            mouse_sensitivity: 0.0003,
            mouse_max_rel: 40.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    pub minimap: bool,
    pub rays: bool,
}

/// User-facing settings, deserialised from YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub fps: usize,
    /// Horizontal field of view in degrees.
    pub fov_deg: f64,
    /// Defaults to one ray per two screen pixels.
    pub num_rays: Option<usize>,
    pub max_depth: usize,
    pub texture_size: usize,
    pub floor_color: Rgba,
    pub shading: bool,
    pub player: PlayerSettings,
    pub debug: DebugSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1366,
            height: 768,
            fps: 60,
            fov_deg: 60.0,
            num_rays: None,
            max_depth: 20,
            texture_size: 256,
            floor_color: 0xFF_1E_1E_1E,
            shading: false,
            player: PlayerSettings::default(),
            debug: DebugSettings::default(),
        }
    }
}

impl Settings {
    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "settings loaded");
        Ok(settings)
    }

    pub fn rays(&self) -> usize {
        self.num_rays.unwrap_or(self.width / 2)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroScreen {
                width: self.width,
                height: self.height,
            });
        }
        let rays = self.rays();
        if rays == 0 || rays > self.width {
            return Err(ConfigError::BadRayCount {
                rays,
                width: self.width,
            });
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(ConfigError::BadFov(self.fov_deg));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        let column = self.width / rays;
        if self.texture_size < column {
            return Err(ConfigError::TextureTooSmall {
                size: self.texture_size,
                column,
            });
        }
        Ok(())
    }

    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        self.validate()?;
        Ok(RenderConfig::new(
            self.width,
            self.height,
            self.fov_deg.to_radians(),
            self.rays(),
            self.max_depth,
            self.texture_size,
        ))
    }

    pub fn debug_flags(&self) -> DebugFlags {
        let mut flags = DebugFlags::empty();
        flags.set(DebugFlags::MINIMAP, self.debug.minimap);
        flags.set(DebugFlags::RAYS, self.debug.rays);
        flags.set(DebugFlags::SHADING, self.shading);
        flags
    }
}

/// Constants derived once from the screen and projection settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub half_width: f64,
    pub half_height: f64,

    pub fov: f64,
    pub half_fov: f64,
    pub num_rays: usize,
    pub half_num_rays: usize,
    /// Angle between two neighbouring rays.
    pub delta_angle: f64,
    /// Grid-stepping bound per scan.
    pub max_depth: usize,

    /// Distance at which a unit-tall wall is exactly screen-height-of-one.
    pub screen_dist: f64,
    /// Pixel width of one ray column.
    pub scale: usize,

    pub texture_size: usize,
    pub half_texture_size: usize,
}

impl RenderConfig {
    /// Derive every constant; does no validation so degenerate set-ups
    /// (e.g. a single ray with zero fov) stay expressible.
    pub fn new(
        width: usize,
        height: usize,
        fov: f64,
        num_rays: usize,
        max_depth: usize,
        texture_size: usize,
    ) -> Self {
        let half_width = (width / 2) as f64;
        let half_fov = fov / 2.0;
        Self {
            width,
            height,
            half_width,
            half_height: (height / 2) as f64,
            fov,
            half_fov,
            num_rays,
            half_num_rays: num_rays / 2,
            delta_angle: fov / num_rays as f64,
            max_depth,
            screen_dist: half_width / half_fov.tan(),
            scale: (width / num_rays.max(1)).max(1),
            texture_size,
            half_texture_size: texture_size / 2,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::new(1366, 768, PI / 3.0, 683, 20, 256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_constants() {
        let cfg = RenderConfig::new(640, 480, PI / 2.0, 320, 20, 64);
        assert!((cfg.screen_dist - 320.0).abs() < 1e-9);
        assert_eq!(cfg.scale, 2);
        assert_eq!(cfg.half_num_rays, 160);
        assert!((cfg.delta_angle - PI / 640.0).abs() < 1e-12);
        assert_eq!(cfg.half_texture_size, 32);
    }

    #[test]
    fn yaml_overrides_and_defaults() {
        let s = Settings::from_yaml("width: 800\nheight: 600\nplayer:\n  speed: 0.01\n").unwrap();
        assert_eq!(s.width, 800);
        assert_eq!(s.rays(), 400);
        assert_eq!(s.max_depth, 20);
        assert!((s.player.speed - 0.01).abs() < 1e-12);
        assert!((s.player.pos[0] - 1.5).abs() < 1e-12);

        let cfg = s.render_config().unwrap();
        assert_eq!(cfg.scale, 2);
        assert!((cfg.fov - PI / 3.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = Settings::from_yaml("num_rays: 5000").unwrap_err();
        assert!(matches!(err, ConfigError::BadRayCount { rays: 5000, .. }));

        let err = Settings::from_yaml("fov_deg: 180").unwrap_err();
        assert!(matches!(err, ConfigError::BadFov(_)));

        let err = Settings::from_yaml("num_rays: 10\ntexture_size: 64").unwrap_err();
        assert!(matches!(err, ConfigError::TextureTooSmall { column: 136, .. }));

        assert!(matches!(
            Settings::from_yaml("width: [1]").unwrap_err(),
            ConfigError::Yaml(_)
        ));
    }

    #[test]
    fn mouse_motion_is_limited() {
        let p = PlayerSettings::default();
        assert_eq!(p.clamp_mouse(12.0), 12.0);
        assert_eq!(p.clamp_mouse(400.0), 40.0);
        assert_eq!(p.clamp_mouse(-400.0), -40.0);
    }

    #[test]
    fn debug_flags_follow_settings() {
        let s = Settings::from_yaml("shading: true\ndebug:\n  minimap: true\n").unwrap();
        let flags = s.debug_flags();
        assert!(flags.contains(DebugFlags::MINIMAP | DebugFlags::SHADING));
        assert!(!flags.contains(DebugFlags::RAYS));
    }
}
