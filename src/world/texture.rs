// Format-agnostic repository of textures.
// The engine and the renderer interact through `TextureId` only; wall
// materials are mapped onto ids with `bind_material`.

use std::collections::HashMap;

use crate::{
    renderer::Rgba,
    world::grid::{GridMap, MaterialId},
};

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// CPU-side storage: 32-bit **ARGB** (0xAARRGGBB) in row-major order.
/// Alpha 0 marks a transparent texel (sprites only).
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

/// Convenience checkerboard 8×8 (magenta/black).
impl Default for Texture {
    fn default() -> Self {
        Texture::checker("CHECKER", 8, 0xFF_FF00FF, 0xFF_000000)
    }
}

impl Texture {
    pub fn solid(name: &str, w: usize, h: usize, color: Rgba) -> Self {
        Texture {
            name: name.to_string(),
            w,
            h,
            pixels: vec![color; w * h],
        }
    }

    /// Single-texel alternating checkerboard.
    pub fn checker(name: &str, size: usize, a: Rgba, b: Rgba) -> Self {
        let mut pixels = vec![0; size * size];
        for y in 0..size {
            for x in 0..size {
                pixels[y * size + x] = if (x ^ y) & 1 == 0 { a } else { b };
            }
        }
        Texture {
            name: name.to_string(),
            w: size,
            h: size,
            pixels,
        }
    }

    /// Square brick pattern with darker mortar lines.
    pub fn bricks(name: &str, size: usize, brick: Rgba, mortar: Rgba) -> Self {
        let rows = 8;
        let brick_h = (size / rows).max(1);
        let brick_w = (size / 4).max(1);
        let line = (size / 64).max(1);
        let mut pixels = vec![brick; size * size];
        for y in 0..size {
            let course = y / brick_h;
            let shift = if course % 2 == 0 { 0 } else { brick_w / 2 };
            for x in 0..size {
                let in_mortar = y % brick_h < line || (x + shift) % brick_w < line;
                if in_mortar {
                    pixels[y * size + x] = mortar;
                }
            }
        }
        Texture {
            name: name.to_string(),
            w: size,
            h: size,
            pixels,
        }
    }

    /// Vertical sky gradient from `top` to `horizon`.
    pub fn sky(name: &str, w: usize, h: usize, top: Rgba, horizon: Rgba) -> Self {
        let mut pixels = vec![0; w * h];
        for y in 0..h {
            let t = y as f32 / h.max(1) as f32;
            let color = lerp_rgb(top, horizon, t);
            pixels[y * w..(y + 1) * w].fill(color);
        }
        Texture {
            name: name.to_string(),
            w,
            h,
            pixels,
        }
    }

    /// Filled disc on a transparent background, for billboards.
    pub fn disc(name: &str, size: usize, color: Rgba) -> Self {
        let mut pixels = vec![0; size * size];
        let r = size as f32 * 0.5;
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - r;
                let dy = y as f32 + 0.5 - r;
                if dx * dx + dy * dy <= r * r {
                    pixels[y * size + x] = color;
                }
            }
        }
        Texture {
            name: name.to_string(),
            w: size,
            h: size,
            pixels,
        }
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y.min(self.h - 1) * self.w + x.min(self.w - 1)]
    }
}

fn lerp_rgb(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let ch = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t).round() as u32) << shift
    };
    0xFF_000000 | ch(16) | ch(8) | ch(0)
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is not in the bank.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Pixel count does not match `w * h`, or a dimension is zero.
    #[error("texture `{name}` has bad dimensions {w}x{h}")]
    BadSize { name: String, w: usize, h: usize },

    /// A map uses a wall material with no texture bound to it.
    #[error("map material {material} at ({col}, {row}) has no texture")]
    UnboundMaterial {
        material: MaterialId,
        col: i32,
        row: i32,
    },
}

/// A format-agnostic cache of textures.
///
/// * Does **not** know about image files; generators or a loader fill it.
/// * Stores exactly one copy of every name.
/// * ID **0** is always the “missing” checkerboard.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
    materials: HashMap<MaterialId, TextureId>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback.  The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
            materials: HashMap::new(),
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Bank with procedural wall textures for materials 1–5, a sky and a
    /// few sprite images, every wall texture `size`×`size`.
    pub fn procedural(size: usize) -> Result<Self, TextureError> {
        const WALLS: [(&str, Rgba, Rgba); 5] = [
            ("WALL1", 0xFF_8C_3B_2E, 0xFF_3A_32_2E),
            ("WALL2", 0xFF_5E_6E_82, 0xFF_2C_30_38),
            ("WALL3", 0xFF_6F_8A_4A, 0xFF_2E_3A_22),
            ("WALL4", 0xFF_B0_A0_70, 0xFF_50_48_34),
            ("WALL5", 0xFF_7A_4E_8C, 0xFF_34_22_3C),
        ];

        let mut bank = Self::default_with_checker();
        for (i, (name, brick, mortar)) in WALLS.iter().enumerate() {
            let id = bank.insert(*name, Texture::bricks(name, size, *brick, *mortar))?;
            bank.bind_material(i as MaterialId + 1, id);
        }
        bank.insert("SKY", Texture::sky("SKY", 512, 128, 0xFF_10_20_60, 0xFF_A0_C0_E8))?;
        bank.insert("HEART", Texture::disc("HEART", 64, 0xFF_D0_20_40))?;
        for (i, color) in [0xFF_F0_D0_30, 0xFF_F0_90_20, 0xFF_E0_40_10]
            .into_iter()
            .enumerate()
        {
            let name = format!("FLAME{i}");
            bank.insert(name.clone(), Texture::disc(&name, 48, color))?;
        }
        tracing::info!(textures = bank.data.len(), size, "procedural textures ready");
        Ok(bank)
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Obtain the id for a *loaded* texture by name.
    /// Returns `None` if the name is unknown.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Fallback-safe query: unknown names resolve to the checkerboard id.
    pub fn id_or_missing(&self, name: &str) -> TextureId {
        self.id(name).unwrap_or(NO_TEXTURE)
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Texture by id, falling back to the checkerboard.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data.get(id as usize).unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    /// Texture bound to a wall material, or the checkerboard.
    ///
    /// Runs once per ray; maps are checked up front with
    /// [`TextureBank::check_map`].
    #[inline]
    pub fn wall(&self, material: MaterialId) -> TextureId {
        self.materials.get(&material).copied().unwrap_or(NO_TEXTURE)
    }

    /// Fail on the first wall tile of `map` whose material is unbound.
    pub fn check_map(&self, map: &GridMap) -> Result<(), TextureError> {
        match map
            .walls()
            .find(|(_, m)| !self.materials.contains_key(m))
        {
            Some((cell, material)) => {
                tracing::warn!(material, col = cell.x, row = cell.y, "unbound wall material");
                Err(TextureError::UnboundMaterial {
                    material,
                    col: cell.x,
                    row: cell.y,
                })
            }
            None => Ok(()),
        }
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`) or the pixel
    ///   buffer does not match its size (`BadSize`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        if tex.w == 0 || tex.h == 0 || tex.pixels.len() != tex.w * tex.h {
            return Err(TextureError::BadSize {
                name,
                w: tex.w,
                h: tex.h,
            });
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Use texture `id` for every wall tile of `material`.
    pub fn bind_material(&mut self, material: MaterialId, id: TextureId) {
        self.materials.insert(material, id);
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tex(color: Rgba) -> Texture {
        Texture::solid("Dummy", 2, 2, color)
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::default_with_checker();
        let red = bank.insert("RED", dummy_tex(0xFF_FF0000)).unwrap();
        let blue = bank.insert("BLUE", dummy_tex(0xFF_0000FF)).unwrap();

        assert_ne!(red, NO_TEXTURE);
        assert_ne!(blue, red);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("BLUE"), Some(blue));
        assert_eq!(bank.id("NOPE"), None);
        assert_eq!(bank.id_or_missing("NOPE"), NO_TEXTURE);

        assert_eq!(bank.texture(red).unwrap().pixels[0], 0xFF_FF0000);
        assert_eq!(bank.texture(blue).unwrap().pixels[0], 0xFF_0000FF);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("WOOD", dummy_tex(1)).unwrap();
        let err = bank.insert("WOOD", dummy_tex(2)).unwrap_err();
        assert_eq!(err, TextureError::Duplicate("WOOD".into()));
        // first WOOD is kept
        let wood = bank.id("WOOD").unwrap();
        assert_eq!(bank.texture(wood).unwrap().pixels[0], 1);
        assert!(bank.texture(wood + 1).is_err());
    }

    #[test]
    fn bad_id_guard() {
        let bank = TextureBank::default_with_checker();
        let bad = TextureId::MAX;
        assert_eq!(bank.texture(bad).unwrap_err(), TextureError::BadId(bad));
        assert_eq!(bank.texture_or_missing(bad).name, "CHECKER");
    }

    #[test]
    fn bad_size_rejected() {
        let mut bank = TextureBank::default_with_checker();
        let mut tex = dummy_tex(0);
        tex.pixels.pop();
        assert!(matches!(
            bank.insert("SHORT", tex),
            Err(TextureError::BadSize { w: 2, h: 2, .. })
        ));
    }

    #[test]
    fn materials_map_to_textures() {
        let bank = TextureBank::procedural(64).unwrap();
        for m in 1..=5 {
            let id = bank.wall(m);
            assert_ne!(id, NO_TEXTURE);
            let tex = bank.texture(id).unwrap();
            assert_eq!((tex.w, tex.h), (64, 64));
        }
        assert_eq!(bank.wall(9), NO_TEXTURE);
        assert!(bank.id("SKY").is_some());
    }

    #[test]
    fn maps_with_unbound_materials_are_rejected() {
        let bank = TextureBank::procedural(64).unwrap();
        assert_eq!(bank.check_map(&GridMap::default_level()), Ok(()));

        let map = GridMap::parse("1111\n1..7\n1111\n").unwrap();
        assert_eq!(
            bank.check_map(&map),
            Err(TextureError::UnboundMaterial {
                material: 7,
                col: 3,
                row: 1,
            })
        );
    }

    #[test]
    fn disc_has_transparent_corners() {
        let tex = Texture::disc("D", 16, 0xFF_FFFFFF);
        assert_eq!(tex.texel(0, 0) >> 24, 0);
        assert_eq!(tex.texel(8, 8), 0xFF_FFFFFF);
    }
}
