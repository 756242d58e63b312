//! One engine pass: rays -> wall slices, sprites -> quads, then the
//! far-to-near merge.  Nothing is carried over between frames.

use crate::{
    config::RenderConfig,
    engine::{
        column::wall_slices, compositor::composite, raycast::cast_rays, sprite::project_sprite,
        types::{DrawItem, Frame},
    },
    world::{GridMap, SpriteState, TextureBank, Viewer},
};

/// Build the complete draw list for the current viewer.
pub fn build_frame<'a>(
    cfg: &RenderConfig,
    viewer: &Viewer,
    map: &GridMap,
    bank: &TextureBank,
    sprites: impl IntoIterator<Item = &'a SpriteState>,
) -> Frame {
    let _span = tracing::trace_span!("build_frame").entered();

    let hits = cast_rays(viewer, map, cfg);
    let walls = wall_slices(&hits, cfg, bank)
        .into_iter()
        .map(DrawItem::Wall);
    let sprites: Vec<DrawItem> = sprites
        .into_iter()
        .filter_map(|s| project_sprite(s, viewer, cfg))
        .collect();
    let visible_sprites = sprites.len();

    let items = composite(walls, sprites);
    tracing::trace!(rays = hits.len(), sprites = visible_sprites, items = items.len());

    Frame { hits, items }
}
