mod grid;
mod sprite;
mod texture;
mod viewer;

pub use grid::{DEFAULT_MATERIAL, GridMap, MapError, MaterialId, OPEN};
pub use sprite::SpriteState;
pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
pub use viewer::Viewer;
