mod column;
mod compositor;
mod pipeline;
mod raycast;
mod sky;
mod sprite;
mod types;

pub use column::{Blit, wall_slice, wall_slices};
pub use compositor::composite;
pub use pipeline::build_frame;
pub use raycast::{DEPTH_EPSILON, Face, RAY_EPSILON, Trace, cast_rays, ray_angle, trace};
pub use sky::{SKY_SCROLL, Sky};
pub use sprite::{Bearing, NEAR_CLIP, bearing, project_sprite};
pub use types::{DrawItem, Frame, RayHit, Rect, SpriteQuad, WallSlice};
