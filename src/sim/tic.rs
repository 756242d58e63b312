use super::{
    components::{Billboard, FrameCycle},
    systems,
};
use crate::world::SpriteState;
use hecs::World;
use std::time::{Duration, Instant};

/// Owns the ECS world and drives the per-frame systems.
pub struct TicRunner {
    world: World,
    clock: Duration,
    last: Instant,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            clock: Duration::ZERO,
            last: Instant::now(),
        }
    }

    /// Simulated time since start.
    #[inline]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Spawn a static billboard.
    pub fn spawn_sprite(&mut self, sprite: SpriteState) -> hecs::Entity {
        tracing::debug!(x = sprite.pos.x, y = sprite.pos.y, tex = sprite.texture, "spawn sprite");
        self.world.spawn((Billboard(sprite),))
    }

    /// Spawn a billboard that cycles through `cycle`, starting on its first
    /// image.
    pub fn spawn_animated(&mut self, mut sprite: SpriteState, cycle: FrameCycle) -> hecs::Entity {
        sprite.texture = cycle.frame();
        tracing::debug!(x = sprite.pos.x, y = sprite.pos.y, "spawn animated sprite");
        self.world.spawn((Billboard(sprite), cycle))
    }

    /// Advance simulated time by `dt` and run the systems once.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        systems::animation(&mut self.world, self.clock);
    }

    /// Synchronise simulation with real time.
    pub fn pump(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.advance(dt);
    }

    /// Snapshot of every billboard for the sprite projector.
    pub fn sprites(&self) -> Vec<SpriteState> {
        self.world
            .query::<&Billboard>()
            .iter()
            .map(|(_, b)| b.0)
            .collect()
    }
}
