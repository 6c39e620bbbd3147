use platformer_common::SpriteId;
use platformer_input::InputLatch;
use platformer_kernel::World;
use serde::Serialize;

/// World inspector for developer tooling.
pub struct WorldInspector;

impl WorldInspector {
    /// Snapshot of the player and input state at the current tick.
    pub fn summary(world: &World, input: &InputLatch) -> WorldSummary {
        let p = world.player();
        WorldSummary {
            tick: world.tick(),
            position: [p.position.x, p.position.y],
            velocity: [p.velocity.x, p.velocity.y],
            animation: p.animation_state,
            facing_right: p.facing_right,
            grounded: Self::grounded(world),
            input: *input,
        }
    }

    /// True while the player rests on (or has just been pulled one gravity
    /// step below) the tile surface and is not moving up.
    pub fn grounded(world: &World) -> bool {
        let p = world.player();
        let top = world.tile().top();
        p.velocity.y <= 0.0 && p.position.y <= top && p.position.y >= top + p.acceleration.y
    }
}

/// Summary of world state for overlays and traces.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub animation: SpriteId,
    pub facing_right: bool,
    pub grounded: bool,
    pub input: InputLatch,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: String = [
            (self.input.left_held, 'L'),
            (self.input.right_held, 'R'),
            (self.input.crouch_held, 'C'),
        ]
        .iter()
        .map(|&(held, c)| if held { c } else { '-' })
        .collect();
        write!(
            f,
            "tick={} pos=({:.3}, {:.3}) vel=({:.4}, {:.4}) anim={} facing={} grounded={} keys={}",
            self.tick,
            self.position[0],
            self.position[1],
            self.velocity[0],
            self.velocity[1],
            self.animation,
            if self.facing_right { "right" } else { "left" },
            self.grounded,
            keys
        )
    }
}
