use crate::physics;
use crate::player::{PhysicsConfig, PlayerState};
use platformer_common::TileRect;
use platformer_input::{Action, InputLatch, KeyState, LatchEdge};
use serde::{Deserialize, Serialize};

/// The whole simulation: one player, one floor tile.
///
/// All mutations go through explicit operations; renderers only read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    player: PlayerState,
    tile: TileRect,
    config: PhysicsConfig,
    tick: u64,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            player: PlayerState::new(&config),
            tile: TileRect::default(),
            config,
            tick: 0,
        }
    }

    /// Number of ticks stepped so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn tile(&self) -> &TileRect {
        &self.tile
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Route an input edge: update the latch, then apply any one-shot effect.
    pub fn handle_input(&mut self, latch: &mut InputLatch, action: Action, state: KeyState) {
        if let Some(edge) = latch.apply(action, state) {
            self.apply_edge(edge);
        }
    }

    /// Apply a one-shot input effect to the player.
    pub fn apply_edge(&mut self, edge: LatchEdge) {
        match edge {
            LatchEdge::Face { right } => self.player.facing_right = right,
            LatchEdge::JumpReleased => {
                self.player.velocity.y += self.config.jump_impulse;
                tracing::debug!(vel_y = self.player.velocity.y, "jump impulse");
            }
        }
    }

    /// Advance the simulation by one tick using the current latch levels.
    pub fn step(&mut self, input: &InputLatch) {
        physics::tick(&mut self.player, &self.tile, input);
        self.tick += 1;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
