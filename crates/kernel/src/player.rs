use glam::Vec2;
use platformer_common::SpriteId;
use serde::{Deserialize, Serialize};

/// Tunable movement constants. `Default` is the shipped feel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Vertical acceleration added to `vel_y` every tick.
    pub gravity: f32,
    /// Horizontal step per tick while running.
    pub run_speed: f32,
    /// Added to `vel_y` when the jump key is released.
    pub jump_impulse: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -0.001,
            run_speed: 0.005,
            jump_impulse: 0.05,
        }
    }
}

/// Kinematic and animation state of the player.
///
/// `position` is the bottom-left corner of the player's unit quad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// `x` is always zero; horizontal motion is set directly on the velocity.
    pub acceleration: Vec2,
    pub speed: f32,
    pub facing_right: bool,
    pub animation_state: SpriteId,
}

impl PlayerState {
    pub const SPAWN: Vec2 = Vec2::new(-0.5, -0.5);

    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            position: Self::SPAWN,
            velocity: Vec2::ZERO,
            acceleration: Vec2::new(0.0, config.gravity),
            speed: config.run_speed,
            facing_right: true,
            animation_state: SpriteId::PlayerIdle,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.velocity.y > 0.0
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}
