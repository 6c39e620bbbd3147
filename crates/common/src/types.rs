use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical sprite identifier. Every variant has a fixed rect in the atlas table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpriteId {
    PlayerIdle,
    PlayerRun,
    PlayerCrouch,
    PlayerCrouchWalk,
    PlayerJump,
    TileRock,
}

impl SpriteId {
    /// Every variant, in declaration order.
    pub const ALL: [SpriteId; 6] = [
        SpriteId::PlayerIdle,
        SpriteId::PlayerRun,
        SpriteId::PlayerCrouch,
        SpriteId::PlayerCrouchWalk,
        SpriteId::PlayerJump,
        SpriteId::TileRock,
    ];

    /// True for the five player animation states.
    pub fn is_player(self) -> bool {
        !matches!(self, SpriteId::TileRock)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpriteId::PlayerIdle => "player_idle",
            SpriteId::PlayerRun => "player_run",
            SpriteId::PlayerCrouch => "player_crouch",
            SpriteId::PlayerCrouchWalk => "player_crouch_walk",
            SpriteId::PlayerJump => "player_jump",
            SpriteId::TileRock => "tile_rock",
        }
    }
}

impl std::fmt::Display for SpriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rectangle of a sprite in the sheet, in pixels with a top-left origin.
///
/// Animated sprites lay their frames out left to right, each `width` wide,
/// starting at `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
}

/// Axis-aligned static collider in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TileRect {
    /// World y of the walkable surface.
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }
}

impl Default for TileRect {
    fn default() -> Self {
        Self {
            x: -1.0,
            y: -1.0,
            width: 2.0,
            height: 0.2,
        }
    }
}

/// Pixel dimensions of the loaded sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSize {
    pub width: u32,
    pub height: u32,
}

impl SheetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_variant_once() {
        let mut ids = SpriteId::ALL.to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn only_tile_is_not_player() {
        let players: Vec<_> = SpriteId::ALL.iter().filter(|id| id.is_player()).collect();
        assert_eq!(players.len(), 5);
        assert!(!SpriteId::TileRock.is_player());
    }

    #[test]
    fn tile_default_matches_floor() {
        let t = TileRect::default();
        assert_eq!(t.min(), Vec2::new(-1.0, -1.0));
        assert!((t.top() - (-0.8)).abs() < 1e-6);
        assert!((t.max().x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sprite_id_display_uses_snake_case() {
        assert_eq!(SpriteId::PlayerCrouchWalk.to_string(), "player_crouch_walk");
    }
}
