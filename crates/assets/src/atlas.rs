use platformer_common::{SpriteId, SpriteRect};

const fn rect(x: u32, y: u32, width: u32, height: u32, frame_count: u32) -> SpriteRect {
    SpriteRect {
        x,
        y,
        width,
        height,
        frame_count,
    }
}

const PLAYER_IDLE: SpriteRect = rect(1, 739, 120, 80, 10);
const PLAYER_RUN: SpriteRect = rect(1, 903, 120, 80, 10);
const PLAYER_CROUCH: SpriteRect = rect(1143, 83, 120, 80, 1);
const PLAYER_CROUCH_WALK: SpriteRect = rect(363, 411, 120, 80, 8);
const PLAYER_JUMP: SpriteRect = rect(605, 493, 120, 80, 3);
const TILE_ROCK: SpriteRect = rect(17, 1, 16, 16, 1);

/// Rect of `id` in the sprite sheet.
pub fn lookup(id: SpriteId) -> SpriteRect {
    match id {
        SpriteId::PlayerIdle => PLAYER_IDLE,
        SpriteId::PlayerRun => PLAYER_RUN,
        SpriteId::PlayerCrouch => PLAYER_CROUCH,
        SpriteId::PlayerCrouchWalk => PLAYER_CROUCH_WALK,
        SpriteId::PlayerJump => PLAYER_JUMP,
        SpriteId::TileRock => TILE_ROCK,
    }
}
