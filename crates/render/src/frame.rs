use crate::projector::{Quad, project_player, project_tile};
use platformer_assets::lookup;
use platformer_common::{SheetSize, SpriteId};
use platformer_kernel::World;
use std::time::Duration;

/// Sprite animation rate, in frames per second of wall-clock time.
pub const ANIMATION_FPS: f64 = 10.0;

/// Frame index of a `frame_count`-frame animation after `elapsed`.
pub fn animation_frame(elapsed: Duration, frame_count: u32) -> u32 {
    let ticks = (elapsed.as_secs_f64() * ANIMATION_FPS) as u64;
    (ticks % u64::from(frame_count.max(1))) as u32
}

/// Everything a backend needs to draw one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    pub tick: u64,
    pub animation: SpriteId,
    pub frame: u32,
    pub player: Quad,
    pub tile: Quad,
}

impl RenderFrame {
    /// Project the current world. `elapsed` is wall-clock time since startup
    /// and only selects the animation frame.
    pub fn build(world: &World, sheet: SheetSize, elapsed: Duration) -> Self {
        let player = world.player();
        let rect = lookup(player.animation_state);
        let frame = animation_frame(elapsed, rect.frame_count);

        let tile = world.tile();
        Self {
            tick: world.tick(),
            animation: player.animation_state,
            frame,
            player: project_player(rect, frame, player.position, player.facing_right, sheet),
            tile: project_tile(lookup(SpriteId::TileRock), tile.min(), tile.max(), sheet),
        }
    }

    /// Player then tile, in draw order.
    pub fn quads(&self) -> [&Quad; 2] {
        [&self.player, &self.tile]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use platformer_input::{Action, InputLatch, KeyState};

    const SHEET: SheetSize = SheetSize {
        width: 1500,
        height: 1000,
    };

    #[test]
    fn ten_frames_per_second() {
        assert_eq!(animation_frame(Duration::ZERO, 10), 0);
        assert_eq!(animation_frame(Duration::from_millis(99), 10), 0);
        assert_eq!(animation_frame(Duration::from_millis(100), 10), 1);
        assert_eq!(animation_frame(Duration::from_millis(950), 10), 9);
        assert_eq!(animation_frame(Duration::from_secs(1), 10), 0);
    }

    #[test]
    fn frame_wraps_to_count() {
        for ms in (0..5000).step_by(37) {
            let f = animation_frame(Duration::from_millis(ms), 3);
            assert!(f < 3);
        }
        assert_eq!(animation_frame(Duration::from_secs(7), 1), 0);
    }

    #[test]
    fn build_uses_player_animation_and_tile() {
        let world = World::new();
        let frame = RenderFrame::build(&world, SHEET, Duration::from_millis(350));
        assert_eq!(frame.animation, SpriteId::PlayerIdle);
        assert_eq!(frame.frame, 3);
        assert_eq!(frame.tick, 0);
        assert_eq!(
            frame.player.vertices[Quad::BOTTOM_LEFT].position,
            Vec2::new(-0.5, -0.5)
        );
        assert_eq!(
            frame.tile.vertices[Quad::TOP_RIGHT].position,
            world.tile().max()
        );
    }

    #[test]
    fn single_frame_crouch_ignores_time() {
        let mut world = World::new();
        let mut latch = InputLatch::new();
        world.handle_input(&mut latch, Action::Crouch, KeyState::Pressed);
        world.step(&latch);
        let frame = RenderFrame::build(&world, SHEET, Duration::from_millis(730));
        assert_eq!(frame.animation, SpriteId::PlayerCrouch);
        assert_eq!(frame.frame, 0);
    }

    #[test]
    fn build_is_deterministic() {
        let world = World::new();
        let a = RenderFrame::build(&world, SHEET, Duration::from_millis(420));
        let b = RenderFrame::build(&world, SHEET, Duration::from_millis(420));
        assert_eq!(a, b);
        assert_eq!(a.quads()[1], &a.tile);
    }
}
