use crate::player::PlayerState;
use platformer_common::{SpriteId, TileRect};
use platformer_input::InputLatch;

/// Advance the player by one tick: animation decision, floor contact, then
/// Euler integration.
pub fn tick(state: &mut PlayerState, tile: &TileRect, input: &InputLatch) {
    choose_animation(state, input);
    resolve_floor_contact(state, tile);
    integrate(state);
    tracing::trace!(
        x = state.position.x,
        y = state.position.y,
        animation = %state.animation_state,
        "player ticked"
    );
}

/// Pick the animation state from input and vertical velocity. First match wins:
/// ascending, one horizontal key, crouch, idle.
///
/// While ascending `vel_x` keeps whatever the last grounded decision set.
pub fn choose_animation(state: &mut PlayerState, input: &InputLatch) {
    if state.is_ascending() {
        state.animation_state = SpriteId::PlayerJump;
        return;
    }

    match input.horizontal() {
        Some(right) => {
            let dir = if right { 1.0 } else { -1.0 };
            if input.crouch_held {
                state.animation_state = SpriteId::PlayerCrouchWalk;
                state.velocity.x = 0.5 * dir * state.speed;
            } else {
                state.animation_state = SpriteId::PlayerRun;
                state.velocity.x = dir * state.speed;
            }
        }
        None if input.crouch_held => {
            state.animation_state = SpriteId::PlayerCrouch;
            state.velocity.x = 0.0;
        }
        None => {
            state.animation_state = SpriteId::PlayerIdle;
            state.velocity.x = 0.0;
        }
    }
}

/// Stop a non-ascending player from sinking into the tile.
///
/// Only the top surface is tested, across the tile's full width.
/// Returns true if the player was snapped.
pub fn resolve_floor_contact(state: &mut PlayerState, tile: &TileRect) -> bool {
    let top = tile.top();
    if state.position.y <= top && state.velocity.y <= 0.0 {
        state.velocity.y = 0.0;
        state.position.y = top;
        true
    } else {
        false
    }
}

/// One fixed Euler step.
pub fn integrate(state: &mut PlayerState) {
    state.position.x += state.velocity.x;
    state.velocity.y += state.acceleration.y;
    state.position.y += state.velocity.y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const EPS: f32 = 1e-6;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn held(left: bool, right: bool, crouch: bool) -> InputLatch {
        InputLatch {
            left_held: left,
            right_held: right,
            crouch_held: crouch,
        }
    }

    #[test]
    fn ascending_overrides_horizontal_input() {
        let mut p = PlayerState::default();
        p.velocity = Vec2::new(0.003, 0.01);
        choose_animation(&mut p, &held(true, false, false));
        assert_eq!(p.animation_state, SpriteId::PlayerJump);
        // horizontal velocity is left as it was
        assert_eq!(p.velocity.x, 0.003);
    }

    #[test]
    fn run_left_and_right() {
        let mut p = PlayerState::default();
        choose_animation(&mut p, &held(true, false, false));
        assert_eq!(p.animation_state, SpriteId::PlayerRun);
        assert_eq!(p.velocity.x, -p.speed);

        choose_animation(&mut p, &held(false, true, false));
        assert_eq!(p.animation_state, SpriteId::PlayerRun);
        assert_eq!(p.velocity.x, p.speed);
    }

    #[test]
    fn crouch_walk_is_half_speed() {
        let mut p = PlayerState::default();
        choose_animation(&mut p, &held(false, true, true));
        assert_eq!(p.animation_state, SpriteId::PlayerCrouchWalk);
        assert!(approx(p.velocity.x, 0.5 * p.speed));

        choose_animation(&mut p, &held(true, false, true));
        assert!(approx(p.velocity.x, -0.5 * p.speed));
    }

    #[test]
    fn both_horizontal_keys_fall_through() {
        let mut p = PlayerState::default();
        p.velocity.x = 1.0;
        choose_animation(&mut p, &held(true, true, false));
        assert_eq!(p.animation_state, SpriteId::PlayerIdle);
        assert_eq!(p.velocity.x, 0.0);

        choose_animation(&mut p, &held(true, true, true));
        assert_eq!(p.animation_state, SpriteId::PlayerCrouch);
        assert_eq!(p.velocity.x, 0.0);
    }

    #[test]
    fn falling_is_not_jump() {
        let mut p = PlayerState::default();
        p.velocity.y = -0.02;
        choose_animation(&mut p, &InputLatch::default());
        assert_eq!(p.animation_state, SpriteId::PlayerIdle);
    }

    #[test]
    fn floor_contact_clamps_and_snaps() {
        let tile = TileRect::default();
        let mut p = PlayerState::default();
        p.position.y = tile.top() - 0.001;
        p.velocity.y = -0.01;
        assert!(resolve_floor_contact(&mut p, &tile));
        assert_eq!(p.position.y, tile.top());
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn ascending_player_passes_through_floor() {
        let tile = TileRect::default();
        let mut p = PlayerState::default();
        p.position.y = tile.top() - 0.1;
        p.velocity.y = 0.02;
        assert!(!resolve_floor_contact(&mut p, &tile));
        assert!(approx(p.position.y, tile.top() - 0.1));
    }

    #[test]
    fn full_tick_from_floor_contact_applies_gravity_after_snap() {
        let tile = TileRect::default();
        let mut p = PlayerState::default();
        p.position.y = tile.top() - 0.001;
        p.velocity.y = -0.01;
        tick(&mut p, &tile, &InputLatch::default());
        assert!(approx(p.velocity.y, p.acceleration.y));
        assert!(approx(p.position.y, tile.top() + p.acceleration.y));
    }

    #[test]
    fn free_fall_single_tick() {
        let tile = TileRect::default();
        let mut p = PlayerState::default();
        tick(&mut p, &tile, &InputLatch::default());
        assert!(approx(p.velocity.y, -0.001));
        assert!(approx(p.position.y, -0.501));
        assert!(approx(p.position.x, -0.5));
        assert_eq!(p.animation_state, SpriteId::PlayerIdle);
    }

    #[test]
    fn running_moves_x_by_speed() {
        let tile = TileRect::default();
        let mut p = PlayerState::default();
        tick(&mut p, &tile, &held(false, true, false));
        assert!(approx(p.position.x, -0.5 + p.speed));
    }

    #[test]
    fn settles_on_floor() {
        let tile = TileRect::default();
        let mut p = PlayerState::default();
        for _ in 0..200 {
            tick(&mut p, &tile, &InputLatch::default());
        }
        // each tick snaps to the top, then gravity pulls one step below it
        assert!(p.position.y <= tile.top());
        assert!(p.position.y > tile.top() - 0.01);
        assert!(approx(p.velocity.y, p.acceleration.y));
    }
}
