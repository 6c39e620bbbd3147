use crate::action::{Action, KeyState};
use serde::{Deserialize, Serialize};

/// Current held state of the movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLatch {
    pub left_held: bool,
    pub right_held: bool,
    pub crouch_held: bool,
}

/// One-shot effect of an input edge that the latch itself cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchEdge {
    /// A horizontal key went down; the player now faces this way.
    Face { right: bool },
    /// The jump key came up.
    JumpReleased,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input edge. Returns the one-shot effect it triggers, if any.
    pub fn apply(&mut self, action: Action, state: KeyState) -> Option<LatchEdge> {
        let pressed = state == KeyState::Pressed;
        match action {
            Action::MoveLeft => {
                self.left_held = pressed;
                pressed.then_some(LatchEdge::Face { right: false })
            }
            Action::MoveRight => {
                self.right_held = pressed;
                pressed.then_some(LatchEdge::Face { right: true })
            }
            Action::Crouch => {
                self.crouch_held = pressed;
                None
            }
            Action::Jump => (!pressed).then_some(LatchEdge::JumpReleased),
        }
    }

    /// The held horizontal direction: `Some(true)` for right, `Some(false)` for
    /// left, `None` when neither or both are held.
    pub fn horizontal(&self) -> Option<bool> {
        match (self.left_held, self.right_held) {
            (true, false) => Some(false),
            (false, true) => Some(true),
            _ => None,
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        if *self != Self::default() {
            tracing::debug!("input latch cleared");
        }
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_level() {
        let mut latch = InputLatch::new();
        latch.apply(Action::MoveLeft, KeyState::Pressed);
        latch.apply(Action::Crouch, KeyState::Pressed);
        assert!(latch.left_held);
        assert!(latch.crouch_held);

        latch.apply(Action::MoveLeft, KeyState::Released);
        assert!(!latch.left_held);
        assert!(latch.crouch_held);
    }

    #[test]
    fn horizontal_presses_report_facing() {
        let mut latch = InputLatch::new();
        assert_eq!(
            latch.apply(Action::MoveLeft, KeyState::Pressed),
            Some(LatchEdge::Face { right: false })
        );
        assert_eq!(
            latch.apply(Action::MoveRight, KeyState::Pressed),
            Some(LatchEdge::Face { right: true })
        );
        assert_eq!(latch.apply(Action::MoveRight, KeyState::Released), None);
    }

    #[test]
    fn jump_fires_on_release_only() {
        let mut latch = InputLatch::new();
        assert_eq!(latch.apply(Action::Jump, KeyState::Pressed), None);
        assert_eq!(
            latch.apply(Action::Jump, KeyState::Released),
            Some(LatchEdge::JumpReleased)
        );
        assert_eq!(latch, InputLatch::default());
    }

    #[test]
    fn horizontal_needs_exactly_one_key() {
        let mut latch = InputLatch::new();
        assert_eq!(latch.horizontal(), None);
        latch.left_held = true;
        assert_eq!(latch.horizontal(), Some(false));
        latch.right_held = true;
        assert_eq!(latch.horizontal(), None);
        latch.left_held = false;
        assert_eq!(latch.horizontal(), Some(true));
    }

    #[test]
    fn clear_releases_all() {
        let mut latch = InputLatch {
            left_held: true,
            right_held: true,
            crouch_held: true,
        };
        latch.clear();
        assert_eq!(latch, InputLatch::default());
    }
}
