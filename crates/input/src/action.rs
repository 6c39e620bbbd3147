use serde::{Deserialize, Serialize};

/// A logical input the player can produce.
///
/// The kernel consumes actions, never raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Crouch,
    /// Fires its impulse when released, not when pressed.
    Jump,
}

/// Edge reported for an action by the platform callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_state_from_bool() {
        assert_eq!(KeyState::from_pressed(true), KeyState::Pressed);
        assert_eq!(KeyState::from_pressed(false), KeyState::Released);
    }
}
