//! Input: logical actions and the latch the simulation reads once per tick.
//!
//! # Invariants
//! - The latch holds levels, not events; a press and release within one tick is lost.
//! - Platform key codes are mapped to actions by the app, never here.

pub mod action;
pub mod latch;

pub use action::{Action, KeyState};
pub use latch::{InputLatch, LatchEdge};

pub fn crate_info() -> &'static str {
    "platformer-input v0.1.0"
}
