//! Simulation kernel: player kinematics, floor collision, animation state.
//!
//! # Invariants
//! - One tick per rendered frame; integration steps are constant, not time-scaled.
//! - `animation_state` is always a player sprite.
//! - After floor contact `vel_y` is never negative until integration applies gravity.

pub mod physics;
pub mod player;
pub mod world;

pub use physics::{choose_animation, integrate, resolve_floor_contact, tick};
pub use player::{PhysicsConfig, PlayerState};
pub use world::World;
