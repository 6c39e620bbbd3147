//! Shared value types for the platformer workspace.
//!
//! # Invariants
//! - Sprite rects are in sprite-sheet pixel space with a top-left origin.
//! - World coordinates are normalized device units; the player is one unit square.

mod types;

pub use types::{SheetSize, SpriteId, SpriteRect, TileRect};
