//! Sprite assets: the fixed atlas table and the sprite-sheet raster.
//!
//! The renderer consumes sprites by [`SpriteId`], never by raw pixel offsets.
//!
//! # Invariants
//! - The atlas table is total over `SpriteId`; lookups cannot fail.
//! - Sheet pixels are stored bottom row first so texture V grows upward.

mod atlas;
mod sheet;

pub use atlas::lookup;
pub use platformer_common::{SheetSize, SpriteId, SpriteRect};
pub use sheet::{DEFAULT_SHEET_PATH, SheetError, SpriteSheet};

pub fn crate_info() -> &'static str {
    "platformer-assets v0.1.0"
}
