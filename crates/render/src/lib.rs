//! Rendering adapter: turns world state into textured quads.
//!
//! # Invariants
//! - Renderers never mutate the world.
//! - Quad vertices are ordered top-right, bottom-right, bottom-left, top-left.
//! - Texture V grows upward from the bottom of the sheet.
//!
//! Backends implement [`Renderer`] or consume [`RenderFrame`] directly; this
//! crate has no dependency on a graphics API.

mod frame;
mod projector;
mod renderer;

pub use frame::{ANIMATION_FPS, RenderFrame, animation_frame};
pub use projector::{Quad, QuadVertex, project_player, project_tile};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "platformer-render v0.1.0"
}
