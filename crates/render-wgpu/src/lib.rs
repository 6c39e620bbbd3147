//! wgpu render backend for the platformer.
//!
//! Draws the player and floor tile as two textured quads sampled from a
//! single sprite-sheet texture.
//!
//! # Invariants
//! - Renderer never mutates world state.
//! - World coordinates are passed straight through as clip space.
//! - The sheet is uploaded bottom row first, so V = 0 is the bottom of the image.

mod gpu;
mod shaders;

pub use gpu::SpriteRenderer;
