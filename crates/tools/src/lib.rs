//! Developer tooling: read-only world summaries for overlays and traces.
//!
//! # Invariants
//! - Tools never mutate the world.

pub mod inspector;

pub use inspector::{WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "platformer-tools v0.1.0"
}
