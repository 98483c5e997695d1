//! Developer tooling: read-only world inspection.
//!
//! # Invariants
//! - Tools only read the world; nothing here mutates game state.

mod inspector;

pub use inspector::{EntityInfo, WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "thicket-tools v0.1.0"
}
