//! Shared types used across the thicket crates.
//!
//! # Invariants
//! - Model handles are plain indices; nothing outside the asset table owns geometry.

mod types;

pub use types::{ModelHandle, ModelSet, Transform};

pub fn crate_info() -> &'static str {
    "thicket-common v0.1.0"
}
