//! Persistence: the high-score file.
//!
//! # Invariants
//! - The file holds one non-negative integer as text and nothing else.
//! - A saved value never lowers the previous record.
//! - A missing or unreadable record loads as zero; it never stops the game.

mod highscore;

pub use highscore::{HighScoreStore, StoreError};

pub fn crate_info() -> &'static str {
    "thicket-persist v0.1.0"
}
