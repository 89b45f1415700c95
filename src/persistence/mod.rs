//! High score persistence
//!
//! The only state that survives a process restart is a single integer kept
//! in a small text file.

pub mod high_score;

pub use high_score::HighScoreStore;
