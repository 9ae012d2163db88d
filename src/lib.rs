//! Token Signal Scorer Library
//!
//! Scores freshly discovered DEX tokens against a multi-category rubric and
//! decides whether to emit a trading signal.

pub mod cli;
pub mod config;
pub mod error;
pub mod scoring;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use scoring::{Evaluation, MetricsSnapshot, ScoringEngine, Tier};
