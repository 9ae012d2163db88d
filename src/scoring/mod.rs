//! Comprehensive scoring engine
//!
//! A metrics snapshot flows through the category scorers and the red flag
//! evaluator, is aggregated into a bounded score, classified into a tier and
//! finally turned into a signal decision.

pub mod aggregator;
pub mod categories;
pub mod engine;
pub mod red_flags;
pub mod signal;
pub mod snapshot;
pub mod tier;
pub mod trade_plan;

pub use aggregator::{ScoreBreakdown, MAX_SCORE};
pub use categories::{Category, CategoryScore, CategoryScorer};
pub use engine::{Evaluation, ScoringEngine};
pub use red_flags::{Deduction, RedFlag, RiskAssessment, RiskEvaluator, Severity};
pub use signal::{DecisionReason, SignalDecision, SignalFloors};
pub use snapshot::{MetricsSnapshot, VolumeWindow};
pub use tier::{RiskLevel, Tier, TierThresholds};
pub use trade_plan::{PositionSize, PriceLevels, TradePlan, TradePlanConfig};
