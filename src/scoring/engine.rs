//! Scoring engine: snapshot in, breakdown + tier + signal decision out
//!
//! Evaluation is a pure function of the snapshot and the configuration.
//! The configuration is shared read-only, so batches run in parallel
//! without locking.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{ScoringConfig, TradePlanConfig};
use crate::error::Result;
use crate::scoring::aggregator::{aggregate, ScoreBreakdown};
use crate::scoring::categories::{default_scorers, CategoryScore, CategoryScorer};
use crate::scoring::red_flags::RiskEvaluator;
use crate::scoring::signal::SignalDecision;
use crate::scoring::snapshot::MetricsSnapshot;
use crate::scoring::tier::{is_watchlist_candidate, RiskLevel, Tier};
use crate::scoring::trade_plan::TradePlan;

/// Result of scoring one snapshot, handed to notification/persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub token_address: String,
    pub symbol: String,
    pub breakdown: ScoreBreakdown,
    pub tier: Tier,
    pub decision: SignalDecision,
    pub risk_level: RiskLevel,
    pub watchlist: bool,
}

impl Evaluation {
    pub fn should_signal(&self) -> bool {
        self.decision.should_signal
    }

    pub fn final_score(&self) -> u32 {
        self.breakdown.final_score
    }

    /// Position size and exit targets; `None` unless the token signals
    pub fn trade_plan(
        &self,
        reference_price: Option<f64>,
        config: &TradePlanConfig,
    ) -> Option<TradePlan> {
        if !self.should_signal() {
            return None;
        }
        TradePlan::build(self.tier, self.breakdown.final_score, reference_price, config)
    }

    /// Multi-line report for logs
    pub fn summary(&self) -> String {
        let label = if self.symbol.is_empty() {
            &self.token_address
        } else {
            &self.symbol
        };
        let mut lines = vec![
            format!("{} - {} ({})", label, self.tier, self.tier.description()),
            format!("Risk: {}  Signal: {}", self.risk_level, self.should_signal()),
            self.breakdown.to_string(),
        ];
        let strengths: Vec<&str> = self.breakdown.strengths().collect();
        if !strengths.is_empty() {
            lines.push(format!("Strengths: {}", strengths.join("; ")));
        }
        if self.watchlist {
            lines.push("Watchlist candidate".to_string());
        }
        lines.join("\n")
    }
}

/// The comprehensive scoring engine
pub struct ScoringEngine {
    config: Arc<ScoringConfig>,
    scorers: Vec<Box<dyn CategoryScorer>>,
}

impl ScoringEngine {
    /// Create an engine with the full rubric. Fails on a malformed configuration.
    pub fn new(config: ScoringConfig) -> Result<Self> {
        Self::with_scorers(config, default_scorers())
    }

    /// Create an engine with a custom set of category scorers
    pub fn with_scorers(
        config: ScoringConfig,
        scorers: Vec<Box<dyn CategoryScorer>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            scorers,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score every category for a snapshot
    pub fn score_categories(&self, snapshot: &MetricsSnapshot) -> Vec<CategoryScore> {
        self.scorers
            .iter()
            .map(|scorer| {
                let score = scorer.score(snapshot, &self.config);
                debug!(
                    token = %snapshot.label(),
                    category = %score.category,
                    points = score.points,
                    max = score.max_points,
                    "Category scored"
                );
                score
            })
            .collect()
    }

    /// Score categories and red flags into a bounded breakdown
    pub fn score(&self, snapshot: &MetricsSnapshot) -> ScoreBreakdown {
        let categories = self.score_categories(snapshot);
        let risk = RiskEvaluator::evaluate(snapshot, &self.config);
        aggregate(categories, risk)
    }

    /// Full evaluation: breakdown, tier, signal decision
    pub fn evaluate(&self, snapshot: &MetricsSnapshot) -> Evaluation {
        let breakdown = self.score(snapshot);
        let tier = self.config.tiers.classify_breakdown(&breakdown);
        let decision = SignalDecision::decide(tier, &breakdown, &self.config.signal);
        let risk_level = RiskLevel::assess(&breakdown);
        let watchlist = is_watchlist_candidate(
            &breakdown,
            tier,
            &self.config.tiers,
            self.config.watchlist_margin,
        );

        if breakdown.disqualified {
            let flags: Vec<&str> = breakdown.critical_flags.iter().map(|f| f.code()).collect();
            warn!(
                token = %snapshot.label(),
                flags = %flags.join(","),
                "Token disqualified by critical red flags"
            );
        } else if decision.should_signal {
            info!(
                token = %snapshot.label(),
                score = breakdown.final_score,
                tier = %tier,
                "Signal"
            );
        } else {
            debug!(
                token = %snapshot.label(),
                score = breakdown.final_score,
                tier = %tier,
                reason = ?decision.reason,
                "No signal"
            );
        }

        Evaluation {
            token_address: snapshot.token_address.clone(),
            symbol: snapshot.symbol.clone(),
            breakdown,
            tier,
            decision,
            risk_level,
            watchlist,
        }
    }

    /// Evaluate many snapshots in parallel; output order matches input order
    pub fn evaluate_batch(&self, snapshots: &[MetricsSnapshot]) -> Vec<Evaluation> {
        let evaluations: Vec<Evaluation> = snapshots
            .par_iter()
            .map(|snapshot| self.evaluate(snapshot))
            .collect();

        let signals = evaluations.iter().filter(|e| e.should_signal()).count();
        info!(
            evaluated = evaluations.len(),
            signals,
            "Batch evaluation complete"
        );
        evaluations
    }
}
