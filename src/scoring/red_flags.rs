//! Red flag evaluation
//!
//! Critical flags disqualify the token outright. Standard flags only cost
//! points. The evaluator reports both; the aggregator decides what they do.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{DeductionConfig, ScoringConfig};
use crate::scoring::snapshot::MetricsSnapshot;

/// Severity class of a red flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Auto-disqualify
    Critical,
    /// Deduction only
    Standard,
}

/// Detected risk conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    // === Critical ===
    /// Sells fail
    Honeypot,
    /// Pool too shallow to trade
    InsufficientLiquidity,
    /// Contract carries a major risk (flagged, or external risk score too high)
    MajorContractRisk,

    // === Standard ===
    /// Liquidity explicitly not locked
    UnlockedLiquidity,
    /// Top-10 wallets hold too much supply
    Top10Concentration,
    /// Bot or wash trading pattern
    SuspiciousTrading,
    /// Token younger than the minimum age
    FreshLaunch,
}

impl RedFlag {
    pub fn severity(&self) -> Severity {
        match self {
            RedFlag::Honeypot | RedFlag::InsufficientLiquidity | RedFlag::MajorContractRisk => {
                Severity::Critical
            }
            RedFlag::UnlockedLiquidity
            | RedFlag::Top10Concentration
            | RedFlag::SuspiciousTrading
            | RedFlag::FreshLaunch => Severity::Standard,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity() == Severity::Critical
    }

    /// Stable reason code, matching the serialized form
    pub fn code(&self) -> &'static str {
        match self {
            RedFlag::Honeypot => "honeypot",
            RedFlag::InsufficientLiquidity => "insufficient_liquidity",
            RedFlag::MajorContractRisk => "major_contract_risk",
            RedFlag::UnlockedLiquidity => "unlocked_liquidity",
            RedFlag::Top10Concentration => "top10_concentration",
            RedFlag::SuspiciousTrading => "suspicious_trading",
            RedFlag::FreshLaunch => "fresh_launch",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RedFlag::Honeypot => "Honeypot detected - sells fail",
            RedFlag::InsufficientLiquidity => "Liquidity below tradable minimum",
            RedFlag::MajorContractRisk => "Major contract risk",
            RedFlag::UnlockedLiquidity => "Liquidity is unlocked",
            RedFlag::Top10Concentration => "Top 10 wallets hold too much supply",
            RedFlag::SuspiciousTrading => "Bot or wash trading pattern",
            RedFlag::FreshLaunch => "Launched less than an hour ago",
        }
    }

    /// Configured cost of a standard flag; `None` for critical flags
    pub fn deduction(&self, deductions: &DeductionConfig) -> Option<i32> {
        match self {
            RedFlag::UnlockedLiquidity => Some(deductions.unlocked_liquidity),
            RedFlag::Top10Concentration => Some(deductions.top10_concentration),
            RedFlag::SuspiciousTrading => Some(deductions.suspicious_trading),
            RedFlag::FreshLaunch => Some(deductions.fresh_launch),
            RedFlag::Honeypot | RedFlag::InsufficientLiquidity | RedFlag::MajorContractRisk => None,
        }
    }
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A standard flag and the (non-positive) points it costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub flag: RedFlag,
    pub points: i32,
}

impl fmt::Display for Deduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.points, self.flag)
    }
}

/// Everything the evaluator found for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub critical: Vec<RedFlag>,
    pub deductions: Vec<Deduction>,
}

impl RiskAssessment {
    pub fn is_disqualified(&self) -> bool {
        !self.critical.is_empty()
    }

    /// Sum of standard deductions (zero or negative)
    pub fn total_deduction(&self) -> i32 {
        self.deductions.iter().map(|d| d.points).sum()
    }

    fn raise(&mut self, flag: RedFlag, deductions: &DeductionConfig) {
        match flag.deduction(deductions) {
            Some(points) => self.deductions.push(Deduction { flag, points }),
            None => self.critical.push(flag),
        }
    }
}

/// Detects red flags from the snapshot's risk metrics
pub struct RiskEvaluator;

impl RiskEvaluator {
    pub fn evaluate(snapshot: &MetricsSnapshot, config: &ScoringConfig) -> RiskAssessment {
        let mut assessment = RiskAssessment::default();
        let risk = &snapshot.risk;
        let critical = &config.critical;
        let deductions = &config.deductions;

        // Critical
        if risk.honeypot {
            assessment.raise(RedFlag::Honeypot, deductions);
        }

        let shallow_pool = risk
            .liquidity_usd
            .filter(|usd| usd.is_finite())
            .is_some_and(|usd| usd < critical.min_liquidity_usd);
        if risk.insufficient_liquidity || shallow_pool {
            assessment.raise(RedFlag::InsufficientLiquidity, deductions);
        }

        let risky_score = risk
            .risk_score
            .filter(|score| score.is_finite())
            .is_some_and(|score| score > critical.max_risk_score);
        if risk.contract_risk || risky_score {
            assessment.raise(RedFlag::MajorContractRisk, deductions);
        }

        // Standard
        if snapshot.technical.liquidity_lock_days == Some(0) {
            assessment.raise(RedFlag::UnlockedLiquidity, deductions);
        }

        let concentrated = snapshot
            .technical
            .top10_holders_pct
            .filter(|pct| pct.is_finite())
            .is_some_and(|pct| pct > config.limits.max_top10_pct);
        if concentrated {
            assessment.raise(RedFlag::Top10Concentration, deductions);
        }

        if risk.suspicious_trading {
            assessment.raise(RedFlag::SuspiciousTrading, deductions);
        }

        if let Some(age) = snapshot.age() {
            if age.num_seconds() < config.limits.min_age_secs {
                assessment.raise(RedFlag::FreshLaunch, deductions);
            }
        }

        assessment
    }
}
