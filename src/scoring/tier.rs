//! Tier classification and risk level

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::scoring::aggregator::{ScoreBreakdown, MAX_SCORE};

/// Ordinal classification of a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl Tier {
    pub fn letter(&self) -> char {
        match self {
            Tier::A => 'A',
            Tier::B => 'B',
            Tier::C => 'C',
            Tier::D => 'D',
        }
    }

    /// One-line recommendation for this tier
    pub fn description(&self) -> &'static str {
        match self {
            Tier::A => "Strong signals detected - act fast",
            Tier::B => "Good momentum building - enter with caution",
            Tier::C => "Early signals present - small position only",
            Tier::D => "Too many risks or no momentum - avoid",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.letter())
    }
}

/// Minimum final score per tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    #[serde(default = "default_tier_a")]
    pub a: u32,
    #[serde(default = "default_tier_b")]
    pub b: u32,
    #[serde(default = "default_tier_c")]
    pub c: u32,
    /// Must be 0 so the tiers cover the whole range
    #[serde(default)]
    pub d: u32,
}

fn default_tier_a() -> u32 { 80 }
fn default_tier_b() -> u32 { 65 }
fn default_tier_c() -> u32 { 50 }

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            a: default_tier_a(),
            b: default_tier_b(),
            c: default_tier_c(),
            d: 0,
        }
    }
}

impl TierThresholds {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c, d: 0 }
    }

    /// Thresholds must be non-increasing from A to D and cover `[0, 100]`
    pub fn validate(&self) -> Result<()> {
        if self.a > MAX_SCORE {
            return Err(Error::InvalidTierThresholds(format!(
                "tier A minimum {} exceeds {}",
                self.a, MAX_SCORE
            )));
        }
        if !(self.a >= self.b && self.b >= self.c && self.c >= self.d) {
            return Err(Error::InvalidTierThresholds(format!(
                "not monotonic: A={} B={} C={} D={}",
                self.a, self.b, self.c, self.d
            )));
        }
        if self.d != 0 {
            return Err(Error::InvalidTierThresholds(format!(
                "tier D minimum must be 0, got {}",
                self.d
            )));
        }
        Ok(())
    }

    pub fn minimum(&self, tier: Tier) -> u32 {
        match tier {
            Tier::A => self.a,
            Tier::B => self.b,
            Tier::C => self.c,
            Tier::D => self.d,
        }
    }

    /// Walk from A down to D; first tier whose minimum the score reaches
    pub fn classify(&self, final_score: u32) -> Tier {
        [Tier::A, Tier::B, Tier::C]
            .into_iter()
            .find(|tier| final_score >= self.minimum(*tier))
            .unwrap_or(Tier::D)
    }

    /// Classify a breakdown; disqualified tokens are always Tier D
    pub fn classify_breakdown(&self, breakdown: &ScoreBreakdown) -> Tier {
        if breakdown.disqualified {
            return Tier::D;
        }
        self.classify(breakdown.final_score)
    }
}

/// Overall risk assessment of a scored token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn assess(breakdown: &ScoreBreakdown) -> Self {
        if breakdown.disqualified {
            return RiskLevel::Critical;
        }
        let flags = breakdown.deductions.len();
        if breakdown.final_score < 30 || flags > 5 {
            RiskLevel::High
        } else if breakdown.final_score < 60 || flags > 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        };
        write!(f, "{}", label)
    }
}

/// Tier D tokens just under the Tier C line are worth watching
pub fn is_watchlist_candidate(
    breakdown: &ScoreBreakdown,
    tier: Tier,
    thresholds: &TierThresholds,
    margin: u32,
) -> bool {
    if breakdown.disqualified || tier != Tier::D {
        return false;
    }
    let floor = thresholds.c.saturating_sub(margin);
    breakdown.final_score >= floor && breakdown.final_score < thresholds.c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::red_flags::{Deduction, RedFlag};

    fn breakdown(final_score: u32, disqualified: bool) -> ScoreBreakdown {
        ScoreBreakdown {
            categories: vec![],
            deductions: vec![],
            critical_flags: if disqualified { vec![RedFlag::Honeypot] } else { vec![] },
            pre_deduction_total: final_score,
            disqualified,
            final_score,
        }
    }

    #[test]
    fn test_classify_walks_down() {
        let thresholds = TierThresholds::new(80, 65, 50);
        assert_eq!(thresholds.classify(100), Tier::A);
        assert_eq!(thresholds.classify(80), Tier::A);
        assert_eq!(thresholds.classify(79), Tier::B);
        assert_eq!(thresholds.classify(65), Tier::B);
        assert_eq!(thresholds.classify(50), Tier::C);
        assert_eq!(thresholds.classify(49), Tier::D);
        assert_eq!(thresholds.classify(0), Tier::D);
    }

    #[test]
    fn test_equal_thresholds_prefer_higher_tier() {
        let thresholds = TierThresholds::new(60, 60, 40);
        assert!(thresholds.validate().is_ok());
        assert_eq!(thresholds.classify(60), Tier::A);
    }

    #[test]
    fn test_disqualified_always_d() {
        let thresholds = TierThresholds::new(0, 0, 0);
        assert_eq!(thresholds.classify(0), Tier::A);
        assert_eq!(thresholds.classify_breakdown(&breakdown(0, true)), Tier::D);
    }

    #[test]
    fn test_validate() {
        assert!(TierThresholds::default().validate().is_ok());
        assert!(TierThresholds::new(101, 65, 50).validate().is_err());
        assert!(TierThresholds::new(80, 85, 50).validate().is_err());
        assert!(TierThresholds::new(80, 65, 70).validate().is_err());
        let gap = TierThresholds { a: 80, b: 65, c: 50, d: 10 };
        assert!(gap.validate().is_err());
    }

    #[test]
    fn test_risk_level() {
        assert_eq!(RiskLevel::assess(&breakdown(0, true)), RiskLevel::Critical);
        assert_eq!(RiskLevel::assess(&breakdown(20, false)), RiskLevel::High);
        assert_eq!(RiskLevel::assess(&breakdown(45, false)), RiskLevel::Medium);
        assert_eq!(RiskLevel::assess(&breakdown(75, false)), RiskLevel::Low);

        let mut flagged = breakdown(75, false);
        flagged.deductions = vec![
            Deduction { flag: RedFlag::FreshLaunch, points: -5 },
            Deduction { flag: RedFlag::SuspiciousTrading, points: -10 },
            Deduction { flag: RedFlag::UnlockedLiquidity, points: -10 },
        ];
        assert_eq!(RiskLevel::assess(&flagged), RiskLevel::Medium);
    }

    #[test]
    fn test_watchlist() {
        let thresholds = TierThresholds::new(80, 65, 50);
        assert!(is_watchlist_candidate(&breakdown(46, false), Tier::D, &thresholds, 5));
        assert!(is_watchlist_candidate(&breakdown(45, false), Tier::D, &thresholds, 5));
        assert!(!is_watchlist_candidate(&breakdown(44, false), Tier::D, &thresholds, 5));
        assert!(!is_watchlist_candidate(&breakdown(55, false), Tier::C, &thresholds, 5));
        let low_c = TierThresholds::new(80, 65, 3);
        assert!(!is_watchlist_candidate(&breakdown(0, true), Tier::D, &low_c, 5));
    }
}
