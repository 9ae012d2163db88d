//! Signal decision: whether a classified token is worth a notification
//!
//! A tier says how good a token looks. The signal floor says whether it is
//! good enough, within that tier, to notify about. Tier D never signals.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scoring::aggregator::{ScoreBreakdown, MAX_SCORE};
use crate::scoring::tier::Tier;

/// Per-tier minimum score to emit a signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalFloors {
    /// Tier A signals regardless of its floor
    #[serde(default = "default_true")]
    pub tier_a_always_signal: bool,
    #[serde(default = "default_floor_a")]
    pub a: u32,
    #[serde(default = "default_floor_b")]
    pub b: u32,
    #[serde(default = "default_floor_c")]
    pub c: u32,
}

fn default_true() -> bool { true }
fn default_floor_a() -> u32 { 80 }
fn default_floor_b() -> u32 { 70 }
fn default_floor_c() -> u32 { 55 }

impl Default for SignalFloors {
    fn default() -> Self {
        Self {
            tier_a_always_signal: true,
            a: default_floor_a(),
            b: default_floor_b(),
            c: default_floor_c(),
        }
    }
}

impl SignalFloors {
    pub fn validate(&self) -> Result<()> {
        for (tier, floor) in [('A', self.a), ('B', self.b), ('C', self.c)] {
            if floor > MAX_SCORE {
                return Err(Error::InvalidSignalFloor { tier, floor });
            }
        }
        Ok(())
    }

    /// Floor for a tier; `None` for Tier D, which never signals
    pub fn floor(&self, tier: Tier) -> Option<u32> {
        match tier {
            Tier::A => Some(self.a),
            Tier::B => Some(self.b),
            Tier::C => Some(self.c),
            Tier::D => None,
        }
    }
}

/// Why a decision came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Tier A with the always-signal override
    TierAOverride,
    /// Score reached the tier's signal floor
    AboveFloor,
    /// Classified, but below the tier's signal floor
    BelowFloor,
    /// Tier D never signals
    TierD,
    /// A critical red flag was present
    Disqualified,
}

/// Whether to notify, and why
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub tier: Tier,
    pub should_signal: bool,
    pub reason: DecisionReason,
}

impl SignalDecision {
    pub fn decide(tier: Tier, breakdown: &ScoreBreakdown, floors: &SignalFloors) -> Self {
        let (should_signal, reason) = if breakdown.disqualified {
            (false, DecisionReason::Disqualified)
        } else if tier == Tier::A && floors.tier_a_always_signal {
            (true, DecisionReason::TierAOverride)
        } else {
            match floors.floor(tier) {
                None => (false, DecisionReason::TierD),
                Some(floor) if breakdown.final_score >= floor => (true, DecisionReason::AboveFloor),
                Some(_) => (false, DecisionReason::BelowFloor),
            }
        };

        Self {
            tier,
            should_signal,
            reason,
        }
    }
}
