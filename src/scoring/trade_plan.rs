//! Trade plan: position size and exit targets for a signalled tier
//!
//! Bet bigger on high-conviction tiers, smaller on speculative ones.
//! Tier D gets no plan at all.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scoring::tier::Tier;

/// Take-profit and stop-loss percentages for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTargets {
    pub target_1_pct: f64,
    pub target_2_pct: f64,
    /// Negative: -50 means exit after a 50% drop
    pub stop_loss_pct: f64,
}

impl TierTargets {
    fn validate(&self, tier: char) -> Result<()> {
        if !(self.target_1_pct > 0.0 && self.target_2_pct >= self.target_1_pct) {
            return Err(Error::Config(format!(
                "tier {} targets must be positive and ascending ({} / {})",
                tier, self.target_1_pct, self.target_2_pct
            )));
        }
        if !(self.stop_loss_pct < 0.0 && self.stop_loss_pct > -100.0) {
            return Err(Error::Config(format!(
                "tier {} stop loss must be between -100 and 0, got {}",
                tier, self.stop_loss_pct
            )));
        }
        Ok(())
    }
}

/// Exit targets per signalled tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradePlanConfig {
    #[serde(default = "default_tier_a_targets")]
    pub tier_a: TierTargets,
    #[serde(default = "default_tier_b_targets")]
    pub tier_b: TierTargets,
    #[serde(default = "default_tier_c_targets")]
    pub tier_c: TierTargets,
    /// Tier A scores at or above this get the larger position band
    #[serde(default = "default_high_conviction_score")]
    pub high_conviction_score: u32,
}

fn default_tier_a_targets() -> TierTargets {
    TierTargets { target_1_pct: 200.0, target_2_pct: 1000.0, stop_loss_pct: -50.0 }
}
fn default_tier_b_targets() -> TierTargets {
    TierTargets { target_1_pct: 100.0, target_2_pct: 500.0, stop_loss_pct: -60.0 }
}
fn default_tier_c_targets() -> TierTargets {
    TierTargets { target_1_pct: 50.0, target_2_pct: 200.0, stop_loss_pct: -70.0 }
}
fn default_high_conviction_score() -> u32 { 90 }

impl Default for TradePlanConfig {
    fn default() -> Self {
        Self {
            tier_a: default_tier_a_targets(),
            tier_b: default_tier_b_targets(),
            tier_c: default_tier_c_targets(),
            high_conviction_score: default_high_conviction_score(),
        }
    }
}

impl TradePlanConfig {
    pub fn validate(&self) -> Result<()> {
        self.tier_a.validate('A')?;
        self.tier_b.validate('B')?;
        self.tier_c.validate('C')?;
        Ok(())
    }

    pub fn targets(&self, tier: Tier) -> Option<TierTargets> {
        match tier {
            Tier::A => Some(self.tier_a),
            Tier::B => Some(self.tier_b),
            Tier::C => Some(self.tier_c),
            Tier::D => None,
        }
    }
}

/// Suggested share of portfolio, percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSize {
    pub min_pct: f64,
    pub max_pct: f64,
}

impl PositionSize {
    pub fn for_tier(tier: Tier, final_score: u32, high_conviction_score: u32) -> Option<Self> {
        let (min_pct, max_pct) = match tier {
            Tier::A if final_score >= high_conviction_score => (5.0, 8.0),
            Tier::A => (3.0, 5.0),
            Tier::B => (1.0, 3.0),
            Tier::C => (0.5, 1.0),
            Tier::D => return None,
        };
        Some(Self { min_pct, max_pct })
    }
}

/// Absolute exit prices from a reference price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    pub entry: f64,
    pub target_1: f64,
    pub target_2: f64,
    pub stop_loss: f64,
}

impl PriceLevels {
    fn from_targets(entry: f64, targets: &TierTargets) -> Self {
        let at = |pct: f64| entry * (1.0 + pct / 100.0);
        Self {
            entry,
            target_1: at(targets.target_1_pct),
            target_2: at(targets.target_2_pct),
            stop_loss: at(targets.stop_loss_pct),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub tier: Tier,
    pub position_size: PositionSize,
    pub targets: TierTargets,
    pub prices: Option<PriceLevels>,
}

impl TradePlan {
    /// Plan for a tier; `None` for Tier D.
    ///
    /// Prices are only filled in for a positive, finite reference price.
    pub fn build(
        tier: Tier,
        final_score: u32,
        reference_price: Option<f64>,
        config: &TradePlanConfig,
    ) -> Option<Self> {
        let targets = config.targets(tier)?;
        let position_size =
            PositionSize::for_tier(tier, final_score, config.high_conviction_score)?;
        let prices = reference_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .map(|entry| PriceLevels::from_targets(entry, &targets));

        Some(Self {
            tier,
            position_size,
            targets,
            prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_bands() {
        let a_high = PositionSize::for_tier(Tier::A, 92, 90).unwrap();
        assert_eq!((a_high.min_pct, a_high.max_pct), (5.0, 8.0));
        let a = PositionSize::for_tier(Tier::A, 82, 90).unwrap();
        assert_eq!((a.min_pct, a.max_pct), (3.0, 5.0));
        let c = PositionSize::for_tier(Tier::C, 50, 90).unwrap();
        assert_eq!((c.min_pct, c.max_pct), (0.5, 1.0));
        assert!(PositionSize::for_tier(Tier::D, 10, 90).is_none());
    }

    #[test]
    fn test_price_levels() {
        let plan = TradePlan::build(Tier::B, 70, Some(0.002), &TradePlanConfig::default()).unwrap();
        let prices = plan.prices.unwrap();
        assert!((prices.target_1 - 0.004).abs() < 1e-12);
        assert!((prices.target_2 - 0.012).abs() < 1e-12);
        assert!((prices.stop_loss - 0.0008).abs() < 1e-12);
    }

    #[test]
    fn test_no_prices_without_reference() {
        let config = TradePlanConfig::default();
        let plan = TradePlan::build(Tier::A, 85, None, &config).unwrap();
        assert!(plan.prices.is_none());
        let plan = TradePlan::build(Tier::A, 85, Some(0.0), &config).unwrap();
        assert!(plan.prices.is_none());
    }

    #[test]
    fn test_no_plan_for_tier_d() {
        assert!(TradePlan::build(Tier::D, 40, Some(1.0), &TradePlanConfig::default()).is_none());
    }

    #[test]
    fn test_validate() {
        assert!(TradePlanConfig::default().validate().is_ok());
        let mut config = TradePlanConfig::default();
        config.tier_c.stop_loss_pct = 10.0;
        assert!(config.validate().is_err());
        let mut config = TradePlanConfig::default();
        config.tier_a.target_2_pct = 100.0;
        assert!(config.validate().is_err());
    }
}
