//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;
use crate::scoring::aggregator::MAX_SCORE;

// Re-export the configuration value objects owned by the scoring modules
pub use crate::scoring::signal::SignalFloors;
pub use crate::scoring::tier::TierThresholds;
pub use crate::scoring::trade_plan::{TierTargets, TradePlanConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub trade_plan: TradePlanConfig,
}

/// Everything the scoring engine reads. Loaded once, never mutated while scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Maximum points per category (must sum to 100)
    #[serde(default)]
    pub categories: CategoryMaxima,

    /// Volume surge ratio tiers, highest ratio first
    #[serde(default = "default_volume_tiers")]
    pub volume_tiers: Vec<VolumeTier>,

    /// Minimum final score per tier
    #[serde(default)]
    pub tiers: TierThresholds,

    /// Minimum final score to actually emit a signal per tier
    #[serde(default)]
    pub signal: SignalFloors,

    /// Point cost of each standard red flag
    #[serde(default)]
    pub deductions: DeductionConfig,

    /// Thresholds that turn raw risk metrics into critical flags
    #[serde(default)]
    pub critical: CriticalThresholds,

    /// Numeric limits used by the category sub-rules
    #[serde(default)]
    pub limits: RubricLimits,

    /// Points awarded by each category sub-rule
    #[serde(default)]
    pub points: RubricPoints,

    /// Points below the Tier C threshold that still qualify for the watchlist
    #[serde(default = "default_watchlist_margin")]
    pub watchlist_margin: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            categories: CategoryMaxima::default(),
            volume_tiers: default_volume_tiers(),
            tiers: TierThresholds::default(),
            signal: SignalFloors::default(),
            deductions: DeductionConfig::default(),
            critical: CriticalThresholds::default(),
            limits: RubricLimits::default(),
            points: RubricPoints::default(),
            watchlist_margin: default_watchlist_margin(),
        }
    }
}

/// Per-category maximum points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMaxima {
    #[serde(default = "default_volume_surge_max")]
    pub volume_surge: u32,
    #[serde(default = "default_social_momentum_max")]
    pub social_momentum: u32,
    #[serde(default = "default_smart_money_max")]
    pub smart_money: u32,
    #[serde(default = "default_technical_foundation_max")]
    pub technical_foundation: u32,
    #[serde(default = "default_timing_max")]
    pub timing: u32,
    #[serde(default = "default_contract_safety_max")]
    pub contract_safety: u32,
}

fn default_volume_surge_max() -> u32 { 25 }
fn default_social_momentum_max() -> u32 { 20 }
fn default_smart_money_max() -> u32 { 20 }
fn default_technical_foundation_max() -> u32 { 15 }
fn default_timing_max() -> u32 { 10 }
fn default_contract_safety_max() -> u32 { 10 }

impl Default for CategoryMaxima {
    fn default() -> Self {
        Self {
            volume_surge: default_volume_surge_max(),
            social_momentum: default_social_momentum_max(),
            smart_money: default_smart_money_max(),
            technical_foundation: default_technical_foundation_max(),
            timing: default_timing_max(),
            contract_safety: default_contract_safety_max(),
        }
    }
}

impl CategoryMaxima {
    fn entries(&self) -> [(&'static str, u32); 6] {
        [
            ("volume_surge", self.volume_surge),
            ("social_momentum", self.social_momentum),
            ("smart_money", self.smart_money),
            ("technical_foundation", self.technical_foundation),
            ("timing", self.timing),
            ("contract_safety", self.contract_safety),
        ]
    }

    /// Sum of all maxima, widened so oversized values cannot wrap
    pub fn total(&self) -> u64 {
        self.entries()
            .iter()
            .map(|(_, points)| u64::from(*points))
            .sum()
    }

    pub fn validate(&self) -> crate::Result<()> {
        for (category, points) in self.entries() {
            if points > MAX_SCORE {
                return Err(Error::InvalidCategoryMaximum { category, points });
            }
        }
        let total = self.total();
        if total != u64::from(MAX_SCORE) {
            return Err(Error::InvalidCategoryMaxima { total });
        }
        Ok(())
    }
}

/// One step of the volume surge table: ratio strictly above `min_ratio` earns `points`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeTier {
    pub min_ratio: f64,
    pub points: u32,
}

fn default_volume_tiers() -> Vec<VolumeTier> {
    vec![
        VolumeTier { min_ratio: 10.0, points: 25 },
        VolumeTier { min_ratio: 5.0, points: 15 },
        VolumeTier { min_ratio: 2.0, points: 5 },
    ]
}

/// Signed point cost of each standard red flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionConfig {
    #[serde(default = "default_unlocked_liquidity")]
    pub unlocked_liquidity: i32,
    #[serde(default = "default_top10_concentration")]
    pub top10_concentration: i32,
    #[serde(default = "default_suspicious_trading")]
    pub suspicious_trading: i32,
    #[serde(default = "default_fresh_launch")]
    pub fresh_launch: i32,
}

fn default_unlocked_liquidity() -> i32 { -10 }
fn default_top10_concentration() -> i32 { -10 }
fn default_suspicious_trading() -> i32 { -10 }
fn default_fresh_launch() -> i32 { -5 }

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            unlocked_liquidity: default_unlocked_liquidity(),
            top10_concentration: default_top10_concentration(),
            suspicious_trading: default_suspicious_trading(),
            fresh_launch: default_fresh_launch(),
        }
    }
}

impl DeductionConfig {
    pub fn validate(&self) -> crate::Result<()> {
        let entries = [
            ("unlocked_liquidity", self.unlocked_liquidity),
            ("top10_concentration", self.top10_concentration),
            ("suspicious_trading", self.suspicious_trading),
            ("fresh_launch", self.fresh_launch),
        ];
        for (flag, points) in entries {
            if points > 0 {
                return Err(Error::InvalidDeduction { flag, points });
            }
        }
        Ok(())
    }
}

/// Critical-flag thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalThresholds {
    /// Pools below this USD liquidity are disqualified
    #[serde(default = "default_min_liquidity_usd")]
    pub min_liquidity_usd: f64,
    /// External risk scores above this are a major contract risk
    #[serde(default = "default_max_risk_score")]
    pub max_risk_score: f64,
}

fn default_min_liquidity_usd() -> f64 { 1000.0 }
fn default_max_risk_score() -> f64 { 90.0 }

impl Default for CriticalThresholds {
    fn default() -> Self {
        Self {
            min_liquidity_usd: default_min_liquidity_usd(),
            max_risk_score: default_max_risk_score(),
        }
    }
}

/// Numeric limits for the category sub-rules and standard flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubricLimits {
    /// Lock longer than this many days earns the long-lock award
    #[serde(default = "default_long_lock_days")]
    pub long_lock_days: u32,
    /// Lock of at least this many days earns the short-lock award
    #[serde(default = "default_short_lock_days")]
    pub short_lock_days: u32,
    /// No single wallet may hold more than this percentage
    #[serde(default = "default_max_single_holder_pct")]
    pub max_single_holder_pct: f64,
    /// Top-10 holders above this percentage is a red flag
    #[serde(default = "default_max_top10_pct")]
    pub max_top10_pct: f64,
    /// Minimum count of new large wallets for the accumulation award
    #[serde(default = "default_min_large_wallets")]
    pub min_large_wallets: u32,
    /// Tokens younger than this are flagged as a fresh launch
    #[serde(default = "default_min_age_secs")]
    pub min_age_secs: i64,
}

fn default_long_lock_days() -> u32 { 180 }
fn default_short_lock_days() -> u32 { 30 }
fn default_max_single_holder_pct() -> f64 { 5.0 }
fn default_max_top10_pct() -> f64 { 50.0 }
fn default_min_large_wallets() -> u32 { 2 }
fn default_min_age_secs() -> i64 { 3600 }

impl Default for RubricLimits {
    fn default() -> Self {
        Self {
            long_lock_days: default_long_lock_days(),
            short_lock_days: default_short_lock_days(),
            max_single_holder_pct: default_max_single_holder_pct(),
            max_top10_pct: default_max_top10_pct(),
            min_large_wallets: default_min_large_wallets(),
            min_age_secs: default_min_age_secs(),
        }
    }
}

/// Points per satisfied sub-rule. A category's awards are capped at its maximum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubricPoints {
    // Social momentum
    #[serde(default = "default_trending_points")]
    pub trending: u32,
    #[serde(default = "default_telegram_surge_points")]
    pub telegram_surge: u32,
    #[serde(default = "default_influencer_points")]
    pub influencer_mention: u32,

    // Smart money
    #[serde(default = "default_large_wallets_points")]
    pub large_wallets: u32,
    #[serde(default = "default_smart_money_points")]
    pub smart_money: u32,

    // Technical foundation
    #[serde(default = "default_long_lock_points")]
    pub long_lock: u32,
    #[serde(default = "default_short_lock_points")]
    pub short_lock: u32,
    #[serde(default = "default_contract_verified_points")]
    pub contract_verified: u32,
    #[serde(default = "default_distributed_holders_points")]
    pub distributed_holders: u32,

    // Timing
    #[serde(default = "default_meme_season_points")]
    pub meme_season: u32,
    #[serde(default = "default_low_competition_points")]
    pub low_competition: u32,
    #[serde(default = "default_optimal_entry_points")]
    pub optimal_entry: u32,

    // Contract safety
    #[serde(default = "default_sell_verified_points")]
    pub sell_verified: u32,
    #[serde(default = "default_ownership_renounced_points")]
    pub ownership_renounced: u32,
    #[serde(default = "default_mint_disabled_points")]
    pub mint_disabled: u32,
}

fn default_trending_points() -> u32 { 10 }
fn default_telegram_surge_points() -> u32 { 5 }
fn default_influencer_points() -> u32 { 5 }
fn default_large_wallets_points() -> u32 { 10 }
fn default_smart_money_points() -> u32 { 10 }
fn default_long_lock_points() -> u32 { 7 }
fn default_short_lock_points() -> u32 { 3 }
fn default_contract_verified_points() -> u32 { 3 }
fn default_distributed_holders_points() -> u32 { 5 }
fn default_meme_season_points() -> u32 { 5 }
fn default_low_competition_points() -> u32 { 3 }
fn default_optimal_entry_points() -> u32 { 2 }
fn default_sell_verified_points() -> u32 { 4 }
fn default_ownership_renounced_points() -> u32 { 3 }
fn default_mint_disabled_points() -> u32 { 3 }

impl Default for RubricPoints {
    fn default() -> Self {
        Self {
            trending: default_trending_points(),
            telegram_surge: default_telegram_surge_points(),
            influencer_mention: default_influencer_points(),
            large_wallets: default_large_wallets_points(),
            smart_money: default_smart_money_points(),
            long_lock: default_long_lock_points(),
            short_lock: default_short_lock_points(),
            contract_verified: default_contract_verified_points(),
            distributed_holders: default_distributed_holders_points(),
            meme_season: default_meme_season_points(),
            low_competition: default_low_competition_points(),
            optimal_entry: default_optimal_entry_points(),
            sell_verified: default_sell_verified_points(),
            ownership_renounced: default_ownership_renounced_points(),
            mint_disabled: default_mint_disabled_points(),
        }
    }
}

impl RubricPoints {
    /// No single sub-rule may award more than its category maximum
    pub fn validate(&self, maxima: &CategoryMaxima) -> crate::Result<()> {
        let rules = [
            ("trending", self.trending, maxima.social_momentum),
            ("telegram_surge", self.telegram_surge, maxima.social_momentum),
            ("influencer_mention", self.influencer_mention, maxima.social_momentum),
            ("large_wallets", self.large_wallets, maxima.smart_money),
            ("smart_money", self.smart_money, maxima.smart_money),
            ("long_lock", self.long_lock, maxima.technical_foundation),
            ("short_lock", self.short_lock, maxima.technical_foundation),
            ("contract_verified", self.contract_verified, maxima.technical_foundation),
            ("distributed_holders", self.distributed_holders, maxima.technical_foundation),
            ("meme_season", self.meme_season, maxima.timing),
            ("low_competition", self.low_competition, maxima.timing),
            ("optimal_entry", self.optimal_entry, maxima.timing),
            ("sell_verified", self.sell_verified, maxima.contract_safety),
            ("ownership_renounced", self.ownership_renounced, maxima.contract_safety),
            ("mint_disabled", self.mint_disabled, maxima.contract_safety),
        ];
        for (rule, points, max) in rules {
            if points > max {
                return Err(Error::Config(format!(
                    "{} awards {} points, above its category maximum {}",
                    rule, points, max
                )));
            }
        }
        if self.short_lock > self.long_lock {
            return Err(Error::Config(format!(
                "short_lock points {} exceed long_lock points {}",
                self.short_lock, self.long_lock
            )));
        }
        Ok(())
    }
}

fn default_watchlist_margin() -> u32 { 5 }

impl ScoringConfig {
    /// Validate every rule table. Any failure is fatal for the run.
    pub fn validate(&self) -> crate::Result<()> {
        self.categories.validate()?;
        self.tiers.validate()?;
        self.signal.validate()?;
        self.deductions.validate()?;
        self.points.validate(&self.categories)?;
        self.validate_volume_tiers()?;

        if self.limits.short_lock_days > self.limits.long_lock_days {
            return Err(Error::Config(format!(
                "short_lock_days {} exceeds long_lock_days {}",
                self.limits.short_lock_days, self.limits.long_lock_days
            )));
        }

        // Floors below the tier's own threshold can never bind
        for (tier, threshold, floor) in [
            ('B', self.tiers.b, self.signal.b),
            ('C', self.tiers.c, self.signal.c),
        ] {
            if floor < threshold {
                tracing::warn!(
                    tier = %tier,
                    floor,
                    threshold,
                    "Signal floor below tier threshold has no effect"
                );
            }
        }

        Ok(())
    }

    fn validate_volume_tiers(&self) -> crate::Result<()> {
        let max = self.categories.volume_surge;
        for tier in &self.volume_tiers {
            if !tier.min_ratio.is_finite() || tier.min_ratio <= 0.0 {
                return Err(Error::InvalidVolumeTiers(format!(
                    "ratio {} must be positive",
                    tier.min_ratio
                )));
            }
            if tier.points > max {
                return Err(Error::InvalidVolumeTiers(format!(
                    "{} points exceeds the volume surge maximum {}",
                    tier.points, max
                )));
            }
        }
        for pair in self.volume_tiers.windows(2) {
            if pair[0].min_ratio <= pair[1].min_ratio {
                return Err(Error::InvalidVolumeTiers(format!(
                    "ratios must be strictly decreasing ({} then {})",
                    pair[0].min_ratio, pair[1].min_ratio
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (SIGNAL_SCORING__TIERS__A=75)
            .add_source(
                config::Environment::with_prefix("SIGNAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.scoring
            .validate()
            .context("Invalid scoring configuration")?;
        self.trade_plan
            .validate()
            .context("Invalid trade plan configuration")?;
        Ok(())
    }

    /// Human-readable configuration summary
    pub fn display(&self) -> String {
        let s = &self.scoring;
        format!(
            r#"Configuration:
  Category maxima:
    volume_surge: {}
    social_momentum: {}
    smart_money: {}
    technical_foundation: {}
    timing: {}
    contract_safety: {}
  Volume tiers: {}
  Tier thresholds:
    A: {}  B: {}  C: {}  D: {}
  Signal floors:
    A: {} (always signal: {})  B: {}  C: {}
  Deductions:
    unlocked_liquidity: {}
    top10_concentration: {}
    suspicious_trading: {}
    fresh_launch: {}
  Critical:
    min_liquidity: ${}
    max_risk_score: {}
  Watchlist margin: {}
"#,
            s.categories.volume_surge,
            s.categories.social_momentum,
            s.categories.smart_money,
            s.categories.technical_foundation,
            s.categories.timing,
            s.categories.contract_safety,
            s.volume_tiers
                .iter()
                .map(|t| format!(">{}x={}", t.min_ratio, t.points))
                .collect::<Vec<_>>()
                .join(", "),
            s.tiers.a,
            s.tiers.b,
            s.tiers.c,
            s.tiers.d,
            s.signal.a,
            s.signal.tier_a_always_signal,
            s.signal.b,
            s.signal.c,
            s.deductions.unlocked_liquidity,
            s.deductions.top10_concentration,
            s.deductions.suspicious_trading,
            s.deductions.fresh_launch,
            s.critical.min_liquidity_usd,
            s.critical.max_risk_score,
            s.watchlist_margin,
        )
    }
}
