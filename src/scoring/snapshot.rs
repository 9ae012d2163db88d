//! Metrics snapshot consumed by the scoring engine
//!
//! A snapshot is produced by discovery for one token at one instant. Every
//! metric is optional or defaults to `false`: absent data means "no signal"
//! for the sub-rule that reads it, never an error.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Complete set of measurements for one token at one evaluation instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub token_address: String,
    #[serde(default)]
    pub symbol: String,
    pub observed_at: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub volume: VolumeMetrics,
    #[serde(default)]
    pub social: SocialMetrics,
    #[serde(default)]
    pub wallets: WalletMetrics,
    #[serde(default)]
    pub technical: TechnicalMetrics,
    #[serde(default)]
    pub timing: TimingMetrics,
    #[serde(default)]
    pub contract: ContractMetrics,
    #[serde(default)]
    pub risk: RiskMetrics,
}

impl MetricsSnapshot {
    /// Empty snapshot: every metric unknown
    pub fn new(token_address: impl Into<String>, observed_at: DateTime<Utc>) -> Self {
        Self {
            token_address: token_address.into(),
            symbol: String::new(),
            observed_at,
            created_at: None,
            volume: VolumeMetrics::default(),
            social: SocialMetrics::default(),
            wallets: WalletMetrics::default(),
            technical: TechnicalMetrics::default(),
            timing: TimingMetrics::default(),
            contract: ContractMetrics::default(),
            risk: RiskMetrics::default(),
        }
    }

    /// Token age at observation time.
    ///
    /// `None` when the creation time is unknown or lies after the observation.
    pub fn age(&self) -> Option<Duration> {
        let created = self.created_at?;
        let age = self.observed_at - created;
        (age >= Duration::zero()).then_some(age)
    }

    /// Label for logs: symbol when known, address otherwise
    pub fn label(&self) -> &str {
        if self.symbol.is_empty() {
            &self.token_address
        } else {
            &self.symbol
        }
    }
}

/// Volume for one window and the equal-length window before it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeWindow {
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub previous: Option<f64>,
}

impl VolumeWindow {
    pub fn new(current: f64, previous: f64) -> Self {
        Self {
            current: Some(current),
            previous: Some(previous),
        }
    }

    /// `current / previous`, or `None` when the ratio carries no signal
    /// (missing, negative, non-finite, or a zero baseline).
    pub fn surge_ratio(&self) -> Option<f64> {
        let current = self.current.filter(|v| v.is_finite() && *v >= 0.0)?;
        let previous = self.previous.filter(|v| v.is_finite() && *v > 0.0)?;
        Some(current / previous)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeMetrics {
    #[serde(default)]
    pub m5: VolumeWindow,
    #[serde(default)]
    pub m15: VolumeWindow,
    #[serde(default)]
    pub h1: VolumeWindow,
}

impl VolumeMetrics {
    /// All granularities with their labels
    pub fn windows(&self) -> [(&'static str, VolumeWindow); 3] {
        [("5m", self.m5), ("15m", self.m15), ("1h", self.h1)]
    }
}

/// Social signals, derived externally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMetrics {
    #[serde(default)]
    pub twitter_trending: bool,
    #[serde(default)]
    pub reddit_trending: bool,
    #[serde(default)]
    pub telegram_surge: bool,
    #[serde(default)]
    pub influencer_mention: bool,
}

/// Wallet accumulation indicators, derived externally via clustering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletMetrics {
    #[serde(default)]
    pub new_large_wallets: Option<u32>,
    #[serde(default)]
    pub smart_money_detected: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalMetrics {
    /// Days the liquidity stays locked. `Some(0)` means explicitly unlocked.
    #[serde(default)]
    pub liquidity_lock_days: Option<u32>,
    #[serde(default)]
    pub contract_verified: bool,
    /// Largest single-wallet share of supply, percent
    #[serde(default)]
    pub top_holder_pct: Option<f64>,
    /// Combined share of the ten largest wallets, percent
    #[serde(default)]
    pub top10_holders_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingMetrics {
    #[serde(default)]
    pub meme_season: bool,
    #[serde(default)]
    pub low_competition: bool,
    #[serde(default)]
    pub optimal_entry_window: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMetrics {
    /// Honeypot simulation ran and a sell went through
    #[serde(default)]
    pub sell_verified: bool,
    #[serde(default)]
    pub ownership_renounced: bool,
    #[serde(default)]
    pub mint_disabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Proven honeypot: sells fail
    #[serde(default)]
    pub honeypot: bool,
    #[serde(default)]
    pub insufficient_liquidity: bool,
    #[serde(default)]
    pub contract_risk: bool,
    /// Bot or wash trading pattern
    #[serde(default)]
    pub suspicious_trading: bool,
    #[serde(default)]
    pub liquidity_usd: Option<f64>,
    /// External security risk score, 0 (safe) to 100
    #[serde(default)]
    pub risk_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_surge_ratio() {
        assert_eq!(VolumeWindow::new(300.0, 100.0).surge_ratio(), Some(3.0));
        assert_eq!(VolumeWindow::new(0.0, 100.0).surge_ratio(), Some(0.0));
    }

    #[test]
    fn test_surge_ratio_no_signal() {
        assert_eq!(VolumeWindow::new(500.0, 0.0).surge_ratio(), None);
        assert_eq!(VolumeWindow::new(-5.0, 10.0).surge_ratio(), None);
        assert_eq!(VolumeWindow::new(5.0, -10.0).surge_ratio(), None);
        assert_eq!(VolumeWindow::new(f64::NAN, 10.0).surge_ratio(), None);
        assert_eq!(VolumeWindow::default().surge_ratio(), None);
    }

    #[test]
    fn test_age() {
        let mut snapshot = MetricsSnapshot::new("addr", at(12));
        assert!(snapshot.age().is_none());

        snapshot.created_at = Some(at(10));
        assert_eq!(snapshot.age(), Some(Duration::hours(2)));

        // Created after it was observed: malformed, treated as unknown
        snapshot.created_at = Some(at(13));
        assert!(snapshot.age().is_none());
    }

    #[test]
    fn test_partial_json_deserializes() {
        let json = r#"{
            "token_address": "So1aNa",
            "observed_at": "2024-05-01T12:00:00Z",
            "volume": { "h1": { "current": 1200.0 } },
            "social": { "twitter_trending": true }
        }"#;
        let snapshot: MetricsSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.social.twitter_trending);
        assert_eq!(snapshot.volume.h1.current, Some(1200.0));
        assert_eq!(snapshot.volume.h1.previous, None);
        assert!(!snapshot.risk.honeypot);
        assert_eq!(snapshot.label(), "So1aNa");
    }
}
