//! CLI command implementations

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::scoring::{Evaluation, MetricsSnapshot, ScoringEngine};

/// Read one snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> crate::Result<MetricsSnapshot> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Read a JSON array of snapshots
pub fn load_snapshots(path: &Path) -> crate::Result<Vec<MetricsSnapshot>> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Score a single snapshot and print the result
pub fn score(config: &Config, path: &Path, json: bool, price: Option<f64>) -> Result<()> {
    let engine = ScoringEngine::new(config.scoring.clone())?;
    let snapshot = load_snapshot(path)
        .with_context(|| format!("Cannot load snapshot {}", path.display()))?;
    let evaluation = engine.evaluate(&snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    print_evaluation(&evaluation, price, config);
    Ok(())
}

/// Score a batch of snapshots in parallel
pub fn batch(config: &Config, path: &Path, signals_only: bool) -> Result<()> {
    let engine = ScoringEngine::new(config.scoring.clone())?;
    let snapshots = load_snapshots(path)
        .with_context(|| format!("Cannot load snapshot array {}", path.display()))?;
    info!("Scoring {} snapshots from {}", snapshots.len(), path.display());

    let evaluations = engine.evaluate_batch(&snapshots);

    println!("\n=== BATCH RESULTS ===\n");
    println!("{:<12} {:>5} {:>6} {:>8} {:>8}", "TOKEN", "SCORE", "TIER", "RISK", "SIGNAL");
    for evaluation in evaluations
        .iter()
        .filter(|e| !signals_only || e.should_signal())
    {
        let label = if evaluation.symbol.is_empty() {
            &evaluation.token_address
        } else {
            &evaluation.symbol
        };
        println!(
            "{:<12} {:>5} {:>6} {:>8} {:>8}",
            truncate(label, 12),
            evaluation.final_score(),
            evaluation.tier.letter(),
            evaluation.risk_level.to_string(),
            if evaluation.should_signal() { "yes" } else { "no" },
        );
    }

    let signals = evaluations.iter().filter(|e| e.should_signal()).count();
    let disqualified = evaluations
        .iter()
        .filter(|e| e.breakdown.disqualified)
        .count();
    let watchlist = evaluations.iter().filter(|e| e.watchlist).count();
    println!(
        "\n{} scored, {} signals, {} disqualified, {} on watchlist",
        evaluations.len(),
        signals,
        disqualified,
        watchlist
    );
    Ok(())
}

/// Show effective configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.display());
    Ok(())
}

fn print_evaluation(evaluation: &Evaluation, price: Option<f64>, config: &Config) {
    println!("\n=== TOKEN EVALUATION ===\n");
    println!("{}", evaluation.summary());

    let flags = evaluation.breakdown.red_flags();
    if !flags.is_empty() {
        println!("\nRed flags:");
        for flag in flags {
            println!("  - {} ({})", flag.description(), flag.code());
        }
    }

    match evaluation.trade_plan(price, &config.trade_plan) {
        Some(plan) => {
            println!("\nTrade plan:");
            println!(
                "  Position: {}-{}% of portfolio",
                plan.position_size.min_pct, plan.position_size.max_pct
            );
            println!(
                "  Targets: +{}% / +{}%  Stop: {}%",
                plan.targets.target_1_pct, plan.targets.target_2_pct, plan.targets.stop_loss_pct
            );
            if let Some(prices) = plan.prices {
                println!(
                    "  Prices: entry {} -> {} / {}  stop {}",
                    prices.entry, prices.target_1, prices.target_2, prices.stop_loss
                );
            }
        }
        None => println!("\nNo signal - no trade plan."),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}~", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "token_address": "Tok3nAddr",
        "symbol": "PEPE2",
        "observed_at": "2024-05-01T12:00:00Z",
        "created_at": "2024-05-01T06:00:00Z",
        "volume": { "h1": { "current": 120000.0, "previous": 10000.0 } },
        "social": { "twitter_trending": true },
        "wallets": { "new_large_wallets": 2 },
        "technical": {
            "liquidity_lock_days": 240,
            "contract_verified": true,
            "top_holder_pct": 3.5
        },
        "timing": { "meme_season": true }
    }"#;

    #[test]
    fn test_load_snapshot_and_score() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SNAPSHOT).unwrap();

        let snapshot = load_snapshot(file.path()).unwrap();
        let engine = ScoringEngine::new(Config::default().scoring).unwrap();
        assert_eq!(engine.evaluate(&snapshot).final_score(), 65);
    }

    #[test]
    fn test_load_snapshots_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{}, {}]", SNAPSHOT, SNAPSHOT).unwrap();
        assert_eq!(load_snapshots(file.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_load_snapshot_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(load_snapshot(file.path()).is_err());
    }

    #[test]
    fn test_load_snapshot_missing_file_is_io_error() {
        let err = load_snapshot(Path::new("no-such-snapshot.json")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_load_snapshot_bad_json_is_deserialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();
        let err = load_snapshot(file.path()).unwrap_err();
        assert!(matches!(err, crate::Error::Deserialization(_)));
    }

    #[test]
    fn test_score_command() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SNAPSHOT).unwrap();
        let config = Config::default();

        assert!(score(&config, file.path(), false, Some(0.002)).is_ok());
        assert!(score(&config, file.path(), true, None).is_ok());
    }

    #[test]
    fn test_batch_command() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{}, {}]", SNAPSHOT, SNAPSHOT).unwrap();
        let config = Config::default();

        assert!(batch(&config, file.path(), false).is_ok());
        assert!(batch(&config, file.path(), true).is_ok());
    }

    #[test]
    fn test_commands_reject_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SNAPSHOT).unwrap();
        let mut config = Config::default();
        config.scoring.categories.timing = 40;

        assert!(score(&config, file.path(), false, None).is_err());
        assert!(batch(&config, file.path(), false).is_err());
    }

    #[test]
    fn test_score_command_missing_file() {
        let config = Config::default();
        assert!(score(&config, Path::new("no-such-snapshot.json"), false, None).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("PEPE", 12), "PEPE");
        assert_eq!(truncate("ABCDEFGHIJKLMNOP", 6), "ABCDE~");
    }
}
