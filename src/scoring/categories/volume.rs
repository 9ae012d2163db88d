//! Volume surge: current window volume against the preceding window

use super::{Category, CategoryScore, CategoryScorer};
use crate::config::{ScoringConfig, VolumeTier};
use crate::scoring::snapshot::MetricsSnapshot;

/// Awards the single best tier across the 5m/15m/1h windows (not cumulative)
pub struct VolumeSurgeScorer;

/// Points for a ratio: first tier (highest ratio first) strictly exceeded
fn tier_points(ratio: f64, tiers: &[VolumeTier]) -> u32 {
    tiers
        .iter()
        .find(|tier| ratio > tier.min_ratio)
        .map(|tier| tier.points)
        .unwrap_or(0)
}

impl CategoryScorer for VolumeSurgeScorer {
    fn category(&self) -> Category {
        Category::VolumeSurge
    }

    fn score(&self, snapshot: &MetricsSnapshot, config: &ScoringConfig) -> CategoryScore {
        let mut score = self.empty_score(config);

        let best = snapshot
            .volume
            .windows()
            .into_iter()
            .filter_map(|(label, window)| {
                let ratio = window.surge_ratio()?;
                Some((label, ratio, tier_points(ratio, &config.volume_tiers)))
            })
            // First maximum wins, so shorter windows take ties
            .fold(None, |best: Option<(&str, f64, u32)>, candidate| match best {
                Some(b) if b.2 >= candidate.2 => Some(b),
                _ => Some(candidate),
            });

        if let Some((label, ratio, points)) = best {
            score.award(points, format!("{} volume {:.1}x previous window", label, ratio));
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::snapshot::VolumeWindow;
    use chrono::Utc;

    fn snapshot_with(m5: VolumeWindow, m15: VolumeWindow, h1: VolumeWindow) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::new("token", Utc::now());
        snapshot.volume.m5 = m5;
        snapshot.volume.m15 = m15;
        snapshot.volume.h1 = h1;
        snapshot
    }

    fn score_h1(ratio: f64) -> u32 {
        let snapshot = snapshot_with(
            VolumeWindow::default(),
            VolumeWindow::default(),
            VolumeWindow::new(ratio * 100.0, 100.0),
        );
        VolumeSurgeScorer.score(&snapshot, &ScoringConfig::default()).points
    }

    #[test]
    fn test_tier_boundaries_are_strict() {
        assert_eq!(score_h1(12.0), 25);
        assert_eq!(score_h1(10.0), 15);
        assert_eq!(score_h1(6.0), 15);
        assert_eq!(score_h1(5.0), 5);
        assert_eq!(score_h1(3.0), 5);
        assert_eq!(score_h1(2.0), 0);
        assert_eq!(score_h1(0.5), 0);
    }

    #[test]
    fn test_best_granularity_wins() {
        let snapshot = snapshot_with(
            VolumeWindow::new(300.0, 100.0),  // 3x -> 5
            VolumeWindow::new(1100.0, 100.0), // 11x -> 25
            VolumeWindow::new(600.0, 100.0),  // 6x -> 15
        );
        let score = VolumeSurgeScorer.score(&snapshot, &ScoringConfig::default());
        assert_eq!(score.points, 25);
        assert!(score.reasons[0].contains("15m"));
    }

    #[test]
    fn test_not_cumulative_across_windows() {
        let snapshot = snapshot_with(
            VolumeWindow::new(1200.0, 100.0),
            VolumeWindow::new(1200.0, 100.0),
            VolumeWindow::new(1200.0, 100.0),
        );
        let score = VolumeSurgeScorer.score(&snapshot, &ScoringConfig::default());
        assert_eq!(score.points, 25);
        assert_eq!(score.reasons.len(), 1);
    }

    #[test]
    fn test_zero_baseline_is_no_signal() {
        let snapshot = snapshot_with(
            VolumeWindow::new(5000.0, 0.0),
            VolumeWindow::new(-10.0, 100.0),
            VolumeWindow { current: Some(500.0), previous: None },
        );
        let score = VolumeSurgeScorer.score(&snapshot, &ScoringConfig::default());
        assert_eq!(score.points, 0);
        assert!(score.reasons.is_empty());
    }

    #[test]
    fn test_custom_tiers() {
        let mut config = ScoringConfig::default();
        config.volume_tiers = vec![VolumeTier { min_ratio: 1.5, points: 20 }];
        let snapshot = snapshot_with(
            VolumeWindow::new(200.0, 100.0),
            VolumeWindow::default(),
            VolumeWindow::default(),
        );
        assert_eq!(VolumeSurgeScorer.score(&snapshot, &config).points, 20);
    }
}
