//! Timing: launch window and market context flags

use super::{Category, CategoryScore, CategoryScorer};
use crate::config::ScoringConfig;
use crate::scoring::snapshot::MetricsSnapshot;

pub struct TimingScorer;

impl CategoryScorer for TimingScorer {
    fn category(&self) -> Category {
        Category::Timing
    }

    fn score(&self, snapshot: &MetricsSnapshot, config: &ScoringConfig) -> CategoryScore {
        let mut score = self.empty_score(config);
        let points = &config.points;
        let timing = &snapshot.timing;

        if timing.meme_season {
            score.award(points.meme_season, "meme season launch");
        }
        if timing.low_competition {
            score.award(points.low_competition, "low competition window");
        }
        if timing.optimal_entry_window {
            score.award(points.optimal_entry, "optimal entry window");
        }

        score
    }
}
