//! Technical foundation: liquidity lock, contract verification, holder spread

use super::{Category, CategoryScore, CategoryScorer};
use crate::config::ScoringConfig;
use crate::scoring::snapshot::MetricsSnapshot;

pub struct TechnicalFoundationScorer;

impl CategoryScorer for TechnicalFoundationScorer {
    fn category(&self) -> Category {
        Category::TechnicalFoundation
    }

    fn score(&self, snapshot: &MetricsSnapshot, config: &ScoringConfig) -> CategoryScore {
        let mut score = self.empty_score(config);
        let points = &config.points;
        let technical = &snapshot.technical;
        let limits = &config.limits;

        match technical.liquidity_lock_days {
            Some(days) if days > limits.long_lock_days => {
                score.award(points.long_lock, format!("liquidity locked {} days", days));
            }
            Some(days) if days >= limits.short_lock_days => {
                score.award(points.short_lock, format!("liquidity locked {} days", days));
            }
            _ => {}
        }

        if technical.contract_verified {
            score.award(points.contract_verified, "contract verified");
        }

        if let Some(pct) = technical.top_holder_pct.filter(|p| p.is_finite() && *p >= 0.0) {
            if pct <= limits.max_single_holder_pct {
                score.award(
                    points.distributed_holders,
                    format!("largest holder {:.1}% of supply", pct),
                );
            }
        }

        score
    }
}
