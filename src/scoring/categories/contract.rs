//! Contract safety: sell path, ownership and mint authority

use super::{Category, CategoryScore, CategoryScorer};
use crate::config::ScoringConfig;
use crate::scoring::snapshot::MetricsSnapshot;

pub struct ContractSafetyScorer;

impl CategoryScorer for ContractSafetyScorer {
    fn category(&self) -> Category {
        Category::ContractSafety
    }

    fn score(&self, snapshot: &MetricsSnapshot, config: &ScoringConfig) -> CategoryScore {
        let mut score = self.empty_score(config);
        let points = &config.points;
        let contract = &snapshot.contract;

        if contract.sell_verified {
            score.award(points.sell_verified, "sell path verified");
        }
        if contract.ownership_renounced {
            score.award(points.ownership_renounced, "ownership renounced");
        }
        if contract.mint_disabled {
            score.award(points.mint_disabled, "mint disabled");
        }

        score
    }
}
