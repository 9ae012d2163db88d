//! Smart money: large-wallet accumulation and clustered smart-money detection

use super::{Category, CategoryScore, CategoryScorer};
use crate::config::ScoringConfig;
use crate::scoring::snapshot::MetricsSnapshot;

pub struct SmartMoneyScorer;

impl CategoryScorer for SmartMoneyScorer {
    fn category(&self) -> Category {
        Category::SmartMoney
    }

    fn score(&self, snapshot: &MetricsSnapshot, config: &ScoringConfig) -> CategoryScore {
        let mut score = self.empty_score(config);
        let points = &config.points;
        let wallets = &snapshot.wallets;

        if let Some(count) = wallets.new_large_wallets {
            if count >= config.limits.min_large_wallets {
                score.award(points.large_wallets, format!("{} new large wallets", count));
            }
        }
        if wallets.smart_money_detected {
            score.award(points.smart_money, "smart money accumulating");
        }

        score
    }
}
