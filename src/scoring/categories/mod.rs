//! Category scorers
//!
//! Each scorer is an independent pure function over a shared snapshot. The
//! engine runs all of them; adding or removing a category touches only this
//! module's registry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{CategoryMaxima, ScoringConfig};
use crate::scoring::snapshot::MetricsSnapshot;

pub mod contract;
pub mod smart_money;
pub mod social;
pub mod technical;
pub mod timing;
pub mod volume;

pub use contract::ContractSafetyScorer;
pub use smart_money::SmartMoneyScorer;
pub use social::SocialMomentumScorer;
pub use technical::TechnicalFoundationScorer;
pub use timing::TimingScorer;
pub use volume::VolumeSurgeScorer;

/// Rubric categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    VolumeSurge,
    SocialMomentum,
    SmartMoney,
    TechnicalFoundation,
    Timing,
    ContractSafety,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::VolumeSurge,
        Category::SocialMomentum,
        Category::SmartMoney,
        Category::TechnicalFoundation,
        Category::Timing,
        Category::ContractSafety,
    ];

    /// Configured maximum for this category
    pub fn max_points(&self, maxima: &CategoryMaxima) -> u32 {
        match self {
            Category::VolumeSurge => maxima.volume_surge,
            Category::SocialMomentum => maxima.social_momentum,
            Category::SmartMoney => maxima.smart_money,
            Category::TechnicalFoundation => maxima.technical_foundation,
            Category::Timing => maxima.timing,
            Category::ContractSafety => maxima.contract_safety,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::VolumeSurge => "Volume Surge",
            Category::SocialMomentum => "Social Momentum",
            Category::SmartMoney => "Smart Money",
            Category::TechnicalFoundation => "Technical Foundation",
            Category::Timing => "Timing",
            Category::ContractSafety => "Contract Safety",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Points awarded to one category, with the reasons behind them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Always within `[0, max_points]`
    pub points: u32,
    pub max_points: u32,
    pub reasons: Vec<String>,
}

impl CategoryScore {
    pub fn new(category: Category, max_points: u32) -> Self {
        Self {
            category,
            points: 0,
            max_points,
            reasons: Vec::new(),
        }
    }

    /// Add points for a satisfied sub-rule. The total never exceeds the maximum.
    pub fn award(&mut self, points: u32, reason: impl Into<String>) {
        if points == 0 {
            return;
        }
        self.points = self.points.saturating_add(points).min(self.max_points);
        self.reasons.push(format!("+{} {}", points, reason.into()));
    }

    pub fn is_maxed(&self) -> bool {
        self.points >= self.max_points
    }
}

impl fmt::Display for CategoryScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{}", self.category, self.points, self.max_points)
    }
}

/// A rubric category, scored from a snapshot
pub trait CategoryScorer: Send + Sync {
    fn category(&self) -> Category;

    /// Score the snapshot. Must be pure and must respect the configured maximum.
    fn score(&self, snapshot: &MetricsSnapshot, config: &ScoringConfig) -> CategoryScore;

    /// Empty score carrying this category's configured maximum
    fn empty_score(&self, config: &ScoringConfig) -> CategoryScore {
        let category = self.category();
        CategoryScore::new(category, category.max_points(&config.categories))
    }
}

/// The full rubric, in report order
pub fn default_scorers() -> Vec<Box<dyn CategoryScorer>> {
    vec![
        Box::new(VolumeSurgeScorer),
        Box::new(SocialMomentumScorer),
        Box::new(SmartMoneyScorer),
        Box::new(TechnicalFoundationScorer),
        Box::new(TimingScorer),
        Box::new(ContractSafetyScorer),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_caps_at_max() {
        let mut score = CategoryScore::new(Category::SmartMoney, 20);
        score.award(10, "a");
        score.award(10, "b");
        score.award(10, "c");
        assert_eq!(score.points, 20);
        assert!(score.is_maxed());
        assert_eq!(score.reasons.len(), 3);
    }

    #[test]
    fn test_zero_award_leaves_no_reason() {
        let mut score = CategoryScore::new(Category::Timing, 10);
        score.award(0, "nothing");
        assert_eq!(score.points, 0);
        assert!(score.reasons.is_empty());
    }

    #[test]
    fn test_default_scorers_cover_every_category() {
        let scorers = default_scorers();
        let categories: Vec<Category> = scorers.iter().map(|s| s.category()).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn test_default_maxima_per_category() {
        let maxima = CategoryMaxima::default();
        let total: u32 = Category::ALL.iter().map(|c| c.max_points(&maxima)).sum();
        assert_eq!(total, 100);
        assert_eq!(Category::VolumeSurge.max_points(&maxima), 25);
    }
}
