//! Score aggregation
//!
//! Additive aggregation first, then the disqualification override as a
//! separate final step so it can be audited on its own.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::categories::{Category, CategoryScore};
use crate::scoring::red_flags::{Deduction, RedFlag, RiskAssessment};

pub const MAX_SCORE: u32 = 100;

/// Per-category points, deductions and the final bounded score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub categories: Vec<CategoryScore>,
    pub deductions: Vec<Deduction>,
    pub critical_flags: Vec<RedFlag>,
    /// Sum of category points before any deduction
    pub pre_deduction_total: u32,
    /// Set only when a critical flag was present
    pub disqualified: bool,
    /// In `[0, 100]`; 0 when disqualified
    pub final_score: u32,
}

impl ScoreBreakdown {
    pub fn category_points(&self, category: Category) -> u32 {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.points)
            .unwrap_or(0)
    }

    pub fn total_deduction(&self) -> i32 {
        self.deductions.iter().map(|d| d.points).sum()
    }

    /// Every red flag raised, critical first
    pub fn red_flags(&self) -> Vec<RedFlag> {
        self.critical_flags
            .iter()
            .copied()
            .chain(self.deductions.iter().map(|d| d.flag))
            .collect()
    }

    /// Reasons from every category that scored
    pub fn strengths(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.reasons.iter().map(String::as_str))
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}/{}", self.final_score, MAX_SCORE)?;
        for category in &self.categories {
            writeln!(f, "  {}", category)?;
        }
        for deduction in &self.deductions {
            writeln!(f, "  {}", deduction)?;
        }
        if self.disqualified {
            let flags: Vec<&str> = self.critical_flags.iter().map(|f| f.code()).collect();
            write!(f, "  DISQUALIFIED: {}", flags.join(", "))?;
        } else {
            write!(
                f,
                "  pre-deduction {} / deductions {}",
                self.pre_deduction_total,
                self.total_deduction()
            )?;
        }
        Ok(())
    }
}

/// Sum category points, apply standard deductions, clamp, then override.
pub fn aggregate(categories: Vec<CategoryScore>, risk: RiskAssessment) -> ScoreBreakdown {
    let pre_deduction_total: u32 = categories
        .iter()
        .map(|c| c.points.min(c.max_points))
        .sum::<u32>()
        .min(MAX_SCORE);

    let adjusted = i64::from(pre_deduction_total) + i64::from(risk.total_deduction());
    let final_score = adjusted.clamp(0, i64::from(MAX_SCORE)) as u32;

    let breakdown = ScoreBreakdown {
        categories,
        deductions: risk.deductions,
        critical_flags: Vec::new(),
        pre_deduction_total,
        disqualified: false,
        final_score,
    };

    apply_disqualification(breakdown, risk.critical)
}

/// Final override: any critical flag forces the score to zero.
pub fn apply_disqualification(
    mut breakdown: ScoreBreakdown,
    critical: Vec<RedFlag>,
) -> ScoreBreakdown {
    if !critical.is_empty() {
        breakdown.final_score = 0;
        breakdown.disqualified = true;
    }
    breakdown.critical_flags = critical;
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(category: Category, points: u32, max: u32) -> CategoryScore {
        let mut score = CategoryScore::new(category, max);
        score.award(points, "test");
        score
    }

    fn full_marks() -> Vec<CategoryScore> {
        vec![
            category(Category::VolumeSurge, 25, 25),
            category(Category::SocialMomentum, 20, 20),
            category(Category::SmartMoney, 20, 20),
            category(Category::TechnicalFoundation, 15, 15),
            category(Category::Timing, 10, 10),
            category(Category::ContractSafety, 10, 10),
        ]
    }

    fn deduction(flag: RedFlag, points: i32) -> Deduction {
        Deduction { flag, points }
    }

    #[test]
    fn test_sum_without_flags() {
        let breakdown = aggregate(full_marks(), RiskAssessment::default());
        assert_eq!(breakdown.pre_deduction_total, 100);
        assert_eq!(breakdown.final_score, 100);
        assert!(!breakdown.disqualified);
    }

    #[test]
    fn test_deductions_subtract() {
        let risk = RiskAssessment {
            critical: vec![],
            deductions: vec![
                deduction(RedFlag::UnlockedLiquidity, -10),
                deduction(RedFlag::FreshLaunch, -5),
            ],
        };
        let breakdown = aggregate(full_marks(), risk);
        assert_eq!(breakdown.final_score, 85);
        assert_eq!(breakdown.total_deduction(), -15);
    }

    #[test]
    fn test_deductions_floor_at_zero_without_disqualifying() {
        let categories = vec![category(Category::Timing, 5, 10)];
        let risk = RiskAssessment {
            critical: vec![],
            deductions: vec![
                deduction(RedFlag::SuspiciousTrading, -10),
                deduction(RedFlag::Top10Concentration, -10),
            ],
        };
        let breakdown = aggregate(categories, risk);
        assert_eq!(breakdown.final_score, 0);
        assert!(!breakdown.disqualified);
        assert!(breakdown.critical_flags.is_empty());
    }

    #[test]
    fn test_critical_flag_overrides_everything() {
        let risk = RiskAssessment {
            critical: vec![RedFlag::Honeypot],
            deductions: vec![],
        };
        let breakdown = aggregate(full_marks(), risk);
        assert_eq!(breakdown.pre_deduction_total, 100);
        assert_eq!(breakdown.final_score, 0);
        assert!(breakdown.disqualified);
        assert_eq!(breakdown.red_flags(), vec![RedFlag::Honeypot]);
    }

    #[test]
    fn test_override_in_isolation() {
        let breakdown = aggregate(full_marks(), RiskAssessment::default());
        let overridden =
            apply_disqualification(breakdown.clone(), vec![RedFlag::MajorContractRisk]);
        assert_eq!(overridden.final_score, 0);
        assert!(overridden.disqualified);
        // Category points are preserved for the audit trail
        assert_eq!(overridden.categories, breakdown.categories);

        let untouched = apply_disqualification(breakdown.clone(), vec![]);
        assert_eq!(untouched, breakdown);
    }

    #[test]
    fn test_category_lookup() {
        let breakdown = aggregate(full_marks(), RiskAssessment::default());
        assert_eq!(breakdown.category_points(Category::SmartMoney), 20);
        assert_eq!(breakdown.strengths().count(), 6);
    }

    #[test]
    fn test_display_mentions_disqualification() {
        let risk = RiskAssessment {
            critical: vec![RedFlag::Honeypot],
            deductions: vec![],
        };
        let rendered = aggregate(full_marks(), risk).to_string();
        assert!(rendered.contains("DISQUALIFIED: honeypot"));
    }
}
