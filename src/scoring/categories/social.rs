//! Social momentum from externally derived trend flags

use super::{Category, CategoryScore, CategoryScorer};
use crate::config::ScoringConfig;
use crate::scoring::snapshot::MetricsSnapshot;

pub struct SocialMomentumScorer;

impl CategoryScorer for SocialMomentumScorer {
    fn category(&self) -> Category {
        Category::SocialMomentum
    }

    fn score(&self, snapshot: &MetricsSnapshot, config: &ScoringConfig) -> CategoryScore {
        let mut score = self.empty_score(config);
        let points = &config.points;
        let social = &snapshot.social;

        // One award for trending, whichever platform
        match (social.twitter_trending, social.reddit_trending) {
            (true, true) => score.award(points.trending, "trending on Twitter and Reddit"),
            (true, false) => score.award(points.trending, "trending on Twitter"),
            (false, true) => score.award(points.trending, "trending on Reddit"),
            (false, false) => {}
        }
        if social.telegram_surge {
            score.award(points.telegram_surge, "Telegram group activity surging");
        }
        if social.influencer_mention {
            score.award(points.influencer_mention, "influencer mention");
        }

        score
    }
}
