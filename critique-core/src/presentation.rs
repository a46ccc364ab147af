//! Display values derived from a [`ReviewResult`](crate::types::ReviewResult).
//!
//! Everything here is a pure function, recomputed on every render. The score
//! color tiers and the score descriptions use two different band scales on
//! purpose; they are implemented separately and must stay that way.

use crate::types::Metrics;

/// Five color bands for the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// 80..=100
    Strong,
    /// 60..=79
    Good,
    /// 40..=59
    Moderate,
    /// 20..=39
    Weak,
    /// 0..=19
    Poor,
}

impl ScoreTier {
    /// Fixed display color as an `(r, g, b)` triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ScoreTier::Strong => (0x4C, 0xAF, 0x50),
            ScoreTier::Good => (0x8B, 0xC3, 0x4A),
            ScoreTier::Moderate => (0xFF, 0xC1, 0x07),
            ScoreTier::Weak => (0xFF, 0x98, 0x00),
            ScoreTier::Poor => (0xF4, 0x43, 0x36),
        }
    }
}

/// Maps a score to its color tier. Each band includes its lower bound.
pub fn score_color_tier(score: i64) -> ScoreTier {
    if score >= 80 {
        ScoreTier::Strong
    } else if score >= 60 {
        ScoreTier::Good
    } else if score >= 40 {
        ScoreTier::Moderate
    } else if score >= 20 {
        ScoreTier::Weak
    } else {
        ScoreTier::Poor
    }
}

/// Maps a score to its one-line qualitative description.
pub fn score_description(score: i64) -> &'static str {
    if score >= 90 {
        "Excellent code quality!"
    } else if score >= 75 {
        "Good code with minor improvements needed"
    } else if score >= 60 {
        "Fair code with several suggestions"
    } else if score >= 40 {
        "Needs significant improvements"
    } else {
        "Poor quality - major revisions needed"
    }
}

/// Which count a badge shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Insights,
    Suggestions,
    Issues,
}

/// One labelled count for the compact metrics row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricBadge {
    pub kind: MetricKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub count: u32,
}

/// Builds the three metric badges, always in insights, suggestions, issues order.
pub fn metric_badges(metrics: &Metrics) -> [MetricBadge; 3] {
    [
        MetricBadge {
            kind: MetricKind::Insights,
            label: "Insights",
            icon: "💡",
            count: metrics.insights,
        },
        MetricBadge {
            kind: MetricKind::Suggestions,
            label: "Suggestions",
            icon: "✅",
            count: metrics.suggestions,
        },
        MetricBadge {
            kind: MetricKind::Issues,
            label: "Issues",
            icon: "❌",
            count: metrics.issues,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_tier_band_edges() {
        let cases = [
            (100, ScoreTier::Strong),
            (80, ScoreTier::Strong),
            (79, ScoreTier::Good),
            (60, ScoreTier::Good),
            (59, ScoreTier::Moderate),
            (40, ScoreTier::Moderate),
            (39, ScoreTier::Weak),
            (20, ScoreTier::Weak),
            (19, ScoreTier::Poor),
            (0, ScoreTier::Poor),
        ];
        for (score, tier) in cases {
            assert_eq!(score_color_tier(score), tier, "score {score}");
        }
    }

    #[test]
    fn every_valid_score_has_a_tier_and_description() {
        for score in 0..=100 {
            let _ = score_color_tier(score).rgb();
            assert!(!score_description(score).is_empty());
        }
    }

    #[test]
    fn description_band_edges() {
        assert_eq!(score_description(100), "Excellent code quality!");
        assert_eq!(score_description(90), "Excellent code quality!");
        assert_eq!(score_description(89), "Good code with minor improvements needed");
        assert_eq!(score_description(75), "Good code with minor improvements needed");
        assert_eq!(score_description(74), "Fair code with several suggestions");
        assert_eq!(score_description(60), "Fair code with several suggestions");
        assert_eq!(score_description(59), "Needs significant improvements");
        assert_eq!(score_description(40), "Needs significant improvements");
        assert_eq!(score_description(39), "Poor quality - major revisions needed");
        assert_eq!(score_description(0), "Poor quality - major revisions needed");
    }

    #[test]
    fn tier_and_description_use_independent_bands() {
        assert_eq!(score_color_tier(85), ScoreTier::Strong);
        assert_eq!(score_description(85), "Good code with minor improvements needed");
        assert_eq!(score_color_tier(35), ScoreTier::Weak);
        assert_eq!(score_description(35), "Poor quality - major revisions needed");
    }

    #[test]
    fn badges_for_empty_metrics_are_zero_in_fixed_order() {
        let badges = metric_badges(&Metrics::default());
        let kinds: Vec<_> = badges.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, [MetricKind::Insights, MetricKind::Suggestions, MetricKind::Issues]);
        assert!(badges.iter().all(|b| b.count == 0));
        assert_eq!(badges[2].icon, "❌");
    }

    #[test]
    fn tier_colors_are_fixed() {
        assert_eq!(ScoreTier::Strong.rgb(), (76, 175, 80));
        assert_eq!(ScoreTier::Poor.rgb(), (0xF4, 0x43, 0x36));
    }
}
