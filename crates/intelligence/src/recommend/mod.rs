//! Personalized recommendations: filtering, scoring, diversity and rationale.

mod diversity;
mod engine;
mod explainer;
mod filter;
mod insights;
mod scorer;

pub use diversity::{diversity_score, select_diverse};
pub use engine::{needs_cold_start, RecommendationEngine, RecommendationRequest};
pub use explainer::{cold_start_reason, generate_reason, summarize_recommendations};
pub use filter::{conditions_satisfied, filter_candidates};
pub use insights::build_insights;
pub use scorer::{condition_match, recency_factor, RecommendationScorer, Scorer};

use crate::catalog::{RecommendationCategory, RecommendationTemplate};
use crate::config::ScoringWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Static priority at or above which an item counts as high priority.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 80.0;

/// A catalog template with the fields computed for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    #[serde(flatten)]
    pub template: RecommendationTemplate,
    /// Relevance (0-100) before preference blending.
    pub relevance: f64,
    /// Final score (0-100).
    pub score: f64,
    /// Breakdown of the relevance inputs.
    pub breakdown: ScoreBreakdown,
    /// Human-readable justification.
    pub reason: String,
}

impl RecommendationItem {
    pub fn id(&self) -> &str {
        &self.template.id
    }

    pub fn category(&self) -> RecommendationCategory {
        self.template.category
    }

    pub fn priority(&self) -> f64 {
        self.template.priority
    }
}

/// Inputs to the relevance formula for one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// How well the snapshot satisfies the item's conditions (0.0 - 1.0).
    pub condition_match: f64,
    /// Static priority (0-100).
    pub priority: f64,
    /// Preference from feedback (0-100).
    pub preference: f64,
    /// Freshness of the snapshot (0.0 - 1.0).
    pub recency: f64,
}

impl ScoreBreakdown {
    /// Weighted relevance on a 0-100 scale.
    pub fn relevance(&self, weights: &ScoringWeights) -> f64 {
        100.0
            * (self.condition_match * weights.condition_match
                + self.priority / 100.0 * weights.priority
                + self.preference / 100.0 * weights.preference
                + self.recency * weights.recency)
    }
}

/// Short pattern descriptions accompanying a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationInsights {
    pub pain_pattern: String,
    pub efficiency_pattern: String,
    pub cycle_health: String,
    /// Descriptions of anomalous current values.
    #[serde(default)]
    pub anomalies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total_recommendations: usize,
    pub high_priority_count: usize,
    /// Distinct categories present, in category order.
    pub categories: Vec<RecommendationCategory>,
}

impl RecommendationSummary {
    pub fn from_items(items: &[RecommendationItem]) -> Self {
        let categories: BTreeSet<RecommendationCategory> =
            items.iter().map(|i| i.category()).collect();
        Self {
            total_recommendations: items.len(),
            high_priority_count: items
                .iter()
                .filter(|i| i.priority() >= HIGH_PRIORITY_THRESHOLD)
                .count(),
            categories: categories.into_iter().collect(),
        }
    }
}

/// Ranked recommendations plus insights and summary for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<RecommendationItem>,
    pub insights: RecommendationInsights,
    pub summary: RecommendationSummary,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationResult {
    pub fn new(
        recommendations: Vec<RecommendationItem>,
        insights: RecommendationInsights,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let summary = RecommendationSummary::from_items(&recommendations);
        Self {
            recommendations,
            insights,
            summary,
            generated_at,
        }
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn contains_category(&self, category: RecommendationCategory) -> bool {
        self.recommendations.iter().any(|i| i.category() == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecommendationType;

    fn item(id: &str, category: RecommendationCategory, priority: f64) -> RecommendationItem {
        RecommendationItem {
            template: RecommendationTemplate::new(id, RecommendationType::Tip, category, priority),
            relevance: 50.0,
            score: 50.0,
            breakdown: ScoreBreakdown::default(),
            reason: "because".to_string(),
        }
    }

    #[test]
    fn test_breakdown_relevance_tops_out_at_ninety() {
        let breakdown = ScoreBreakdown {
            condition_match: 1.0,
            priority: 100.0,
            preference: 100.0,
            recency: 1.0,
        };
        let relevance = breakdown.relevance(&ScoringWeights::default());
        assert!((relevance - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_counts() {
        let items = vec![
            item("a", RecommendationCategory::Sleep, 85.0),
            item("b", RecommendationCategory::Sleep, 60.0),
            item("c", RecommendationCategory::Medical, 80.0),
        ];
        let summary = RecommendationSummary::from_items(&items);
        assert_eq!(summary.total_recommendations, 3);
        assert_eq!(summary.high_priority_count, 2);
        assert_eq!(
            summary.categories,
            vec![RecommendationCategory::Medical, RecommendationCategory::Sleep]
        );
    }

    #[test]
    fn test_item_serializes_template_fields_inline() {
        let json = serde_json::to_value(item("a", RecommendationCategory::SelfCare, 70.0)).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["type"], "tip");
        assert_eq!(json["category"], "self-care");
        assert_eq!(json["score"], 50.0);
    }
}
