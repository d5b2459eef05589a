//! Read-only checks over a produced result.
//!
//! Nothing here changes a result. Quality metrics summarize it; the
//! reasonableness rules report advisory issues; the optimizer turns both into
//! suggestions.

mod optimize;
mod reasonableness;

pub use optimize::{
    generate_optimization_report, render_report, OptimizationArea, OptimizationReport, Priority,
    Suggestion,
};
pub use reasonableness::{validate_reasonableness, validate_reasonableness_with, ReasonablenessReport};

use crate::recommend::RecommendationResult;
use crate::snapshot::{DataQualityTier, UserDataSnapshot};
use crate::stats::{mean, round1};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of categories a well-rounded result is expected to span.
const REFERENCE_CATEGORIES: f64 = 5.0;

/// Meta-metrics for one result, each on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAnalysis {
    /// Mean final score.
    pub relevance: f64,
    /// Mean of the distinct-category and distinct-type ratios.
    pub diversity: f64,
    /// Distinct categories against the reference count, capped at 100.
    pub coverage: f64,
    /// Distinct ids over total items. Anything under 100 means duplicates.
    pub novelty: f64,
    /// Weighted blend of the four metrics above.
    pub overall: f64,
    /// Quality tier of the data the result was built from.
    pub data_tier: DataQualityTier,
}

/// Score a result for relevance, spread, coverage and duplication.
pub fn analyze_quality(result: &RecommendationResult, snapshot: &UserDataSnapshot) -> QualityAnalysis {
    let items = &result.recommendations;
    let total = items.len();
    if total == 0 {
        return QualityAnalysis {
            relevance: 0.0,
            diversity: 0.0,
            coverage: 0.0,
            novelty: 0.0,
            overall: 0.0,
            data_tier: snapshot.data_quality.tier,
        };
    }

    let scores: Vec<f64> = items.iter().map(|i| i.score).collect();
    let relevance = mean(&scores).unwrap_or(0.0);

    let categories: HashSet<_> = items.iter().map(|i| i.category()).collect();
    let types: HashSet<_> = items.iter().map(|i| i.template.rec_type).collect();
    let ids: HashSet<&str> = items.iter().map(|i| i.id()).collect();

    let ratio = |distinct: usize| distinct as f64 / total as f64 * 100.0;
    let diversity = (ratio(categories.len()) + ratio(types.len())) / 2.0;
    let coverage = (categories.len() as f64 / REFERENCE_CATEGORIES * 100.0).min(100.0);
    let novelty = ratio(ids.len());
    let overall = relevance * 0.4 + diversity * 0.2 + coverage * 0.2 + novelty * 0.2;

    QualityAnalysis {
        relevance: round1(relevance),
        diversity: round1(diversity),
        coverage: round1(coverage),
        novelty: round1(novelty),
        overall: round1(overall),
        data_tier: snapshot.data_quality.tier,
    }
}
