//! Personalized cycle-health recommendations from tracked history.
//!
//! This crate provides:
//! - Statistical snapshots of cycle, pain and work-impact history
//! - Data quality scoring and anomaly detection
//! - Condition filtering, multi-factor scoring and diversity-constrained selection
//! - Feedback analytics and preference re-ranking
//! - Quality metrics, reasonableness checks and optimization reports
//!
//! Every entry point is deterministic given its inputs and clock, and none of
//! them fail on malformed or degenerate input.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod feedback;
pub mod recommend;
pub mod snapshot;
mod stats;
pub mod types;

#[cfg(test)]
mod test_support;

pub use cache::{InputSignature, ResultCache};
pub use catalog::{
    CatalogRepository, NumericRange, RecommendationCategory, RecommendationConditions,
    RecommendationTemplate, RecommendationType, StaticCatalog,
};
pub use config::{
    CacheConfig, DiversityConfig, EngineConfig, Locale, PainTrendOrdering, ScoringWeights,
    MAX_RESULTS_LIMIT,
};
pub use error::{CatalogError, RecordError};
pub use evaluate::{
    analyze_quality, generate_optimization_report, render_report, validate_reasonableness,
    validate_reasonableness_with, OptimizationReport, QualityAnalysis, ReasonablenessReport,
    Suggestion,
};
pub use feedback::{
    analyze_feedback_with, FeedbackAction, FeedbackAnalysis, FeedbackHistory, FeedbackRecord,
    PreferenceProfile,
};
pub use recommend::{
    needs_cold_start, RecommendationEngine, RecommendationInsights, RecommendationItem,
    RecommendationRequest, RecommendationResult, RecommendationSummary, ScoreBreakdown,
};
pub use snapshot::{
    build_snapshot, build_snapshot_with, parse_records, Anomaly, DataQualityMetrics,
    DataQualityTier, RawRecord, SnapshotOptions, UserDataSnapshot,
};
pub use types::{
    CyclePhase, FlowIntensity, NutritionPreference, RecordCategory, TimeSeriesRecord,
    WorkImpactSample,
};

use chrono::{DateTime, Utc};

/// Build a snapshot as of `now` with default settings.
pub fn build_snapshot_at(
    records: &[TimeSeriesRecord],
    work_impact: &WorkImpactSample,
    nutrition: Option<&NutritionPreference>,
    now: DateTime<Utc>,
) -> UserDataSnapshot {
    let options = SnapshotOptions {
        now,
        ..Default::default()
    };
    build_snapshot_with(records, work_impact, nutrition, &options)
}

/// Personalized recommendations from the built-in catalog with default settings.
pub fn generate_recommendations(
    records: &[TimeSeriesRecord],
    work_impact: &WorkImpactSample,
    nutrition: Option<&NutritionPreference>,
    feedback: &FeedbackHistory,
) -> RecommendationResult {
    let request =
        RecommendationRequest::new(records, work_impact, feedback).with_nutrition(nutrition);
    RecommendationEngine::default().generate(&request)
}

/// [`generate_recommendations`] as of a fixed instant.
pub fn generate_recommendations_at(
    records: &[TimeSeriesRecord],
    work_impact: &WorkImpactSample,
    nutrition: Option<&NutritionPreference>,
    feedback: &FeedbackHistory,
    now: DateTime<Utc>,
) -> RecommendationResult {
    let request =
        RecommendationRequest::new(records, work_impact, feedback).with_nutrition(nutrition);
    RecommendationEngine::default()
        .with_fixed_time(now)
        .generate(&request)
}

/// Starter recommendations for users without enough history.
pub fn generate_cold_start_recommendations(feedback: &FeedbackHistory) -> Vec<RecommendationItem> {
    RecommendationEngine::default().cold_start(feedback)
}

/// Engagement analytics over a feedback log with the default list size.
pub fn analyze_feedback(feedback: &FeedbackHistory) -> FeedbackAnalysis {
    analyze_feedback_with(feedback, EngineConfig::default().feedback_top_n)
}
