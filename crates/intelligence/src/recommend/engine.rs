//! The recommendation pipeline: snapshot, filter, score, diversify, explain.

use super::diversity::{by_rank, select_diverse};
use super::explainer::{cold_start_reason, generate_reason};
use super::filter::filter_candidates;
use super::insights::build_insights;
use super::scorer::{RecommendationScorer, Scorer};
use super::{RecommendationItem, RecommendationResult, ScoreBreakdown};
use crate::cache::{InputSignature, ResultCache};
use crate::catalog::{CatalogRepository, RecommendationCategory, StaticCatalog};
use crate::config::EngineConfig;
use crate::feedback::{FeedbackHistory, PreferenceProfile};
use crate::snapshot::{build_snapshot_with, SnapshotOptions, UserDataSnapshot};
use crate::types::{NutritionPreference, TimeSeriesRecord, WorkImpactSample};
use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Fewer records than this is treated as a cold start.
const MIN_PERSONALIZED_RECORDS: usize = 3;
const NEUTRAL_PREFERENCE: f64 = 50.0;

/// Whether `records` is too thin to personalize on.
pub fn needs_cold_start(records: &[TimeSeriesRecord]) -> bool {
    records.len() < MIN_PERSONALIZED_RECORDS
}

/// Inputs to one personalized recommendation call.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRequest<'a> {
    pub records: &'a [TimeSeriesRecord],
    pub work_impact: &'a WorkImpactSample,
    pub nutrition: Option<&'a NutritionPreference>,
    pub feedback: &'a FeedbackHistory,
    /// Earlier efficiency readings, oldest first.
    pub efficiency_history: &'a [f64],
}

impl<'a> RecommendationRequest<'a> {
    pub fn new(
        records: &'a [TimeSeriesRecord],
        work_impact: &'a WorkImpactSample,
        feedback: &'a FeedbackHistory,
    ) -> Self {
        Self {
            records,
            work_impact,
            nutrition: None,
            feedback,
            efficiency_history: &[],
        }
    }

    pub fn with_nutrition(mut self, nutrition: Option<&'a NutritionPreference>) -> Self {
        self.nutrition = nutrition;
        self
    }

    pub fn with_efficiency_history(mut self, history: &'a [f64]) -> Self {
        self.efficiency_history = history;
        self
    }
}

/// Stateless recommendation engine over a read-only catalog.
///
/// The engine holds no per-user state. The optional cache is shared and
/// injected by the caller.
pub struct RecommendationEngine {
    catalog: Arc<dyn CatalogRepository>,
    config: EngineConfig,
    config_fingerprint: u64,
    cache: Option<Arc<ResultCache>>,
    fixed_now: Option<DateTime<Utc>>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Arc::new(StaticCatalog::builtin()))
    }
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("catalog_version", &self.catalog.version())
            .field("catalog_entries", &self.catalog.entries().len())
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("fixed_now", &self.fixed_now)
            .finish()
    }
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        let config = EngineConfig::default();
        Self {
            catalog,
            config_fingerprint: fingerprint(&config),
            config,
            cache: None,
            fixed_now: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config.validated();
        self.config_fingerprint = fingerprint(&self.config);
        self
    }

    pub fn with_cache(mut self, cache: Arc<ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attach a private cache sized and timed by this engine's `cache` settings.
    pub fn with_configured_cache(self) -> Self {
        let cache = Arc::new(ResultCache::from_config(&self.config.cache));
        self.with_cache(cache)
    }

    pub fn cache(&self) -> Option<&ResultCache> {
        self.cache.as_deref()
    }

    /// Pin the engine's clock, making output reproducible.
    pub fn with_fixed_time(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    pub fn catalog(&self) -> &dyn CatalogRepository {
        self.catalog.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    /// Summarize the inputs using this engine's clock and settings.
    pub fn build_snapshot(
        &self,
        records: &[TimeSeriesRecord],
        work_impact: &WorkImpactSample,
        nutrition: Option<&NutritionPreference>,
        efficiency_history: &[f64],
    ) -> UserDataSnapshot {
        let options = SnapshotOptions {
            pain_trend_ordering: self.config.pain_trend_ordering,
            efficiency_history: efficiency_history.to_vec(),
            now: self.now(),
        };
        build_snapshot_with(records, work_impact, nutrition, &options)
    }

    /// Run the full pipeline for one request, consulting the cache if present.
    pub fn generate(&self, request: &RecommendationRequest<'_>) -> RecommendationResult {
        let now = self.now();
        let key = self.cache.as_ref().map(|_| {
            InputSignature::new(
                self.catalog.version(),
                self.config_fingerprint,
                now.date_naive(),
                request.records,
                request.work_impact,
                request.nutrition,
                request.efficiency_history,
                request.feedback,
            )
        });
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(hit) = cache.get(key) {
                return hit;
            }
        }

        let snapshot = self.build_snapshot(
            request.records,
            request.work_impact,
            request.nutrition,
            request.efficiency_history,
        );
        let result = self.recommend_for_snapshot(&snapshot, request.feedback);

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, result.clone());
        }
        result
    }

    /// Filter, score, diversify and explain against an existing snapshot.
    pub fn recommend_for_snapshot(
        &self,
        snapshot: &UserDataSnapshot,
        feedback: &FeedbackHistory,
    ) -> RecommendationResult {
        let profile = PreferenceProfile::from_history(feedback, self.catalog.as_ref());
        let candidates = filter_candidates(self.catalog.entries(), snapshot, profile.ignored());
        let eligible = candidates.len();

        let scorer = RecommendationScorer::new()
            .with_weights(self.config.weights.clone())
            .with_preferences(profile)
            .with_now(self.now());
        let scored: Vec<RecommendationItem> = candidates
            .into_iter()
            .map(|template| scorer.score(template, snapshot))
            .filter(|item| item.score >= self.config.min_score)
            .collect();
        let above_threshold = scored.len();

        let required = self.required_groups(snapshot);
        let mut selected = select_diverse(
            scored,
            &self.config.diversity,
            &required,
            self.config.max_results,
        );
        for item in &mut selected {
            item.reason = generate_reason(&item.template, snapshot, self.config.locale);
        }

        tracing::debug!(
            target: "cyclecare::engine",
            catalog = self.catalog.entries().len(),
            eligible,
            above_threshold,
            selected = selected.len(),
            "generated recommendations"
        );

        RecommendationResult::new(selected, build_insights(snapshot), self.now())
    }

    /// Category groups that must be represented given the current state.
    fn required_groups(&self, snapshot: &UserDataSnapshot) -> Vec<Vec<RecommendationCategory>> {
        let mut groups = Vec::new();
        if snapshot.current_pain() >= self.config.high_pain_threshold {
            groups.push(vec![
                RecommendationCategory::PainRelief,
                RecommendationCategory::Medical,
            ]);
        }
        if snapshot.current_efficiency() < self.config.low_efficiency_threshold {
            groups.push(vec![RecommendationCategory::WorkAdjustment]);
        }
        groups
    }

    /// Generic, high-priority starter items for users without usable history.
    ///
    /// Only unconditioned entries qualify, since there is nothing to test a
    /// condition against. Ignored items are never returned.
    pub fn cold_start(&self, feedback: &FeedbackHistory) -> Vec<RecommendationItem> {
        let reason = cold_start_reason(self.config.locale);
        let mut items: Vec<RecommendationItem> = self
            .catalog
            .entries()
            .iter()
            .filter(|t| t.priority >= self.config.cold_start_min_priority)
            .filter(|t| t.conditions.is_unconditioned())
            .filter(|t| !feedback.is_ignored(&t.id))
            .map(|template| {
                let priority = template.priority.clamp(0.0, 100.0);
                RecommendationItem {
                    template: template.clone(),
                    relevance: priority,
                    score: priority,
                    breakdown: ScoreBreakdown {
                        condition_match: 0.5,
                        priority,
                        preference: NEUTRAL_PREFERENCE,
                        recency: 1.0,
                    },
                    reason: reason.clone(),
                }
            })
            .collect();
        items.sort_by(by_rank);
        items.truncate(self.config.cold_start_limit);

        tracing::debug!(
            target: "cyclecare::engine",
            selected = items.len(),
            "generated cold-start recommendations"
        );
        items
    }
}

fn fingerprint(config: &EngineConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    serde_json::to_string(config)
        .unwrap_or_default()
        .hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NumericRange, RecommendationTemplate, RecommendationType};
    use crate::feedback::{FeedbackAction, FeedbackRecord};
    use crate::test_support::{date, fixed_now, period_history};
    use crate::types::RecordCategory;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::default().with_fixed_time(fixed_now())
    }

    #[test]
    fn test_needs_cold_start() {
        assert!(needs_cold_start(&[]));
        assert!(!needs_cold_start(&period_history(date(2024, 1, 1), 1, 28, 3, 4)));
    }

    #[test]
    fn test_cold_start_uses_unconditioned_high_priority_items() {
        let items = engine().cold_start(&FeedbackHistory::new());
        let ids: Vec<_> = items.iter().map(|i| i.id()).collect();
        assert_eq!(
            ids,
            vec![
                "heat-therapy-basics",
                "cycle-tracking-guide",
                "balanced-cycle-nutrition",
                "sleep-hygiene-routine",
                "gentle-stretching",
            ]
        );
        assert!(items.iter().all(|i| i.template.conditions.is_unconditioned()));
        assert!(items.iter().all(|i| !i.reason.is_empty()));
    }

    #[test]
    fn test_cold_start_skips_ignored() {
        let feedback = FeedbackHistory::from_records(vec![FeedbackRecord::new(
            "heat-therapy-basics",
            FeedbackAction::Dismissed,
            fixed_now(),
        )]);
        let items = engine().cold_start(&feedback);
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| i.id() != "heat-therapy-basics"));
        assert_eq!(items.last().map(|i| i.id()), Some("hydration-reminder"));
    }

    #[test]
    fn test_high_pain_low_efficiency_coverage() {
        let records = period_history(date(2024, 3, 1), 3, 28, 4, 6);
        let work = WorkImpactSample::new(8.0, 55.0);
        let feedback = FeedbackHistory::new();
        let result = engine().generate(&RecommendationRequest::new(&records, &work, &feedback));

        assert!(!result.is_empty());
        assert!(result.len() <= 10);
        assert!(result.recommendations.iter().any(|i| i.category().is_pain_focused()));
        assert!(result.contains_category(RecommendationCategory::WorkAdjustment));
        assert_eq!(result.summary.total_recommendations, result.len());
        assert!(result.recommendations.iter().all(|i| !i.reason.is_empty()));
    }

    #[test]
    fn test_empty_catalog_gives_well_formed_result() {
        let catalog = StaticCatalog::new("empty", Vec::new()).unwrap();
        let engine = RecommendationEngine::new(Arc::new(catalog)).with_fixed_time(fixed_now());
        let feedback = FeedbackHistory::new();
        let work = WorkImpactSample::new(9.0, 20.0);
        let result = engine.generate(&RecommendationRequest::new(&[], &work, &feedback));
        assert!(result.is_empty());
        assert_eq!(result.summary.total_recommendations, 0);
        assert!(!result.insights.cycle_health.is_empty());
        assert!(engine.cold_start(&feedback).is_empty());
    }

    #[test]
    fn test_custom_catalog_and_max_results() {
        let entries: Vec<RecommendationTemplate> = RecommendationCategory::ALL
            .iter()
            .enumerate()
            .map(|(n, category)| {
                RecommendationTemplate::new(
                    format!("item-{n}"),
                    RecommendationType::Tip,
                    *category,
                    60.0,
                )
                .pain(NumericRange::at_least(0.0))
            })
            .collect();
        let engine = RecommendationEngine::new(Arc::new(StaticCatalog::new("t", entries).unwrap()))
            .with_config(EngineConfig {
                max_results: 4,
                ..Default::default()
            })
            .with_fixed_time(fixed_now());
        let feedback = FeedbackHistory::new();
        let work = WorkImpactSample::new(2.0, 90.0);
        let result = engine.generate(&RecommendationRequest::new(&[], &work, &feedback));
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_cache_returns_stored_result() {
        let cache = Arc::new(ResultCache::new(std::time::Duration::from_secs(60), 4));
        let engine = engine().with_cache(Arc::clone(&cache));
        let records = period_history(date(2024, 3, 1), 3, 28, 4, 5);
        let work = WorkImpactSample::new(5.0, 70.0);
        let feedback = FeedbackHistory::new();
        let request = RecommendationRequest::new(&records, &work, &feedback);

        let first = engine.generate(&request);
        assert_eq!(cache.len(), 1);
        let second = engine.generate(&request);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cached_engine_matches_uncached_when_only_categories_differ() {
        let days = |category| -> Vec<TimeSeriesRecord> {
            (0..4)
                .map(|i| TimeSeriesRecord::new(date(2024, 6, 12 + i), category).with_pain(6))
                .collect()
        };
        let actual = days(RecordCategory::ActualPeriod);
        let predicted = days(RecordCategory::Predicted);
        let work = WorkImpactSample::new(6.0, 70.0);
        let feedback = FeedbackHistory::new();

        let cached = engine().with_configured_cache();
        let _ = cached.generate(&RecommendationRequest::new(&actual, &work, &feedback));
        let from_cache = cached.generate(&RecommendationRequest::new(&predicted, &work, &feedback));
        let fresh = engine().generate(&RecommendationRequest::new(&predicted, &work, &feedback));

        assert_eq!(from_cache, fresh);
        assert_eq!(cached.cache().map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_configured_cache_follows_cache_settings() {
        let engine = engine().with_config(EngineConfig {
            cache: crate::config::CacheConfig {
                ttl_ms: 2_000,
                capacity: 8,
            },
            ..Default::default()
        });
        assert!(engine.cache().is_none());
        let engine = engine.with_configured_cache();
        assert_eq!(
            engine.cache().map(|c| c.ttl()),
            Some(std::time::Duration::from_millis(2_000))
        );
    }

    #[test]
    fn test_oversized_max_results_is_capped() {
        let engine = engine().with_config(EngineConfig {
            max_results: 25,
            ..Default::default()
        });
        let feedback = FeedbackHistory::new();
        let work = WorkImpactSample::new(6.0, 50.0);
        let result = engine.generate(&RecommendationRequest::new(&[], &work, &feedback));
        assert!(result.len() <= crate::config::MAX_RESULTS_LIMIT);
        assert_eq!(result.summary.total_recommendations, result.len());
    }
}
