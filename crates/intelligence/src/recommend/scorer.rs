//! Multi-factor recommendation scoring.

use super::{RecommendationItem, ScoreBreakdown};
use crate::catalog::{RecommendationConditions, RecommendationTemplate};
use crate::config::ScoringWeights;
use crate::feedback::PreferenceProfile;
use crate::snapshot::UserDataSnapshot;
use crate::stats::{mean, round1};
use chrono::{DateTime, Utc};

/// Pain distance (in points) at which a range match falls to zero.
const PAIN_DISTANCE_SCALE: f64 = 5.0;
/// Efficiency distance (in percent) at which a range match falls to zero.
const EFFICIENCY_DISTANCE_SCALE: f64 = 20.0;
/// Match contributed by symptom requirements until symptom data exists.
const SYMPTOM_PLACEHOLDER_MATCH: f64 = 0.5;
/// Match assigned to entries without conditions.
const UNCONDITIONED_MATCH: f64 = 0.5;

/// Trait for computing recommendation scores.
pub trait Scorer {
    /// Score a template against a snapshot. The returned item has no reason yet.
    fn score(&self, template: &RecommendationTemplate, snapshot: &UserDataSnapshot)
        -> RecommendationItem;
}

/// Scorer combining condition fit, priority, preference and recency.
#[derive(Debug, Default)]
pub struct RecommendationScorer {
    weights: ScoringWeights,
    preferences: PreferenceProfile,
    /// Instant used for recency; the snapshot's own timestamp when unset.
    now: Option<DateTime<Utc>>,
}

impl RecommendationScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_preferences(mut self, preferences: PreferenceProfile) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn preferences(&self) -> &PreferenceProfile {
        &self.preferences
    }
}

impl Scorer for RecommendationScorer {
    fn score(
        &self,
        template: &RecommendationTemplate,
        snapshot: &UserDataSnapshot,
    ) -> RecommendationItem {
        let now = self.now.unwrap_or(snapshot.generated_at);
        let breakdown = ScoreBreakdown {
            condition_match: condition_match(&template.conditions, snapshot),
            priority: template.priority.clamp(0.0, 100.0),
            preference: self.preferences.preference_for(template),
            recency: recency_factor(snapshot.age_days(now)),
        };

        let relevance = breakdown.relevance(&self.weights).clamp(0.0, 100.0);
        let score = (relevance * self.weights.relevance_share
            + breakdown.preference * self.weights.preference_share)
            .clamp(0.0, 100.0);

        RecommendationItem {
            template: template.clone(),
            relevance: round1(relevance),
            score: round1(score),
            breakdown,
            reason: String::new(),
        }
    }
}

/// How well `snapshot` fits `conditions`, from 0.0 to 1.0.
///
/// Each populated dimension scores 1.0 inside its range and decays linearly
/// with distance outside it; the dimensions are averaged.
pub fn condition_match(conditions: &RecommendationConditions, snapshot: &UserDataSnapshot) -> f64 {
    let mut parts = Vec::with_capacity(4);
    if let Some(range) = conditions.pain_level {
        parts.push(range_match(
            range.distance(snapshot.current_pain()),
            PAIN_DISTANCE_SCALE,
        ));
    }
    if let Some(range) = conditions.efficiency {
        parts.push(range_match(
            range.distance(snapshot.current_efficiency()),
            EFFICIENCY_DISTANCE_SCALE,
        ));
    }
    if !conditions.phases.is_empty() {
        let matched = snapshot
            .current_phase()
            .is_some_and(|phase| conditions.phases.contains(&phase));
        parts.push(if matched { 1.0 } else { 0.0 });
    }
    if !conditions.symptoms.is_empty() {
        parts.push(SYMPTOM_PLACEHOLDER_MATCH);
    }
    mean(&parts).unwrap_or(UNCONDITIONED_MATCH)
}

fn range_match(distance: f64, scale: f64) -> f64 {
    (1.0 - distance / scale).max(0.0)
}

/// Freshness weight for a snapshot of the given age.
pub fn recency_factor(age_days: i64) -> f64 {
    match age_days {
        i64::MIN..=1 => 1.0,
        2..=3 => 0.8,
        4..=7 => 0.6,
        8..=14 => 0.4,
        _ => 0.2,
    }
}
