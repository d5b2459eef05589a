//! Per-item preference adjustments derived from feedback.

use super::{FeedbackAction, FeedbackHistory};
use crate::catalog::{CatalogRepository, RecommendationCategory, RecommendationTemplate};
use std::collections::{HashMap, HashSet};

const BASE_PREFERENCE: f64 = 50.0;
const IGNORED_PENALTY: f64 = 30.0;
const SAVED_BONUS: f64 = 20.0;
const RATING_STEP: f64 = 10.0;
const NEUTRAL_RATING: f64 = 3.0;
const CATEGORY_CLICK_BONUS: f64 = 5.0;
const CATEGORY_CLICK_CAP: f64 = 20.0;

/// Preference signals for one user, resolved against a catalog.
#[derive(Debug, Clone, Default)]
pub struct PreferenceProfile {
    ignored: HashSet<String>,
    saved: HashSet<String>,
    ratings: HashMap<String, f64>,
    category_clicks: HashMap<RecommendationCategory, usize>,
}

impl PreferenceProfile {
    /// Resolve a feedback log against `catalog`. Clicks on ids the catalog
    /// does not know are ignored for category affinity.
    pub fn from_history(history: &FeedbackHistory, catalog: &dyn CatalogRepository) -> Self {
        let mut category_clicks = HashMap::new();
        for record in history.records() {
            if record.action != FeedbackAction::Clicked {
                continue;
            }
            if let Some(template) = catalog.get(&record.recommendation_id) {
                *category_clicks.entry(template.category).or_insert(0) += 1;
            }
        }
        Self {
            ignored: history.ignored_ids().clone(),
            saved: history.saved_ids().clone(),
            ratings: history.average_ratings(),
            category_clicks,
        }
    }

    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignored.contains(id)
    }

    pub fn ignored(&self) -> &HashSet<String> {
        &self.ignored
    }

    pub fn category_clicks(&self, category: RecommendationCategory) -> usize {
        self.category_clicks.get(&category).copied().unwrap_or(0)
    }

    /// Preference score (0-100) for a template, starting from a neutral 50.
    pub fn preference_for(&self, template: &RecommendationTemplate) -> f64 {
        let mut score = BASE_PREFERENCE;
        if self.ignored.contains(&template.id) {
            score -= IGNORED_PENALTY;
        }
        if self.saved.contains(&template.id) {
            score += SAVED_BONUS;
        }
        if let Some(avg) = self.ratings.get(&template.id) {
            score += (avg - NEUTRAL_RATING) * RATING_STEP;
        }
        let clicks = self.category_clicks(template.category) as f64;
        score += (CATEGORY_CLICK_BONUS * clicks).min(CATEGORY_CLICK_CAP);
        score.clamp(0.0, 100.0)
    }
}
