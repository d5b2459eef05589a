//! User interaction feedback on past recommendations.

mod analytics;
mod preference;

pub use analytics::{analyze_feedback_with, FeedbackAnalysis, ItemFrequency};
pub use preference::PreferenceProfile;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// What the user did with a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Clicked,
    Saved,
    Dismissed,
    Rated,
}

/// A single interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub recommendation_id: String,
    pub action: FeedbackAction,
    /// Rating from 1 to 5, only meaningful for [`FeedbackAction::Rated`].
    #[serde(default)]
    pub rating: Option<u8>,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn new(
        recommendation_id: impl Into<String>,
        action: FeedbackAction,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            recommendation_id: recommendation_id.into(),
            action,
            rating: None,
            timestamp,
        }
    }

    pub fn rated(
        recommendation_id: impl Into<String>,
        rating: u8,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            rating: Some(rating),
            ..Self::new(recommendation_id, FeedbackAction::Rated, timestamp)
        }
    }

    /// The rating, if this is a rating action with a value in 1..=5.
    pub fn valid_rating(&self) -> Option<u8> {
        match (self.action, self.rating) {
            (FeedbackAction::Rated, Some(r)) if (1..=5).contains(&r) => Some(r),
            _ => None,
        }
    }
}

/// Append-only feedback log with lookup indexes derived from it.
///
/// The indexes are rebuilt from the log on deserialization and updated on
/// every append, so they always agree with the log. Only the log itself is
/// serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FeedbackRecord>", into = "Vec<FeedbackRecord>")]
pub struct FeedbackHistory {
    records: Vec<FeedbackRecord>,
    ignored: HashSet<String>,
    saved: HashSet<String>,
    /// id -> (sum of ratings, number of ratings)
    ratings: HashMap<String, (u32, u32)>,
}

impl FeedbackHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FeedbackRecord>) -> Self {
        let mut history = Self::default();
        for record in records {
            history.record(record);
        }
        history
    }

    /// Append an interaction.
    pub fn record(&mut self, record: FeedbackRecord) {
        self.index(&record);
        self.records.push(record);
    }

    fn index(&mut self, record: &FeedbackRecord) {
        let id = &record.recommendation_id;
        match record.action {
            FeedbackAction::Dismissed => {
                self.ignored.insert(id.clone());
            }
            FeedbackAction::Saved => {
                self.saved.insert(id.clone());
            }
            FeedbackAction::Rated => {
                if let Some(rating) = record.valid_rating() {
                    let entry = self.ratings.entry(id.clone()).or_insert((0, 0));
                    entry.0 += u32::from(rating);
                    entry.1 += 1;
                }
            }
            FeedbackAction::Clicked => {}
        }
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignored.contains(id)
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.contains(id)
    }

    pub fn ignored_ids(&self) -> &HashSet<String> {
        &self.ignored
    }

    pub fn saved_ids(&self) -> &HashSet<String> {
        &self.saved
    }

    /// Mean rating given to `id`, if it was ever rated.
    pub fn average_rating(&self, id: &str) -> Option<f64> {
        self.ratings
            .get(id)
            .filter(|(_, count)| *count > 0)
            .map(|(sum, count)| f64::from(*sum) / f64::from(*count))
    }

    /// All ids with at least one valid rating, mapped to their mean rating.
    pub fn average_ratings(&self) -> HashMap<String, f64> {
        self.ratings
            .keys()
            .filter_map(|id| self.average_rating(id).map(|avg| (id.clone(), avg)))
            .collect()
    }
}

impl From<Vec<FeedbackRecord>> for FeedbackHistory {
    fn from(records: Vec<FeedbackRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<FeedbackHistory> for Vec<FeedbackRecord> {
    fn from(history: FeedbackHistory) -> Self {
        history.records
    }
}
