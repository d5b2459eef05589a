//! Short-lived memoization of recommendation results.
//!
//! The cache is an explicit object handed to the engine, never process-global
//! state. It is a performance hint only: entries expire after a TTL, the
//! oldest entry is evicted once capacity is reached, and concurrent inserts
//! for the same key resolve last-writer-wins.
//!
//! # Concurrency Model
//!
//! A single `parking_lot::Mutex` guards the whole map. Lookups and inserts are
//! hash operations plus a clone, so the lock is held only briefly.

use crate::config::CacheConfig;
use crate::feedback::FeedbackHistory;
use crate::recommend::RecommendationResult;
use crate::types::{NutritionPreference, TimeSeriesRecord, WorkImpactSample};
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

/// Fingerprint of every input that can change one recommendation call.
///
/// Records, efficiency history, feedback and nutrition are folded into
/// digests over their full contents, so two calls share a key only when the
/// pipeline would see the same data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSignature {
    catalog_version: String,
    config_fingerprint: u64,
    day: NaiveDate,
    records_digest: u64,
    current_pain_tenths: i64,
    current_efficiency_tenths: i64,
    efficiency_digest: u64,
    feedback_digest: u64,
    nutrition_digest: u64,
}

impl InputSignature {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog_version: &str,
        config_fingerprint: u64,
        day: NaiveDate,
        records: &[TimeSeriesRecord],
        work_impact: &WorkImpactSample,
        nutrition: Option<&NutritionPreference>,
        efficiency_history: &[f64],
        feedback: &FeedbackHistory,
    ) -> Self {
        Self {
            catalog_version: catalog_version.to_string(),
            config_fingerprint,
            day,
            records_digest: digest(|h| {
                for r in records {
                    (r.date, r.category, r.pain_level, r.flow, r.note.is_some()).hash(h);
                }
            }),
            current_pain_tenths: (work_impact.pain_level * 10.0).round() as i64,
            current_efficiency_tenths: (work_impact.efficiency * 10.0).round() as i64,
            efficiency_digest: digest(|h| {
                for value in efficiency_history {
                    value.to_bits().hash(h);
                }
            }),
            feedback_digest: digest(|h| {
                for f in feedback.records() {
                    (&f.recommendation_id, f.action, f.rating, f.timestamp).hash(h);
                }
            }),
            nutrition_digest: digest(|h| {
                nutrition
                    .map(|n| (n.selected_phase, n.constitution.as_deref()))
                    .hash(h)
            }),
        }
    }
}

fn digest(feed: impl FnOnce(&mut DefaultHasher)) -> u64 {
    let mut hasher = DefaultHasher::new();
    feed(&mut hasher);
    hasher.finish()
}

struct CacheEntry {
    result: RecommendationResult,
    inserted: Instant,
}

/// Bounded TTL cache of recommendation results.
pub struct ResultCache {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<InputSignature, CacheEntry>>,
}

impl ResultCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_millis(config.ttl_ms), config.capacity)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &InputSignature) -> Option<RecommendationResult> {
        self.get_at(key, Instant::now())
    }

    /// Look up `key` as of `now`, dropping the entry if it has expired.
    pub fn get_at(&self, key: &InputSignature, now: Instant) -> Option<RecommendationResult> {
        let mut entries = self.entries.lock();
        let fresh = entries
            .get(key)
            .map(|entry| now.saturating_duration_since(entry.inserted) <= self.ttl)?;
        if fresh {
            tracing::debug!(target: "cyclecare::cache", "result cache hit");
            entries.get(key).map(|entry| entry.result.clone())
        } else {
            tracing::debug!(target: "cyclecare::cache", "result cache entry expired");
            entries.remove(key);
            None
        }
    }

    pub fn insert(&self, key: InputSignature, result: RecommendationResult) {
        self.insert_at(key, result, Instant::now());
    }

    /// Store `result`, replacing any entry for `key` and evicting the oldest
    /// entry when full.
    pub fn insert_at(&self, key: InputSignature, result: RecommendationResult, now: Instant) {
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| now.saturating_duration_since(entry.inserted) <= self.ttl);
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            CacheEntry {
                result,
                inserted: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("ttl", &self.ttl)
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
