//! Engine configuration.
//!
//! Every tunable threshold and weight lives here so callers can adjust them
//! from a settings file without touching scoring code. Defaults reproduce the
//! production behaviour.

use serde::{Deserialize, Serialize};

/// Hard ceiling on the number of items in one recommendation result.
pub const MAX_RESULTS_LIMIT: usize = 10;

/// How pain values are ordered before the trend is split into thirds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainTrendOrdering {
    /// Keep the values in calendar order, so the trend reflects change over time.
    #[default]
    Chronological,
    /// Sort the values by magnitude first. The "trend" then describes the
    /// spread of the values rather than change over time.
    ByValue,
}

impl PainTrendOrdering {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "chronological" | "date" => Some(Self::Chronological),
            "by_value" | "value" | "by-value" => Some(Self::ByValue),
            _ => None,
        }
    }
}

/// Language used for generated rationale text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_ascii_lowercase();
        if lower.starts_with("en") {
            Some(Self::En)
        } else if lower.starts_with("zh") {
            Some(Self::Zh)
        } else {
            None
        }
    }
}

/// Weights for the relevance and final-score formulas.
///
/// The four relevance weights sum to 0.9, so relevance tops out at 90.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub condition_match: f64,
    pub priority: f64,
    pub preference: f64,
    pub recency: f64,
    /// Share of the final score taken from relevance.
    pub relevance_share: f64,
    /// Share of the final score taken from preference.
    pub preference_share: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            condition_match: 0.4,
            priority: 0.2,
            preference: 0.2,
            recency: 0.1,
            relevance_share: 0.7,
            preference_share: 0.3,
        }
    }
}

impl ScoringWeights {
    /// Sum of the relevance component weights.
    pub fn relevance_total(&self) -> f64 {
        self.condition_match + self.priority + self.preference + self.recency
    }
}

/// Limits applied by the diversity selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    /// Candidates whose diversity against the accepted set falls below this are skipped.
    pub min_diversity: f64,
    /// At most this many accepted items may share a category.
    pub max_per_category: usize,
    /// At most this many accepted items may share a type.
    pub max_per_type: usize,
    /// Number of distinct categories seeded before the greedy pass.
    pub min_categories: usize,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            min_diversity: 0.3,
            max_per_category: 3,
            max_per_type: 4,
            min_categories: 3,
        }
    }
}

/// Settings for the optional result cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_ms: u64,
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 300_000,
            capacity: 32,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on returned recommendations, at most [`MAX_RESULTS_LIMIT`].
    pub max_results: usize,
    /// Number of items returned by the cold-start path.
    pub cold_start_limit: usize,
    /// Minimum static priority for cold-start items.
    pub cold_start_min_priority: f64,
    /// Candidates scoring below this never reach the diversity selector.
    pub min_score: f64,
    pub weights: ScoringWeights,
    pub diversity: DiversityConfig,
    pub pain_trend_ordering: PainTrendOrdering,
    pub locale: Locale,
    /// Current pain at or above this requires pain-relief or medical coverage.
    pub high_pain_threshold: f64,
    /// Current efficiency below this requires work-adjustment coverage.
    pub low_efficiency_threshold: f64,
    /// Size of the popular/unpopular lists in feedback analysis.
    pub feedback_top_n: usize,
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS_LIMIT,
            cold_start_limit: 5,
            cold_start_min_priority: 70.0,
            min_score: 20.0,
            weights: ScoringWeights::default(),
            diversity: DiversityConfig::default(),
            pain_trend_ordering: PainTrendOrdering::default(),
            locale: Locale::default(),
            high_pain_threshold: 7.0,
            low_efficiency_threshold: 60.0,
            feedback_top_n: 5,
            cache: CacheConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Replace values that would make the pipeline degenerate with their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.max_results == 0 {
            tracing::warn!(target: "cyclecare::config", "max_results must be positive; using default");
            self.max_results = defaults.max_results;
        } else if self.max_results > MAX_RESULTS_LIMIT {
            tracing::warn!(
                target: "cyclecare::config",
                value = self.max_results,
                limit = MAX_RESULTS_LIMIT,
                "max_results above limit; clamping"
            );
            self.max_results = MAX_RESULTS_LIMIT;
        }
        if self.cold_start_limit == 0 {
            tracing::warn!(target: "cyclecare::config", "cold_start_limit must be positive; using default");
            self.cold_start_limit = defaults.cold_start_limit;
        }
        if !(0.0..=100.0).contains(&self.cold_start_min_priority) {
            tracing::warn!(
                target: "cyclecare::config",
                value = self.cold_start_min_priority,
                "cold_start_min_priority outside 0-100; using default"
            );
            self.cold_start_min_priority = defaults.cold_start_min_priority;
        }
        if !(0.0..=100.0).contains(&self.min_score) {
            tracing::warn!(target: "cyclecare::config", value = self.min_score, "min_score outside 0-100; using default");
            self.min_score = defaults.min_score;
        }
        let w = &self.weights;
        let parts = [
            w.condition_match,
            w.priority,
            w.preference,
            w.recency,
            w.relevance_share,
            w.preference_share,
        ];
        if parts.iter().any(|v| !v.is_finite() || *v < 0.0)
            || w.relevance_total() > 1.0 + f64::EPSILON
            || w.relevance_share + w.preference_share > 1.0 + f64::EPSILON
        {
            tracing::warn!(target: "cyclecare::config", "scoring weights out of range; using defaults");
            self.weights = defaults.weights;
        }
        if self.diversity.max_per_category == 0 || self.diversity.max_per_type == 0 {
            tracing::warn!(target: "cyclecare::config", "diversity caps must be positive; using defaults");
            self.diversity = defaults.diversity;
        }
        if self.cache.capacity == 0 {
            self.cache.capacity = defaults.cache.capacity;
        }
        self
    }
}
