//! Candidate recommendation templates and the repository that serves them.
//!
//! The catalog is configuration data. Scoring code only sees it through
//! [`CatalogRepository`], so a different (or versioned) catalog can be swapped
//! in without touching the pipeline. A catalog is read-only once built.

mod builtin;

use crate::error::CatalogError;
use crate::types::CyclePhase;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Presentation-neutral kind of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Article,
    Tool,
    Scenario,
    Tip,
    Action,
}

impl RecommendationType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Tool => "tool",
            Self::Scenario => "scenario",
            Self::Tip => "tip",
            Self::Action => "action",
        }
    }
}

/// The ten fixed recommendation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
    PainRelief,
    Medical,
    WorkAdjustment,
    Nutrition,
    Exercise,
    Sleep,
    Emotional,
    Lifestyle,
    SelfCare,
    Education,
}

impl RecommendationCategory {
    pub const ALL: [RecommendationCategory; 10] = [
        Self::PainRelief,
        Self::Medical,
        Self::WorkAdjustment,
        Self::Nutrition,
        Self::Exercise,
        Self::Sleep,
        Self::Emotional,
        Self::Lifestyle,
        Self::SelfCare,
        Self::Education,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PainRelief => "pain-relief",
            Self::Medical => "medical",
            Self::WorkAdjustment => "work-adjustment",
            Self::Nutrition => "nutrition",
            Self::Exercise => "exercise",
            Self::Sleep => "sleep",
            Self::Emotional => "emotional",
            Self::Lifestyle => "lifestyle",
            Self::SelfCare => "self-care",
            Self::Education => "education",
        }
    }

    /// Categories that address pain directly.
    pub fn is_pain_focused(&self) -> bool {
        matches!(self, Self::PainRelief | Self::Medical)
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive numeric bounds; a missing bound is open in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    pub fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Distance from `value` to the nearest point inside the range (0 when inside).
    pub fn distance(&self, value: f64) -> f64 {
        match (self.min, self.max) {
            (Some(min), _) if value < min => min - value,
            (_, Some(max)) if value > max => value - max,
            _ => 0.0,
        }
    }

    fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Trigger conditions for a template. Every dimension is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_level: Option<NumericRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<NumericRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<CyclePhase>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,
}

impl RecommendationConditions {
    /// Number of dimensions that actually constrain eligibility.
    pub fn populated_dimensions(&self) -> usize {
        usize::from(self.pain_level.is_some())
            + usize::from(self.efficiency.is_some())
            + usize::from(!self.phases.is_empty())
            + usize::from(!self.symptoms.is_empty())
    }

    pub fn is_unconditioned(&self) -> bool {
        self.populated_dimensions() == 0
    }
}

/// A catalog entry. Display text is referenced by key and resolved elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTemplate {
    pub id: String,
    #[serde(rename = "type")]
    pub rec_type: RecommendationType,
    pub category: RecommendationCategory,
    pub title_key: String,
    pub description_key: String,
    /// Static priority (0-100).
    pub priority: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub conditions: RecommendationConditions,
}

impl RecommendationTemplate {
    /// Create an unconditioned template with keys derived from its id.
    pub fn new(
        id: impl Into<String>,
        rec_type: RecommendationType,
        category: RecommendationCategory,
        priority: f64,
    ) -> Self {
        let id = id.into();
        Self {
            title_key: format!("recommendations.{id}.title"),
            description_key: format!("recommendations.{id}.description"),
            id,
            rec_type,
            category,
            priority,
            link: None,
            metadata: BTreeMap::new(),
            conditions: RecommendationConditions::default(),
        }
    }

    pub fn pain(mut self, range: NumericRange) -> Self {
        self.conditions.pain_level = Some(range);
        self
    }

    pub fn efficiency(mut self, range: NumericRange) -> Self {
        self.conditions.efficiency = Some(range);
        self
    }

    pub fn phases(mut self, phases: &[CyclePhase]) -> Self {
        self.conditions.phases = phases.to_vec();
        self
    }

    pub fn symptoms(mut self, symptoms: &[&str]) -> Self {
        self.conditions.symptoms = symptoms.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Read-only source of recommendation templates.
pub trait CatalogRepository: Send + Sync {
    /// All templates, in catalog order.
    fn entries(&self) -> &[RecommendationTemplate];

    /// Identifier for the catalog revision, used in cache keys.
    fn version(&self) -> &str;

    /// Look up a template by id.
    fn get(&self, id: &str) -> Option<&RecommendationTemplate> {
        self.entries().iter().find(|t| t.id == id)
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticCatalog {
    version: String,
    entries: Vec<RecommendationTemplate>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range values.
    pub fn new(
        version: impl Into<String>,
        entries: Vec<RecommendationTemplate>,
    ) -> Result<Self, CatalogError> {
        validate_entries(&entries)?;
        Ok(Self {
            version: version.into(),
            entries,
        })
    }

    /// The catalog shipped with the engine.
    pub fn builtin() -> Self {
        Self {
            version: builtin::VERSION.to_string(),
            entries: builtin::entries(),
        }
    }

    /// Load a catalog document of the form `{"version": "...", "entries": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let parsed: StaticCatalog = serde_json::from_str(json)?;
        Self::new(parsed.version, parsed.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CatalogRepository for StaticCatalog {
    fn entries(&self) -> &[RecommendationTemplate] {
        &self.entries
    }

    fn version(&self) -> &str {
        &self.version
    }
}

fn validate_entries(entries: &[RecommendationTemplate]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: entry.id.clone(),
            });
        }
        if !(0.0..=100.0).contains(&entry.priority) {
            return Err(CatalogError::PriorityOutOfRange {
                id: entry.id.clone(),
                priority: entry.priority,
            });
        }
        let ranges = [
            ("pain", entry.conditions.pain_level),
            ("efficiency", entry.conditions.efficiency),
        ];
        for (dimension, range) in ranges {
            if range.is_some_and(|r| r.is_inverted()) {
                return Err(CatalogError::InvalidRange {
                    id: entry.id.clone(),
                    dimension,
                });
            }
        }
    }
    Ok(())
}
