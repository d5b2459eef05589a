//! Common types shared across intelligence modules.
//!
//! These are the inputs handed to the engine by the tracking collaborators.
//! The engine only reads them; ownership of persistence stays with the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of calendar entry a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordCategory {
    /// A day the user logged as an actual period day.
    ActualPeriod,
    /// A predicted period day.
    Predicted,
    /// A (predicted or observed) ovulation day.
    Ovulation,
}

impl RecordCategory {
    /// Parse the wire label used by the tracking collaborator.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "actual-period" | "period" | "actual" => Some(Self::ActualPeriod),
            "predicted" | "predicted-period" => Some(Self::Predicted),
            "ovulation" => Some(Self::Ovulation),
            _ => None,
        }
    }
}

/// Self-reported flow intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowIntensity {
    Light,
    Medium,
    Heavy,
}

impl FlowIntensity {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "medium" => Some(Self::Medium),
            "heavy" => Some(Self::Heavy),
            _ => None,
        }
    }
}

/// A single validated calendar record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRecord {
    /// Calendar day of the entry.
    pub date: NaiveDate,
    /// What kind of day this is.
    pub category: RecordCategory,
    /// Pain level on a 0-10 scale, if logged.
    #[serde(default)]
    pub pain_level: Option<u8>,
    /// Flow intensity, if logged.
    #[serde(default)]
    pub flow: Option<FlowIntensity>,
    /// Free-form note, if logged.
    #[serde(default)]
    pub note: Option<String>,
}

impl TimeSeriesRecord {
    /// Create a record with only the required fields populated.
    pub fn new(date: NaiveDate, category: RecordCategory) -> Self {
        Self {
            date,
            category,
            pain_level: None,
            flow: None,
            note: None,
        }
    }

    pub fn with_pain(mut self, pain: u8) -> Self {
        self.pain_level = Some(pain.min(10));
        self
    }

    pub fn with_flow(mut self, flow: FlowIntensity) -> Self {
        self.flow = Some(flow);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The logged pain level, if it lies on the 0-10 scale.
    pub fn valid_pain(&self) -> Option<u8> {
        self.pain_level.filter(|pain| *pain <= 10)
    }

    /// Whether this is an actual (not predicted) period day.
    pub fn is_actual_period(&self) -> bool {
        self.category == RecordCategory::ActualPeriod
    }
}

/// The user's current work-impact self report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkImpactSample {
    /// Current pain level (0-10).
    pub pain_level: f64,
    /// Current efficiency percent (0-100).
    pub efficiency: f64,
    /// Template the user picked on the self-report surface, if any.
    #[serde(default)]
    pub selected_template: Option<String>,
}

impl WorkImpactSample {
    pub fn new(pain_level: f64, efficiency: f64) -> Self {
        Self {
            pain_level: pain_level.clamp(0.0, 10.0),
            efficiency: efficiency.clamp(0.0, 100.0),
            selected_template: None,
        }
    }
}

impl Default for WorkImpactSample {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Cycle phase, either current or required by a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    /// Map a zero-based day-in-cycle onto a phase.
    pub fn from_cycle_day(day: i64) -> Self {
        match day {
            0..=5 => Self::Menstrual,
            6..=13 => Self::Follicular,
            14..=16 => Self::Ovulation,
            _ => Self::Luteal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Menstrual => "menstrual",
            Self::Follicular => "follicular",
            Self::Ovulation => "ovulation",
            Self::Luteal => "luteal",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Nutrition preferences captured by the nutrition surface.
///
/// Carried through to callers untouched; nothing in scoring reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionPreference {
    #[serde(default)]
    pub selected_phase: Option<CyclePhase>,
    #[serde(default)]
    pub constitution: Option<String>,
}
