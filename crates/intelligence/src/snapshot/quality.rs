//! Completeness and consistency scoring for tracked history.

use crate::stats::{clamp_percent, mean, round1, std_dev};
use crate::types::TimeSeriesRecord;
use serde::{Deserialize, Serialize};

/// Fields counted towards record completeness: date, category, pain, flow, note.
const TRACKED_FIELDS: usize = 5;
/// Record count at which work-impact accuracy saturates.
const FULL_ACCURACY_RECORDS: f64 = 30.0;
/// Consistency score at or above which a cycle counts as regular.
pub const REGULAR_CYCLE_THRESHOLD: f64 = 70.0;

/// Overall data-quality tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQualityTier {
    Excellent,
    Good,
    Fair,
    #[default]
    Poor,
}

impl DataQualityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 30.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// Quality metrics for one batch of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQualityMetrics {
    /// Total records considered.
    pub total_records: usize,
    /// Records marked as actual period days.
    pub period_records: usize,
    /// Records with a pain level.
    pub pain_records: usize,
    /// Cycle-length consistency (0-100).
    pub consistency_score: f64,
    /// Share of tracked fields that are filled (0-100).
    pub completeness_score: f64,
    /// How close the history is to a full month of entries (0-100).
    pub work_impact_accuracy: f64,
    /// Mean of completeness and accuracy (0-100).
    pub overall_completeness: f64,
    /// Tier derived from `overall_completeness`.
    pub tier: DataQualityTier,
}

/// Consistency of observed cycle lengths.
///
/// `100 - clamp(cv * 100, 0, 100)` where `cv` is the coefficient of variation.
/// Fewer than two lengths is not enough evidence and scores 0.
pub fn consistency_score(cycle_lengths: &[f64]) -> f64 {
    if cycle_lengths.len() < 2 {
        return 0.0;
    }
    match (mean(cycle_lengths), std_dev(cycle_lengths)) {
        (Some(avg), Some(sd)) if avg > 0.0 => round1(100.0 - clamp_percent(sd / avg * 100.0)),
        _ => 0.0,
    }
}

/// Share of tracked fields populated across all records.
pub fn completeness_score(records: &[TimeSeriesRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    // date and category are always present on a validated record
    let filled: usize = records
        .iter()
        .map(|r| {
            2 + usize::from(r.valid_pain().is_some())
                + usize::from(r.flow.is_some())
                + usize::from(r.note.is_some())
        })
        .sum();
    round1(filled as f64 / (records.len() * TRACKED_FIELDS) as f64 * 100.0)
}

/// Assess a batch of records given the cycle lengths already derived from them.
pub fn assess_quality(records: &[TimeSeriesRecord], cycle_lengths: &[f64]) -> DataQualityMetrics {
    let completeness = completeness_score(records);
    let accuracy = round1((records.len() as f64 / FULL_ACCURACY_RECORDS * 100.0).min(100.0));
    let overall = round1((completeness + accuracy) / 2.0);

    DataQualityMetrics {
        total_records: records.len(),
        period_records: records.iter().filter(|r| r.is_actual_period()).count(),
        pain_records: records.iter().filter(|r| r.valid_pain().is_some()).count(),
        consistency_score: consistency_score(cycle_lengths),
        completeness_score: completeness,
        work_impact_accuracy: accuracy,
        overall_completeness: overall,
        tier: DataQualityTier::from_score(overall),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FlowIntensity, RecordCategory};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_empty_records_are_poor() {
        let metrics = assess_quality(&[], &[]);
        assert_eq!(metrics.total_records, 0);
        assert_eq!(metrics.completeness_score, 0.0);
        assert_eq!(metrics.consistency_score, 0.0);
        assert_eq!(metrics.tier, DataQualityTier::Poor);
    }

    #[test]
    fn test_consistency_of_identical_cycles_is_full() {
        assert_eq!(consistency_score(&[28.0, 28.0, 28.0]), 100.0);
        assert_eq!(consistency_score(&[28.0]), 0.0);
        let varied = consistency_score(&[20.0, 40.0]);
        // sd 10 / mean 30 => 33.3% variation
        assert!((varied - 66.7).abs() < 0.01);
    }

    #[test]
    fn test_completeness_counts_optional_fields() {
        let full = TimeSeriesRecord::new(day(1), RecordCategory::ActualPeriod)
            .with_pain(3)
            .with_flow(FlowIntensity::Light)
            .with_note("ok");
        let bare = TimeSeriesRecord::new(day(2), RecordCategory::ActualPeriod);
        assert_eq!(completeness_score(std::slice::from_ref(&full)), 100.0);
        assert_eq!(completeness_score(&[bare.clone()]), 40.0);
        assert_eq!(completeness_score(&[full, bare]), 70.0);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(DataQualityTier::from_score(80.0), DataQualityTier::Excellent);
        assert_eq!(DataQualityTier::from_score(79.9), DataQualityTier::Good);
        assert_eq!(DataQualityTier::from_score(60.0), DataQualityTier::Good);
        assert_eq!(DataQualityTier::from_score(30.0), DataQualityTier::Fair);
        assert_eq!(DataQualityTier::from_score(29.9), DataQualityTier::Poor);
    }

    #[test]
    fn test_accuracy_saturates() {
        let records: Vec<_> = (1..=31)
            .map(|d| TimeSeriesRecord::new(day(d), RecordCategory::Predicted))
            .collect();
        let metrics = assess_quality(&records, &[]);
        assert_eq!(metrics.work_impact_accuracy, 100.0);
        assert_eq!(metrics.completeness_score, 40.0);
        assert_eq!(metrics.overall_completeness, 70.0);
        assert_eq!(metrics.tier, DataQualityTier::Good);
    }
}
