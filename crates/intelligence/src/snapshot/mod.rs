//! Per-call statistical summary of a user's tracked history.
//!
//! A [`UserDataSnapshot`] is derived fresh from the records and the current
//! work-impact report on every call. It is never persisted or merged with a
//! previous snapshot. Empty or degenerate input resolves to documented defaults
//! rather than an error.

pub mod anomaly;
pub mod quality;
mod records;

pub use anomaly::{detect_anomaly, Anomaly, AnomalyMetric, AnomalySeverity};
pub use quality::{
    assess_quality, completeness_score, consistency_score, DataQualityMetrics, DataQualityTier,
    REGULAR_CYCLE_THRESHOLD,
};
pub use records::{parse_records, RawRecord};

use crate::config::PainTrendOrdering;
use crate::stats::{mean, round1, std_dev, thirds_delta};
use crate::types::{CyclePhase, NutritionPreference, TimeSeriesRecord, WorkImpactSample};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CYCLE_LENGTH: f64 = 28.0;
pub const DEFAULT_PERIOD_LENGTH: f64 = 5.0;
/// Start-to-start gaps must fall strictly inside (0, 60) days.
const MAX_CYCLE_GAP: i64 = 60;
/// Period runs must fall strictly inside (0, 15) days.
const MAX_PERIOD_RUN: i64 = 15;
const PAIN_TREND_THRESHOLD: f64 = 1.5;
const PAIN_IRREGULAR_STD_DEV: f64 = 2.0;
const EFFICIENCY_TREND_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PainTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
    Irregular,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyTrend {
    Improving,
    Declining,
    #[default]
    Stable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleRegularity {
    Regular,
    #[default]
    Irregular,
}

/// Cycle and pain statistics from the calendar history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub average_cycle_length: f64,
    pub average_period_length: f64,
    /// Mean of logged pain values, 0 when none were logged.
    pub average_pain_level: f64,
    pub pain_trend: PainTrend,
    pub regularity: CycleRegularity,
    pub current_phase: Option<CyclePhase>,
    /// Usable start-to-start gaps, in days.
    pub cycle_lengths: Vec<f64>,
}

impl Default for PeriodSummary {
    fn default() -> Self {
        Self {
            average_cycle_length: DEFAULT_CYCLE_LENGTH,
            average_period_length: DEFAULT_PERIOD_LENGTH,
            average_pain_level: 0.0,
            pain_trend: PainTrend::Stable,
            regularity: CycleRegularity::Irregular,
            current_phase: None,
            cycle_lengths: Vec::new(),
        }
    }
}

/// Current and average work-impact figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkImpactSummary {
    pub current_pain: f64,
    pub current_efficiency: f64,
    pub average_pain: f64,
    pub average_efficiency: f64,
    pub efficiency_trend: EfficiencyTrend,
}

/// Summarized view of one user's data at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataSnapshot {
    pub period: PeriodSummary,
    pub work_impact: WorkImpactSummary,
    pub data_quality: DataQualityMetrics,
    /// Current values that look extreme against history.
    pub anomalies: Vec<Anomaly>,
    /// Passed through untouched for callers that want it.
    pub nutrition: Option<NutritionPreference>,
    pub generated_at: DateTime<Utc>,
}

impl UserDataSnapshot {
    pub fn current_pain(&self) -> f64 {
        self.work_impact.current_pain
    }

    pub fn current_efficiency(&self) -> f64 {
        self.work_impact.current_efficiency
    }

    pub fn current_phase(&self) -> Option<CyclePhase> {
        self.period.current_phase
    }

    /// Whole days between snapshot creation and `now`, never negative.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.generated_at).num_days().max(0)
    }
}

/// Knobs for snapshot construction beyond the raw inputs.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub pain_trend_ordering: PainTrendOrdering,
    /// Earlier efficiency readings, oldest first, excluding the current sample.
    pub efficiency_history: Vec<f64>,
    pub now: DateTime<Utc>,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            pain_trend_ordering: PainTrendOrdering::default(),
            efficiency_history: Vec::new(),
            now: Utc::now(),
        }
    }
}

/// Build a snapshot using default options and the current time.
pub fn build_snapshot(
    records: &[TimeSeriesRecord],
    work_impact: &WorkImpactSample,
    nutrition: Option<&NutritionPreference>,
) -> UserDataSnapshot {
    build_snapshot_with(records, work_impact, nutrition, &SnapshotOptions::default())
}

/// Build a snapshot with explicit options.
pub fn build_snapshot_with(
    records: &[TimeSeriesRecord],
    work_impact: &WorkImpactSample,
    nutrition: Option<&NutritionPreference>,
    options: &SnapshotOptions,
) -> UserDataSnapshot {
    let mut sorted: Vec<&TimeSeriesRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let runs = period_runs(&sorted);
    let cycle_lengths = cycle_gaps(&runs);
    let data_quality = assess_quality(records, &cycle_lengths);

    let average_cycle_length = if cycle_lengths.len() >= 2 {
        mean(&cycle_lengths).map(round1).unwrap_or(DEFAULT_CYCLE_LENGTH)
    } else {
        DEFAULT_CYCLE_LENGTH
    };

    let period_lengths: Vec<f64> = runs
        .iter()
        .map(|(start, end)| (*end - *start).num_days() + 1)
        .filter(|len| *len > 0 && *len < MAX_PERIOD_RUN)
        .map(|len| len as f64)
        .collect();
    let average_period_length = mean(&period_lengths)
        .map(round1)
        .unwrap_or(DEFAULT_PERIOD_LENGTH);

    let pain_values: Vec<f64> = sorted
        .iter()
        .filter_map(|r| {
            let pain = r.valid_pain();
            if pain.is_none() && r.pain_level.is_some() {
                tracing::warn!(
                    target: "cyclecare::snapshot",
                    date = %r.date,
                    value = r.pain_level,
                    "ignoring pain level outside 0-10"
                );
            }
            pain.map(f64::from)
        })
        .collect();
    let average_pain_level = mean(&pain_values).map(round1).unwrap_or(0.0);

    let today = options.now.date_naive();
    let current_phase = runs
        .last()
        .and_then(|(start, _)| phase_on(*start, today, average_cycle_length));

    let regularity = if data_quality.consistency_score >= REGULAR_CYCLE_THRESHOLD {
        CycleRegularity::Regular
    } else {
        CycleRegularity::Irregular
    };

    let period = PeriodSummary {
        average_cycle_length,
        average_period_length,
        average_pain_level,
        pain_trend: pain_trend(&pain_values, options.pain_trend_ordering),
        regularity,
        current_phase,
        cycle_lengths,
    };

    let current_pain = work_impact.pain_level.clamp(0.0, 10.0);
    let current_efficiency = work_impact.efficiency.clamp(0.0, 100.0);
    let mut efficiency_series: Vec<f64> = options
        .efficiency_history
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 100.0))
        .collect();
    let efficiency_history_len = efficiency_series.len();
    efficiency_series.push(current_efficiency);

    let work_impact_summary = WorkImpactSummary {
        current_pain,
        current_efficiency,
        average_pain: if pain_values.is_empty() {
            current_pain
        } else {
            average_pain_level
        },
        average_efficiency: mean(&efficiency_series)
            .map(round1)
            .unwrap_or(current_efficiency),
        efficiency_trend: efficiency_trend(&efficiency_series),
    };

    let anomalies: Vec<Anomaly> = [
        detect_anomaly(AnomalyMetric::PainLevel, &pain_values, current_pain),
        detect_anomaly(
            AnomalyMetric::Efficiency,
            &efficiency_series[..efficiency_history_len],
            current_efficiency,
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!(
        target: "cyclecare::snapshot",
        records = records.len(),
        period_runs = runs.len(),
        anomalies = anomalies.len(),
        tier = data_quality.tier.label(),
        "built user data snapshot"
    );

    UserDataSnapshot {
        period,
        work_impact: work_impact_summary,
        data_quality,
        anomalies,
        nutrition: nutrition.cloned(),
        generated_at: options.now,
    }
}

/// Group actual-period days into contiguous runs of `(first, last)` dates.
fn period_runs(sorted: &[&TimeSeriesRecord]) -> Vec<(NaiveDate, NaiveDate)> {
    let mut dates: Vec<NaiveDate> = sorted
        .iter()
        .filter(|r| r.is_actual_period())
        .map(|r| r.date)
        .collect();
    dates.dedup();

    let mut runs: Vec<(NaiveDate, NaiveDate)> = Vec::new();
    for date in dates {
        match runs.last_mut() {
            Some((_, end)) if (date - *end).num_days() == 1 => *end = date,
            _ => runs.push((date, date)),
        }
    }
    runs
}

/// Start-to-start gaps between consecutive runs, restricted to (0, 60) days.
fn cycle_gaps(runs: &[(NaiveDate, NaiveDate)]) -> Vec<f64> {
    runs.windows(2)
        .map(|pair| (pair[1].0 - pair[0].0).num_days())
        .filter(|gap| *gap > 0 && *gap < MAX_CYCLE_GAP)
        .map(|gap| gap as f64)
        .collect()
}

/// Phase on `today` for a cycle that began on `start`.
///
/// A start date in the future means the calendar is ahead of the clock and
/// yields no phase.
fn phase_on(start: NaiveDate, today: NaiveDate, cycle_length: f64) -> Option<CyclePhase> {
    let elapsed = (today - start).num_days();
    if elapsed < 0 {
        return None;
    }
    let cycle = (cycle_length.round() as i64).max(1);
    Some(CyclePhase::from_cycle_day(elapsed % cycle))
}

fn pain_trend(values: &[f64], ordering: PainTrendOrdering) -> PainTrend {
    let mut ordered = values.to_vec();
    if ordering == PainTrendOrdering::ByValue {
        ordered.sort_by(|a, b| a.total_cmp(b));
    }
    let widely_spread = std_dev(&ordered).is_some_and(|sd| sd > PAIN_IRREGULAR_STD_DEV);
    match thirds_delta(&ordered) {
        Some(delta) if delta > PAIN_TREND_THRESHOLD => PainTrend::Increasing,
        Some(delta) if delta < -PAIN_TREND_THRESHOLD => PainTrend::Decreasing,
        _ if widely_spread => PainTrend::Irregular,
        _ => PainTrend::Stable,
    }
}

fn efficiency_trend(series: &[f64]) -> EfficiencyTrend {
    match thirds_delta(series) {
        Some(delta) if delta > EFFICIENCY_TREND_THRESHOLD => EfficiencyTrend::Improving,
        Some(delta) if delta < -EFFICIENCY_TREND_THRESHOLD => EfficiencyTrend::Declining,
        _ => EfficiencyTrend::Stable,
    }
}
