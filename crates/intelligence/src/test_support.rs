//! Fixtures shared by the unit tests in this crate.

use crate::snapshot::{build_snapshot_with, SnapshotOptions, UserDataSnapshot};
use crate::types::{CyclePhase, FlowIntensity, RecordCategory, TimeSeriesRecord, WorkImpactSample};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// The instant every time-dependent test runs at: 2024-06-15 12:00 UTC.
pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("valid test instant")
}

/// `days` consecutive period days starting at `start`, each with the same pain.
pub(crate) fn period(start: NaiveDate, days: i64, pain: u8) -> Vec<TimeSeriesRecord> {
    (0..days)
        .map(|offset| {
            TimeSeriesRecord::new(start + Duration::days(offset), RecordCategory::ActualPeriod)
                .with_pain(pain)
                .with_flow(FlowIntensity::Medium)
        })
        .collect()
}

/// `cycles` periods of `days` days, starting `gap` days apart.
pub(crate) fn period_history(
    start: NaiveDate,
    cycles: i64,
    gap: i64,
    days: i64,
    pain: u8,
) -> Vec<TimeSeriesRecord> {
    (0..cycles)
        .flat_map(|cycle| period(start + Duration::days(cycle * gap), days, pain))
        .collect()
}

/// A snapshot without history, with the given current values and phase.
pub(crate) fn snapshot_with(pain: f64, efficiency: f64, phase: Option<CyclePhase>) -> UserDataSnapshot {
    let options = SnapshotOptions {
        now: fixed_now(),
        ..Default::default()
    };
    let mut snapshot =
        build_snapshot_with(&[], &WorkImpactSample::new(pain, efficiency), None, &options);
    snapshot.period.current_phase = phase;
    snapshot
}
