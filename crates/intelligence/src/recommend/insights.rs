//! Short pattern descriptions derived from a snapshot.

use super::RecommendationInsights;
use crate::snapshot::{CycleRegularity, EfficiencyTrend, PainTrend, UserDataSnapshot};

/// Describe the pain, efficiency and cycle patterns behind a result.
pub fn build_insights(snapshot: &UserDataSnapshot) -> RecommendationInsights {
    RecommendationInsights {
        pain_pattern: pain_pattern(snapshot),
        efficiency_pattern: efficiency_pattern(snapshot),
        cycle_health: cycle_health(snapshot),
        anomalies: snapshot.anomalies.iter().map(|a| a.describe()).collect(),
    }
}

fn pain_pattern(snapshot: &UserDataSnapshot) -> String {
    if snapshot.data_quality.pain_records == 0 {
        return format!(
            "No pain history logged yet; current pain is {}/10",
            snapshot.current_pain()
        );
    }
    let trend = match snapshot.period.pain_trend {
        PainTrend::Increasing => "trending upward",
        PainTrend::Decreasing => "trending downward",
        PainTrend::Stable => "holding steady",
        PainTrend::Irregular => "varying widely",
    };
    format!(
        "Average pain {}/10 across {} entries, {}",
        snapshot.period.average_pain_level, snapshot.data_quality.pain_records, trend
    )
}

fn efficiency_pattern(snapshot: &UserDataSnapshot) -> String {
    let work = &snapshot.work_impact;
    let trend = match work.efficiency_trend {
        EfficiencyTrend::Improving => "improving",
        EfficiencyTrend::Declining => "declining",
        EfficiencyTrend::Stable => "stable",
    };
    format!(
        "Current efficiency {}% (average {}%), {}",
        work.current_efficiency, work.average_efficiency, trend
    )
}

fn cycle_health(snapshot: &UserDataSnapshot) -> String {
    let period = &snapshot.period;
    if period.cycle_lengths.len() < 2 {
        return "Not enough completed cycles to judge regularity yet".to_string();
    }
    let regularity = match period.regularity {
        CycleRegularity::Regular => "Regular",
        CycleRegularity::Irregular => "Irregular",
    };
    format!(
        "{} cycle averaging {} days with {}-day periods",
        regularity, period.average_cycle_length, period.average_period_length
    )
}
