use chrono::{Duration, NaiveDate, TimeZone, Utc};
use cyclecare_intelligence::{
    generate_cold_start_recommendations, generate_recommendations_at, FeedbackAction,
    FeedbackHistory, FeedbackRecord, RecordCategory, TimeSeriesRecord, WorkImpactSample,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn records_from(days: &[(u16, u8, bool)]) -> Vec<TimeSeriesRecord> {
    let origin = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    days.iter()
        .map(|(offset, pain, actual)| {
            let category = if *actual {
                RecordCategory::ActualPeriod
            } else {
                RecordCategory::Predicted
            };
            TimeSeriesRecord::new(origin + Duration::days(i64::from(*offset)), category)
                .with_pain(*pain)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_is_bounded_and_explained(
        days in prop::collection::vec((0u16..180, 0u8..=10, any::<bool>()), 0..60),
        pain in 0.0f64..=10.0,
        efficiency in 0.0f64..=100.0,
    ) {
        let records = records_from(&days);
        let work = WorkImpactSample::new(pain, efficiency);
        let result = generate_recommendations_at(&records, &work, None, &FeedbackHistory::new(), now());

        prop_assert!(result.len() <= 10);
        prop_assert_eq!(result.summary.total_recommendations, result.len());
        let ids: HashSet<_> = result.recommendations.iter().map(|i| i.id()).collect();
        prop_assert_eq!(ids.len(), result.len());
        for item in &result.recommendations {
            prop_assert!((0.0..=100.0).contains(&item.score));
            prop_assert!((0.0..=100.0).contains(&item.priority()));
            prop_assert!(!item.reason.is_empty());
        }
        if pain >= 8.0 {
            prop_assert!(result.recommendations.iter().any(|i| i.category().is_pain_focused()));
        }
    }

    #[test]
    fn dismissed_items_are_excluded(
        pain in 0.0f64..=10.0,
        efficiency in 0.0f64..=100.0,
        dismiss in prop::collection::vec(0usize..10, 1..4),
    ) {
        let work = WorkImpactSample::new(pain, efficiency);
        let baseline = generate_recommendations_at(&[], &work, None, &FeedbackHistory::new(), now());
        prop_assume!(!baseline.is_empty());

        let mut feedback = FeedbackHistory::new();
        let mut dropped = HashSet::new();
        for index in dismiss {
            let id = baseline.recommendations[index % baseline.len()].id().to_string();
            feedback.record(FeedbackRecord::new(id.clone(), FeedbackAction::Dismissed, now()));
            dropped.insert(id);
        }

        let after = generate_recommendations_at(&[], &work, None, &feedback, now());
        prop_assert!(after.recommendations.iter().all(|i| !dropped.contains(i.id())));
        let cold = generate_cold_start_recommendations(&feedback);
        prop_assert!(cold.iter().all(|i| !dropped.contains(i.id())));
    }

    #[test]
    fn identical_inputs_give_identical_output(
        days in prop::collection::vec((0u16..120, 0u8..=10, any::<bool>()), 0..30),
        pain in 0.0f64..=10.0,
        efficiency in 0.0f64..=100.0,
    ) {
        let records = records_from(&days);
        let work = WorkImpactSample::new(pain, efficiency);
        let feedback = FeedbackHistory::new();
        let first = generate_recommendations_at(&records, &work, None, &feedback, now());
        let second = generate_recommendations_at(&records, &work, None, &feedback, now());
        prop_assert_eq!(first, second);
    }
}
