use chrono::{Duration, NaiveDate, TimeZone, Utc};
use cyclecare_intelligence::{
    analyze_feedback, analyze_quality, build_snapshot_at, generate_cold_start_recommendations,
    generate_recommendations_at, parse_records, validate_reasonableness, FeedbackAction,
    FeedbackHistory, FeedbackRecord, RawRecord, RecommendationCategory, RecommendationEngine,
    RecommendationRequest, RecordCategory, TimeSeriesRecord, WorkImpactSample,
};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Ten period days over three months, averaging pain 6.
fn three_month_history() -> Vec<TimeSeriesRecord> {
    let starts = [day(2024, 1, 3), day(2024, 1, 31), day(2024, 2, 29)];
    let pains: [[u8; 3]; 3] = [[5, 7, 6], [6, 6, 7], [5, 6, 6]];
    let mut records: Vec<TimeSeriesRecord> = starts
        .iter()
        .zip(pains)
        .flat_map(|(start, pain)| {
            pain.into_iter().enumerate().map(move |(offset, level)| {
                TimeSeriesRecord::new(*start + Duration::days(offset as i64), RecordCategory::ActualPeriod)
                    .with_pain(level)
            })
        })
        .collect();
    records.push(TimeSeriesRecord::new(day(2024, 3, 28), RecordCategory::ActualPeriod).with_pain(6));
    records
}

#[test]
fn high_pain_low_efficiency_scenario() {
    let records = three_month_history();
    assert_eq!(records.len(), 10);
    let work = WorkImpactSample::new(8.0, 55.0);
    let feedback = FeedbackHistory::new();

    let result = generate_recommendations_at(&records, &work, None, &feedback, now());
    let snapshot = build_snapshot_at(&records, &work, None, now());

    assert_eq!(snapshot.period.average_pain_level, 6.0);
    assert!((1..=10).contains(&result.len()));
    assert_eq!(result.summary.total_recommendations, result.len());
    assert!(result
        .recommendations
        .iter()
        .any(|i| i.category().is_pain_focused()));
    assert!(result.contains_category(RecommendationCategory::WorkAdjustment));
    for item in &result.recommendations {
        assert!((0.0..=100.0).contains(&item.score));
        assert!((0.0..=100.0).contains(&item.priority()));
        assert!(!item.reason.is_empty());
    }

    let report = validate_reasonableness(&result, &snapshot);
    assert!(report.valid, "{:?}", report.issues);
    let quality = analyze_quality(&result, &snapshot);
    assert_eq!(quality.novelty, 100.0);
}

#[test]
fn cold_start_scenario() {
    let records: Vec<TimeSeriesRecord> = Vec::new();
    let work = WorkImpactSample::new(0.0, 100.0);
    assert!(cyclecare_intelligence::needs_cold_start(&records));

    let items = generate_cold_start_recommendations(&FeedbackHistory::new());
    assert_eq!(items.len(), 5);
    assert!(items.windows(2).all(|w| w[0].priority() >= w[1].priority()));
    assert!(items
        .iter()
        .all(|i| i.template.conditions.is_unconditioned() && i.priority() >= 70.0));

    // the personalized path still returns a well-formed result
    let result = generate_recommendations_at(&records, &work, None, &FeedbackHistory::new(), now());
    assert_eq!(result.summary.total_recommendations, result.len());
}

#[test]
fn ignored_items_never_return() {
    let records = three_month_history();
    let work = WorkImpactSample::new(8.0, 55.0);
    let mut feedback = FeedbackHistory::new();
    let first = generate_recommendations_at(&records, &work, None, &feedback, now());

    let dropped: Vec<String> = first
        .recommendations
        .iter()
        .take(3)
        .map(|i| i.id().to_string())
        .collect();
    for id in &dropped {
        feedback.record(FeedbackRecord::new(id.clone(), FeedbackAction::Dismissed, now()));
    }

    let second = generate_recommendations_at(&records, &work, None, &feedback, now());
    assert!(second.recommendations.iter().all(|i| !dropped.contains(&i.id().to_string())));
    let cold = generate_cold_start_recommendations(&feedback);
    assert!(cold.iter().all(|i| !dropped.contains(&i.id().to_string())));
}

#[test]
fn repeated_calls_are_identical() {
    let records = three_month_history();
    let work = WorkImpactSample::new(5.0, 72.0);
    let feedback = FeedbackHistory::from_records(vec![
        FeedbackRecord::new("gentle-stretching", FeedbackAction::Saved, now()),
        FeedbackRecord::rated("mood-journal", 4, now()),
    ]);
    let engine = RecommendationEngine::default().with_fixed_time(now());
    let request = RecommendationRequest::new(&records, &work, &feedback);
    assert_eq!(engine.generate(&request), engine.generate(&request));
}

#[test]
fn malformed_records_are_skipped() {
    let raw: Vec<RawRecord> = serde_json::from_str(
        r#"[
            {"date": "2024-03-01", "type": "actual-period", "painLevel": 6},
            {"date": "not-a-date", "type": "actual-period"},
            {"type": "actual-period", "painLevel": 4},
            {"date": "2024-03-02", "type": "actual-period", "painLevel": 14},
            {"date": "2024-03-03", "type": "predicted", "flowIntensity": "light"}
        ]"#,
    )
    .unwrap();
    let records = parse_records(raw);
    assert_eq!(records.len(), 2);

    let result =
        generate_recommendations_at(&records, &WorkImpactSample::new(3.0, 85.0), None, &FeedbackHistory::new(), now());
    assert_eq!(result.summary.total_recommendations, result.len());
}

#[test]
fn feedback_round_trip_through_json() {
    let history = FeedbackHistory::from_records(vec![
        FeedbackRecord::new("a", FeedbackAction::Clicked, now()),
        FeedbackRecord::new("b", FeedbackAction::Dismissed, now()),
        FeedbackRecord::rated("a", 5, now()),
    ]);
    let json = serde_json::to_string(&history).unwrap();
    let restored: FeedbackHistory = serde_json::from_str(&json).unwrap();
    assert!(restored.is_ignored("b"));
    assert_eq!(restored.average_rating("a"), Some(5.0));

    let analysis = analyze_feedback(&restored);
    assert_eq!(analysis.total_feedback, 3);
    assert_eq!(analysis.popular[0].id, "a");
}
