//! Build engagement analytics from a feedback log.

use super::{FeedbackAction, FeedbackHistory};
use crate::stats::round1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const LOW_ENGAGEMENT_CLICK_RATE: f64 = 20.0;
const HIGH_DISMISS_RATE: f64 = 50.0;
const STRONG_SAVE_RATE: f64 = 30.0;
const LOW_RATING: f64 = 3.0;
const HIGH_RATING: f64 = 4.0;

/// How often an item showed up in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFrequency {
    pub id: String,
    pub count: usize,
}

/// Engagement metrics over a feedback log. Rates are percentages of all feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAnalysis {
    pub total_feedback: usize,
    pub click_rate: f64,
    pub save_rate: f64,
    pub dismiss_rate: f64,
    /// Number of valid ratings.
    pub rating_count: usize,
    pub average_rating: Option<f64>,
    /// Items with the most positive interactions (clicks, saves, ratings).
    pub popular: Vec<ItemFrequency>,
    /// Items dismissed most often.
    pub unpopular: Vec<ItemFrequency>,
    pub insights: Vec<String>,
}

/// Analyze a feedback log. `top_n` bounds the popular and unpopular lists.
pub fn analyze_feedback_with(history: &FeedbackHistory, top_n: usize) -> FeedbackAnalysis {
    let total = history.len();
    if total == 0 {
        return FeedbackAnalysis {
            insights: vec!["No feedback collected yet".to_string()],
            ..Default::default()
        };
    }

    let mut action_counts: HashMap<FeedbackAction, usize> = HashMap::new();
    let mut engaged: HashMap<&str, usize> = HashMap::new();
    let mut dismissed: HashMap<&str, usize> = HashMap::new();
    let mut rating_sum = 0u32;
    let mut rating_count = 0usize;

    for record in history.records() {
        *action_counts.entry(record.action).or_insert(0) += 1;
        let id = record.recommendation_id.as_str();
        match record.action {
            FeedbackAction::Dismissed => *dismissed.entry(id).or_insert(0) += 1,
            _ => *engaged.entry(id).or_insert(0) += 1,
        }
        if let Some(rating) = record.valid_rating() {
            rating_sum += u32::from(rating);
            rating_count += 1;
        }
    }

    let rate = |action: FeedbackAction| {
        let count = action_counts.get(&action).copied().unwrap_or(0);
        round1(count as f64 / total as f64 * 100.0)
    };
    let average_rating =
        (rating_count > 0).then(|| round1(f64::from(rating_sum) / rating_count as f64));

    let mut analysis = FeedbackAnalysis {
        total_feedback: total,
        click_rate: rate(FeedbackAction::Clicked),
        save_rate: rate(FeedbackAction::Saved),
        dismiss_rate: rate(FeedbackAction::Dismissed),
        rating_count,
        average_rating,
        popular: top_items(engaged, top_n),
        unpopular: top_items(dismissed, top_n),
        insights: Vec::new(),
    };
    analysis.insights = derive_insights(&analysis);

    tracing::debug!(
        target: "cyclecare::feedback",
        total,
        click_rate = analysis.click_rate,
        dismiss_rate = analysis.dismiss_rate,
        "analyzed feedback"
    );
    analysis
}

/// Sort by count descending, then id, and keep the first `limit`.
fn top_items(counts: HashMap<&str, usize>, limit: usize) -> Vec<ItemFrequency> {
    let mut items: Vec<ItemFrequency> = counts
        .into_iter()
        .map(|(id, count)| ItemFrequency {
            id: id.to_string(),
            count,
        })
        .collect();
    items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.id.cmp(&b.id)));
    items.truncate(limit);
    items
}

fn derive_insights(analysis: &FeedbackAnalysis) -> Vec<String> {
    let mut insights = Vec::new();
    if analysis.click_rate < LOW_ENGAGEMENT_CLICK_RATE {
        insights.push(format!(
            "Low engagement: only {:.1}% of feedback is clicks",
            analysis.click_rate
        ));
    }
    if analysis.dismiss_rate > HIGH_DISMISS_RATE {
        insights.push(format!(
            "High dismissal: {:.1}% of recommendations were dismissed",
            analysis.dismiss_rate
        ));
    }
    if analysis.save_rate >= STRONG_SAVE_RATE {
        insights.push(format!(
            "Strong intent: {:.1}% of feedback saves an item",
            analysis.save_rate
        ));
    }
    match analysis.average_rating {
        Some(avg) if avg < LOW_RATING => {
            insights.push(format!("Low satisfaction: average rating {avg:.1}/5"))
        }
        Some(avg) if avg >= HIGH_RATING => {
            insights.push(format!("High satisfaction: average rating {avg:.1}/5"))
        }
        _ => {}
    }
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackRecord;
    use crate::test_support::fixed_now;

    fn history(entries: &[(&str, FeedbackAction)]) -> FeedbackHistory {
        FeedbackHistory::from_records(
            entries
                .iter()
                .map(|(id, action)| FeedbackRecord::new(*id, *action, fixed_now()))
                .collect(),
        )
    }

    #[test]
    fn test_empty_history() {
        let analysis = analyze_feedback_with(&FeedbackHistory::new(), 5);
        assert_eq!(analysis.total_feedback, 0);
        assert_eq!(analysis.click_rate, 0.0);
        assert_eq!(analysis.average_rating, None);
        assert_eq!(analysis.insights, vec!["No feedback collected yet"]);
    }

    #[test]
    fn test_rates_are_percentages_of_total() {
        let analysis = analyze_feedback_with(
            &history(&[
                ("a", FeedbackAction::Clicked),
                ("a", FeedbackAction::Clicked),
                ("b", FeedbackAction::Saved),
                ("c", FeedbackAction::Dismissed),
            ]),
            5,
        );
        assert_eq!(analysis.total_feedback, 4);
        assert_eq!(analysis.click_rate, 50.0);
        assert_eq!(analysis.save_rate, 25.0);
        assert_eq!(analysis.dismiss_rate, 25.0);
    }

    #[test]
    fn test_popular_and_unpopular_ordering() {
        let analysis = analyze_feedback_with(
            &history(&[
                ("b", FeedbackAction::Clicked),
                ("a", FeedbackAction::Clicked),
                ("a", FeedbackAction::Saved),
                ("c", FeedbackAction::Clicked),
                ("x", FeedbackAction::Dismissed),
                ("y", FeedbackAction::Dismissed),
                ("y", FeedbackAction::Dismissed),
            ]),
            2,
        );
        let popular: Vec<_> = analysis.popular.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(popular, vec!["a", "b"]);
        let unpopular: Vec<_> = analysis.unpopular.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(unpopular, vec!["y", "x"]);
    }

    #[test]
    fn test_insights_trigger_on_thresholds() {
        let mut log = history(&[
            ("a", FeedbackAction::Dismissed),
            ("b", FeedbackAction::Dismissed),
            ("c", FeedbackAction::Dismissed),
        ]);
        log.record(FeedbackRecord::rated("d", 2, fixed_now()));
        let analysis = analyze_feedback_with(&log, 5);
        assert_eq!(analysis.average_rating, Some(2.0));
        assert!(analysis.insights.iter().any(|i| i.starts_with("Low engagement")));
        assert!(analysis.insights.iter().any(|i| i.starts_with("High dismissal")));
        assert!(analysis.insights.iter().any(|i| i.starts_with("Low satisfaction")));
    }

    #[test]
    fn test_satisfied_engaged_user() {
        let mut log = history(&[
            ("a", FeedbackAction::Clicked),
            ("a", FeedbackAction::Saved),
        ]);
        log.record(FeedbackRecord::rated("a", 5, fixed_now()));
        let analysis = analyze_feedback_with(&log, 5);
        assert!(!analysis.insights.iter().any(|i| i.starts_with("Low engagement")));
        assert!(analysis.insights.iter().any(|i| i.starts_with("Strong intent")));
        assert!(analysis.insights.iter().any(|i| i.starts_with("High satisfaction")));
    }
}
