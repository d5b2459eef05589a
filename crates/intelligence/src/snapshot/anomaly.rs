//! Flag current values that sit far outside the user's own history.

use crate::stats::{mean, round1, std_dev};
use serde::{Deserialize, Serialize};

/// Minimum history length before anything is flagged.
const MIN_HISTORY: usize = 3;
const ANOMALY_SIGMAS: f64 = 3.0;
const SEVERE_SIGMAS: f64 = 4.0;

/// Which measurement looked anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyMetric {
    PainLevel,
    Efficiency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Moderate,
    Severe,
}

/// A current value more than three standard deviations from its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub metric: AnomalyMetric,
    pub current: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// Signed distance from the mean, in standard deviations.
    pub z_score: f64,
    pub severity: AnomalySeverity,
}

impl Anomaly {
    /// One-line description for insight blocks and logs.
    pub fn describe(&self) -> String {
        let what = match self.metric {
            AnomalyMetric::PainLevel => "pain level",
            AnomalyMetric::Efficiency => "efficiency",
        };
        let direction = if self.z_score >= 0.0 { "above" } else { "below" };
        let severity = match self.severity {
            AnomalySeverity::Moderate => "moderate",
            AnomalySeverity::Severe => "severe",
        };
        format!(
            "Current {} {} is {:.1} standard deviations {} your usual {} ({})",
            what,
            self.current,
            self.z_score.abs(),
            direction,
            self.mean,
            severity
        )
    }
}

/// Compare `current` against `history`.
///
/// Returns `None` ("nothing to report") when the history is shorter than three
/// points, has no spread, or the value is within three standard deviations.
pub fn detect_anomaly(metric: AnomalyMetric, history: &[f64], current: f64) -> Option<Anomaly> {
    if history.len() < MIN_HISTORY {
        return None;
    }
    let avg = mean(history)?;
    let sd = std_dev(history)?;
    if sd <= f64::EPSILON {
        return None;
    }
    let deviation = current - avg;
    if deviation.abs() <= ANOMALY_SIGMAS * sd {
        return None;
    }
    let severity = if deviation.abs() > SEVERE_SIGMAS * sd {
        AnomalySeverity::Severe
    } else {
        AnomalySeverity::Moderate
    };
    Some(Anomaly {
        metric,
        current,
        mean: round1(avg),
        std_dev: round1(sd),
        z_score: round1(deviation / sd),
        severity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_history_reports_nothing() {
        assert!(detect_anomaly(AnomalyMetric::PainLevel, &[1.0, 9.0], 10.0).is_none());
    }

    #[test]
    fn test_flat_history_reports_nothing() {
        assert!(detect_anomaly(AnomalyMetric::PainLevel, &[2.0, 2.0, 2.0], 9.0).is_none());
    }

    #[test]
    fn test_within_three_sigma_is_normal() {
        // mean 2, sd 1
        let history = [1.0, 3.0, 1.0, 3.0];
        assert!(detect_anomaly(AnomalyMetric::PainLevel, &history, 5.0).is_none());
    }

    #[test]
    fn test_moderate_and_severe() {
        let history = [1.0, 3.0, 1.0, 3.0];
        let moderate = detect_anomaly(AnomalyMetric::PainLevel, &history, 5.5).unwrap();
        assert_eq!(moderate.severity, AnomalySeverity::Moderate);
        assert_eq!(moderate.z_score, 3.5);

        let severe = detect_anomaly(AnomalyMetric::PainLevel, &history, 7.0).unwrap();
        assert_eq!(severe.severity, AnomalySeverity::Severe);
        assert!(severe.describe().contains("above"));
    }

    #[test]
    fn test_low_outlier_has_negative_z() {
        let history = [80.0, 90.0, 80.0, 90.0];
        let anomaly = detect_anomaly(AnomalyMetric::Efficiency, &history, 40.0).unwrap();
        assert!(anomaly.z_score < 0.0);
        assert_eq!(anomaly.severity, AnomalySeverity::Severe);
        assert!(anomaly.describe().contains("below"));
    }
}
