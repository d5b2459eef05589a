//! Small numeric helpers used by the snapshot and evaluation code.
//!
//! Every helper checks its input length before dividing, so callers can pass
//! empty slices freely.

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, or `None` for an empty slice.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp into the 0-100 percentage range.
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Difference between the mean of the last third and the mean of the first third.
///
/// Returns `None` when the series has fewer than three points, since a third
/// of it would be empty.
pub fn thirds_delta(values: &[f64]) -> Option<f64> {
    let third = values.len() / 3;
    if third == 0 {
        return None;
    }
    let head = mean(&values[..third])?;
    let tail = mean(&values[values.len() - third..])?;
    Some(tail - head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std_dev() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
        assert_eq!(std_dev(&[]), None);
        assert_eq!(std_dev(&[5.0, 5.0, 5.0]), Some(0.0));
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(5.96), 6.0);
        assert_eq!(round1(5.94), 5.9);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_thirds_delta() {
        assert_eq!(thirds_delta(&[1.0, 2.0]), None);
        assert_eq!(thirds_delta(&[1.0, 5.0, 9.0]), Some(8.0));
        // six points: thirds of two
        let delta = thirds_delta(&[1.0, 1.0, 5.0, 5.0, 3.0, 3.0]).unwrap();
        assert!((delta - 2.0).abs() < 1e-9);
    }
}
