//! Numeric helpers shared by the engine.

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Absolute deviation of `value` from `mean`, in percent of `|mean|`.
///
/// A zero mean has no meaningful ratio: a zero value deviates by 0%,
/// anything else by `+inf` so that it is always excluded.
pub fn deviation_percent(value: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        return if value == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (value - mean).abs() / mean.abs() * 100.0
}

/// Signed deviation of `value` from `mean`, in percent of `|mean|`.
/// `None` when the mean is zero and the value is not.
pub fn signed_deviation_percent(value: f64, mean: f64) -> Option<f64> {
    if mean == 0.0 {
        return if value == 0.0 { Some(0.0) } else { None };
    }
    Some((value - mean) / mean.abs() * 100.0)
}

/// Rounds to the nearest multiple of `step`, halves away from zero.
pub fn round_to_nearest(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), Some(3.0));
    }

    #[test]
    fn deviation_is_zero_at_the_mean() {
        assert_eq!(deviation_percent(730_000.0, 730_000.0), 0.0);
    }

    #[test]
    fn deviation_uses_magnitude_of_negative_mean() {
        let dev = deviation_percent(-50.0, -100.0);
        assert!((dev - 50.0).abs() < 1e-12);
    }

    #[test]
    fn deviation_against_zero_mean() {
        assert_eq!(deviation_percent(0.0, 0.0), 0.0);
        assert_eq!(deviation_percent(5.0, 0.0), f64::INFINITY);
        assert_eq!(deviation_percent(-5.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn signed_deviation_keeps_direction() {
        assert_eq!(signed_deviation_percent(50.0, 100.0), Some(-50.0));
        assert_eq!(signed_deviation_percent(150.0, 100.0), Some(50.0));
        assert_eq!(signed_deviation_percent(3.0, 0.0), None);
        assert_eq!(signed_deviation_percent(0.0, 0.0), Some(0.0));
    }

    #[test]
    fn rounding_halves_go_away_from_zero() {
        assert_eq!(round_to_nearest(1_250.0, 100.0), 1_300.0);
        assert_eq!(round_to_nearest(-1_250.0, 100.0), -1_300.0);
        assert_eq!(round_to_nearest(1_249.0, 100.0), 1_200.0);
        assert_eq!(round_to_nearest(960_400.0, 100.0), 960_400.0);
    }
}
