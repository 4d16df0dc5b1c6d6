//! Materiality level calculation.
//!
//! The engine averages the indicator values, drops every value whose
//! deviation from that average exceeds the threshold, averages the rest and
//! rounds the result to the nearest hundred unless rounding would move it by
//! more than the rounding limit. Every intermediate value is kept in a
//! [`CalculationTrace`] so the JSON and DOCX renderers work from one record.

pub mod stats;
pub mod trace;

use thiserror::Error;
use tracing::debug;

use crate::models::indicator::Indicator;
use crate::models::validation::ValidationError;

pub use trace::{CalculationTrace, DeviationRecord, SignedDeviation};

pub const ROUNDING_STEP: f64 = 100.0;
pub const DEFAULT_DEVIATION_THRESHOLD: f64 = 50.0;
pub const DEFAULT_ROUNDING_LIMIT: f64 = 50.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculationError {
    #[error("No data to calculate")]
    NoData,
    #[error("All indicators were excluded as unrepresentative")]
    AllExcluded,
    #[error("Calculation produced a non-finite mean")]
    NonFiniteMean,
}

/// Policy parameters. Only constructible with values in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParameters {
    deviation_threshold_percent: f64,
    rounding_limit: f64,
}

impl CalculationParameters {
    pub fn new(deviation_threshold_percent: f64, rounding_limit: f64) -> Result<Self, ValidationError> {
        if !deviation_threshold_percent.is_finite()
            || !(0.0..=100.0).contains(&deviation_threshold_percent)
        {
            return Err(ValidationError::ThresholdOutOfRange(deviation_threshold_percent));
        }
        if !rounding_limit.is_finite() || rounding_limit < 0.0 {
            return Err(ValidationError::RoundingLimitOutOfRange(rounding_limit));
        }
        Ok(Self {
            deviation_threshold_percent,
            rounding_limit,
        })
    }

    pub fn deviation_threshold_percent(&self) -> f64 {
        self.deviation_threshold_percent
    }

    pub fn rounding_limit(&self) -> f64 {
        self.rounding_limit
    }
}

impl Default for CalculationParameters {
    fn default() -> Self {
        Self {
            deviation_threshold_percent: DEFAULT_DEVIATION_THRESHOLD,
            rounding_limit: DEFAULT_ROUNDING_LIMIT,
        }
    }
}

pub fn compute(
    indicators: &[Indicator],
    params: &CalculationParameters,
) -> Result<CalculationTrace, CalculationError> {
    let values: Vec<f64> = indicators.iter().map(|i| i.value).collect();

    let initial_mean = stats::mean(&values).ok_or(CalculationError::NoData)?;
    if !initial_mean.is_finite() {
        return Err(CalculationError::NonFiniteMean);
    }

    let threshold = params.deviation_threshold_percent;
    let deviations: Vec<DeviationRecord> = values
        .iter()
        .map(|&value| DeviationRecord::new(value, stats::deviation_percent(value, initial_mean)))
        .collect();

    let (filtered, excluded): (Vec<&DeviationRecord>, Vec<&DeviationRecord>) = deviations
        .iter()
        .partition(|d| d.deviation_percent() <= threshold);
    let filtered_values: Vec<f64> = filtered.iter().map(|d| d.value()).collect();
    let excluded_values: Vec<f64> = excluded.iter().map(|d| d.value()).collect();

    let filtered_mean = stats::mean(&filtered_values).ok_or(CalculationError::AllExcluded)?;
    if !filtered_mean.is_finite() {
        return Err(CalculationError::NonFiniteMean);
    }

    let nearest = stats::round_to_nearest(filtered_mean, ROUNDING_STEP);
    let rounded_value = if (nearest - filtered_mean).abs() > params.rounding_limit {
        filtered_mean
    } else {
        nearest
    };

    debug!(
        initial_mean,
        filtered_mean,
        rounded_value,
        excluded = excluded_values.len(),
        "materiality computed"
    );

    Ok(CalculationTrace {
        initial_mean,
        deviations,
        excluded_values,
        filtered_values,
        filtered_mean,
        rounded_value,
        parameters: *params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators(values: &[f64]) -> Vec<Indicator> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Indicator::new(format!("Indicator {}", i + 1), *v))
            .collect()
    }

    fn params(threshold: f64, limit: f64) -> CalculationParameters {
        CalculationParameters::new(threshold, limit).unwrap()
    }

    #[test]
    fn empty_input_is_no_data() {
        assert_eq!(compute(&[], &params(50.0, 50.0)), Err(CalculationError::NoData));
    }

    #[test]
    fn everything_excluded() {
        let result = compute(&indicators(&[100.0, 100_000.0]), &params(1.0, 50.0));
        assert_eq!(result, Err(CalculationError::AllExcluded));
    }

    #[test]
    fn boundary_deviation_is_kept() {
        // mean 100, both values sit exactly 50% away
        let trace = compute(&indicators(&[50.0, 150.0]), &params(50.0, 50.0)).unwrap();
        assert_eq!(trace.filtered_values(), &[50.0, 150.0]);
        assert!(trace.excluded_values().is_empty());
    }

    #[test]
    fn rounding_within_limit() {
        let trace = compute(&indicators(&[1_230.0]), &params(0.0, 50.0)).unwrap();
        assert_eq!(trace.rounded_value(), 1_200.0);
        assert!(!trace.rounding_fallback());
    }

    #[test]
    fn rounding_beyond_limit_keeps_mean() {
        let trace = compute(&indicators(&[1_250.0]), &params(0.0, 49.0)).unwrap();
        assert_eq!(trace.rounded_value(), trace.filtered_mean());
        assert_eq!(trace.rounded_value(), 1_250.0);
        assert!(trace.rounding_fallback());
        assert_eq!(trace.nearest_hundred(), 1_300.0);
    }

    #[test]
    fn zero_mean_excludes_nonzero_values() {
        let result = compute(&indicators(&[-5.0, 5.0]), &params(100.0, 50.0));
        assert_eq!(result, Err(CalculationError::AllExcluded));

        let trace = compute(&indicators(&[0.0, 0.0]), &params(0.0, 50.0)).unwrap();
        assert_eq!(trace.rounded_value(), 0.0);
        assert_eq!(trace.deviations()[0].deviation_percent(), 0.0);
    }

    #[test]
    fn overflowing_mean_is_rejected() {
        let result = compute(&indicators(&[f64::MAX, f64::MAX]), &params(50.0, 50.0));
        assert_eq!(result, Err(CalculationError::NonFiniteMean));
    }

    #[test]
    fn parameters_are_range_checked() {
        assert!(CalculationParameters::new(100.0, 0.0).is_ok());
        assert!(matches!(
            CalculationParameters::new(100.5, 0.0),
            Err(ValidationError::ThresholdOutOfRange(_))
        ));
        assert!(matches!(
            CalculationParameters::new(-1.0, 0.0),
            Err(ValidationError::ThresholdOutOfRange(_))
        ));
        assert!(matches!(
            CalculationParameters::new(10.0, -0.1),
            Err(ValidationError::RoundingLimitOutOfRange(_))
        ));
        assert!(matches!(
            CalculationParameters::new(f64::NAN, 0.0),
            Err(ValidationError::ThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn excluded_flags_follow_deviation_records() {
        let trace = compute(&indicators(&[100.0, 100.0, 400.0]), &params(50.0, 50.0)).unwrap();
        // mean 200: 100 deviates 50%, 400 deviates 100%
        assert!(!trace.is_excluded(0));
        assert!(!trace.is_excluded(1));
        assert!(trace.is_excluded(2));
        assert!(!trace.is_excluded(3));
    }

    #[test]
    fn trace_carries_the_parameters_it_was_computed_with() {
        // mean 250: 180 and 400 fall outside 25%
        let trace = compute(&indicators(&[180.0, 200.0, 220.0, 400.0]), &params(25.0, 10.0)).unwrap();
        assert_eq!(trace.excluded_values(), &[180.0, 400.0]);
        assert_eq!(trace.deviation_threshold_percent(), 25.0);
        assert_eq!(trace.rounding_limit(), 10.0);
        for (idx, record) in trace.deviations().iter().enumerate() {
            assert_eq!(
                trace.is_excluded(idx),
                trace.excluded_values().contains(&record.value())
            );
        }
    }
}
