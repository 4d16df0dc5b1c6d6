use super::{stats, CalculationParameters};

/// Percent deviation of one value from the initial mean, as used for the
/// exclusion decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationRecord {
    value: f64,
    deviation_percent: f64,
}

impl DeviationRecord {
    pub(super) fn new(value: f64, deviation_percent: f64) -> Self {
        Self { value, deviation_percent }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn deviation_percent(&self) -> f64 {
        self.deviation_percent
    }
}

/// Signed deviation shown to the user. Derived from the trace's initial mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedDeviation {
    pub absolute: f64,
    pub percent: Option<f64>,
}

/// Audit record of one calculation run.
///
/// Only [`super::compute`] builds one, so the partition, the means and the
/// parameters that produced them always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationTrace {
    pub(super) initial_mean: f64,
    pub(super) deviations: Vec<DeviationRecord>,
    pub(super) excluded_values: Vec<f64>,
    pub(super) filtered_values: Vec<f64>,
    pub(super) filtered_mean: f64,
    pub(super) rounded_value: f64,
    pub(super) parameters: CalculationParameters,
}

impl CalculationTrace {
    pub fn initial_mean(&self) -> f64 {
        self.initial_mean
    }

    /// One record per input indicator, in input order.
    pub fn deviations(&self) -> &[DeviationRecord] {
        &self.deviations
    }

    pub fn excluded_values(&self) -> &[f64] {
        &self.excluded_values
    }

    pub fn filtered_values(&self) -> &[f64] {
        &self.filtered_values
    }

    pub fn filtered_mean(&self) -> f64 {
        self.filtered_mean
    }

    /// The materiality level.
    pub fn rounded_value(&self) -> f64 {
        self.rounded_value
    }

    pub fn deviation_threshold_percent(&self) -> f64 {
        self.parameters.deviation_threshold_percent()
    }

    pub fn rounding_limit(&self) -> f64 {
        self.parameters.rounding_limit()
    }

    pub fn signed_deviation(&self, value: f64) -> SignedDeviation {
        SignedDeviation {
            absolute: value - self.initial_mean,
            percent: stats::signed_deviation_percent(value, self.initial_mean),
        }
    }

    /// Whether the indicator at `index` fell outside the threshold.
    pub fn is_excluded(&self, index: usize) -> bool {
        self.deviations
            .get(index)
            .map(|d| d.deviation_percent > self.deviation_threshold_percent())
            .unwrap_or(false)
    }

    pub fn nearest_hundred(&self) -> f64 {
        stats::round_to_nearest(self.filtered_mean, super::ROUNDING_STEP)
    }

    /// True when rounding was abandoned and the unrounded mean was kept.
    pub fn rounding_fallback(&self) -> bool {
        self.rounded_value != self.nearest_hundred()
    }
}
