use serde::{Deserialize, Serialize};

use super::indicator::Indicator;
use super::validation::ValidationError;
use crate::engine::{CalculationParameters, DEFAULT_DEVIATION_THRESHOLD, DEFAULT_ROUNDING_LIMIT};

pub const MAX_INDICATORS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub indicators: Vec<Indicator>,
    #[serde(default = "default_deviation_threshold")]
    pub deviation_threshold: f64,
    #[serde(default = "default_rounding_limit")]
    pub rounding_limit: f64,
    #[serde(default)]
    pub with_docx: bool,
}

fn default_deviation_threshold() -> f64 {
    DEFAULT_DEVIATION_THRESHOLD
}

fn default_rounding_limit() -> f64 {
    DEFAULT_ROUNDING_LIMIT
}

impl CalculationRequest {
    /// Checks the request shape and returns the engine parameters.
    ///
    /// An empty indicator list passes; the engine reports it as `NoData`.
    pub fn validate(&self) -> Result<CalculationParameters, ValidationError> {
        if self.indicators.len() > MAX_INDICATORS {
            return Err(ValidationError::TooManyIndicators {
                max: MAX_INDICATORS,
                actual: self.indicators.len(),
            });
        }
        for (idx, indicator) in self.indicators.iter().enumerate() {
            if indicator.name.trim().is_empty() {
                return Err(ValidationError::EmptyName(idx + 1));
            }
            if !indicator.value.is_finite() {
                return Err(ValidationError::NonFiniteValue(idx + 1));
            }
        }
        CalculationParameters::new(self.deviation_threshold, self.rounding_limit)
    }
}
