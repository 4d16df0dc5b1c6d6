use serde::{Deserialize, Serialize};

use super::indicator::Indicator;
use crate::engine::CalculationTrace;

pub const SUCCESS_MESSAGE: &str = "Calculation completed successfully";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationInfo {
    pub absolute: f64,
    /// `None` when the initial mean is zero and the value is not.
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub name: String,
    pub value: f64,
    pub deviation: DeviationInfo,
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSteps {
    pub initial_mean: f64,
    pub filtered_mean: f64,
    pub excluded_count: usize,
    pub excluded_values: Vec<f64>,
    pub filtered_values: Vec<f64>,
    pub indicators: Vec<IndicatorResult>,
    pub rounded_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub materiality_level: f64,
    pub calculation_steps: CalculationSteps,
    pub indicators: Vec<Indicator>,
    pub message: String,
}

impl CalculationResponse {
    pub fn from_trace(trace: &CalculationTrace, indicators: &[Indicator]) -> Self {
        let results = indicators
            .iter()
            .enumerate()
            .map(|(idx, indicator)| {
                let signed = trace.signed_deviation(indicator.value);
                IndicatorResult {
                    name: indicator.name.clone(),
                    value: indicator.value,
                    deviation: DeviationInfo {
                        absolute: signed.absolute,
                        percent: signed.percent,
                    },
                    excluded: trace.is_excluded(idx),
                }
            })
            .collect();

        Self {
            materiality_level: trace.rounded_value(),
            calculation_steps: CalculationSteps {
                initial_mean: trace.initial_mean(),
                filtered_mean: trace.filtered_mean(),
                excluded_count: trace.excluded_values().len(),
                excluded_values: trace.excluded_values().to_vec(),
                filtered_values: trace.filtered_values().to_vec(),
                indicators: results,
                rounded_value: trace.rounded_value(),
            },
            indicators: indicators.to_vec(),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute, CalculationParameters};

    #[test]
    fn signed_and_absolute_deviations_are_both_exposed() {
        let indicators = vec![
            Indicator::new("Revenue", 100.0),
            Indicator::new("Cost of sales", 100.0),
            Indicator::new("Equity", 400.0),
        ];
        let params = CalculationParameters::new(50.0, 50.0).unwrap();
        let trace = compute(&indicators, &params).unwrap();
        let response = CalculationResponse::from_trace(&trace, &indicators);

        let steps = &response.calculation_steps;
        assert_eq!(steps.initial_mean, 200.0);
        assert_eq!(steps.indicators[0].deviation.absolute, -100.0);
        assert_eq!(steps.indicators[0].deviation.percent, Some(-50.0));
        assert_eq!(steps.indicators[2].deviation.absolute, 200.0);
        assert_eq!(steps.indicators[2].deviation.percent, Some(100.0));
        // the exclusion decision uses the unsigned deviation
        assert_eq!(trace.deviations()[0].deviation_percent(), 50.0);
        assert!(!steps.indicators[0].excluded);
        assert!(steps.indicators[2].excluded);
        assert_eq!(steps.excluded_count, 1);
        assert_eq!(steps.excluded_values, vec![400.0]);
        assert_eq!(response.materiality_level, 100.0);
        assert_eq!(response.message, SUCCESS_MESSAGE);
    }

    #[test]
    fn undefined_percent_serializes_as_null() {
        // mean is zero: the non-zero values have no percent deviation
        let indicators = vec![
            Indicator::new("A", -5.0),
            Indicator::new("B", 5.0),
            Indicator::new("C", 0.0),
        ];
        let params = CalculationParameters::new(0.0, 50.0).unwrap();
        let trace = compute(&indicators, &params).unwrap();
        let response = CalculationResponse::from_trace(&trace, &indicators);

        let json = serde_json::to_value(&response).unwrap();
        let rows = &json["calculation_steps"]["indicators"];
        assert!(rows[0]["deviation"]["percent"].is_null());
        assert_eq!(rows[0]["deviation"]["absolute"], -5.0);
        assert_eq!(rows[0]["excluded"], true);
        assert_eq!(rows[2]["deviation"]["percent"], 0.0);
        assert_eq!(json["materiality_level"], 0.0);
    }
}
