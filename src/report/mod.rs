//! Narrative report of a calculation, section by section.

pub mod docx;
pub mod format;

use std::fmt;

use crate::engine::CalculationTrace;
use crate::models::indicator::Indicator;

pub use docx::ReportError;

pub const REPORT_TITLE: &str = "Materiality level calculation";
pub const REPORT_FILENAME: &str = "materiality_report.docx";

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(String),
    /// Numbered list entry; the number is part of the text.
    Numbered(String),
    Bullet(String),
    /// Bold, centered figure.
    Highlight(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub number: usize,
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn build(trace: &CalculationTrace, indicators: &[Indicator]) -> Self {
        let values: Vec<f64> = trace.deviations().iter().map(|d| d.value()).collect();

        let source = indicators
            .iter()
            .enumerate()
            .map(|(idx, ind)| {
                Block::Numbered(format!("{}. {}: {}", idx + 1, ind.name, format::money(ind.value, 0)))
            })
            .collect();

        let mean = vec![Block::Paragraph(format!(
            "({}) / {} = {}",
            join_amounts(&values),
            values.len(),
            format::money(trace.initial_mean(), 0)
        ))];

        let deviations = indicators
            .iter()
            .map(|ind| {
                let text = match trace.signed_deviation(ind.value).percent {
                    Some(p) => format!("{}: {} from the mean", ind.name, format::signed_percent(p)),
                    None => format!("{}: undefined, the mean is zero", ind.name),
                };
                Block::Bullet(text)
            })
            .collect();

        let exclusions = if trace.excluded_values().is_empty() {
            vec![Block::Paragraph("No indicators were excluded".to_string())]
        } else {
            trace
                .excluded_values()
                .iter()
                .map(|v| Block::Bullet(format!("Excluded: {}", format::money(*v, 0))))
                .collect()
        };

        let recalculated = vec![Block::Paragraph(format!(
            "({}) / {} = {}",
            join_amounts(trace.filtered_values()),
            trace.filtered_values().len(),
            format::money(trace.filtered_mean(), 2)
        ))];

        let rounding = if trace.rounding_fallback() {
            vec![
                Block::Paragraph(format!(
                    "Rounding to {} would shift the result by {}, more than the limit of {}",
                    format::money(trace.nearest_hundred(), 0),
                    format::amount((trace.nearest_hundred() - trace.filtered_mean()).abs(), 2),
                    format::amount(trace.rounding_limit(), 2)
                )),
                Block::Paragraph(format!(
                    "Unrounded value kept: {}",
                    format::money(trace.rounded_value(), 2)
                )),
            ]
        } else {
            vec![Block::Paragraph(format!(
                "Rounded value: {}",
                format::money(trace.rounded_value(), 0)
            ))]
        };

        let final_decimals = if trace.rounding_fallback() { 2 } else { 0 };
        let result = vec![Block::Highlight(format::money(trace.rounded_value(), final_decimals))];

        let headings = [
            ("Source data".to_string(), source),
            ("Arithmetic mean".to_string(), mean),
            ("Deviation of each indicator from the mean".to_string(), deviations),
            (
                format!(
                    "Exclusion of indicators deviating by more than {}%",
                    trace.deviation_threshold_percent()
                ),
                exclusions,
            ),
            ("Recalculated arithmetic mean".to_string(), recalculated),
            ("Rounding of the result".to_string(), rounding),
            ("Materiality level".to_string(), result),
        ];

        let sections = headings
            .into_iter()
            .enumerate()
            .map(|(idx, (heading, blocks))| Section {
                number: idx + 1,
                heading,
                blocks,
            })
            .collect();

        Self {
            title: REPORT_TITLE.to_string(),
            sections,
        }
    }
}

fn join_amounts(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format::amount(*v, 0))
        .collect::<Vec<_>>()
        .join(" + ")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}. {}:", section.number, section.heading)?;
            for block in &section.blocks {
                match block {
                    Block::Paragraph(text) | Block::Numbered(text) => writeln!(f, "{}", text)?,
                    Block::Bullet(text) => writeln!(f, "- {}", text)?,
                    Block::Highlight(text) => writeln!(f, "**{}**", text)?,
                }
            }
        }
        Ok(())
    }
}
