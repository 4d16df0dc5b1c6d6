//! DOCX rendering of a [`Report`].

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts};
use thiserror::Error;

use super::{Block, Report};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// Sizes are in half-points.
const BODY_SIZE: usize = 24;
const SECTION_SIZE: usize = 26;
const TITLE_SIZE: usize = 32;
const BODY_FONT: &str = "Times New Roman";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to pack report document: {0}")]
    Pack(String),
}

pub fn render(report: &Report) -> Result<Vec<u8>, ReportError> {
    let fonts = RunFonts::new()
        .ascii(BODY_FONT)
        .hi_ansi(BODY_FONT)
        .cs(BODY_FONT)
        .east_asia(BODY_FONT);

    let mut doc = Docx::new()
        .default_fonts(fonts)
        .default_size(BODY_SIZE)
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(&report.title).bold().size(TITLE_SIZE))
                .align(AlignmentType::Center),
        );

    for section in &report.sections {
        let heading = format!("{}. {}:", section.number, section.heading);
        doc = doc.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(heading).bold().size(SECTION_SIZE)),
        );
        for block in &section.blocks {
            doc = doc.add_paragraph(block_paragraph(block));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buf)
        .map_err(|e| ReportError::Pack(e.to_string()))?;
    Ok(buf.into_inner())
}

fn block_paragraph(block: &Block) -> Paragraph {
    match block {
        Block::Paragraph(text) | Block::Numbered(text) => {
            Paragraph::new().add_run(Run::new().add_text(text))
        }
        Block::Bullet(text) => Paragraph::new().add_run(Run::new().add_text(format!("\u{2022} {}", text))),
        Block::Highlight(text) => Paragraph::new()
            .add_run(Run::new().add_text(text).bold())
            .align(AlignmentType::Center),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute, CalculationParameters};
    use crate::models::indicator::Indicator;

    #[test]
    fn renders_a_zip_container() {
        let indicators = vec![
            Indicator::new("Revenue", 1_000_000.0),
            Indicator::new("Net profit", 900_000.0),
        ];
        let params = CalculationParameters::default();
        let trace = compute(&indicators, &params).unwrap();
        let report = Report::build(&trace, &indicators);

        let bytes = render(&report).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }
}
