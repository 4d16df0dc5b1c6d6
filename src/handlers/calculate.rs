use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use super::ApiError;
use crate::engine;
use crate::models::{CalculationRequest, CalculationResponse, ValidationError};
use crate::report::{docx, Report, REPORT_FILENAME};

pub async fn calculate(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let params = request.validate()?;
    let trace = engine::compute(&request.indicators, &params)?;

    info!(
        indicators = request.indicators.len(),
        excluded = trace.excluded_values().len(),
        materiality_level = trace.rounded_value(),
        with_docx = request.with_docx,
        "Materiality calculated"
    );

    if !request.with_docx {
        let response = CalculationResponse::from_trace(&trace, &request.indicators);
        return Ok(Json(response).into_response());
    }

    let report = Report::build(&trace, &request.indicators);
    let bytes = docx::render(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, docx::DOCX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILENAME),
            ),
        ],
        bytes,
    )
        .into_response())
}
