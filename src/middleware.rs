use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

const FORM_PREFIX: &str = "/form/";

/// Logs method, path, status and latency of every request.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = loggable_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(%method, %path, %status, duration_ms, "Request failed");
    } else {
        tracing::info!(%method, %path, %status, duration_ms, "Request completed");
    }

    response
}

// Form tokens are credentials; keep them out of the logs.
fn loggable_path(path: &str) -> String {
    if path.starts_with(FORM_PREFIX) {
        return format!("{}{{token}}", FORM_PREFIX);
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_tokens_are_masked() {
        assert_eq!(loggable_path("/form/abcDEF123"), "/form/{token}");
        assert_eq!(loggable_path("/api/v1/calculate"), "/api/v1/calculate");
    }
}
