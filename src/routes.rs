use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    contact::{Submission, process_submission},
    error::AppError,
    state::AppState,
};

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(submission): Json<Submission>,
) -> Result<impl IntoResponse, AppError> {
    process_submission(&state, &client_ip(&headers), submission).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Email sent successfully" })),
    ))
}

/// First hop of `X-Forwarded-For`, as set by the reverse proxy. Requests that
/// bypass the proxy all share one "unknown" bucket.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn prefers_the_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_unknown_without_a_proxy_header() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn empty_header_counts_as_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));

        assert_eq!(client_ip(&headers), "unknown");
    }
}
