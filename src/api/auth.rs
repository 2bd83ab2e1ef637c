use axum::extract::{Request, State};
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject any request whose `X-API-Key` header does not match the configured
/// key. Applies to every route, the health check included.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if presented == Some(state.config.api_key.as_str()) {
        return next.run(request).await;
    }

    let body = axum::Json(json!({
        "error": "invalid or missing API key",
        "code": "UNAUTHORIZED",
    }));
    (StatusCode::UNAUTHORIZED, [(WWW_AUTHENTICATE, "API-Key")], body).into_response()
}
