//! Catch-all for `/` and unknown routes.

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{any, MethodRouter},
    Json,
};
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;

const SECURITY_HEADERS: [(HeaderName, &str); 6] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

/// Responds with 404 and a minimal JSON body.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": 404,
            "message": "Resource not found",
        })),
    )
}

/// [`not_found`] for any method, with headers that keep the response out of
/// caches and frames.
pub fn not_found_route<S>() -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    SECURITY_HEADERS
        .into_iter()
        .fold(any(not_found), |route, (name, value)| {
            route.layer(SetResponseHeaderLayer::overriding(
                name,
                HeaderValue::from_static(value),
            ))
        })
}
