//! HTTP error responses.
//!
//! Handlers return [`AppError`], which picks a status code and message and
//! attaches them to the response as [`ErrorDetails`]. The
//! [`error_envelope`] middleware then renders the uniform JSON body, which
//! needs the request path and method that handlers never see.

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use pdp_core::product::SkuError;
use pdp_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::lookup::LookupError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub struct AppError(pub anyhow::Error);

/// Status and message of a failed request, carried as a response extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    pub status: StatusCode,
    pub message: String,
    /// Full error chain for server errors. Logged, never rendered.
    pub cause: Option<String>,
}

impl ErrorDetails {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            cause: None,
        }
    }

    fn render(&self, path: &str, method: &Method) -> Response {
        let envelope = ErrorEnvelope {
            status: self.status.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            path,
            method: method.as_str(),
            error: self.status.canonical_reason().unwrap_or("Error"),
            message: &self.message,
        };

        (self.status, Json(envelope)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    status: u16,
    timestamp: String,
    path: &'a str,
    method: &'a str,
    error: &'a str,
    message: &'a str,
}

impl AppError {
    fn details(&self) -> ErrorDetails {
        if let Some(err) = self.0.downcast_ref::<LookupError>() {
            return match err {
                LookupError::NotFound { .. } => {
                    ErrorDetails::new(StatusCode::NOT_FOUND, err.to_string())
                }
                LookupError::Store(repo_error) => repository_details(repo_error),
            };
        }
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            return repository_details(repo_error);
        }
        if let Some(sku_error) = self.0.downcast_ref::<SkuError>() {
            return ErrorDetails::new(StatusCode::BAD_REQUEST, sku_error.to_string());
        }

        ErrorDetails::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

fn repository_details(error: &RepositoryError) -> ErrorDetails {
    let status = StatusCode::from_u16(repository_error_to_status_code(error))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    // Store internals stay in the logs.
    if status.is_server_error() {
        ErrorDetails::new(status, INTERNAL_ERROR_MESSAGE)
    } else {
        ErrorDetails::new(status, error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = self.details();
        if details.status.is_server_error() {
            details.cause = Some(format!("{:#}", self.0));
        }

        let mut response = details.status.into_response();
        response.extensions_mut().insert(details);
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Renders [`ErrorDetails`] left on a response into the JSON error envelope.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let Some(details) = response.extensions().get::<ErrorDetails>().cloned() else {
        return response;
    };

    let status = details.status.as_u16();
    if details.status.is_server_error() {
        let cause = details.cause.as_deref().unwrap_or(&details.message);
        tracing::error!(%method, %path, status, error = %cause, "Server error");
    } else if details.status.is_client_error() {
        tracing::warn!(%method, %path, status, message = %details.message, "Client error");
    }

    details.render(&path, &method)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn status_of(err: impl Into<anyhow::Error>) -> (StatusCode, String) {
        let details = AppError(err.into()).details();
        (details.status, details.message)
    }

    #[test]
    fn test_lookup_not_found_maps_to_404() {
        let (status, message) = status_of(LookupError::NotFound {
            sku: "x".to_string(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Product not found");
    }

    #[test]
    fn test_sku_error_maps_to_400() {
        let (status, message) = status_of(SkuError::InvalidCharacters);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            message,
            "SKU must contain only lowercase letters, digits and hyphens"
        );
    }

    #[test]
    fn test_store_errors_hide_internals() {
        let (status, message) = status_of(LookupError::Store(RepositoryError::ConnectionFailed(
            "password authentication failed".to_string(),
        )));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(message, INTERNAL_ERROR_MESSAGE);

        let (status, message) = status_of(RepositoryError::DuplicateKey {
            entity_type: "Product",
            key: "sf-comfort-3l-bg".to_string(),
        });
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(message, "Product already exists: sf-comfort-3l-bg");
    }

    #[test]
    fn test_unknown_error_maps_to_500() {
        let (status, message) = status_of(anyhow::anyhow!("boom"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_envelope_carries_path_and_method() {
        async fn failing() -> Result<(), AppError> {
            Err(SkuError::Empty.into())
        }

        let app = Router::new()
            .route("/things/{id}", get(failing))
            .layer(middleware::from_fn(error_envelope));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/things/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], 400);
        assert_eq!(json["path"], "/things/42");
        assert_eq!(json["method"], "GET");
        assert_eq!(json["error"], "Bad Request");
        assert_eq!(json["message"], "SKU cannot be empty");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_successful_responses_pass_through() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(error_envelope));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_server_error_cause_is_not_rendered() {
        async fn failing() -> Result<(), AppError> {
            Err(RepositoryError::QueryFailed("relation \"products\" does not exist".to_string()).into())
        }

        let app = Router::new()
            .route("/", get(failing))
            .layer(middleware::from_fn(error_envelope));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "Internal Server Error");
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!String::from_utf8_lossy(&body).contains("products"));
    }

    #[test]
    fn test_cause_is_kept_for_server_errors_only() {
        let response = AppError(anyhow::anyhow!("pool timed out")).into_response();
        let details = response.extensions().get::<ErrorDetails>().unwrap();
        assert_eq!(details.cause.as_deref(), Some("pool timed out"));

        let response = AppError(SkuError::Empty.into()).into_response();
        let details = response.extensions().get::<ErrorDetails>().unwrap();
        assert_eq!(details.cause, None);
    }
}
