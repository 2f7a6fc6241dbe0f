use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        error::error_envelope,
        health::health,
        products::get_product,
        root::not_found_route,
        seed::{clear_database, seed_database},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/products/{sku}", get(get_product))
        .route("/seed", post(seed_database).delete(clear_database))
        .route("/health", get(health))
        .fallback_service(not_found_route::<()>())
        .layer(middleware::from_fn(error_envelope))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;
    use std::sync::Arc;

    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use pdp_core::storage::ProductRepository;

    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    async fn test_app() -> (Router, Arc<SqliteRepository>) {
        let repo = Arc::new(SqliteRepository::new_in_memory().await.unwrap());
        let cache = Arc::new(MemoryCache::new(NonZeroUsize::new(16).unwrap()));
        let state = AppState::new(repo.clone(), cache, Duration::from_secs(60));
        let app = create_app(state, &["http://localhost:3001".to_string()]);
        (app, repo)
    }

    async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_seed_then_get_product() {
        let (app, _repo) = test_app().await;

        let (status, json) = send(&app, "POST", "/seed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Database seeded successfully");
        assert_eq!(json["inserted"], 4);

        let (status, json) = send(&app, "GET", "/products/sf-comfort-3l-bg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sku"], "sf-comfort-3l-bg");
        assert_eq!(json["price"], "1299.99");
        assert!(json["imageUrl"].is_string());
        assert!(json["deletedAt"].is_null());
    }

    #[tokio::test]
    async fn test_seed_twice_inserts_once() {
        let (app, repo) = test_app().await;

        send(&app, "POST", "/seed").await;
        let (status, json) = send(&app, "POST", "/seed").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["inserted"], 0);
        assert_eq!(repo.count_all().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_clear_database() {
        let (app, repo) = test_app().await;
        send(&app, "POST", "/seed").await;

        let (status, json) = send(&app, "DELETE", "/seed").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["deleted"], 4);
        assert_eq!(repo.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product_returns_envelope() {
        let (app, _repo) = test_app().await;

        let (status, json) = send(&app, "GET", "/products/does-not-exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["status"], 404);
        assert_eq!(json["path"], "/products/does-not-exist");
        assert_eq!(json["method"], "GET");
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "Product not found");
    }

    #[tokio::test]
    async fn test_invalid_sku_is_rejected() {
        let (app, _repo) = test_app().await;

        let (status, json) = send(&app, "GET", "/products/SF_Comfort").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "SKU must contain only lowercase letters, digits and hyphens"
        );
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _repo) = test_app().await;

        let (status, json) = send(&app, "GET", "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["info"]["database"]["status"], "up");
    }

    #[tokio::test]
    async fn test_health_reports_closed_store() {
        let (app, repo) = test_app().await;
        repo.close().await.unwrap();

        let (status, json) = send(&app, "GET", "/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"]["database"]["status"], "down");
    }

    #[tokio::test]
    async fn test_root_and_unknown_routes_return_404_with_security_headers() {
        let (app, _repo) = test_app().await;

        for uri in ["/", "/api/docs"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let headers = response.headers();
            assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
            assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
            assert_eq!(
                headers[header::CACHE_CONTROL],
                "no-cache, no-store, must-revalidate"
            );
            assert_eq!(headers[header::EXPIRES], "0");

            let body = response.into_body().collect().await.unwrap().to_bytes();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["status"], 404);
            assert_eq!(json["message"], "Resource not found");
        }
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let (app, _repo) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:3001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3001"
        );
    }
}
