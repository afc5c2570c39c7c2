use crate::handlers;
use crate::middleware::{require_operator_token, OperatorToken};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use shared::config::Config;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route("/api/health", get(handlers::health_check))
        // Status check routes
        .route(
            "/api/status",
            post(handlers::create_status_check).get(handlers::list_status_checks),
        )
        // Cache routes
        .route("/api/cache", post(handlers::put_entry))
        .route("/api/cache/status", get(handlers::cache_status))
        .route("/api/cache/sheets", post(handlers::put_sheet))
        .route("/api/cache/sheets/{sheet_name}", get(handlers::get_sheet))
        .route("/api/cache/drive", post(handlers::put_drive_folder))
        .route(
            "/api/cache/drive/folder/{folder_id}",
            get(handlers::get_drive_folder),
        )
        .route(
            "/api/cache/{resource_type}/{resource_id}",
            get(handlers::get_entry),
        );

    // Admin routes
    match &config.admin_token {
        Some(token) => {
            let admin = Router::new()
                .route("/api/admin/cache", delete(handlers::clear_cache))
                .route_layer(middleware::from_fn_with_state(
                    OperatorToken::new(token),
                    require_operator_token,
                ));
            router = router.merge(admin);
            info!("Operator routes enabled");
        }
        None => info!("DASHCACHE_ADMIN_TOKEN not set, operator routes disabled"),
    }

    router
        // Middleware
        .layer(DefaultBodyLimit::disable())
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    // Credentials cannot be combined with wildcards, so mirror the request instead
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use dashcache::MemoryCacheStore;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    fn test_router(vars: &[(&str, &str)]) -> Router {
        let state = AppState::from_store(MemoryCacheStore::new());
        build_router(state, &config_with(vars))
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_and_root() {
        let router = test_router(&[]);

        let response = send(&router, Method::GET, "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());

        let response = send(&router, Method::GET, "/api/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_put_then_get_entry() {
        let router = test_router(&[]);

        let response = send(
            &router,
            Method::POST,
            "/api/cache",
            Some(json!({
                "resource_type": "sheet",
                "resource_id": "Budget2024",
                "data": {"rows": [1, 2, 3]}
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let put = json_body(response).await;
        assert_eq!(put["success"], true);
        assert!(put["timestamp"].is_string());

        let response = send(&router, Method::GET, "/api/cache/sheet/Budget2024", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], json!({"rows": [1, 2, 3]}));
        assert_eq!(body["cached_at"], put["cached_at"]);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_missing_entry_is_not_found() {
        let router = test_router(&[]);

        let response = send(&router, Method::GET, "/api/cache/sheets/Nonexistent", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "No cached data available");
    }

    #[tokio::test]
    async fn test_sheet_routes_share_the_sheet_resource_type() {
        let router = test_router(&[]);

        let rows = json!([{"Item": "Sandbags", "Qty": 200}, {"Item": "Radios", "Qty": 12}]);
        let response = send(
            &router,
            Method::POST,
            "/api/cache/sheets?sheet_name=Inventory",
            Some(rows.clone()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["message"],
            "Sheet data cached successfully"
        );

        let response = send(&router, Method::GET, "/api/cache/sheets/Inventory", None).await;
        assert_eq!(json_body(response).await["data"], rows);

        let response = send(&router, Method::GET, "/api/cache/sheet/Inventory", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_drive_folder_overwrite_returns_latest() {
        let router = test_router(&[]);

        for listing in [
            json!({"folders": [], "files": []}),
            json!({"folders": ["A"], "files": []}),
        ] {
            let response = send(
                &router,
                Method::POST,
                "/api/cache/drive?folder_id=F1",
                Some(listing),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = send(&router, Method::GET, "/api/cache/drive/folder/F1", None).await;
        assert_eq!(
            json_body(response).await["data"],
            json!({"folders": ["A"], "files": []})
        );

        let response = send(&router, Method::GET, "/api/cache/status", None).await;
        assert_eq!(json_body(response).await["total_cached"], 1);
    }

    #[tokio::test]
    async fn test_status_lists_summaries_without_payload() {
        let router = test_router(&[]);

        for (resource_type, resource_id) in [("sheet", "A"), ("drive_folder", "F1")] {
            send(
                &router,
                Method::POST,
                "/api/cache",
                Some(json!({
                    "resource_type": resource_type,
                    "resource_id": resource_id,
                    "data": {"secret": "payload"}
                })),
            )
            .await;
        }

        let response = send(&router, Method::GET, "/api/cache/status", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["total_cached"], 2);

        let items = body["cached_items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            assert!(item.get("data").is_none());
            assert!(item["resource_type"].is_string());
            assert!(item["resource_id"].is_string());
            assert!(item["cached_at"].is_string());
        }
    }

    #[tokio::test]
    async fn test_blank_key_is_bad_request() {
        let router = test_router(&[]);

        let response = send(
            &router,
            Method::POST,
            "/api/cache",
            Some(json!({"resource_type": "sheet", "resource_id": "  ", "data": {}})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_admin_route_absent_without_token() {
        let router = test_router(&[]);

        let response = send(&router, Method::DELETE, "/api/admin/cache", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_clear_requires_token() {
        let router = test_router(&[("DASHCACHE_ADMIN_TOKEN", "s3cret")]);

        send(
            &router,
            Method::POST,
            "/api/cache",
            Some(json!({"resource_type": "sheet", "resource_id": "A", "data": []})),
        )
        .await;

        let response = send(&router, Method::DELETE, "/api/admin/cache", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/admin/cache")
            .header(header::AUTHORIZATION, "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/admin/cache")
            .header(header::AUTHORIZATION, "Bearer s3cret")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["removed"], 1);

        let response = send(&router, Method::GET, "/api/cache/sheet/A", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_status_checks() {
        let router = test_router(&[]);

        let response = send(
            &router,
            Method::POST,
            "/api/status",
            Some(json!({"client_name": "dashboard"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert_eq!(created["client_name"], "dashboard");

        let response = send(&router, Method::GET, "/api/status", None).await;
        let listed = json_body(response).await;
        assert_eq!(listed, json!([created]));

        let response = send(
            &router,
            Method::POST,
            "/api/status",
            Some(json!({"client_name": ""})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generic_put_rejects_types_shadowed_by_dedicated_routes() {
        let router = test_router(&[]);

        for resource_type in ["sheets", "drive"] {
            let response = send(
                &router,
                Method::POST,
                "/api/cache",
                Some(json!({"resource_type": resource_type, "resource_id": "X", "data": {}})),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = json_body(response).await;
            assert_eq!(body["success"], false);
            assert!(body["error"].as_str().unwrap().contains("resource_type"));
        }

        let response = send(&router, Method::GET, "/api/cache/status", None).await;
        assert_eq!(json_body(response).await["total_cached"], 0);
    }

    #[tokio::test]
    async fn test_payload_over_two_mebibytes_is_accepted() {
        let router = test_router(&[]);
        let blob = "x".repeat(3 * 1024 * 1024);

        let response = send(
            &router,
            Method::POST,
            "/api/cache",
            Some(json!({"resource_type": "sheet", "resource_id": "Big", "data": {"blob": blob}})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&router, Method::GET, "/api/cache/sheet/Big", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["blob"].as_str().unwrap().len(), blob.len());
    }

    #[tokio::test]
    async fn test_rejected_requests_use_error_body() {
        let router = test_router(&[]);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/cache")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid request body");
        assert!(body["detail"].is_string());

        let response = send(
            &router,
            Method::POST,
            "/api/cache",
            Some(json!({"resource_type": "sheet", "resource_id": "A"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["success"], false);

        let response = send(&router, Method::POST, "/api/cache/sheets", Some(json!([]))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid query string");
    }

    #[tokio::test]
    async fn test_admin_token_with_trailing_whitespace_still_matches() {
        let router = test_router(&[("DASHCACHE_ADMIN_TOKEN", "tok ")]);

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/admin/cache")
            .header(header::AUTHORIZATION, "Bearer tok")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_echoes_configured_origin() {
        let router = test_router(&[("DASHCACHE_ALLOWED_ORIGINS", "http://localhost:3000")]);

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
    }
}
