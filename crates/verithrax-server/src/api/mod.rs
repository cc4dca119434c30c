mod admin;
mod assets;
mod hooks;
mod settings;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use verithrax_core::{AppConfig, SettingsStore};
use verithrax_dispatch::Dispatcher;

use crate::middleware::{
    request_id, require_admin_auth, require_bearer_auth, AuthState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub settings: Arc<dyn SettingsStore>,
    pub dispatcher: Arc<Dispatcher>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/hooks/product-saved", post(hooks::product_saved))
        .route(
            "/api/v1/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_bearer_auth,
        ))
}

fn admin_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/settings",
            get(admin::settings_page).post(admin::submit_settings),
        )
        .layer(axum::middleware::from_fn_with_state(auth, require_admin_auth))
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/assets/verithrax.css", get(assets::stylesheet))
        .route("/assets/head.html", get(assets::head_snippet));

    Router::new()
        .merge(public_routes)
        .merge(admin_router(auth.clone()))
        .merge(protected_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::new(req_id.0, HealthData { status: "ok" })),
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use verithrax_core::MemorySettingsStore;

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "boom", "something broke").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_is_public_and_echoes_request_id() {
        let state = test_support::test_state("http://127.0.0.1:9/webhook", MemorySettingsStore::new());
        let app = build_app(state, AuthState::with_keys(vec!["k".to_owned()]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.to_str().unwrap()),
            Some("req-health")
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-health");
    }

    fn admin_page_request(authorization: Option<&'static str>) -> Request<Body> {
        let builder = Request::builder()
            .uri("/admin/settings")
            .header("accept", "text/html");
        match authorization {
            Some(value) => builder.header("authorization", value),
            None => builder,
        }
        .body(Body::empty())
        .expect("request")
    }

    #[tokio::test]
    async fn admin_page_challenges_browser_for_basic_auth() {
        let state = test_support::test_state("http://127.0.0.1:9/webhook", MemorySettingsStore::new());
        let app = build_app(state, AuthState::with_keys(vec!["k".to_owned()]));

        let response = app.oneshot(admin_page_request(None)).await.expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .expect("www-authenticate header");
        assert!(challenge.starts_with("Basic realm="));
    }

    #[tokio::test]
    async fn admin_page_loads_with_browser_basic_credentials() {
        let state = test_support::test_state("http://127.0.0.1:9/webhook", MemorySettingsStore::new());
        let app = build_app(state, AuthState::with_keys(vec!["k".to_owned()]));

        // "admin:k"
        let response = app
            .oneshot(admin_page_request(Some("Basic YWRtaW46aw==")))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let page = String::from_utf8(body.to_vec()).expect("utf-8 page");
        assert!(page.contains("Verithrax AI Configuration"));
    }

    #[tokio::test]
    async fn admin_page_rejects_wrong_basic_password() {
        let state = test_support::test_state("http://127.0.0.1:9/webhook", MemorySettingsStore::new());
        let app = build_app(state, AuthState::with_keys(vec!["k".to_owned()]));

        // "admin:wrong"
        let response = app
            .oneshot(admin_page_request(Some("Basic YWRtaW46d3Jvbmc=")))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn settings_api_does_not_accept_basic_auth() {
        let state = test_support::test_state("http://127.0.0.1:9/webhook", MemorySettingsStore::new());
        let app = build_app(state, AuthState::with_keys(vec!["k".to_owned()]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/settings")
                    .header("authorization", "Basic YWRtaW46aw==")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_routes_require_bearer_token() {
        let state = test_support::test_state("http://127.0.0.1:9/webhook", MemorySettingsStore::new());
        let app = build_app(state, AuthState::with_keys(vec!["k".to_owned()]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/settings")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
