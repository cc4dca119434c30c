use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use verithrax_core::{MemorySettingsStore, SettingKey};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::{build_app, test_support::test_state};
use crate::middleware::AuthState;

async fn post_hook(app: axum::Router, body: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/hooks/product-saved")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&bytes).expect("json parse"))
}

fn blue_mug_body() -> Value {
    json!({
        "post_id": 42,
        "post_type": "product",
        "title": "Blue Mug",
        "content": "<p>A sturdy mug.</p>",
        "update": false,
        "product": {
            "id": 42,
            "regular_price": "12.00",
            "price_html": "<span>$12.00</span>",
            "permalink": "https://shop.example.com/product/blue-mug/",
            "image_url": "https://shop.example.com/uploads/blue-mug.jpg",
            "attributes": [
                {"kind": "taxonomy", "taxonomy": "pa_color", "label": "Color", "terms": ["Blue"]}
            ]
        }
    })
}

#[tokio::test]
async fn product_save_with_inline_snapshot_posts_once_and_accepts() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(body_string_contains(r#""post_id":42"#))
        .and(body_string_contains(r#""action":"created""#))
        .and(body_string_contains(r#""attributes":"Color: Blue""#))
        .and(body_string_contains(r#""brand_name":"SaroGenix""#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&webhook)
        .await;

    let state = test_state(&format!("{}/webhook", webhook.uri()), MemorySettingsStore::new());
    let (status, json) = post_hook(build_app(state, AuthState::disabled()), &blue_mug_body()).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["data"]["status"], "sent");
    assert_eq!(json["data"]["delivered"], true);
}

#[tokio::test]
async fn revision_is_skipped_without_outbound_request() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&webhook)
        .await;

    let mut body = blue_mug_body();
    body["is_revision"] = json!(true);

    let state = test_state(&format!("{}/webhook", webhook.uri()), MemorySettingsStore::new());
    let (status, json) = post_hook(build_app(state, AuthState::disabled()), &body).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["data"]["status"], "skipped");
    assert_eq!(json["data"]["reason"], "revision");
}

#[tokio::test]
async fn non_product_reports_post_type() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&webhook)
        .await;

    let body = json!({"post_id": 7, "post_type": "page", "title": "About"});
    let state = test_state(&format!("{}/webhook", webhook.uri()), MemorySettingsStore::new());
    let (status, json) = post_hook(build_app(state, AuthState::disabled()), &body).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["data"]["reason"], "not_product");
    assert_eq!(json["data"]["post_type"], "page");
}

#[tokio::test]
async fn failed_delivery_still_answers_accepted() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&webhook)
        .await;

    let state = test_state(&format!("{}/webhook", webhook.uri()), MemorySettingsStore::new());
    let (status, json) = post_hook(build_app(state, AuthState::disabled()), &blue_mug_body()).await;

    // A 503 is still a completed exchange; nothing is surfaced to the caller.
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["data"]["status"], "sent");
}

#[tokio::test]
async fn unreachable_webhook_still_answers_accepted() {
    let state = test_state("http://127.0.0.1:9/webhook", MemorySettingsStore::new());
    let (status, json) = post_hook(build_app(state, AuthState::disabled()), &blue_mug_body()).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["data"]["status"], "sent");
    assert_eq!(json["data"]["delivered"], false);
}

#[tokio::test]
async fn mismatched_snapshot_id_is_rejected() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&webhook)
        .await;

    let mut body = blue_mug_body();
    body["product"]["id"] = json!(43);

    let state = test_state(&format!("{}/webhook", webhook.uri()), MemorySettingsStore::new());
    let (status, json) = post_hook(build_app(state, AuthState::disabled()), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn product_is_read_from_store_api_when_no_snapshot_given() {
    let store_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Blue Mug",
            "permalink": "https://shop.example.com/product/blue-mug/",
            "description": "<p>A sturdy mug.</p>",
            "regular_price": "12.00",
            "sale_price": "",
            "price_html": "<span>$12.00</span>",
            "images": [{"id": 1, "src": "https://shop.example.com/uploads/blue-mug.jpg", "alt": ""}],
            "attributes": [{"id": 3, "name": "Color", "slug": "pa_color", "position": 0, "options": ["Blue"]}]
        })))
        .expect(1)
        .mount(&store_api)
        .await;

    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(body_string_contains(r#""attributes":"Color: Blue""#))
        .and(body_string_contains(r#""regular_price":"12.00""#))
        .and(body_string_contains(r#""wp_username":"editor""#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&webhook)
        .await;

    let store = MemorySettingsStore::with_values([
        (SettingKey::WpBaseUrl, store_api.uri().as_str()),
        (SettingKey::WpUsername, "editor"),
        (SettingKey::WpAppPassword, "abcd efgh"),
    ]);
    let state = test_state(&format!("{}/webhook", webhook.uri()), store);

    let mut body = blue_mug_body();
    body.as_object_mut().expect("object").remove("product");
    body["update"] = json!(true);

    let (status, json) = post_hook(build_app(state, AuthState::disabled()), &body).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["data"]["status"], "sent");
}

#[tokio::test]
async fn trigger_requires_bearer_token_when_auth_enabled() {
    let state = test_state("http://127.0.0.1:9/webhook", MemorySettingsStore::new());
    let app = build_app(state, AuthState::with_keys(vec!["secret".to_owned()]));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/hooks/product-saved")
                .header("content-type", "application/json")
                .header("authorization", "Bearer wrong")
                .body(Body::from(blue_mug_body().to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
