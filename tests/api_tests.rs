//! HTTP API integration tests
//!
//! 使用 actix-web 测试工具驱动完整路由 + 临时 SQLite 存储。

use std::sync::{Arc, Once};

use actix_web::{App, test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use clicktally::api::services::{
    AppStartTime, ClickResponse, ErrorDetail, GroupClickResponse, api_routes, frontend_routes,
    health_routes,
};
use clicktally::config::init_config;
use clicktally::services::CounterService;
use clicktally::storage::CounterStore;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_test_state() -> (Arc<CounterStore>, Arc<CounterService>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let store = Arc::new(
        CounterStore::new(&db_url, "sqlite")
            .await
            .expect("Failed to create store"),
    );
    let service = Arc::new(CounterService::new(store.clone()));

    (store, service, temp_dir)
}

// =============================================================================
// Click API 测试
// =============================================================================

#[actix_web::test]
async fn test_click_endpoint_returns_counts() {
    let (_store, service, _dir) = create_test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .service(api_routes()),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/click/alice")
        .set_json(json!({"group_name": "blue"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: ClickResponse = test::read_body_json(resp).await;
    assert_eq!(body.user_id, "alice");
    assert_eq!(body.click_count, 1);
    assert_eq!(body.group_name.as_deref(), Some("blue"));
    assert_eq!(body.group_total_click_count, 1);
    assert!(body.updated_at.is_some());
}

#[actix_web::test]
async fn test_click_sequence_accumulates() {
    let (_store, service, _dir) = create_test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .service(api_routes()),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/click/alice")
            .set_json(json!({"group_name": "blue"}))
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::post()
        .uri("/api/click/bob")
        .set_json(json!({"group_name": "blue"}))
        .to_request();
    test::call_service(&app, req).await;

    // alice 个人 2 次，blue 总计 3 次
    let req = test::TestRequest::get().uri("/api/clicks/alice").to_request();
    let body: ClickResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.click_count, 2);
    assert_eq!(body.group_total_click_count, 3);

    let req = test::TestRequest::get()
        .uri("/api/clicks/group/blue")
        .to_request();
    let body: GroupClickResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.group_name, "blue");
    assert_eq!(body.total_click_count, 3);
}

#[actix_web::test]
async fn test_unknown_user_returns_404_detail() {
    let (_store, service, _dir) = create_test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .service(api_routes()),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/clicks/ghost").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // 错误体固定 {"detail": "..."} 形状
    let body: ErrorDetail = test::read_body_json(resp).await;
    assert_eq!(body.detail, "User not found");
}

#[actix_web::test]
async fn test_unknown_group_returns_404_detail() {
    let (_store, service, _dir) = create_test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .service(api_routes()),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/clicks/group/nowhere")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: ErrorDetail = test::read_body_json(resp).await;
    assert_eq!(body.detail, "Group not found");
}

#[actix_web::test]
async fn test_register_user_is_idempotent() {
    let (_store, service, _dir) = create_test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .service(api_routes()),
    )
    .await;

    let payload = json!({"user_id": "dave", "group_name": "red"});

    let req = test::TestRequest::post()
        .uri("/api/user")
        .set_json(&payload)
        .to_request();
    let first: ClickResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first.click_count, 0);
    assert_eq!(first.group_name.as_deref(), Some("red"));
    assert_eq!(first.group_total_click_count, 0);

    let req = test::TestRequest::post()
        .uri("/api/user")
        .set_json(&payload)
        .to_request();
    let second: ClickResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second.click_count, 0);
    assert_eq!(second.updated_at, first.updated_at);
}

#[actix_web::test]
async fn test_register_does_not_alter_existing_user() {
    let (_store, service, _dir) = create_test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .service(api_routes()),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/click/eve")
        .set_json(json!({"group_name": "g1"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/user")
        .set_json(json!({"user_id": "eve", "group_name": "g2"}))
        .to_request();
    let body: ClickResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.click_count, 1);
    assert_eq!(body.group_name.as_deref(), Some("g1"));
}

#[actix_web::test]
async fn test_click_rejects_missing_group_name() {
    let (_store, service, _dir) = create_test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .service(api_routes()),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/click/alice")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

// =============================================================================
// Health 路由测试
// =============================================================================

#[actix_web::test]
async fn test_health_check_reports_healthy() {
    let (store, _service, _dir) = create_test_state().await;
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(store))
            .app_data(web::Data::new(app_start_time))
            .service(health_routes()),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["backend"], "sqlite");
    assert_eq!(body["checks"]["storage"]["users_count"], 0);
}

#[actix_web::test]
async fn test_readiness_and_liveness() {
    let (store, _service, _dir) = create_test_state().await;
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(store))
            .app_data(web::Data::new(app_start_time))
            .service(health_routes()),
    )
    .await;

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(body, "OK");

    let req = test::TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);
}

// =============================================================================
// 前端路由测试
// =============================================================================

#[actix_web::test]
async fn test_landing_page_serves_html() {
    let app = test::init_service(App::new().service(frontend_routes())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.starts_with("text/html"));

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    // 版本占位符已被替换
    assert!(html.contains(env!("CARGO_PKG_VERSION")));
    assert!(!html.contains("%CLICKTALLY_VERSION%"));
}

#[actix_web::test]
async fn test_missing_static_file_returns_404() {
    let app = test::init_service(App::new().service(frontend_routes())).await;

    let req = test::TestRequest::get()
        .uri("/static/no-such-file.js")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
