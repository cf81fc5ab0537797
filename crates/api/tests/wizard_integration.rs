//! Integration tests for the setup wizard server.

mod common;

use axum::http::{Method, StatusCode};
use cms_api::services::ensure_blank_config;
use common::{
    get, get_with_cookie, json_request, location, parse_response_body, set_cookie,
    TestWorkspace, COMPLETE_CONFIG,
};
use domain::services::SETUP_COMPONENTS;
use serde_json::json;
use shared::setup_check::{check_setup, SetupStatus};
use tower::ServiceExt;

fn setup_request() -> serde_json::Value {
    json!({
        "DB_TYPE": "mongodb",
        "DB_HOST": "localhost",
        "DB_PORT": 27017,
        "DB_NAME": "sveltycms",
        "DB_USER": "admin",
        "DB_PASSWORD": "hunter22"
    })
}

// ============================================================================
// Landing
// ============================================================================

#[tokio::test]
async fn test_landing_redirects_to_login_when_complete() {
    let workspace = TestWorkspace::new();
    workspace.write_private_config(COMPLETE_CONFIG);

    let response = workspace.wizard_app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_landing_keeps_live_session_when_complete() {
    let workspace = TestWorkspace::new();
    workspace.write_private_config(COMPLETE_CONFIG);

    let response = workspace
        .wizard_app()
        .oneshot(get_with_cookie("/", "auth_session=live-admin-session"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
    assert!(set_cookie(&response).is_none());
}

#[tokio::test]
async fn test_landing_returns_page_data() {
    let workspace = TestWorkspace::new();
    workspace.write_workspace_metadata("0.5.2", &["en", "de", "fr"]);
    ensure_blank_config(&workspace.private_config_path())
        .await
        .unwrap();

    let response = workspace
        .wizard_app()
        .oneshot(get_with_cookie(
            "/",
            "theme=dark; darkMode=true; auth_session=stale",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).expect("stale session should be cleared");
    assert!(cookie.starts_with("auth_session=;"));

    let body = parse_response_body(response).await;
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["darkMode"], true);
    assert_eq!(body["availableLanguages"], json!(["en", "de", "fr"]));
    assert_eq!(body["settings"]["PKG_VERSION"], "0.5.2");
}

#[tokio::test]
async fn test_landing_defaults_without_cookies_or_metadata() {
    let workspace = TestWorkspace::new();

    let response = workspace.wizard_app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["theme"], "light");
    assert_eq!(body["darkMode"], false);
    assert_eq!(body["availableLanguages"], json!(["en", "de"]));
    assert_eq!(body["settings"]["PKG_VERSION"], env!("CARGO_PKG_VERSION"));
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_status_needs_setup() {
    let workspace = TestWorkspace::new();
    ensure_blank_config(&workspace.private_config_path())
        .await
        .unwrap();

    let response = workspace
        .wizard_app()
        .oneshot(get("/api/setup/status"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["needsSetup"], true);
    assert!(body["message"].as_str().unwrap().contains("JWT_SECRET_KEY"));
}

#[tokio::test]
async fn test_status_complete() {
    let workspace = TestWorkspace::new();
    workspace.write_private_config(COMPLETE_CONFIG);

    let response = workspace
        .wizard_app()
        .oneshot(get("/api/setup/status"))
        .await
        .unwrap();

    let body = parse_response_body(response).await;
    assert_eq!(body["needsSetup"], false);
}

// ============================================================================
// Components
// ============================================================================

#[tokio::test]
async fn test_components_manifest() {
    let workspace = TestWorkspace::new();
    workspace.write_modules("apps/setup-wizard/build/components", SETUP_COMPONENTS);

    let response = workspace
        .wizard_app()
        .oneshot(get("/api/setup/components"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let components = body["components"].as_array().unwrap();
    assert_eq!(components.len(), SETUP_COMPONENTS.len());
    assert_eq!(components[0]["name"], "WelcomeModal");
    assert!(components[0]["size"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_components_missing_module_then_retry() {
    let workspace = TestWorkspace::new();
    workspace.write_modules(
        "apps/setup-wizard/build/components",
        &SETUP_COMPONENTS[..SETUP_COMPONENTS.len() - 1],
    );
    let app = workspace.wizard_app();

    let response = app
        .clone()
        .oneshot(get("/api/setup/components"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    workspace.write_modules("apps/setup-wizard/build/components", SETUP_COMPONENTS);

    let response = app.oneshot(get("/api/setup/components")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Completion
// ============================================================================

#[tokio::test]
async fn test_complete_setup_writes_config() {
    let workspace = TestWorkspace::new();
    ensure_blank_config(&workspace.private_config_path())
        .await
        .unwrap();

    let response = workspace
        .wizard_app()
        .oneshot(json_request(
            Method::POST,
            "/api/setup/complete",
            setup_request(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["redirectUrl"], "/login");

    assert_eq!(
        check_setup(&workspace.private_config_path()),
        SetupStatus::Complete
    );
    let written = workspace.read_private_config();
    assert!(written.contains("\tDB_HOST: 'localhost',\n"));
    assert!(!written.contains("JWT_SECRET_KEY: ''"));
}

#[tokio::test]
async fn test_complete_setup_then_cms_passes_and_wizard_redirects() {
    let workspace = TestWorkspace::new();
    let wizard = workspace.wizard_app();

    let response = wizard
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/setup/complete",
            setup_request(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = wizard.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");

    let response = workspace
        .cms_app()
        .oneshot(get("/api/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_complete_setup_conflict_when_already_complete() {
    let workspace = TestWorkspace::new();
    workspace.write_private_config(COMPLETE_CONFIG);

    let response = workspace
        .wizard_app()
        .oneshot(json_request(
            Method::POST,
            "/api/setup/complete",
            setup_request(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(workspace.read_private_config(), COMPLETE_CONFIG);
}

#[tokio::test]
async fn test_complete_setup_validation_error() {
    let workspace = TestWorkspace::new();
    let mut request = setup_request();
    request["DB_TYPE"] = json!("oracle");

    let response = workspace
        .wizard_app()
        .oneshot(json_request(Method::POST, "/api/setup/complete", request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "db_type");
    assert_eq!(
        body["details"][0]["message"],
        "Database type must be one of: mongodb, mariadb, postgresql"
    );
    assert!(!workspace.private_config_path().exists());
}

#[tokio::test]
async fn test_complete_setup_conflict_precedes_validation() {
    let workspace = TestWorkspace::new();
    workspace.write_private_config(COMPLETE_CONFIG);
    let mut request = setup_request();
    request["DB_TYPE"] = json!("oracle");

    let response = workspace
        .wizard_app()
        .oneshot(json_request(Method::POST, "/api/setup/complete", request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(workspace.read_private_config(), COMPLETE_CONFIG);
}

#[tokio::test]
async fn test_concurrent_completions_write_once() {
    let workspace = TestWorkspace::new();
    let app = workspace.wizard_app();

    let mut second_request = setup_request();
    second_request["DB_NAME"] = json!("other");

    let (first, second) = tokio::join!(
        app.clone().oneshot(json_request(
            Method::POST,
            "/api/setup/complete",
            setup_request(),
        )),
        app.clone().oneshot(json_request(
            Method::POST,
            "/api/setup/complete",
            second_request,
        )),
    );

    let mut statuses = vec![first.unwrap().status(), second.unwrap().status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(check_setup(&workspace.private_config_path()), SetupStatus::Complete);
}
