//! HTTP-level integration tests for `/admin` and the `/app` file server.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, get, post_empty, post_json, post_json_auth, register_and_login};

fn dev_config() -> chirpy_api::config::ServerConfig {
    let mut config = common::test_config();
    config.platform = "dev".to_string();
    config
}

#[tokio::test]
async fn test_reset_is_forbidden_outside_dev() {
    let app = common::build_test_app();
    register_and_login(app.clone(), "walt@breakingbad.com").await;

    let response = post_empty(app.clone(), "/admin/reset").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The user survived.
    let body = serde_json::json!({
        "email": "walt@breakingbad.com",
        "password": common::TEST_PASSWORD,
    });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Reset deletes users with their chirps and refresh tokens.
#[tokio::test]
async fn test_reset_in_dev_deletes_everything() {
    let app = common::build_test_app_with(dev_config());
    let session = register_and_login(app.clone(), "walt@breakingbad.com").await;
    let token = session["token"].as_str().unwrap();
    let body = serde_json::json!({ "body": "hi" });
    let response = post_json_auth(app.clone(), "/api/chirps", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_empty(app.clone(), "/admin/reset").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["msg"],
        "Metrics and users table were reset"
    );

    let response = get(app.clone(), "/api/chirps").await;
    assert_eq!(body_json(response).await, serde_json::json!([]));

    let refresh = session["refresh_token"].as_str().unwrap();
    let response = common::post_auth(app.clone(), "/api/refresh", refresh).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The access token is still well-formed but its user is gone.
    let body = serde_json::json!({ "body": "hi" });
    let response = post_json_auth(app, "/api/chirps", token, body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_metrics_counts_file_server_hits() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("index.html"), "<h1>Welcome to Chirpy</h1>").unwrap();

    let mut config = dev_config();
    config.fileserver_root = root.path().to_path_buf();
    let (app, state) = common::build_test_app_with_state(config);

    let response = get(app.clone(), "/app/index.html").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Welcome to Chirpy"));

    // Misses are counted too.
    let response = get(app.clone(), "/app/missing.txt").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // API traffic is not.
    get(app.clone(), "/api/healthz").await;
    assert_eq!(state.hits.get(), 2);

    let response = get(app.clone(), "/admin/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("Welcome, Chirpy Admin"));
    assert!(html.contains("Chirpy has been visited 2 times!"));

    let response = post_empty(app, "/admin/reset").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.hits.get(), 0);
}
