//! HTTP-level integration tests for login and the refresh-token endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, login, post_auth, post_json, post_json_auth, post_with_authorization, register,
    register_and_login, TEST_JWT_SECRET,
};
use chirpy_api::auth::jwt::validate_access_token;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Login returns the user fields plus an access token and a refresh token.
#[tokio::test]
async fn test_login_returns_token_pair() {
    let app = common::build_test_app();
    let user = register(app.clone(), "walt@breakingbad.com").await;

    let json = login(app, "walt@breakingbad.com").await;

    assert_eq!(json["id"], user["id"]);
    assert_eq!(json["email"], "walt@breakingbad.com");
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
    assert!(json.get("hashed_password").is_none());

    let token = json["token"].as_str().expect("token must be a string");
    let user_id = validate_access_token(token, TEST_JWT_SECRET).expect("token must validate");
    assert_eq!(user_id.to_string(), user["id"].as_str().unwrap());

    let refresh = json["refresh_token"].as_str().expect("refresh_token must be a string");
    assert_eq!(refresh.len(), 64);
}

#[tokio::test]
async fn test_login_wrong_password_returns_401() {
    let app = common::build_test_app();
    register(app.clone(), "walt@breakingbad.com").await;

    let body = serde_json::json!({ "email": "walt@breakingbad.com", "password": "wrong" });
    let response = post_json(app, "/api/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Incorrect email or password");
}

/// An unknown email is indistinguishable from a wrong password.
#[tokio::test]
async fn test_login_unknown_email_returns_401() {
    let app = common::build_test_app();

    let body = serde_json::json!({ "email": "nobody@example.com", "password": "x" });
    let response = post_json(app, "/api/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Incorrect email or password");
}

/// Each login mints a new refresh token; earlier ones keep working.
#[tokio::test]
async fn test_second_login_does_not_invalidate_first_refresh_token() {
    let app = common::build_test_app();
    let first = register_and_login(app.clone(), "jesse@breakingbad.com").await;
    let second = login(app.clone(), "jesse@breakingbad.com").await;

    assert_ne!(first["refresh_token"], second["refresh_token"]);

    let response = post_auth(app, "/api/refresh", first["refresh_token"].as_str().unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Refresh / revoke
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_refresh_returns_new_access_token() {
    let app = common::build_test_app();
    let session = register_and_login(app.clone(), "saul@bettercall.com").await;
    let refresh = session["refresh_token"].as_str().unwrap();

    let response = post_auth(app.clone(), "/api/refresh", refresh).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token must be a string");
    assert!(validate_access_token(token, TEST_JWT_SECRET).is_ok());

    // No rotation: the same refresh token can be exchanged again.
    let response = post_auth(app, "/api/refresh", refresh).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_after_revoke_returns_401() {
    let app = common::build_test_app();
    let session = register_and_login(app.clone(), "saul@bettercall.com").await;
    let refresh = session["refresh_token"].as_str().unwrap();

    let response = post_auth(app.clone(), "/api/revoke", refresh).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_auth(app.clone(), "/api/refresh", refresh).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired refresh token");

    // Revoking again still succeeds.
    let response = post_auth(app, "/api/revoke", refresh).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_refresh_unknown_token_returns_404() {
    let app = common::build_test_app();

    let response = post_auth(app.clone(), "/api/refresh", "deadbeef").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_auth(app, "/api/revoke", "deadbeef").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_refresh_requires_bearer_header() {
    let app = common::build_test_app();

    let response = common::post_empty(app.clone(), "/api/refresh").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing Authorization header");

    let response = post_with_authorization(app, "/api/refresh", "Token abc").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
}

// ---------------------------------------------------------------------------
// Token confusion
// ---------------------------------------------------------------------------

/// A refresh token presented where an access token is required is rejected.
#[tokio::test]
async fn test_refresh_token_cannot_authorize_chirp_creation() {
    let app = common::build_test_app();
    let session = register_and_login(app.clone(), "walt@breakingbad.com").await;
    let refresh = session["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "body": "I am the one who knocks" });
    let response = post_json_auth(app, "/api/chirps", refresh, body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An access token is not a refresh token.
#[tokio::test]
async fn test_access_token_cannot_be_refreshed() {
    let app = common::build_test_app();
    let session = register_and_login(app.clone(), "walt@breakingbad.com").await;
    let token = session["token"].as_str().unwrap();

    let response = post_auth(app, "/api/refresh", token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A token signed with a different secret is rejected.
#[tokio::test]
async fn test_foreign_signed_token_returns_401() {
    let app = common::build_test_app();
    let user = register(app.clone(), "walt@breakingbad.com").await;
    let user_id = user["id"].as_str().unwrap().parse().unwrap();

    let forged = chirpy_api::auth::jwt::issue_access_token(
        user_id,
        "some-other-secret",
        chrono::Duration::hours(1),
    )
    .unwrap();

    let body = serde_json::json!({ "body": "forged" });
    let response = post_json_auth(app, "/api/chirps", &forged, body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}
