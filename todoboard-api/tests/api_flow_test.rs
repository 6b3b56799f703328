/// End-to-end tests for the Todoboard API
///
/// Every request goes through the full router (auth layer, admin layer,
/// audit layer, security headers) over an in-memory store.

mod common;

use axum::http::StatusCode;
use common::{TestContext, PASSWORD, WEATHER};
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn test_signup_and_signin() {
    let ctx = TestContext::new();

    let token = ctx.signup("user@example.com", "USER").await;
    assert!(token.starts_with("Bearer "));

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "user@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["bearerToken"].as_str().unwrap().starts_with("Bearer "));
}

#[tokio::test]
async fn test_signup_duplicate_email_is_rejected() {
    let ctx = TestContext::new();
    ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/auth/signup",
            None,
            Some(json!({ "email": "user@example.com", "password": PASSWORD, "userRole": "USER" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_signup_invalid_role_is_rejected() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .send(
            "POST",
            "/v1/auth/signup",
            None,
            Some(json!({ "email": "user@example.com", "password": PASSWORD, "userRole": "ROOT" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_invalid_email_is_validation_error() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/auth/signup",
            None,
            Some(json!({ "email": "not-an-email", "password": PASSWORD, "userRole": "USER" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "email");
}

#[tokio::test]
async fn test_signin_failures() {
    let ctx = TestContext::new();
    ctx.signup("user@example.com", "USER").await;

    let (status, _) = ctx
        .send(
            "POST",
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send(
            "POST",
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "user@example.com", "password": "Wrong1234" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_layer_rejections() {
    let ctx = TestContext::new();

    let (status, _) = ctx.send("GET", "/v1/todos", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.send("GET", "/v1/todos", Some("Token abc"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send("GET", "/v1/todos", Some("Bearer not.a.jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_todo_flow() {
    let ctx = TestContext::new();
    let token = ctx.signup("user@example.com", "USER").await;

    let first = ctx.create_todo(&token, "first").await;
    assert_eq!(first["weather"], WEATHER);
    assert_eq!(first["user"]["email"], "user@example.com");
    let second = ctx.create_todo(&token, "second").await;

    let uri = format!("/v1/todos/{}", first["id"]);
    let (status, body) = ctx.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "first");

    let (status, body) = ctx
        .send("GET", "/v1/todos?page=1&size=1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["content"][0]["id"], second["id"]);

    let (status, _) = ctx.send("GET", "/v1/todos/9999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .send("GET", "/v1/todos?size=1000", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_user() {
    let ctx = TestContext::new();
    let token = ctx.signup("user@example.com", "USER").await;
    let todo = ctx.create_todo(&token, "t").await;
    let user_id = &todo["user"]["id"];

    let (status, body) = ctx
        .send("GET", &format!("/v1/users/{}", user_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": user_id, "email": "user@example.com" }));

    let (status, _) = ctx.send("GET", "/v1/users/9999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_change_password() {
    let ctx = TestContext::new();
    let token = ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send(
            "PUT",
            "/v1/users",
            Some(&token),
            Some(json!({ "oldPassword": PASSWORD, "newPassword": "weak" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "newPassword");

    let (status, _) = ctx
        .send(
            "PUT",
            "/v1/users",
            Some(&token),
            Some(json!({ "oldPassword": PASSWORD, "newPassword": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send(
            "PUT",
            "/v1/users",
            Some(&token),
            Some(json!({ "oldPassword": "Wrong1234", "newPassword": "NewPassw0rd" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send(
            "PUT",
            "/v1/users",
            Some(&token),
            Some(json!({ "oldPassword": PASSWORD, "newPassword": "NewPassw0rd" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .send(
            "POST",
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "user@example.com", "password": "NewPassw0rd" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_comment_flow() {
    let ctx = TestContext::new();
    let owner = ctx.signup("owner@example.com", "USER").await;
    let other = ctx.signup("other@example.com", "USER").await;
    let todo = ctx.create_todo(&owner, "t").await;
    let uri = format!("/v1/todos/{}/comments", todo["id"]);

    let (status, first) = ctx
        .send("POST", &uri, Some(&owner), Some(json!({ "contents": "first" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["user"]["email"], "owner@example.com");

    let (status, _) = ctx
        .send("POST", &uri, Some(&other), Some(json!({ "contents": "second" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx.send("GET", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["contents"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["first", "second"]);

    let (status, _) = ctx
        .send(
            "POST",
            "/v1/todos/9999/comments",
            Some(&owner),
            Some(json!({ "contents": "orphan" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manager_flow() {
    let ctx = TestContext::new();
    let owner = ctx.signup("owner@example.com", "USER").await;
    let helper = ctx.signup("helper@example.com", "USER").await;
    let todo = ctx.create_todo(&owner, "t").await;
    let owner_id = todo["user"]["id"].clone();
    let helper_id = ctx.create_todo(&helper, "h").await["user"]["id"].clone();
    let uri = format!("/v1/todos/{}/managers", todo["id"]);

    // Only the creator may assign
    let (status, _) = ctx
        .send("POST", &uri, Some(&helper), Some(json!({ "managerUserId": helper_id })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Creator cannot assign themselves
    let (status, _) = ctx
        .send("POST", &uri, Some(&owner), Some(json!({ "managerUserId": owner_id })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, manager) = ctx
        .send("POST", &uri, Some(&owner), Some(json!({ "managerUserId": helper_id })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(manager["user"]["email"], "helper@example.com");

    let (status, body) = ctx.send("GET", &uri, Some(&helper), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![manager.clone()]));

    let delete_uri = format!("{}/{}", uri, manager["id"]);
    let (status, _) = ctx.send("DELETE", &delete_uri, Some(&helper), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.send("DELETE", &delete_uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = ctx.send("GET", &uri, Some(&owner), None).await;
    assert_eq!(body, json!([]));

    let (status, _) = ctx
        .send("GET", "/v1/todos/9999/managers", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let ctx = TestContext::new();
    let owner = ctx.signup("owner@example.com", "USER").await;
    let admin = ctx.signup("admin@example.com", "ADMIN").await;
    let todo = ctx.create_todo(&owner, "t").await;
    let uri = format!("/v1/todos/{}/managers", todo["id"]);

    // Body parses but lacks a required field
    let (status, body) = ctx.send("POST", &uri, Some(&owner), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "body");
    assert!(body["details"][0]["message"]
        .as_str()
        .unwrap()
        .contains("managerUserId"));

    let (status, body) = ctx
        .send("POST", &uri, Some(&owner), Some(json!({ "managerUserId": "two" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = ctx.send("GET", "/v1/todos/abc", Some(&owner), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = ctx
        .send("GET", "/v1/todos?page=first", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    // Same format behind the admin audit layer
    let (status, body) = ctx
        .send("PATCH", "/v1/admin/users/1", Some(&admin), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let ctx = TestContext::new();
    let user = ctx.signup("user@example.com", "USER").await;

    let (status, body) = ctx
        .send("DELETE", "/v1/admin/comments/1", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, _) = ctx.send("DELETE", "/v1/admin/comments/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_deletes_comment() {
    let ctx = TestContext::new();
    let admin = ctx.signup("admin@example.com", "ADMIN").await;
    let user = ctx.signup("user@example.com", "USER").await;
    let todo = ctx.create_todo(&user, "t").await;
    let uri = format!("/v1/todos/{}/comments", todo["id"]);

    let (_, comment) = ctx
        .send("POST", &uri, Some(&user), Some(json!({ "contents": "spam" })))
        .await;

    let delete_uri = format!("/v1/admin/comments/{}", comment["id"]);
    let (status, _) = ctx.send("DELETE", &delete_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = ctx.send("GET", &uri, Some(&user), None).await;
    assert_eq!(body, json!([]));

    let (status, _) = ctx.send("DELETE", &delete_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_changes_user_role() {
    let ctx = TestContext::new();
    let admin = ctx.signup("admin@example.com", "ADMIN").await;
    let user = ctx.signup("user@example.com", "USER").await;
    let user_id = ctx.create_todo(&user, "t").await["user"]["id"].clone();
    let uri = format!("/v1/admin/users/{}", user_id);

    let (status, _) = ctx
        .send("PATCH", &uri, Some(&admin), Some(json!({ "role": "SUPER" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send("PATCH", &uri, Some(&admin), Some(json!({ "role": "admin" })))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Roles are carried in the token, so a fresh signin picks up the change
    let (_, body) = ctx
        .send(
            "POST",
            "/v1/auth/signin",
            None,
            Some(json!({ "email": "user@example.com", "password": PASSWORD })),
        )
        .await;
    let promoted = body["bearerToken"].as_str().unwrap().to_string();

    let (status, _) = ctx
        .send("DELETE", "/v1/admin/comments/9999", Some(&promoted), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers_on_responses() {
    let ctx = TestContext::new();

    let response = {
        use axum::{body::Body, http::Request};
        use tower::Service as _;

        ctx.app
            .clone()
            .call(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap()
    };

    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert!(ctx.config.api.cors_origins.contains(&"*".to_string()));
}
