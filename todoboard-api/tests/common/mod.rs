/// Common test utilities for integration tests
///
/// Builds the full router over an in-memory store with a fixed weather
/// provider, so the HTTP surface can be exercised without PostgreSQL or
/// network access.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use todoboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use todoboard_shared::{store::memory::MemoryStore, weather::StaticWeather};
use tower::Service as _;

pub const PASSWORD: &str = "Passw0rd";
pub const WEATHER: &str = "Sunny";

pub struct TestContext {
    pub app: Router,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STORE_BACKEND", "memory"),
            ("JWT_SECRET", "integration-test-secret-at-least-32-bytes"),
            ("BCRYPT_COST", "4"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
            .expect("test config");
        let passwords = config.password.encoder().expect("password encoder");

        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(StaticWeather::new(WEATHER)),
            passwords,
            config.clone(),
        );

        Self {
            app: build_router(state),
            config,
        }
    }

    /// Sends a request, returning the status and the body parsed as JSON
    /// (`Value::Null` for an empty body)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    /// Signs up a user and returns their `Bearer ...` token
    pub async fn signup(&self, email: &str, role: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/v1/auth/signup",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": PASSWORD,
                    "userRole": role,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        body["bearerToken"].as_str().unwrap().to_string()
    }

    /// Creates a todo and returns its JSON
    pub async fn create_todo(&self, token: &str, title: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/v1/todos",
                Some(token),
                Some(serde_json::json!({ "title": title, "contents": "contents" })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "create todo failed: {}", body);
        body
    }
}
