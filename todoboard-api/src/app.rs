/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todoboard_api::{app::AppState, config::Config};
/// use todoboard_shared::{store::memory::MemoryStore, weather::StaticWeather};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let passwords = config.password.encoder()?;
/// let state = AppState::new(
///     Arc::new(MemoryStore::new()),
///     Arc::new(StaticWeather::new("Sunny")),
///     passwords,
///     config,
/// );
/// let app = todoboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    error::ApiError,
    middleware::{admin_audit::admin_audit_layer, security::SecurityHeadersLayer},
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state, Next},
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use todoboard_shared::{
    auth::{
        authorization::require_admin,
        middleware::{authenticate, AuthUser},
        password::PasswordEncoder,
    },
    store::Store,
    weather::WeatherProvider,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL or in-memory)
    pub store: Arc<dyn Store>,

    /// Source of today's weather for new todos
    pub weather: Arc<dyn WeatherProvider>,

    /// Hashes new passwords and checks them at signin (bcrypt or Argon2id)
    pub passwords: PasswordEncoder,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        weather: Arc<dyn WeatherProvider>,
        passwords: PasswordEncoder,
        config: Config,
    ) -> Self {
        Self {
            store,
            weather,
            passwords,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                 # Health check (public)
/// └── /v1/
///     ├── /auth/                              # Public
///     │   ├── POST /signup
///     │   └── POST /signin
///     ├── /users                              # JWT
///     │   ├── GET  /:userId
///     │   └── PUT  /
///     ├── /todos                              # JWT
///     │   ├── POST /
///     │   ├── GET  /?page&size
///     │   ├── GET  /:todoId
///     │   ├── POST|GET /:todoId/comments
///     │   ├── POST|GET /:todoId/managers
///     │   └── DELETE   /:todoId/managers/:managerId
///     └── /admin                              # JWT + ADMIN role + audit log
///         ├── PATCH  /users/:userId
///         └── DELETE /comments/:commentId
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Authentication, role check and audit logging (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/signin", post(routes::auth::signin));

    // User-facing routes (require JWT authentication)
    let user_routes = Router::new()
        .route("/users", put(routes::users::change_password))
        .route("/users/:user_id", get(routes::users::get_user))
        .route(
            "/todos",
            post(routes::todos::save_todo).get(routes::todos::get_todos),
        )
        .route("/todos/:todo_id", get(routes::todos::get_todo))
        .route(
            "/todos/:todo_id/comments",
            post(routes::comments::save_comment).get(routes::comments::get_comments),
        )
        .route(
            "/todos/:todo_id/managers",
            post(routes::managers::save_manager).get(routes::managers::get_managers),
        )
        .route(
            "/todos/:todo_id/managers/:manager_id",
            delete(routes::managers::delete_manager),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_layer));

    // Admin routes (JWT, then ADMIN role, then audit logging around the handler)
    let admin_routes = Router::new()
        .route("/users/:user_id", patch(routes::admin::change_user_role))
        .route("/comments/:comment_id", delete(routes::admin::delete_comment))
        .layer(from_fn(admin_audit_layer))
        .layer(from_fn(require_admin_layer))
        .layer(from_fn_with_state(state.clone(), jwt_auth_layer));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .merge(user_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the bearer token from the Authorization header, then injects
/// [`AuthUser`] into request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = authenticate(req.headers(), state.jwt_secret())?;

    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

/// Rejects callers without the ADMIN role. Runs inside [`jwt_auth_layer`].
async fn require_admin_layer(req: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    require_admin(auth_user)?;

    Ok(next.run(req).await)
}
