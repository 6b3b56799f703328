//! # Todoboard API Server
//!
//! Todo board backend: signup/signin with bearer JWTs, todos stamped with
//! the day's weather, comments, managers and audited admin routes.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=... DATABASE_URL=postgresql://... cargo run -p todoboard-api
//! STORE_BACKEND=memory JWT_SECRET=... cargo run -p todoboard-api
//! ```

use std::sync::Arc;

use todoboard_api::{
    app::{build_router, AppState},
    config::{Config, StoreBackend},
};
use todoboard_shared::{
    db::{
        migrations::{ensure_database_exists, get_migration_status, run_migrations},
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::{memory::MemoryStore, postgres::PgStore, Store},
    weather::HttpWeatherClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "todoboard_api=debug,todoboard_shared=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(
        "Todoboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let passwords = config.password.encoder()?;
    tracing::info!(scheme = %passwords.scheme(), "Password hashing configured");
    let weather = Arc::new(HttpWeatherClient::new(
        config.weather.url.clone(),
        config.weather.timeout(),
    )?);

    let (store, pool) = match config.database.backend {
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database.url).await?;

            let pool = create_pool(DatabaseConfig::new(
                config.database.url.clone(),
                config.database.max_connections,
            ))
            .await?;
            run_migrations(&pool).await?;

            let status = get_migration_status(&pool).await?;
            tracing::info!(
                applied = status.applied_migrations,
                pending = status.pending_migrations,
                latest = ?status.latest_version,
                "Database schema ready"
            );

            let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));
            (store, Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            (store, None)
        }
    };

    let bind_address = config.bind_address();
    let state = AppState::new(store, weather, passwords, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
