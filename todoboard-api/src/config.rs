/// Configuration management for the API server
///
/// Configuration is read from environment variables (a `.env` file is loaded
/// first when present).
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `PRODUCTION`: Enables HSTS and other production headers (default: false)
/// - `STORE_BACKEND`: `postgres` or `memory` (default: postgres)
/// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `JWT_SECRET`: Secret key for JWT signing (required, at least 32 chars)
/// - `JWT_EXPIRATION_MINUTES`: Token lifetime (default: 60)
/// - `PASSWORD_SCHEME`: `bcrypt` or `argon2id` (default: bcrypt)
/// - `BCRYPT_COST`: bcrypt work factor (default: 10)
/// - `WEATHER_API_URL`: Weather feed URL
/// - `WEATHER_TIMEOUT_SECONDS`: Weather request timeout (default: 5)
/// - `LOG_FORMAT`: `json` for JSON log lines, anything else for text
/// - `RUST_LOG`: Log filter (default: todoboard_api=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use todoboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr, time::Duration};
use todoboard_shared::{
    auth::password::{PasswordEncoder, PasswordScheme, DEFAULT_BCRYPT_COST},
    weather::DEFAULT_WEATHER_API_URL,
};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub weather: WeatherConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `["*"]` allows any origin
    pub cors_origins: Vec<String>,

    /// Production mode (adds HSTS)
    pub production: bool,
}

/// Which store implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("Unknown STORE_BACKEND: {}", other),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,

    /// PostgreSQL connection URL, empty for the memory backend
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Token lifetime in minutes
    pub expiration_minutes: i64,
}

impl JwtConfig {
    pub fn expiration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.expiration_minutes)
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// `bcrypt` or `argon2id`
    pub scheme: String,

    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    pub fn encoder(&self) -> anyhow::Result<PasswordEncoder> {
        let scheme: PasswordScheme = self.scheme.parse()?;
        Ok(PasswordEncoder::new(scheme, self.bcrypt_cost))
    }
}

/// Weather feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` is missing or shorter than 32 characters
    /// - `DATABASE_URL` is missing while the postgres backend is selected
    /// - A numeric or enumerated variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_port = var("API_PORT", "8080")
            .parse::<u16>()
            .context("API_PORT must be a port number")?;

        let cors_origins = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let production = var("PRODUCTION", "false")
            .parse::<bool>()
            .context("PRODUCTION must be true or false")?;

        let backend: StoreBackend = var("STORE_BACKEND", "postgres").parse()?;

        let database_url = match backend {
            StoreBackend::Postgres => lookup("DATABASE_URL").ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL environment variable is required")
            })?,
            StoreBackend::Memory => lookup("DATABASE_URL").unwrap_or_default(),
        };

        let max_connections = var("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a number")?;

        let jwt_secret = lookup("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let expiration_minutes = var("JWT_EXPIRATION_MINUTES", "60")
            .parse::<i64>()
            .context("JWT_EXPIRATION_MINUTES must be a number")?;

        if expiration_minutes <= 0 {
            anyhow::bail!("JWT_EXPIRATION_MINUTES must be positive");
        }

        let password = PasswordConfig {
            scheme: var("PASSWORD_SCHEME", PasswordScheme::default().as_str()),
            bcrypt_cost: var("BCRYPT_COST", &DEFAULT_BCRYPT_COST.to_string())
                .parse::<u32>()
                .context("BCRYPT_COST must be a number")?,
        };
        // Fail at startup rather than on the first signup
        password.encoder()?;

        let weather = WeatherConfig {
            url: var("WEATHER_API_URL", DEFAULT_WEATHER_API_URL),
            timeout_seconds: var("WEATHER_TIMEOUT_SECONDS", "5")
                .parse::<u64>()
                .context("WEATHER_TIMEOUT_SECONDS must be a number")?,
        };

        Ok(Self {
            api: ApiConfig {
                host: var("API_HOST", "0.0.0.0"),
                port: api_port,
                cors_origins,
                production,
            },
            database: DatabaseConfig {
                backend,
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_minutes,
            },
            password,
            weather,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
