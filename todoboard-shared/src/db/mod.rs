/// Database layer for Todoboard
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: schema migration runner
///
/// Repository queries live in [`crate::store::postgres`].
///
/// # Example
///
/// ```no_run
/// use todoboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::new(std::env::var("DATABASE_URL")?, 10);
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
