/// Schema migrations
///
/// The files under `todoboard-shared/migrations/` are embedded at compile
/// time. Each one is a reversible `{timestamp}_{name}.up.sql` /
/// `.down.sql` pair; only the up halves run on startup.
///
/// # Example
///
/// ```no_run
/// use todoboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use todoboard_shared::db::migrations::{get_migration_status, run_migrations};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig::new(std::env::var("DATABASE_URL")?, 5)).await?;
///     run_migrations(&pool).await?;
///
///     let status = get_migration_status(&pool).await?;
///     assert_eq!(status.pending_migrations, 0);
///     Ok(())
/// }
/// ```

use sqlx::{
    migrate::{MigrateDatabase, Migrator},
    postgres::PgPool,
    Postgres,
};
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub applied_migrations: usize,

    /// Embedded migrations not yet recorded in `_sqlx_migrations`
    pub pending_migrations: usize,

    /// Version (timestamp prefix) of the newest applied migration
    pub latest_version: Option<i64>,
}

/// Number of forward migrations compiled into the binary
pub fn embedded_migrations() -> usize {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .count()
}

/// Applies pending migrations; already-applied ones are skipped
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    info!(embedded = embedded_migrations(), "Migrations applied");
    Ok(())
}

/// Compares `_sqlx_migrations` with the embedded set. A database that has
/// never been migrated reports everything as pending.
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let tracked: bool =
        sqlx::query_scalar("SELECT to_regclass('public._sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let (applied, latest_version): (i64, Option<i64>) = if tracked {
        sqlx::query_as("SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success")
            .fetch_one(pool)
            .await?
    } else {
        (0, None)
    };

    let applied_migrations = usize::try_from(applied).unwrap_or_default();

    Ok(MigrationStatus {
        applied_migrations,
        pending_migrations: embedded_migrations().saturating_sub(applied_migrations),
        latest_version,
    })
}

/// Creates the database named in `database_url` when it is missing
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        Postgres::create_database(database_url).await?;
        info!("Created missing database");
    }

    Ok(())
}
