use async_trait::async_trait;
use shortlink_core::repository::{Repository, Result};
use shortlink_core::{ShortCode, StorageError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 100;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connection parameters and pool bounds for [`PostgresRepository`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct PostgresSettings {
    #[builder(setter(into))]
    pub host: String,
    #[builder(default = DEFAULT_PORT)]
    pub port: u16,
    #[builder(setter(into))]
    pub user: String,
    #[builder(default, setter(into))]
    pub password: String,
    #[builder(setter(into))]
    pub database: String,
    #[builder(default = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
    /// Upper bound on how long a caller waits for a pooled connection.
    #[builder(default = DEFAULT_ACQUIRE_TIMEOUT)]
    pub acquire_timeout: Duration,
}

impl PostgresSettings {
    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// PostgreSQL implementation of the repository contract.
///
/// Links live in a single `links` table keyed by `code`. Uniqueness is
/// enforced by the primary key, so concurrent inserts of the same code are
/// settled by the database.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a repository from an existing PostgreSQL connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool described by `settings`.
    ///
    /// The pool connects eagerly, so unreachable servers or bad credentials
    /// are reported here rather than on the first request.
    pub async fn connect(settings: &PostgresSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(settings.connect_options())
            .await
            .map_err(map_sqlx_error)?;

        info!(
            host = %settings.host,
            port = settings.port,
            database = %settings.database,
            max_connections = settings.max_connections,
            "connected to postgres"
        );

        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Unavailable(format!("migration failed: {e}")))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

/// Classifies every non-domain failure as a transient storage outage.
fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = match &err {
        sqlx::Error::PoolTimedOut => format!("timed out acquiring a connection: {err}"),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_) => format!("connection failure: {err}"),
        _ => format!("query failed: {err}"),
    };
    warn!(error = %err, "postgres operation failed");
    StorageError::Unavailable(message)
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn create(&self, code: &ShortCode, target: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (code, target)
            VALUES ($1, $2)
            "#,
        )
        .bind(code.as_str())
        .bind(target)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::AlreadyExists(code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn fetch(&self, code: &ShortCode) -> Result<String> {
        let target: Option<String> = sqlx::query_scalar(
            r#"
            SELECT target
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        target.ok_or_else(|| StorageError::NotFound(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let settings = PostgresSettings::builder()
            .host("localhost")
            .user("postgres")
            .database("shortlink")
            .build();

        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.password, "");
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(settings.acquire_timeout, DEFAULT_ACQUIRE_TIMEOUT);
    }

    #[test]
    fn pool_errors_are_unavailable() {
        for err in [sqlx::Error::PoolTimedOut, sqlx::Error::PoolClosed] {
            assert!(matches!(map_sqlx_error(err), StorageError::Unavailable(_)));
        }
    }

    #[test]
    fn missing_rows_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn unreachable_server_fails_to_connect() {
        let settings = PostgresSettings::builder()
            .host("127.0.0.1")
            .port(1)
            .user("postgres")
            .database("shortlink")
            .acquire_timeout(Duration::from_millis(500))
            .build();

        let err = PostgresRepository::connect(&settings).await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
    }
}
