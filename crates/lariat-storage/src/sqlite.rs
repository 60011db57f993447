use async_trait::async_trait;
use jiff::Timestamp;
use lariat_core::error::Result;
use lariat_core::{Alias, LinkEntry, LinkStore, StoreError, User, UserStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

/// SQLite implementation of the store contracts.
///
/// Aliases are the primary key of `links`, so the database's uniqueness
/// constraint is the final arbiter for racing inserts. Timestamps are
/// stored as unix seconds; the `permanent` flag crosses the boundary as a
/// real `bool` and is encoded by the driver.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id    TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL UNIQUE,
    password   TEXT NOT NULL,
    created_at INTEGER NOT NULL
)
"#;

const CREATE_LINKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS links (
    alias      TEXT PRIMARY KEY,
    url        TEXT NOT NULL,
    user_id    TEXT NOT NULL REFERENCES users(user_id),
    permanent  BOOLEAN NOT NULL,
    visits     INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
)
"#;

impl SqliteStore {
    /// Creates a store from an existing connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new connection pool, creating the
    /// database file if it does not exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the schema if it does not exist.
    ///
    /// The gateway treats a failure here as fatal: it must not serve
    /// traffic against a schema it could not create.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        sqlx::query(CREATE_LINKS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StoreError::InvalidData(format!("invalid created_at timestamp '{}': {e}", seconds))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StoreError::InvalidData(message),
        _ => StoreError::Query(message),
    }
}

fn link_from_row(row: &SqliteRow) -> Result<LinkEntry> {
    let alias: String = row.try_get("alias").map_err(map_sqlx_error)?;
    let url: String = row.try_get("url").map_err(map_sqlx_error)?;
    let user_id: String = row.try_get("user_id").map_err(map_sqlx_error)?;
    let permanent: bool = row.try_get("permanent").map_err(map_sqlx_error)?;
    let visits: i64 = row.try_get("visits").map_err(map_sqlx_error)?;
    let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(LinkEntry {
        alias: Alias::new_unchecked(alias),
        user_id,
        url,
        permanent,
        visits,
        created_at: parse_created_at(created_at_raw)?,
    })
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let user_id: String = row.try_get("user_id").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let email: String = row.try_get("email").map_err(map_sqlx_error)?;
    let password: String = row.try_get("password").map_err(map_sqlx_error)?;
    let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(User {
        user_id,
        name,
        email,
        password,
        created_at: parse_created_at(created_at_raw)?,
    })
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn insert(&self, entry: LinkEntry) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (alias, url, user_id, permanent, visits, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.alias.as_str())
        .bind(&entry.url)
        .bind(&entry.user_id)
        .bind(entry.permanent)
        .bind(entry.visits)
        .bind(entry.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::DuplicateAlias(entry.alias.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get(&self, alias: &Alias) -> Result<Option<LinkEntry>> {
        let row = sqlx::query(
            r#"
            SELECT alias, url, user_id, permanent, visits, created_at
            FROM links
            WHERE alias = ?
            LIMIT 1
            "#,
        )
        .bind(alias.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(link_from_row).transpose()
    }

    async fn increment_visits(&self, alias: &Alias) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET visits = visits + 1
            WHERE alias = ?
            "#,
        )
        .bind(alias.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Operation(format!("no such alias: {}", alias)));
        }
        Ok(())
    }

    async fn delete(&self, alias: &Alias) -> Result<bool> {
        let result = sqlx::query("DELETE FROM links WHERE alias = ?")
            .bind(alias.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<LinkEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT alias, url, user_id, permanent, visits, created_at
            FROM links
            WHERE user_id = ?
            ORDER BY created_at ASC, alias ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(link_from_row).collect()
    }

    async fn purge_expired(&self, threshold: Timestamp) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM links
            WHERE permanent = FALSE
              AND created_at < ?
            "#,
        )
        .bind(threshold.as_second())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn insert_user(&self, user: User) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (user_id, name, email, password, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateEmail(user.email)),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, name, email, password, created_at
            FROM users
            WHERE user_id = ?
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT user_id
            FROM users
            WHERE email = ? AND password = ?
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|r| r.try_get("user_id").map_err(map_sqlx_error))
            .transpose()
    }
}
