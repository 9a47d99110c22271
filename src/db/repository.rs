//! Person Repository
//!
//! Parameterized SQL over a single `persons` table, using sqlx with SQLite.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::Result;
use crate::models::Person;

const CREATE_PERSONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS persons (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        email TEXT NOT NULL
    );
"#;

/// Source of truth for person records.
///
/// Row counts are returned as-is; deciding what zero rows means is left to
/// the caller.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Inserts a row and returns the id assigned to it.
    async fn insert(&self, name: &str, age: i32, email: &str) -> Result<i64>;

    /// Fetches a row by id.
    async fn select_by_id(&self, id: i64) -> Result<Option<Person>>;

    /// Overwrites the row with the given id, returning rows affected.
    async fn update_by_id(&self, id: i64, name: &str, age: i32, email: &str) -> Result<u64>;

    /// Deletes the row with the given id, returning rows affected.
    async fn delete_by_id(&self, id: i64) -> Result<u64>;
}

// == SQLite Repository ==
/// [`PersonRepository`] backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqlitePersonRepository {
    pool: SqlitePool,
}

impl SqlitePersonRepository {
    /// Opens (creating if missing) the database at `url` and ensures the
    /// schema exists.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        info!("Connected to person database at {}", url);
        Ok(repo)
    }

    /// Opens a private in-memory database.
    ///
    /// Each SQLite memory connection is its own database, so the pool is
    /// pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_PERSONS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PersonRepository for SqlitePersonRepository {
    async fn insert(&self, name: &str, age: i32, email: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO persons (name, age, email) VALUES (?, ?, ?)")
            .bind(name)
            .bind(age)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Person>> {
        let person =
            sqlx::query_as::<_, Person>("SELECT id, name, age, email FROM persons WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(person)
    }

    async fn update_by_id(&self, id: i64, name: &str, age: i32, email: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE persons SET name = ?, age = ?, email = ? WHERE id = ?")
            .bind(name)
            .bind(age)
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM persons WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
