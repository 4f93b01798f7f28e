use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use finance_core::{KeyValueStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, trace};

/// Connection string that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens `connection_string`, a file path (created when missing) or
    /// [`IN_MEMORY`].
    ///
    /// The pool holds a single connection: an in-memory database lives and
    /// dies with its connection, and the calculator never issues concurrent
    /// writes.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let options = if connection_string.is_empty() || connection_string == IN_MEMORY {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(connection_string)
                .create_if_missing(true)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {connection_string}"))?;

        debug!(connection_string, "opened sqlite store");
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT value FROM string_values WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO string_values (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        trace!(key, value, "stored string");
        Ok(())
    }

    async fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        let exists: Option<String> =
            sqlx::query_scalar("SELECT key FROM string_lists WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

        if exists.is_none() {
            return Ok(None);
        }

        let items: Vec<String> = sqlx::query_scalar(
            "SELECT value FROM string_list_items WHERE list_key = ? ORDER BY position",
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(Some(items))
    }

    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        sqlx::query("INSERT OR IGNORE INTO string_lists (key) VALUES (?)")
            .bind(key)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        sqlx::query("DELETE FROM string_list_items WHERE list_key = ?")
            .bind(key)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        for (position, value) in values.iter().enumerate() {
            sqlx::query("INSERT INTO string_list_items (list_key, position, value) VALUES (?, ?, ?)")
                .bind(key)
                .bind(position as i64)
                .bind(value)
                .execute(&mut *tx)
                .await
                .map_err(backend)?;
        }

        tx.commit().await.map_err(backend)?;

        trace!(key, len = values.len(), "stored string list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn setup_test_db() -> SqliteStore {
        let store = SqliteStore::new(IN_MEMORY)
            .await
            .expect("Failed to create in-memory database");
        store.run_migrations().await.expect("Failed to run migrations");
        store
    }

    #[tokio::test]
    async fn test_missing_string_is_none() {
        let store = setup_test_db().await;

        let value = store.get_string("compound_present").await.expect("Should query");

        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_and_get_string() {
        let store = setup_test_db().await;

        store.set_string("mortgage_amount", "100000").await.expect("Should store");

        let value = store.get_string("mortgage_amount").await.expect("Should query");
        assert_eq!(value, Some("100000".to_string()));
    }

    #[tokio::test]
    async fn test_set_string_overwrites() {
        let store = setup_test_db().await;

        store.set_string("mortgage_amount", "1").await.expect("Should store");
        store.set_string("mortgage_amount", "").await.expect("Should store");

        let value = store.get_string("mortgage_amount").await.expect("Should query");
        assert_eq!(value, Some(String::new()));
    }

    #[tokio::test]
    async fn test_missing_list_is_none() {
        let store = setup_test_db().await;

        let list = store.get_string_list("MortgageHistory").await.expect("Should query");

        assert_eq!(list, None);
    }

    #[tokio::test]
    async fn test_empty_list_is_distinct_from_missing() {
        let store = setup_test_db().await;

        store.set_string_list("MortgageHistory", &[]).await.expect("Should store");

        let list = store.get_string_list("MortgageHistory").await.expect("Should query");
        assert_eq!(list, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_list_keeps_order() {
        let store = setup_test_db().await;
        let entries = vec!["b".to_string(), "a".to_string(), "c".to_string()];

        store.set_string_list("CompoundInterestHistory", &entries).await.expect("Should store");

        let list = store.get_string_list("CompoundInterestHistory").await.expect("Should query");
        assert_eq!(list, Some(entries));
    }

    #[tokio::test]
    async fn test_list_rewrite_replaces_all_items() {
        let store = setup_test_db().await;
        let long = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let short = vec!["only".to_string()];

        store.set_string_list("history", &long).await.expect("Should store");
        store.set_string_list("history", &short).await.expect("Should store");

        let list = store.get_string_list("history").await.expect("Should query");
        assert_eq!(list, Some(short));
    }

    #[tokio::test]
    async fn test_lists_do_not_leak_between_keys() {
        let store = setup_test_db().await;

        store.set_string_list("a", &["x".to_string()]).await.expect("Should store");
        store.set_string_list("b", &["y".to_string()]).await.expect("Should store");

        assert_eq!(
            store.get_string_list("a").await.expect("Should query"),
            Some(vec!["x".to_string()])
        );
    }
}
