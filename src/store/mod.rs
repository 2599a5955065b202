//! Document store backed by SQLite.
//!
//! Two collections: `participants`, keyed by `name`, and `messages`, keyed by
//! a v7 UUID and read back in insertion order.

mod messages;
mod participants;

use std::str::FromStr;

use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, SqlitePool};

const SCHEMA: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS participants (
        name TEXT PRIMARY KEY NOT NULL,
        last_status INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS messages (
        id TEXT PRIMARY KEY NOT NULL,
        sender TEXT NOT NULL,
        recipient TEXT NOT NULL,
        text TEXT NOT NULL,
        kind TEXT NOT NULL,
        time TEXT NOT NULL
    )",
];

#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Store, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            // an in-memory database lives exactly as long as its connection
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Store { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Single-connection in-memory store.
    pub async fn in_memory() -> Result<Store, sqlx::Error> {
        Self::connect("sqlite::memory:", 1).await
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}
