//! Test utilities shared by the unit tests of this crate
//!
//! Every test gets its own SQLite file under the system temp directory, so
//! tests can run in parallel and the per-call connection model is exercised
//! for real (an in-memory database would vanish between connections).

use std::path::PathBuf;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, Row, SqliteConnection};

use crate::dal::{ConnectionParams, Database};

pub(crate) const FLEET_SCHEMA: &str = r#"
    CREATE TABLE cars (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        plate TEXT NOT NULL,
        model TEXT,
        km TEXT,
        last_review TEXT,
        status TEXT
    );
    CREATE TABLE users (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT,
        token TEXT
    );
"#;

/// A throwaway SQLite database file, removed on drop.
pub(crate) struct TestDb {
    path: PathBuf,
}

impl TestDb {
    pub(crate) async fn new(schema: &str) -> Self {
        let path = std::env::temp_dir().join(format!("oneflow_test_{}.db", uuid::Uuid::new_v4()));
        let opts = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&opts)
            .await
            .expect("Failed to create test database");
        sqlx::raw_sql(schema)
            .execute(&mut conn)
            .await
            .expect("Failed to apply test schema");
        conn.close().await.expect("Failed to close setup connection");
        Self { path }
    }

    pub(crate) async fn fleet() -> Self {
        Self::new(FLEET_SCHEMA).await
    }

    pub(crate) fn params(&self) -> ConnectionParams {
        ConnectionParams::sqlite(self.path.to_string_lossy().into_owned())
    }

    pub(crate) fn database(&self) -> Database {
        Database::new(self.params())
    }

    async fn connect(&self) -> SqliteConnection {
        let opts = SqliteConnectOptions::new().filename(&self.path);
        SqliteConnection::connect_with(&opts)
            .await
            .expect("Failed to open test database")
    }

    /// Runs raw SQL for seeding, bypassing the layer under test.
    pub(crate) async fn seed(&self, sql: &str) {
        let mut conn = self.connect().await;
        sqlx::raw_sql(sql)
            .execute(&mut conn)
            .await
            .expect("Failed to seed test database");
        conn.close().await.ok();
    }

    /// Single integer answer, e.g. `SELECT COUNT(*) ...`.
    pub(crate) async fn scalar(&self, sql: &str) -> i64 {
        let mut conn = self.connect().await;
        let row = sqlx::query(sql)
            .fetch_one(&mut conn)
            .await
            .expect("Failed to query test database");
        let value: i64 = row.get(0);
        conn.close().await.ok();
        value
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            // Missing files are fine.
            let _ = std::fs::remove_file(file);
        }
    }
}
