use std::future::Future;
use std::time::Duration;

use sqlx::{Connection, MySqlConnection, SqliteConnection};

use super::config::DB_TIMEOUT;
use super::errors::DalError;
use super::query::Statement;
use super::storage::{
    connect_mysql, connect_sqlite, execute_mysql, execute_sqlite, fetch_all_mysql,
    fetch_all_sqlite, fetch_optional_mysql, fetch_optional_sqlite,
};
use super::types::{Backend, ConnectionParams, Record};

/// A live connection, owned by exactly one operation.
pub(crate) enum DbConnection {
    MySql(MySqlConnection),
    Sqlite(SqliteConnection),
}

impl DbConnection {
    async fn open(params: &ConnectionParams, limit: Duration) -> Result<Self, DalError> {
        let attempt = async {
            match params.backend {
                Backend::MySql => connect_mysql(params).await.map(DbConnection::MySql),
                Backend::Sqlite => connect_sqlite(params).await.map(DbConnection::Sqlite),
            }
        };

        match tokio::time::timeout(limit, attempt).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => {
                tracing::error!(
                    "Failed to connect to {:?} database '{}' on '{}': {}",
                    params.backend,
                    params.db_name,
                    params.host,
                    e
                );
                Err(DalError::ConnectionFailed {
                    host: params.host.clone(),
                    database: params.db_name.clone(),
                })
            }
            Err(_) => {
                tracing::error!(
                    "Connecting to database '{}' on '{}' timed out after {:?}",
                    params.db_name,
                    params.host,
                    limit
                );
                Err(DalError::Timeout {
                    host: params.host.clone(),
                    database: params.db_name.clone(),
                })
            }
        }
    }

    async fn close(self) {
        let result = match self {
            DbConnection::MySql(conn) => conn.close().await,
            DbConnection::Sqlite(conn) => conn.close().await,
        };
        if let Err(e) = result {
            tracing::warn!("Failed to close connection cleanly: {}", e);
        }
    }

    async fn fetch_all(&mut self, stmt: &Statement) -> Result<Vec<Record>, DalError> {
        let rows = match self {
            DbConnection::MySql(conn) => fetch_all_mysql(conn, stmt).await?,
            DbConnection::Sqlite(conn) => fetch_all_sqlite(conn, stmt).await?,
        };
        Ok(rows)
    }

    async fn fetch_optional(&mut self, stmt: &Statement) -> Result<Option<Record>, DalError> {
        let row = match self {
            DbConnection::MySql(conn) => fetch_optional_mysql(conn, stmt).await?,
            DbConnection::Sqlite(conn) => fetch_optional_sqlite(conn, stmt).await?,
        };
        Ok(row)
    }

    async fn execute(&mut self, stmt: &Statement) -> Result<u64, DalError> {
        let affected = match self {
            DbConnection::MySql(conn) => execute_mysql(conn, stmt).await?,
            DbConnection::Sqlite(conn) => execute_sqlite(conn, stmt).await?,
        };
        Ok(affected)
    }
}

/// Entry point of the data access layer.
///
/// Holds only the parameters needed to connect. Every operation opens its own
/// connection, runs one statement and closes the connection again, whether the
/// statement succeeded or not.
#[derive(Debug, Clone)]
pub struct Database {
    params: ConnectionParams,
    timeout: Duration,
}

impl Database {
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            timeout: *DB_TIMEOUT,
        }
    }

    /// Overrides the configured bound on connecting and on statement execution.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    pub(crate) fn backend(&self) -> Backend {
        self.params.backend
    }

    pub(crate) async fn fetch_all(&self, stmt: Statement) -> Result<Vec<Record>, DalError> {
        let mut conn = DbConnection::open(&self.params, self.timeout).await?;
        let result = self.bounded(conn.fetch_all(&stmt)).await;
        self.release(conn, &result).await;
        result
    }

    pub(crate) async fn fetch_optional(&self, stmt: Statement) -> Result<Option<Record>, DalError> {
        let mut conn = DbConnection::open(&self.params, self.timeout).await?;
        let result = self.bounded(conn.fetch_optional(&stmt)).await;
        self.release(conn, &result).await;
        result
    }

    pub(crate) async fn execute(&self, stmt: Statement) -> Result<u64, DalError> {
        let mut conn = DbConnection::open(&self.params, self.timeout).await?;
        let result = self.bounded(conn.execute(&stmt)).await;
        self.release(conn, &result).await;
        result
    }

    /// Closes the connection, or drops it unclosed when the statement timed
    /// out, since a graceful close would wait for that statement. The close
    /// is bounded by the same limit.
    async fn release<T>(&self, conn: DbConnection, result: &Result<T, DalError>) {
        if matches!(result, Err(DalError::Timeout { .. })) {
            tracing::warn!(
                "Dropping connection to database '{}' without a graceful close",
                self.params.db_name
            );
            drop(conn);
            return;
        }
        if tokio::time::timeout(self.timeout, conn.close()).await.is_err() {
            tracing::warn!(
                "Closing connection to database '{}' timed out after {:?}",
                self.params.db_name,
                self.timeout
            );
        }
    }

    async fn bounded<T>(
        &self,
        work: impl Future<Output = Result<T, DalError>>,
    ) -> Result<T, DalError> {
        tokio::time::timeout(self.timeout, work)
            .await
            .unwrap_or_else(|_| {
                tracing::error!(
                    "Statement on database '{}' timed out after {:?}",
                    self.params.db_name,
                    self.timeout
                );
                Err(DalError::Timeout {
                    host: self.params.host.clone(),
                    database: self.params.db_name.clone(),
                })
            })
    }
}
