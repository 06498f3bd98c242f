use serde_json::Value;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteRow};
use sqlx::{Column, Connection, Row, Sqlite, SqliteConnection, ValueRef};

use crate::dal::query::Statement;
use crate::dal::types::{ConnectionParams, Record};

pub(crate) async fn connect_sqlite(
    params: &ConnectionParams,
) -> Result<SqliteConnection, sqlx::Error> {
    // The file must already exist; a typo in db_name is a connection failure.
    let opts = SqliteConnectOptions::new().filename(&params.db_name);
    SqliteConnection::connect_with(&opts).await
}

fn bind_all(stmt: &Statement) -> sqlx::query::Query<'_, Sqlite, SqliteArguments<'_>> {
    stmt.binds
        .iter()
        .fold(sqlx::query(&stmt.sql), |query, value| query.bind(value.as_str()))
}

pub(crate) async fn fetch_all_sqlite(
    conn: &mut SqliteConnection,
    stmt: &Statement,
) -> Result<Vec<Record>, sqlx::Error> {
    let rows = bind_all(stmt).fetch_all(&mut *conn).await?;
    Ok(rows.iter().map(record_from_row).collect())
}

pub(crate) async fn fetch_optional_sqlite(
    conn: &mut SqliteConnection,
    stmt: &Statement,
) -> Result<Option<Record>, sqlx::Error> {
    let row = bind_all(stmt).fetch_optional(&mut *conn).await?;
    Ok(row.as_ref().map(record_from_row))
}

pub(crate) async fn execute_sqlite(
    conn: &mut SqliteConnection,
    stmt: &Statement,
) -> Result<u64, sqlx::Error> {
    let result = bind_all(stmt).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

fn record_from_row(row: &SqliteRow) -> Record {
    row.columns()
        .iter()
        .map(|column| {
            let index = column.ordinal();
            let value = match row.try_get_raw(index) {
                Ok(raw) if !raw.is_null() => decode_cell(row, index),
                _ => Value::Null,
            };
            (column.name().to_string(), value)
        })
        .collect()
}

// SQLite values carry their storage class, so the typed getters reject mismatches.
fn decode_cell(row: &SqliteRow, index: usize) -> Value {
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<String, _>(index) {
        return Value::String(v);
    }
    if let Ok(v) = row.try_get::<Vec<u8>, _>(index) {
        return Value::String(String::from_utf8_lossy(&v).into_owned());
    }
    Value::Null
}
