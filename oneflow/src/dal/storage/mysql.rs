use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlRow};
use sqlx::{Column, Connection, MySql, MySqlConnection, Row, ValueRef};

use crate::dal::query::Statement;
use crate::dal::types::{ConnectionParams, Record};

pub(crate) async fn connect_mysql(
    params: &ConnectionParams,
) -> Result<MySqlConnection, sqlx::Error> {
    let opts = MySqlConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .username(&params.user)
        .password(&params.password)
        .database(&params.db_name)
        .charset("utf8mb4");
    MySqlConnection::connect_with(&opts).await
}

fn bind_all(stmt: &Statement) -> sqlx::query::Query<'_, MySql, MySqlArguments> {
    stmt.binds
        .iter()
        .fold(sqlx::query(&stmt.sql), |query, value| query.bind(value.as_str()))
}

pub(crate) async fn fetch_all_mysql(
    conn: &mut MySqlConnection,
    stmt: &Statement,
) -> Result<Vec<Record>, sqlx::Error> {
    let rows = bind_all(stmt).fetch_all(&mut *conn).await?;
    Ok(rows.iter().map(record_from_row).collect())
}

pub(crate) async fn fetch_optional_mysql(
    conn: &mut MySqlConnection,
    stmt: &Statement,
) -> Result<Option<Record>, sqlx::Error> {
    let row = bind_all(stmt).fetch_optional(&mut *conn).await?;
    Ok(row.as_ref().map(record_from_row))
}

pub(crate) async fn execute_mysql(
    conn: &mut MySqlConnection,
    stmt: &Statement,
) -> Result<u64, sqlx::Error> {
    let result = bind_all(stmt).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

fn record_from_row(row: &MySqlRow) -> Record {
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

fn decode_cell(row: &MySqlRow, index: usize) -> Value {
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<u64, _>(index) {
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
    if let Ok(v) = row.try_get::<NaiveDateTime, _>(index) {
        return Value::String(v.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    if let Ok(v) = row.try_get::<NaiveDate, _>(index) {
        return Value::String(v.format("%Y-%m-%d").to_string());
    }
    if let Ok(v) = row.try_get::<NaiveTime, _>(index) {
        return Value::String(v.format("%H:%M:%S").to_string());
    }
    if let Ok(v) = row.try_get::<Vec<u8>, _>(index) {
        return Value::String(String::from_utf8_lossy(&v).into_owned());
    }
    // DECIMAL and friends travel as text on the wire.
    row.try_get_unchecked::<String, _>(index)
        .map(Value::String)
        .unwrap_or(Value::Null)
}
