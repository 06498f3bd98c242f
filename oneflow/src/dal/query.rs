//! SQL text builders
//!
//! Identifiers arrive here already validated and are always backtick-quoted.
//! Values never appear in the SQL text; they are collected as binds in
//! placeholder order.

use super::types::{Backend, CastMode, ColumnValues, Columns, Identifier, Ordering};

/// SQL text plus its string binds, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement {
    pub(crate) sql: String,
    pub(crate) binds: Vec<String>,
}

impl Statement {
    fn new(sql: String, binds: Vec<String>) -> Self {
        Self { sql, binds }
    }
}

fn projection(columns: &Columns) -> String {
    match columns {
        Columns::All => "*".to_string(),
        Columns::List(list) => list
            .iter()
            .map(Identifier::quoted)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn order_expr(backend: Backend, ordering: &Ordering) -> String {
    let col = ordering.column.quoted();
    match (ordering.cast, backend) {
        (CastMode::Plain, _) => col,
        (CastMode::Numeric, Backend::MySql) => format!("CAST({col} AS UNSIGNED)"),
        (CastMode::Numeric, Backend::Sqlite) => format!("CAST({col} AS INTEGER)"),
        (CastMode::Date, Backend::MySql) => format!("STR_TO_DATE(TRIM({col}), '%d/%m/%Y')"),
        (CastMode::Date, Backend::Sqlite) => sqlite_date_key(&col),
    }
}

/// d/m/yyyy with optional zero padding -> yyyymmdd, as STR_TO_DATE accepts.
fn sqlite_date_key(col: &str) -> String {
    let text = format!("trim({col})");
    let day = format!("substr({text}, 1, instr({text}, '/') - 1)");
    let rest = format!("substr({text}, instr({text}, '/') + 1)");
    let month = format!("substr({rest}, 1, instr({rest}, '/') - 1)");
    let year = format!("substr({rest}, instr({rest}, '/') + 1)");
    format!(
        "printf('%04d%02d%02d', CAST({year} AS INTEGER), \
         CAST({month} AS INTEGER), CAST({day} AS INTEGER))"
    )
}

fn order_clause(backend: Backend, ordering: &Ordering) -> String {
    format!(
        "ORDER BY {} {}",
        order_expr(backend, ordering),
        ordering.direction.as_sql()
    )
}

fn like_pattern(value: &str) -> String {
    format!("%{value}%")
}

pub(crate) fn select_all(
    backend: Backend,
    table: &Identifier,
    columns: &Columns,
    ordering: &Ordering,
) -> Statement {
    Statement::new(
        format!(
            "SELECT {} FROM {} {}",
            projection(columns),
            table.quoted(),
            order_clause(backend, ordering)
        ),
        Vec::new(),
    )
}

pub(crate) fn select_one_where(
    backend: Backend,
    table: &Identifier,
    column: &Identifier,
    value: &str,
    ordering: &Ordering,
) -> Statement {
    Statement::new(
        format!(
            "SELECT * FROM {} WHERE {} LIKE ? {} LIMIT 1",
            table.quoted(),
            column.quoted(),
            order_clause(backend, ordering)
        ),
        vec![like_pattern(value)],
    )
}

pub(crate) fn select_where_two_columns(
    backend: Backend,
    table: &Identifier,
    first: (&Identifier, &str),
    second: (&Identifier, &str),
    columns: &Columns,
    ordering: &Ordering,
) -> Statement {
    Statement::new(
        format!(
            "SELECT {} FROM {} WHERE {} LIKE ? AND {} LIKE ? {}",
            projection(columns),
            table.quoted(),
            first.0.quoted(),
            second.0.quoted(),
            order_clause(backend, ordering)
        ),
        vec![like_pattern(first.1), like_pattern(second.1)],
    )
}

fn equality_conditions(columns: &[Identifier]) -> String {
    columns
        .iter()
        .map(|c| format!("{} = ?", c.quoted()))
        .collect::<Vec<_>>()
        .join(" AND ")
}

pub(crate) fn select_one_matching(table: &Identifier, filters: &ColumnValues) -> Statement {
    Statement::new(
        format!(
            "SELECT * FROM {} WHERE {} LIMIT 1",
            table.quoted(),
            equality_conditions(filters.columns())
        ),
        filters.values().to_vec(),
    )
}

pub(crate) fn insert(table: &Identifier, values: &ColumnValues) -> Statement {
    let columns = values
        .columns()
        .iter()
        .map(Identifier::quoted)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; values.len()].join(", ");
    Statement::new(
        format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            table.quoted()
        ),
        values.values().to_vec(),
    )
}

pub(crate) fn delete(table: &Identifier, values: &ColumnValues) -> Statement {
    Statement::new(
        format!(
            "DELETE FROM {} WHERE {}",
            table.quoted(),
            equality_conditions(values.columns())
        ),
        values.values().to_vec(),
    )
}

/// Updates the first row (by `ordering`) whose `pk_column` equals `pk_value`.
///
/// The WHERE clause doubles as the existence check, so the caller only has to
/// look at the affected-row count.
pub(crate) fn update_single_row(
    backend: Backend,
    table: &Identifier,
    pk: (&Identifier, &str),
    update: (&Identifier, &str),
    ordering: &Ordering,
) -> Statement {
    let sql = match backend {
        Backend::MySql => format!(
            "UPDATE {} SET {} = ? WHERE {} = ? {} LIMIT 1",
            table.quoted(),
            update.0.quoted(),
            pk.0.quoted(),
            order_clause(backend, ordering)
        ),
        // Stock SQLite builds lack UPDATE ... ORDER BY ... LIMIT.
        Backend::Sqlite => format!(
            "UPDATE {table} SET {} = ? WHERE rowid = (SELECT rowid FROM {table} WHERE {} = ? {} LIMIT 1)",
            update.0.quoted(),
            pk.0.quoted(),
            order_clause(backend, ordering),
            table = table.quoted(),
        ),
    };
    Statement::new(sql, vec![update.1.to_string(), pk.1.to_string()])
}

pub(crate) fn exists(
    backend: Backend,
    table: &Identifier,
    column: &Identifier,
    value: &str,
    ordering: &Ordering,
) -> Statement {
    Statement::new(
        format!(
            "SELECT 1 FROM {} WHERE {} = ? {} LIMIT 1",
            table.quoted(),
            column.quoted(),
            order_clause(backend, ordering)
        ),
        vec![value.to_string()],
    )
}
