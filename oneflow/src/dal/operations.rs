use super::connection::Database;
use super::errors::DalError;
use super::query;
use super::types::{ColumnValues, Columns, Identifier, Ordering, Record};

impl Database {
    /// Every row of `table`, projected to `columns` and sorted by `ordering`.
    ///
    /// An empty table yields `Ok(vec![])`; only a failure is an `Err`.
    #[tracing::instrument(skip(self), fields(db = %self.params().db_name))]
    pub async fn select_all(
        &self,
        table: &Identifier,
        columns: &Columns,
        ordering: &Ordering,
    ) -> Result<Vec<Record>, DalError> {
        let stmt = query::select_all(self.backend(), table, columns, ordering);
        tracing::debug!("select_all: {}", stmt.sql);
        self.fetch_all(stmt).await
    }

    /// The first row, by `ordering`, whose `column` contains `value`.
    #[tracing::instrument(skip(self, value), fields(db = %self.params().db_name))]
    pub async fn select_one_where(
        &self,
        table: &Identifier,
        column: &Identifier,
        value: &str,
        ordering: &Ordering,
    ) -> Result<Option<Record>, DalError> {
        let stmt = query::select_one_where(self.backend(), table, column, value, ordering);
        tracing::debug!("select_one_where: {}", stmt.sql);
        self.fetch_optional(stmt).await
    }

    /// Rows where both columns contain their respective values.
    #[tracing::instrument(skip(self, first, second), fields(db = %self.params().db_name))]
    pub async fn select_where_two_columns(
        &self,
        table: &Identifier,
        first: (&Identifier, &str),
        second: (&Identifier, &str),
        columns: &Columns,
        ordering: &Ordering,
    ) -> Result<Vec<Record>, DalError> {
        let stmt =
            query::select_where_two_columns(self.backend(), table, first, second, columns, ordering);
        tracing::debug!("select_where_two_columns: {}", stmt.sql);
        self.fetch_all(stmt).await
    }

    /// The first row where every `column = value` pair of `filters` holds.
    #[tracing::instrument(skip(self, filters), fields(db = %self.params().db_name))]
    pub async fn select_one_matching(
        &self,
        table: &Identifier,
        filters: &ColumnValues,
    ) -> Result<Option<Record>, DalError> {
        let stmt = query::select_one_matching(table, filters);
        tracing::debug!("select_one_matching: {}", stmt.sql);
        self.fetch_optional(stmt).await
    }

    /// Inserts one row; every value is bound as a string.
    #[tracing::instrument(skip(self, values), fields(db = %self.params().db_name))]
    pub async fn insert(&self, table: &Identifier, values: &ColumnValues) -> Result<(), DalError> {
        let stmt = query::insert(table, values);
        tracing::debug!("insert: {}", stmt.sql);
        match self.execute(stmt).await? {
            1 => Ok(()),
            n => Err(DalError::Query(format!("Insert affected {n} rows"))),
        }
    }

    /// Sets `update_column` on the single row with `pk_column = pk_value`.
    ///
    /// When several rows share the key, `ordering` picks the one that is
    /// changed. Returns [`DalError::NotFound`] when no row has the key.
    #[tracing::instrument(skip(self, pk_value, update_value), fields(db = %self.params().db_name))]
    pub async fn update(
        &self,
        table: &Identifier,
        pk_column: &Identifier,
        pk_value: &str,
        update_column: &Identifier,
        update_value: &str,
        ordering: &Ordering,
    ) -> Result<(), DalError> {
        let stmt = query::update_single_row(
            self.backend(),
            table,
            (pk_column, pk_value),
            (update_column, update_value),
            ordering,
        );
        tracing::debug!("update: {}", stmt.sql);
        match self.execute(stmt).await? {
            0 => Err(DalError::NotFound),
            _ => Ok(()),
        }
    }

    /// Deletes every row matching all pairs; returns how many were removed.
    #[tracing::instrument(skip(self, values), fields(db = %self.params().db_name))]
    pub async fn delete(&self, table: &Identifier, values: &ColumnValues) -> Result<u64, DalError> {
        let stmt = query::delete(table, values);
        tracing::debug!("delete: {}", stmt.sql);
        self.execute(stmt).await
    }

    #[tracing::instrument(skip(self, value), fields(db = %self.params().db_name))]
    pub async fn exists(
        &self,
        table: &Identifier,
        column: &Identifier,
        value: &str,
        ordering: &Ordering,
    ) -> Result<bool, DalError> {
        let stmt = query::exists(self.backend(), table, column, value, ordering);
        tracing::debug!("exists: {}", stmt.sql);
        Ok(self.fetch_optional(stmt).await?.is_some())
    }
}
