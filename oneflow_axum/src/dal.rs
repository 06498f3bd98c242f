//! Handlers for the generic CRUD routes

use axum::{Router, extract::State, response::Response, routing::post};
use axum_extra::extract::Form;
use oneflow::{Identifier, Record};
use serde_json::{Value, json};

use crate::error::{ApiError, IntoResponseError};
use crate::forms::{
    ColumnValuesForm, OccurrenceForm, SelectAllForm, SelectOneWhereForm, SelectTwoColumnsForm,
    UpdateForm,
};
use crate::reply::Reply;
use crate::router::RouteState;

pub(crate) fn router() -> Router<RouteState> {
    Router::new()
        .route("/select_all", post(select_all))
        .route("/select_where_two_columns", post(select_where_two_columns))
        .route("/select_one_where", post(select_one_where))
        .route("/select_one_matching", post(select_one_matching))
        .route("/insert", post(insert))
        .route("/update", post(update))
        .route("/delete", post(delete))
        .route("/exists", post(exists))
}

const FALSE: &str = "false";

fn rows_reply(rows: Vec<Record>) -> Reply {
    // The front end treats an empty result like a failure.
    if rows.is_empty() {
        Reply::text(FALSE, json!([]))
    } else {
        Reply::json(Value::Array(rows.into_iter().map(Value::Object).collect()))
    }
}

fn row_reply(row: Option<Record>) -> Reply {
    match row {
        Some(row) => Reply::json(Value::Object(row)),
        None => Reply::text(FALSE, Value::Null),
    }
}

fn bool_reply(value: bool) -> Reply {
    Reply::text(value.to_string(), json!(value))
}

#[tracing::instrument(skip_all, fields(table = %form.table))]
async fn select_all(State(state): State<RouteState>, Form(form): Form<SelectAllForm>) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let columns = form.columns().into_response_error()?;
        let ordering = form.ordering().into_response_error()?;
        let rows = db
            .select_all(&table, &columns, &ordering)
            .await
            .into_response_error()?;
        Ok::<_, ApiError>(rows_reply(rows))
    }
    .await;
    state.mount.render(result, FALSE)
}

#[tracing::instrument(skip_all, fields(table = %form.table))]
async fn select_where_two_columns(
    State(state): State<RouteState>,
    Form(form): Form<SelectTwoColumnsForm>,
) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let first = Identifier::parse(&form.column1).into_response_error()?;
        let second = Identifier::parse(&form.column2).into_response_error()?;
        let columns = form.columns().into_response_error()?;
        let ordering = form.ordering().into_response_error()?;
        let rows = db
            .select_where_two_columns(
                &table,
                (&first, form.value1.as_str()),
                (&second, form.value2.as_str()),
                &columns,
                &ordering,
            )
            .await
            .into_response_error()?;
        Ok::<_, ApiError>(rows_reply(rows))
    }
    .await;
    state.mount.render(result, FALSE)
}

#[tracing::instrument(skip_all, fields(table = %form.table))]
async fn select_one_where(
    State(state): State<RouteState>,
    Form(form): Form<SelectOneWhereForm>,
) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let column = Identifier::parse(&form.column).into_response_error()?;
        let ordering = form.ordering().into_response_error()?;
        let row = db
            .select_one_where(&table, &column, &form.singular_value, &ordering)
            .await
            .into_response_error()?;
        Ok::<_, ApiError>(row_reply(row))
    }
    .await;
    state.mount.render(result, FALSE)
}

#[tracing::instrument(skip_all, fields(table = %form.table))]
async fn select_one_matching(
    State(state): State<RouteState>,
    Form(form): Form<ColumnValuesForm>,
) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let filters = form.column_values().into_response_error()?;
        let row = db
            .select_one_matching(&table, &filters)
            .await
            .into_response_error()?;
        Ok::<_, ApiError>(row_reply(row))
    }
    .await;
    state.mount.render(result, FALSE)
}

#[tracing::instrument(skip_all, fields(table = %form.table))]
async fn insert(State(state): State<RouteState>, Form(form): Form<ColumnValuesForm>) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let values = form.column_values().into_response_error()?;
        db.insert(&table, &values).await.into_response_error()?;
        Ok::<_, ApiError>(bool_reply(true))
    }
    .await;
    state.mount.render(result, FALSE)
}

#[tracing::instrument(skip_all, fields(table = %form.table))]
async fn update(State(state): State<RouteState>, Form(form): Form<UpdateForm>) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let pk_column = Identifier::parse(&form.pk_column).into_response_error()?;
        let update_column = Identifier::parse(&form.update_column).into_response_error()?;
        let ordering = form.ordering().into_response_error()?;
        db.update(
            &table,
            &pk_column,
            &form.pk_value,
            &update_column,
            &form.update_value,
            &ordering,
        )
        .await
        .into_response_error()?;
        Ok::<_, ApiError>(bool_reply(true))
    }
    .await;
    state.mount.render(result, FALSE)
}

#[tracing::instrument(skip_all, fields(table = %form.table))]
async fn delete(State(state): State<RouteState>, Form(form): Form<ColumnValuesForm>) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let values = form.column_values().into_response_error()?;
        let deleted = db.delete(&table, &values).await.into_response_error()?;
        Ok::<_, ApiError>(Reply::text("true", json!({ "deleted": deleted })))
    }
    .await;
    state.mount.render(result, FALSE)
}

#[tracing::instrument(skip_all, fields(table = %form.table))]
async fn exists(State(state): State<RouteState>, Form(form): Form<OccurrenceForm>) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let column = Identifier::parse(&form.column).into_response_error()?;
        let ordering = form.ordering().into_response_error()?;
        let found = db
            .exists(&table, &column, &form.value, &ordering)
            .await
            .into_response_error()?;
        Ok::<_, ApiError>(bool_reply(found))
    }
    .await;
    state.mount.render(result, FALSE)
}
