//! Handlers for the cookie session routes

use axum::{Router, extract::State, response::Response, routing::post};
use axum_extra::extract::Form;
use http::HeaderMap;
use oneflow::{
    CookieSessionStore, Identifier, finalize_session, generate_token, get_session_record,
    get_session_token, have_session, initialize_session, is_this_my_session,
};
use serde_json::{Value, json};

use crate::error::{ApiError, IntoResponseError};
use crate::forms::{InitializeSessionForm, OccurrenceForm, SessionCheckForm, SessionNameForm};
use crate::reply::Reply;
use crate::router::RouteState;

pub(crate) fn router() -> Router<RouteState> {
    Router::new()
        .route("/generate_token", post(generate_token_handler))
        .route("/have_session", post(have_session_handler))
        .route("/get_session_token", post(get_session_token_handler))
        .route("/initialize_session", post(initialize_session_handler))
        .route("/finalize_session", post(finalize_session_handler))
        .route("/is_this_my_session", post(is_this_my_session_handler))
        .route("/get_session_record", post(get_session_record_handler))
}

const SESSION_ENDED: &str = "Session was ended!";

#[tracing::instrument(skip_all, fields(table = %form.table, column = %form.column))]
async fn generate_token_handler(
    State(state): State<RouteState>,
    Form(form): Form<OccurrenceForm>,
) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let column = Identifier::parse(&form.column).into_response_error()?;
        let ordering = form.ordering().into_response_error()?;
        let token = generate_token(&db, &table, &column, &ordering)
            .await
            .into_response_error()?;
        Ok::<_, ApiError>(Reply::text(token.clone(), json!(token)))
    }
    .await;
    state.mount.render(result, "false")
}

#[tracing::instrument(skip_all, fields(name = %form.name_session))]
async fn have_session_handler(
    State(state): State<RouteState>,
    headers: HeaderMap,
    Form(form): Form<SessionNameForm>,
) -> Response {
    let store = CookieSessionStore::from_headers(&headers);
    let present = have_session(&store, &form.name_session);
    state.mount.render(Ok(Reply::text(present.to_string(), json!(present))), "false")
}

#[tracing::instrument(skip_all, fields(name = %form.name_session))]
async fn get_session_token_handler(
    State(state): State<RouteState>,
    headers: HeaderMap,
    Form(form): Form<SessionNameForm>,
) -> Response {
    let store = CookieSessionStore::from_headers(&headers);
    let reply = match get_session_token(&store, &form.name_session) {
        Some(token) => Reply::text(token.clone(), json!(token)),
        None => Reply::text("null", Value::Null),
    };
    state.mount.render(Ok(reply), "null")
}

#[tracing::instrument(skip_all, fields(name = %form.name_session))]
async fn initialize_session_handler(
    State(state): State<RouteState>,
    headers: HeaderMap,
    Form(form): Form<InitializeSessionForm>,
) -> Response {
    state.mount.render(start_session(&headers, &form), "false")
}

#[tracing::instrument(skip_all, fields(name = %form.name_session))]
async fn finalize_session_handler(
    State(state): State<RouteState>,
    headers: HeaderMap,
    Form(form): Form<SessionNameForm>,
) -> Response {
    state.mount.render(end_session(&headers, &form), SESSION_ENDED)
}

fn start_session(headers: &HeaderMap, form: &InitializeSessionForm) -> Result<Reply, ApiError> {
    let mut store = CookieSessionStore::from_headers(headers);
    initialize_session(&mut store, &form.token, &form.name_session).into_response_error()?;
    let cookies = store.into_headers().into_response_error()?;
    Ok(Reply::text("true", json!(true)).with_headers(cookies))
}

fn end_session(headers: &HeaderMap, form: &SessionNameForm) -> Result<Reply, ApiError> {
    let mut store = CookieSessionStore::from_headers(headers);
    finalize_session(&mut store, &form.name_session).into_response_error()?;
    let cookies = store.into_headers().into_response_error()?;
    Ok(Reply::text(SESSION_ENDED, json!(true)).with_headers(cookies))
}

#[tracing::instrument(skip_all, fields(name = %form.session_name, table = %form.table))]
async fn is_this_my_session_handler(
    State(state): State<RouteState>,
    headers: HeaderMap,
    Form(form): Form<SessionCheckForm>,
) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let column = Identifier::parse(&form.column).into_response_error()?;
        let ordering = form.ordering().into_response_error()?;
        let store = CookieSessionStore::from_headers(&headers);
        let status =
            is_this_my_session(&store, &form.session_name, &db, &table, &column, &ordering)
                .await
                .into_response_error()?;
        Ok::<_, ApiError>(Reply::text(
            status.as_legacy_str(),
            json!({ "status": status }),
        ))
    }
    .await;
    state.mount.render(result, "no have session")
}

#[tracing::instrument(skip_all, fields(name = %form.session_name, table = %form.table))]
async fn get_session_record_handler(
    State(state): State<RouteState>,
    headers: HeaderMap,
    Form(form): Form<SessionCheckForm>,
) -> Response {
    let result = async {
        let db = form.conn.database(state.backend).into_response_error()?;
        let table = Identifier::parse(&form.table).into_response_error()?;
        let column = Identifier::parse(&form.column).into_response_error()?;
        let store = CookieSessionStore::from_headers(&headers);
        let record = get_session_record(&store, &form.session_name, &db, &table, &column)
            .await
            .into_response_error()?;
        Ok::<_, ApiError>(match record {
            Some(row) => Reply::json(Value::Object(row)),
            None => Reply::text("false", Value::Null),
        })
    }
    .await;
    state.mount.render(result, "false")
}
