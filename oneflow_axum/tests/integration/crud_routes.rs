use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::common::TestServer;

async fn add_car(server: &TestServer, plate: &str, model: &str, km: &str) {
    let form = server.form(&[
        ("table", "cars"),
        ("columns[]", "plate"),
        ("columns[]", "model"),
        ("columns[]", "km"),
        ("values[]", plate),
        ("values[]", model),
        ("values[]", km),
    ]);
    assert_eq!(server.legacy("insert", &form).await, "true");
}

#[tokio::test]
async fn test_select_all_empty_table() {
    let server = TestServer::start().await;
    let form = server.form(&[("table", "cars")]);

    assert_eq!(server.legacy("select_all", &form).await, "false");

    let response = server.post("api", "select_all", &form, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "data": [] }));
}

#[tokio::test]
async fn test_insert_then_select_with_numeric_order() {
    let server = TestServer::start().await;
    add_car(&server, "AA-1", "Ibiza", "10").await;
    add_car(&server, "BB-2", "Panda", "2").await;
    add_car(&server, "CC-3", "Clio", "33").await;

    let form = server.form(&[
        ("table", "cars"),
        ("order_by", "km"),
        ("casting_integer", "true"),
        ("set_columns[]", "plate"),
        ("set_columns[]", "km"),
    ]);
    let body = server.legacy("select_all", &form).await;
    let rows: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        rows,
        json!([
            { "plate": "BB-2", "km": "2" },
            { "plate": "AA-1", "km": "10" },
            { "plate": "CC-3", "km": "33" }
        ])
    );
}

#[tokio::test]
async fn test_repeated_keys_without_brackets() {
    let server = TestServer::start().await;
    let form = server.form(&[
        ("table", "cars"),
        ("columns", "plate"),
        ("columns", "model"),
        ("values", "DD-4"),
        ("values", "Golf"),
    ]);
    assert_eq!(server.legacy("insert", &form).await, "true");

    let form = server.form(&[
        ("table", "cars"),
        ("columns", "plate"),
        ("values", "DD-4"),
    ]);
    let body = server.legacy("select_one_matching", &form).await;
    let row: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(row["model"], json!("Golf"));
}

#[tokio::test]
async fn test_mismatched_lists() {
    let server = TestServer::start().await;
    let form = server.form(&[
        ("table", "cars"),
        ("columns[]", "plate"),
        ("columns[]", "model"),
        ("values[]", "EE-5"),
    ]);

    assert_eq!(server.legacy("insert", &form).await, "false");

    let response = server.post("api", "insert", &form, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"]["kind"], json!("validation"));
}

#[tokio::test]
async fn test_select_one_where_and_two_columns() {
    let server = TestServer::start().await;
    add_car(&server, "AB-100", "Ibiza", "100").await;
    add_car(&server, "AB-200", "Ibiza", "200").await;
    add_car(&server, "ZZ-300", "Panda", "300").await;

    let form = server.form(&[
        ("table", "cars"),
        ("column", "plate"),
        ("singular_value", "AB"),
        ("order_column", "ID"),
        ("asc_or_desc", "DESC"),
    ]);
    let body = server.legacy("select_one_where", &form).await;
    let row: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(row["plate"], json!("AB-200"));

    let form = server.form(&[
        ("table", "cars"),
        ("column1", "plate"),
        ("value1", "AB"),
        ("column2", "model"),
        ("value2", "biz"),
    ]);
    let body = server.legacy("select_where_two_columns", &form).await;
    let rows: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let form = server.form(&[
        ("table", "cars"),
        ("column", "plate"),
        ("singular_value", "nothing-like-this"),
    ]);
    assert_eq!(server.legacy("select_one_where", &form).await, "false");
}

#[tokio::test]
async fn test_update_and_not_found() {
    let server = TestServer::start().await;
    add_car(&server, "AB-100", "Ibiza", "100").await;

    let form = server.form(&[
        ("table", "cars"),
        ("pk_column", "plate"),
        ("pk_value", "AB-100"),
        ("update_column", "km"),
        ("update_value", "150"),
    ]);
    assert_eq!(server.legacy("update", &form).await, "true");

    let form = server.form(&[
        ("table", "cars"),
        ("column", "km"),
        ("value", "150"),
    ]);
    assert_eq!(server.legacy("exists", &form).await, "true");

    let form = server.form(&[
        ("table", "cars"),
        ("pk_column", "plate"),
        ("pk_value", "missing"),
        ("update_column", "km"),
        ("update_value", "1"),
    ]);
    assert_eq!(server.legacy("update", &form).await, "false");
    let response = server.post("api", "update", &form, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_reports_count() {
    let server = TestServer::start().await;
    add_car(&server, "AB-100", "Ibiza", "100").await;
    add_car(&server, "AB-100", "Ibiza", "200").await;
    add_car(&server, "CD-300", "Panda", "300").await;

    let form = server.form(&[
        ("table", "cars"),
        ("columns[]", "plate"),
        ("values[]", "AB-100"),
    ]);
    let response = server.post("api", "delete", &form, None).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "data": { "deleted": 2 } }));

    // Zero rows deleted is still a success.
    assert_eq!(server.legacy("delete", &form).await, "true");

    let form = server.form(&[("table", "cars")]);
    let rows: Value = serde_json::from_str(&server.legacy("select_all", &form).await).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_hostile_identifier_rejected() {
    let server = TestServer::start().await;
    let form = server.form(&[("table", "cars`; DROP TABLE cars; --")]);

    let response = server.post("api", "select_all", &form, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let form = server.form(&[("table", "cars")]);
    let response = server.post("api", "select_all", &form, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_database_is_connection_failure() {
    let server = TestServer::start().await;
    let missing = std::env::temp_dir().join(format!("absent_{}.db", uuid::Uuid::new_v4()));
    let form = vec![
        ("db_name".to_string(), missing.to_string_lossy().into_owned()),
        ("table".to_string(), "cars".to_string()),
    ];

    let response = server.post("api", "select_all", &form, None).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], json!("connection_failed"));

    assert_eq!(server.legacy("select_all", &form).await, "false");
}
