//! Spawned test server backed by a throwaway SQLite file

use std::path::PathBuf;

use axum::Router;
use oneflow::Backend;
use oneflow_axum::oneflow_router_with_backend;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};

const SCHEMA: &str = r#"
    CREATE TABLE cars (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        plate TEXT NOT NULL,
        model TEXT,
        km TEXT
    );
    CREATE TABLE users (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        token TEXT
    );
"#;

pub const COOKIE_NAME: &str = "oneflow_sid";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    db_path: PathBuf,
}

impl TestServer {
    pub async fn start() -> Self {
        let db_path =
            std::env::temp_dir().join(format!("oneflow_axum_{}.db", uuid::Uuid::new_v4()));
        let opts = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&opts)
            .await
            .expect("Failed to create test database");
        sqlx::raw_sql(SCHEMA)
            .execute(&mut conn)
            .await
            .expect("Failed to apply schema");
        conn.close().await.ok();

        let app = Router::new().nest("/oneflow", oneflow_router_with_backend(Backend::Sqlite));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}/oneflow"),
            client: reqwest::Client::new(),
            db_path,
        }
    }

    pub fn db_name(&self) -> String {
        self.db_path.to_string_lossy().into_owned()
    }

    /// Form body starting with the connection parameters for this server's database.
    pub fn form(&self, fields: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut form = vec![
            ("host".to_string(), "localhost".to_string()),
            ("user".to_string(), "fleet".to_string()),
            ("password".to_string(), "secret".to_string()),
            ("db_name".to_string(), self.db_name()),
        ];
        form.extend(fields.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        form
    }

    pub async fn post(
        &self,
        mount: &str,
        route: &str,
        form: &[(String, String)],
        cookie: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self
            .client
            .post(format!("{}/{mount}/{route}", self.base_url))
            .form(form);
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        request.send().await.expect("Request failed")
    }

    pub async fn legacy(&self, route: &str, form: &[(String, String)]) -> String {
        let response = self.post("legacy", route, form, None).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.text().await.expect("Failed to read body")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.db_path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// `name=value` part of a `Set-Cookie` header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
