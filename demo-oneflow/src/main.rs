use axum::Router;

use oneflow_axum::{ONEFLOW_ROUTE_PREFIX, oneflow_router};

mod server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    server::init_tracing("demo_oneflow");

    let port = std::env::var("ONEFLOW_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let app = Router::new().nest(ONEFLOW_ROUTE_PREFIX.as_str(), oneflow_router());

    tracing::info!(
        "Serving {}/legacy/* and {}/api/*",
        *ONEFLOW_ROUTE_PREFIX,
        *ONEFLOW_ROUTE_PREFIX
    );
    server::serve(port, app).await?;
    Ok(())
}
