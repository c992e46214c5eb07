mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::roles::PgRoleDirectory;

#[tokio::main]
async fn main() {
    // `.env` is optional.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");
    let state = state::AppState::new(Arc::new(PgRoleDirectory::new(pool)), &config.hook_secret);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "mowmate functions listening");
    axum::serve(listener, app).await.expect("server failed");
}
