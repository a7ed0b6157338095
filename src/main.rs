use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tallybook::api::handlers::{AppService, api_routes};
use tallybook::config::Config;
use tallybook::infrastructure::logging::in_memory::InMemoryActivityLog;
use tallybook::infrastructure::storage::{SharedStore, in_memory::InMemoryStore, json_file::JsonFileStore};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .init();

    let storage: SharedStore = match &config.data_dir {
        Some(dir) => {
            info!("Storing ledger as JSON in {}", dir.display());
            Arc::new(JsonFileStore::open(dir).await?)
        }
        None => {
            info!("DATA_DIR not set, ledger is kept in memory");
            Arc::new(InMemoryStore::new())
        }
    };
    let service: Arc<AppService> = Arc::new(
        AppService::new(storage, InMemoryActivityLog::new()).with_max_text_length(config.max_text_length),
    );

    let app = Router::new()
        .nest("/api", api_routes(service))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT, http::Method::DELETE])
                .allow_headers([http::header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
