use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use events_server::config::{Config, StoreBackend};
use events_server::routes::create_routes;
use events_server::state::AppState;
use events_server::store::{EventStore, MappedStore, RawStore};
use events_server::db;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    let store: Arc<dyn EventStore> = match config.backend {
        StoreBackend::Mapped => Arc::new(MappedStore::new(pool)),
        StoreBackend::Raw => Arc::new(RawStore::new(pool)),
    };
    tracing::info!(backend = ?config.backend, "Store backend selected");

    let app: Router = create_routes(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
