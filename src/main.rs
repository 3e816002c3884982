use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ore_dashboard_backend::{
    config::Config, handlers, jobs::snapshot_poll::start_snapshot_poll_jobs, AppState,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ore_dashboard_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();
    let model_dir = config.model_dir.clone();

    let state = AppState::new(config);

    // Background polling for the dashboard snapshot store
    let poller = start_snapshot_poll_jobs(&state);

    // Build router
    let app = Router::new()
        .route("/", get(hello_ore_dashboard))
        .route("/api/buyback", get(handlers::buyback::get_buyback))
        .route("/api/motherlode", get(handlers::motherlode::get_motherlode))
        .route("/api/round", get(handlers::round::get_round))
        .route("/api/prices", get(handlers::prices::get_prices))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/model", get(handlers::model::get_model_metadata))
        .nest_service("/hawg-3d", ServeDir::new(&model_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Polling stops with the server; aborted tasks can no longer touch state
    poller.shutdown();
}

async fn hello_ore_dashboard() -> &'static str {
    "Hello from the ORE Dashboard Backend! ⛏️"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
