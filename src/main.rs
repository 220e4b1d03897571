mod api;
mod classifier;
mod config;
mod nutrition;
mod storage;

use crate::api::{health_handler, AppState};
use crate::classifier::ClassifierService;
use crate::config::AppConfig;
use crate::nutrition::NutritionTable;
use crate::storage::UploadStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Food Lens API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Model: {:?}", config.classifier.model_path);
    info!("   - Input Size: {}", config.classifier.input_size);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Initialize classifier
    info!("🧠 Initializing classifier model...");
    let classifier = Arc::new(ClassifierService::new(
        &config.classifier.model_path,
        &config.classifier.labels_path,
        config.classifier.input_size,
    )?);
    info!("✅ Classifier ready ({} labels)", classifier.label_count());

    // Build nutrition table
    let nutrition = Arc::new(NutritionTable::builtin());
    info!("✅ Nutrition table ready ({} foods)", nutrition.len());

    // Initialize upload store
    info!("💾 Initializing upload store...");
    let uploads = Arc::new(UploadStore::new(&config.storage.upload_dir));
    uploads.initialize()?;
    info!("✅ Upload store ready");

    // Create application state
    let state = AppState {
        classifier,
        nutrition,
        uploads: uploads.clone(),
    };

    // Build router with modular routes
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(api::analyze::routes())
        .merge(api::nutrition::routes())
        .nest_service("/uploads", ServeDir::new(uploads.dir()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let port = std::env::var("PORT").unwrap_or_else(|_| config.server.port.to_string());
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health             - Health check");
    info!("   POST /analyze            - Analyze food photo + biometrics");
    info!("   GET  /nutrition/{{label}}  - Nutrition facts lookup");
    info!("   POST /intake             - Daily intake suggestion");
    info!("   GET  /uploads/...        - Stored photos");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
