//! Main Entrypoint for the Parlance API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the conversation catalog from disk.
//! 3. Initializing shared services (conversation source, segmenter, translator).
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use parlance_api::{config::Config, router::create_router, state::AppState};
use parlance_core::{
    catalog::Catalog,
    segment::{ClauseSegmenter, ParagraphSegmenter},
    source::{CatalogConversationSource, ConversationSource},
    translate::{PhraseTableTranslator, Translator},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load the Conversation Catalog ---
    let catalog = Catalog::load_dir(&config.catalog_path)
        .context("Failed to load the conversation catalog")?;
    let topics = catalog.topics_matching(&config.source_language, config.proficiency);
    anyhow::ensure!(
        !topics.is_empty(),
        "catalog at {} has no sets for {} at the {} level",
        config.catalog_path.display(),
        config.source_language,
        config.proficiency
    );

    // --- 4. Initialize Shared Services ---
    let phrase_table = PhraseTableTranslator::new(catalog.phrase_pairs().cloned());
    info!(
        sets = catalog.sets.len(),
        topics = topics.len(),
        phrases = phrase_table.len(),
        "Conversation catalog loaded."
    );
    let translator: Arc<dyn Translator> = Arc::new(phrase_table);
    let segmenter: Arc<dyn ParagraphSegmenter> = Arc::new(ClauseSegmenter::default());
    let source: Arc<dyn ConversationSource> = Arc::new(CatalogConversationSource::new(catalog));

    let app_state = Arc::new(AppState {
        session: Arc::new(Mutex::new(None)),
        source,
        segmenter,
        translator,
        topics,
        config: Arc::new(config.clone()),
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        language = %config.source_language,
        proficiency = %config.proficiency,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has shut down.");
    Ok(())
}
