//! HabitForge API Server
//!
//! REST API server for habit extraction.
//!
//! Author: hephaex@gmail.com

use habit_api::{create_router, state::AppState};
use habit_core::AppConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (HABIT_CONFIG points at an optional TOML file)
    let config = match std::env::var("HABIT_CONFIG") {
        Ok(path) => AppConfig::from_file(path)?.with_env_override()?,
        Err(_) => AppConfig::from_env()?,
    };

    init_tracing(&config);

    let pipeline = habit_nlp::create_pipeline(&config)?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::new(config).with_pipeline(Arc::new(pipeline)));

    // Create router
    let app = create_router(state.clone());

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HabitForge API Server starting on http://{}", addr);
    tracing::info!("OpenAPI document at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "habit_api={level},habit_extractor={level},habit_nlp={level},tower_http={level}",
            level = config.logging.level
        )
        .into()
    });

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.json_format {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Waits for ctrl-c, then reports not-ready while in-flight requests drain
async fn shutdown_signal(state: Arc<AppState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    state.set_ready(false);
    tracing::info!("shutdown signal received");
}
