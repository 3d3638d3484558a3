use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_recommendation_service::config::Config;
use book_recommendation_service::handlers::{self, BookHandlerState};
use book_recommendation_service::metrics;
use book_recommendation_service::services::{self, ArtifactPaths};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},actix_web=info", config.app.log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();

    tracing::info!(
        "Starting book-recommendation-service v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Environment: {}", config.app.env);

    // Artifacts must load completely before anything is served
    let paths = ArtifactPaths::from_config(&config.artifacts);
    let engine_config = config.engine.clone();
    let loaded = tokio::task::spawn_blocking(move || services::load(&paths, &engine_config))
        .await
        .context("Artifact loading task panicked")?;
    let engine = match loaded {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::error!(kind = e.kind(), "Failed to load recommendation artifacts: {}", e);
            return Err(e).context("Refusing to start without valid model artifacts");
        }
    };
    metrics::set_retained_books(engine.available_titles().len());

    let state = web::Data::new(BookHandlerState { engine });

    tracing::info!("HTTP server listening on 0.0.0.0:{}", config.app.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(("0.0.0.0", config.app.port))?
    .run()
    .await?;

    Ok(())
}
