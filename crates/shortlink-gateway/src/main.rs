mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use shortlink_core::{Repository, Shortener};
use shortlink_gateway::{App, AppState};
use shortlink_generator::RandomGenerator;
use shortlink_shortener::LinkService;
use shortlink_storage::{InMemoryRepository, PostgresRepository, PostgresSettings};
use shortlink_telemetry::{LogFormat, TelemetrySettings};
use tracing::{info, warn};

use crate::cli::{LogFormatArg, StorageBackendArg, CLI};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    shortlink_telemetry::init(&telemetry_settings(&config))
        .context("failed to initialise logging")?;

    let backend = config.storage_backend();
    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %backend,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting shortlink"
    );

    let shortener: Arc<dyn Shortener> = match backend {
        StorageBackendArg::InMemory => build_shortener(InMemoryRepository::new(), &config)?,
        StorageBackendArg::Postgres => {
            let repository = PostgresRepository::connect(&postgres_settings(&config))
                .await
                .context("failed to connect to postgres")?;
            repository
                .migrate()
                .await
                .context("failed to apply database migrations")?;
            build_shortener(repository, &config)?
        }
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "starting HTTP server");

    let state = AppState::new(shortener, config.public_base_url);
    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("shortlink stopped");
    Ok(())
}

fn build_shortener<R: Repository>(
    repository: R,
    config: &CLI,
) -> anyhow::Result<Arc<dyn Shortener>> {
    let generator =
        RandomGenerator::new(config.code_length).context("invalid --code-length")?;
    let service = LinkService::new(repository, generator).with_max_attempts(config.max_attempts);
    Ok(Arc::new(service))
}

fn postgres_settings(config: &CLI) -> PostgresSettings {
    PostgresSettings::builder()
        .host(config.postgres_host.as_str())
        .port(config.postgres_port)
        .user(config.postgres_user.as_str())
        .password(config.postgres_password.as_str())
        .database(config.postgres_db.as_str())
        .max_connections(config.pool_size)
        .acquire_timeout(Duration::from_secs(config.pool_acquire_timeout_secs))
        .build()
}

fn telemetry_settings(config: &CLI) -> TelemetrySettings {
    let format = match config.log_format {
        LogFormatArg::Text => LogFormat::Text,
        LogFormatArg::Json => LogFormat::Json,
    };

    match &config.log_file {
        Some(path) => TelemetrySettings::builder()
            .filter(config.log_filter.as_str())
            .format(format)
            .log_file(path.as_path())
            .build(),
        None => TelemetrySettings::builder()
            .filter(config.log_filter.as_str())
            .format(format)
            .build(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
