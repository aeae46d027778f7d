// Main entry point for the event cancels worker

use anyhow::{Context, Result};
use event_cancels::kernel::{
    NatsClientTransport, NatsTransport, PgEventStore, ServerDeps, SqlGateway,
};
use event_cancels::server::{InboundMessage, Worker};
use event_cancels::Config;
use futures::StreamExt;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,event_cancels=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting event cancels worker");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tracing::info!(url = %config.nats_url, "Connecting to NATS...");
    let client = async_nats::ConnectOptions::new()
        .request_timeout(Some(config.request_timeout))
        .connect(config.nats_url.as_str())
        .await
        .context("Failed to connect to NATS")?;
    tracing::info!("NATS connected");

    let transport: Arc<dyn NatsTransport> = Arc::new(NatsClientTransport::new(client.clone()));
    let deps = ServerDeps::new(
        Arc::new(PgEventStore::new(pool)),
        Arc::new(SqlGateway::new(transport.clone(), config.sql_subject.clone())),
    );

    let subscriber = client
        .queue_subscribe(config.input_subject.clone(), config.queue_group.clone())
        .await
        .context("Failed to subscribe to input subject")?;
    tracing::info!(
        subject = %config.input_subject,
        queue_group = %config.queue_group,
        "Listening for cancellation requests"
    );

    let worker = Worker::new(
        deps,
        transport,
        config.output_subject.clone(),
        config.max_concurrent_requests,
    );

    tokio::select! {
        result = worker.run(subscriber.map(InboundMessage::from)) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutdown signal received"),
    }

    Ok(())
}
