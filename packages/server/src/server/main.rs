// Main entry point for the notes API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use notes_core::domains::auth::{JwtService, OtpPolicy, OtpStore};
use notes_core::kernel::{
    start_scheduler, BaseMailer, BaseNoteStore, BaseUserStore, InMemoryStore, LogMailer,
    MailerAdapter, PostgresStore, ServerDeps, StorageBackend,
};
use notes_core::{server::build_app, Config};
use mailer::{MailerOptions, MailerService};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,notes_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting notes API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let (users, notes, storage) = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations complete");

            let store = PostgresStore::new(pool);
            let users: Arc<dyn BaseUserStore> = Arc::new(store.clone());
            let notes: Arc<dyn BaseNoteStore> = Arc::new(store);
            (users, notes, StorageBackend::Postgres)
        }
        None => {
            tracing::warn!("DATABASE_URL not set: users and notes are kept in memory");
            let store = InMemoryStore::new();
            let users: Arc<dyn BaseUserStore> = Arc::new(store.clone());
            let notes: Arc<dyn BaseNoteStore> = Arc::new(store);
            (users, notes, StorageBackend::Memory)
        }
    };

    let mailer: Arc<dyn BaseMailer> = match &config.mail_api_key {
        Some(api_key) => Arc::new(MailerAdapter::new(Arc::new(MailerService::new(
            MailerOptions {
                api_url: config.mail_api_url.clone(),
                api_key: api_key.clone(),
                from: config.mail_from.clone(),
            },
        )))),
        None => Arc::new(LogMailer),
    };

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        chrono::Duration::hours(config.session_ttl_hours),
    ));

    let otp_policy = OtpPolicy {
        ttl: chrono::Duration::seconds(config.otp_ttl_secs),
        code_length: config.otp_length,
    };
    let otp_store = OtpStore::new();

    // Keep the scheduler alive for the lifetime of the server
    let _scheduler = if config.otp_sweep_interval_secs > 0 {
        let scheduler = start_scheduler(
            otp_store.clone(),
            Duration::from_secs(config.otp_sweep_interval_secs),
            otp_policy.ttl,
        )
        .await
        .context("Failed to start scheduled tasks")?;
        tracing::info!(
            every_secs = config.otp_sweep_interval_secs,
            "OTP expiry sweep scheduled"
        );
        Some(scheduler)
    } else {
        None
    };

    let deps = ServerDeps::new(
        users,
        notes,
        mailer,
        otp_store,
        otp_policy,
        jwt_service,
        storage,
    );

    // Build application
    let app = build_app(deps, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
