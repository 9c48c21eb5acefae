//! HTTP server initialization and runtime setup.
//!
//! Handles store construction, audit sink selection, worker spawning, and
//! Axum server lifecycle.

use crate::application::services::{AuthConfig, AuthService, ShortenerService};
use crate::config::Config;
use crate::domain::audit_event::AuditLogger;
use crate::domain::audit_worker::run_audit_worker;
use crate::infrastructure::audit::{AuditSink, HttpAuditSink, NullAuditSink};
use crate::infrastructure::persistence::{InMemoryAliasRepository, InMemoryTokenRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Builds the shared application state from configuration.
///
/// Spawns the background audit worker, so this must be called from inside a
/// Tokio runtime.
///
/// # Errors
///
/// Returns an error if the remote audit client cannot be built.
pub fn build_state(config: &Config) -> Result<AppState> {
    let sink: Arc<dyn AuditSink> = if let Some(url) = &config.audit_log_url {
        let sink = HttpAuditSink::new(
            url.clone(),
            config.audit_log_token.clone(),
            Duration::from_secs(config.audit_timeout_seconds),
        )
        .context("Failed to build audit HTTP client")?;
        tracing::info!("Audit log enabled ({url})");
        Arc::new(sink)
    } else {
        tracing::info!("Audit log disabled (NullAuditSink)");
        Arc::new(NullAuditSink::new())
    };

    let (audit_tx, audit_rx) = mpsc::channel(config.audit_queue_capacity);
    tokio::spawn(run_audit_worker(audit_rx, sink));
    tracing::info!("Audit worker started");

    let audit = AuditLogger::new(audit_tx);

    let alias_repository = Arc::new(InMemoryAliasRepository::new(config.max_code_attempts));
    let shortener_service = Arc::new(ShortenerService::new(
        alias_repository,
        config.base_url.clone(),
        config.default_validity_minutes,
        audit.clone(),
    ));

    let auth_service = Arc::new(AuthService::new(
        Arc::new(InMemoryTokenRepository::new()),
        AuthConfig {
            credentials: config.auth_credentials.clone(),
            signing_secret: config.token_signing_secret.clone(),
            token_ttl_seconds: config.token_ttl_seconds,
        },
        audit.clone(),
    ));

    Ok(AppState {
        shortener_service,
        auth_service,
        audit,
        require_auth: config.require_auth,
    })
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory alias and token stores
/// - Audit sink (HTTP or NullAuditSink fallback)
/// - Background audit worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The audit client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
