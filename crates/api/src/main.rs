use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spinwin_api::config::ServerConfig;
use spinwin_api::state::AppState;
use spinwin_api::{background, router};
use spinwin_core::catalog::Catalog;
use spinwin_core::clock::{Clock, SystemClock};
use spinwin_core::cooldown::CooldownPolicy;
use spinwin_core::random::ThreadRandom;
use spinwin_delivery::{CodeDispatcher, EmailConfig, EmailSender, LogSmsSender};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spinwin_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    if !config.otp_channels.is_valid() {
        panic!("At least one of ENABLE_EMAIL_OTP / ENABLE_PHONE_OTP must be enabled");
    }
    let policy = CooldownPolicy::with_offset_minutes(config.cooldown_offset_minutes)
        .unwrap_or_else(|e| panic!("Invalid COOLDOWN_UTC_OFFSET_MINUTES: {e}"));
    tracing::info!(offset = %policy.offset(), "Cooldown reference offset");

    // --- Store ---
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = spinwin_store::connect(&config.store_url, Arc::clone(&clock))
        .await
        .expect("Failed to open key-value store");
    tracing::info!(backend = store.backend(), "Key-value store opened");

    spinwin_store::health_check(store.as_ref())
        .await
        .expect("Store health check failed");
    tracing::info!("Store health check passed");

    // --- Code delivery ---
    let email_config = EmailConfig::from_env();
    if email_config.is_none() {
        tracing::warn!("SMTP_HOST not set; verification codes will only be logged");
    }
    let sender = Arc::new(CodeDispatcher::new(
        Arc::new(EmailSender::new(email_config, config.expose_otp_in_response)),
        Arc::new(LogSmsSender),
    ));

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        sender,
        clock,
        rng: Arc::new(ThreadRandom),
        catalog: Arc::new(Catalog::default()),
        policy,
    };

    // --- Maintenance ---
    let maintenance_cancel = tokio_util::sync::CancellationToken::new();
    let maintenance_handle = tokio::spawn(background::sweep::run(
        state.clone(),
        maintenance_cancel.clone(),
    ));

    // --- Router ---
    let app = router::build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    maintenance_cancel.cancel();
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        maintenance_handle,
    )
    .await;
    tracing::info!("Maintenance job stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
