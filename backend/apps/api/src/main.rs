//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

mod app;
mod config;

use console::domain::account::Account;
use console::{MemoryAccountRepository, MemoryCameraRepository};
use gate::domain::repository::SessionRepository;
use gate::{MemoryOptLogRepository, MemorySessionRepository, MemoryUserRepository};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{Repositories, build_router};
use crate::config::AppConfig;

/// How often idle sessions are swept
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,gate=info,console=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail fast on bad configuration
    let config = AppConfig::from_env()?;

    tracing::info!(
        enforcement_enabled = config.gate.enforcement_enabled(),
        exempt_patterns = config.gate.exempt_patterns().len(),
        login_path = %config.gate.login_path(),
        context_path = %config.context_path,
        "Login gate configured"
    );
    if !config.gate.enforcement_enabled() {
        tracing::warn!("Login gate disabled, every request is allowed");
    }

    let sessions = MemorySessionRepository::from_config(&config.session);

    // Periodic cleanup: errors are logged, never fatal
    let sweeper = sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            match sweeper.cleanup_expired().await {
                Ok(0) => {}
                Ok(removed) => {
                    tracing::info!(sessions_deleted = removed, "Idle session cleanup completed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Idle session cleanup failed, continuing anyway");
                }
            }
        }
    });

    let demo_account_ids: Vec<String> = config
        .demo_users
        .iter()
        .map(|(_, _, int_user_id)| int_user_id.clone())
        .collect();

    let repos = Repositories {
        sessions,
        users: MemoryUserRepository::new(config.demo_users.clone()),
        opt_log: MemoryOptLogRepository::default(),
        cameras: MemoryCameraRepository::demo(),
        accounts: MemoryAccountRepository::new(demo_account_ids.into_iter().map(|int_user_id| {
            Account {
                card_no: format!("6222{:0>12}", int_user_id),
                int_user_id,
                fee_rate: Decimal::new(3, 3),
            }
        })),
    };

    let app = build_router(&config, repos);

    // Start server
    tracing::info!("Listening on {}", config.addr);

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
