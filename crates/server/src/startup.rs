use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(event = "shutdown_signal_error", error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "shutting down gracefully");
}

/// Public entry: load configuration, then serve until Ctrl+C.
pub async fn run() -> Result<(), StartupError> {
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    run_with_config(cfg).await
}

/// Connect, migrate, seed, then serve with graceful shutdown.
pub async fn run_with_config(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!(event = "migrations_applied");

    if cfg.database.seed_service_bays {
        let seeded = models::seed::seed_service_bays(&db)
            .await
            .map_err(|e| StartupError::Any(e.into()))?;
        if seeded == 0 {
            info!(event = "seed_skipped", "service bays already present");
        }
    }

    let state = ServerState::new(db, &cfg.reservations);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(
        %addr,
        serialize_per_bay = cfg.reservations.serialize_per_bay,
        refilter_snapshot = cfg.reservations.refilter_snapshot,
        "starting server"
    );
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;
    info!(event = "server_stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let mut cfg = AppConfig::default();
        assert_eq!(bind_addr(&cfg).unwrap().port(), 3000);
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
