//! Server assembly
//!
//! Builds the router, starts the gift maintenance tasks and serves HTTP
//! until a shutdown signal, then tears the tasks down.

use crate::core::{BackgroundTasks, Config, ServerState, TaskKind};
use crate::gifts::{ExpirySweeper, SettingsWatcher};
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(self) -> Result<(), AppError> {
        let state = match self.state {
            Some(state) => state,
            None => ServerState::initialize(&self.config).await?,
        };

        // Gift maintenance runs for exactly as long as the server does.
        let mut tasks = BackgroundTasks::new();
        let sweeper = ExpirySweeper::new(state.clone(), tasks.shutdown_token());
        tasks.spawn("gift_expiry_sweep", TaskKind::Periodic, sweeper.run());
        let watcher = SettingsWatcher::new(state.clone(), tasks.shutdown_token());
        tasks.spawn("wheel_settings_watch", TaskKind::Periodic, watcher.run());
        tasks.log_summary();

        let app = crate::api::router(state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        tracing::info!("Récif storefront server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        tasks.shutdown().await;
        Ok(())
    }
}
