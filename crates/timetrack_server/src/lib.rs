//! HTTP API for the time tracking backend.

pub mod app_state;
pub mod config;
pub mod errors;
pub mod handlers;

use log::{error, info};
use std::path::Path;
use tokio::signal;

pub use app_state::AppState;
pub use config::{ConfigError, ServerConfig};
pub use errors::ApiError;
pub use handlers::router;

/// Opens the database, binds the listener, and serves until shutdown.
pub async fn serve(config: ServerConfig, config_path: &Path) -> Result<(), ConfigError> {
    let db_path = config.database_path(config_path);
    let conn = timetrack_core::open_db(&db_path)?;
    info!(
        "event=server_db module=server status=ok path={}",
        db_path.display()
    );

    let addr = config.bind_addr()?;
    let app = router(AppState::new(conn, config.clockify));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("event=server_start module=server status=ok addr={addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
        info!("event=shutdown_signal module=server status=ok signal=ctrl_c");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown_signal module=server status=ok signal=terminate");
            }
            Err(err) => {
                error!(
                    "event=signal_install module=server status=error signal=terminate error={err}"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
