use axum::extract::State;
use axum::Json;
use serde::Serialize;
use timetrack_core::sync::{ClockifySync, HttpClockifyClient, SyncReport, SyncSnapshot};
use timetrack_core::UnitOfWork;

use crate::app_state::{run_blocking, AppState};
use crate::errors::ApiError;

const ACTION: &str = "syncing data to Clockify";

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub message: String,
    pub report: SyncReport,
}

/// Pushes a snapshot of local data to Clockify.
///
/// The connection lock is released once the snapshot is loaded; the
/// network calls run afterwards on the blocking pool.
pub async fn sync_clockify(State(state): State<AppState>) -> Result<Json<SyncResponse>, ApiError> {
    let snapshot = state
        .with_conn(ACTION, |conn| {
            SyncSnapshot::load(&UnitOfWork::new(conn)).map_err(|err| ApiError::internal(ACTION, err))
        })
        .await?;

    let config = state.clockify().clone();
    let report = run_blocking(ACTION, move || {
        let client =
            HttpClockifyClient::new(&config).map_err(|err| ApiError::internal(ACTION, err))?;
        ClockifySync::new(client, config.workspace_id().map(str::to_string))
            .run(&snapshot)
            .map_err(|err| ApiError::internal(ACTION, err))
    })
    .await?;

    Ok(Json(SyncResponse {
        message: "Data synchronized to Clockify successfully".to_string(),
        report,
    }))
}
