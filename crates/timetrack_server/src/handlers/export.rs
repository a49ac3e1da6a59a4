use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Local;
use timetrack_core::export::{export_time_entries_csv, report_file_name, CSV_CONTENT_TYPE};
use timetrack_core::UnitOfWork;

use crate::app_state::AppState;
use crate::errors::ApiError;

const ACTION: &str = "exporting time entries";

pub async fn export_time_entries(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bytes = state
        .with_conn(ACTION, |conn| {
            export_time_entries_csv(&UnitOfWork::new(conn))
                .map_err(|err| ApiError::internal(ACTION, err))
        })
        .await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_file_name(Local::now())
    );
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
