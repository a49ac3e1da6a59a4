use axum::extract::State;
use axum::Json;
use chrono::Utc;
use timetrack_core::{seed_sample_data as seed, SeedOutcome};

use super::MessageResponse;
use crate::app_state::AppState;
use crate::errors::ApiError;

const ACTION: &str = "seeding sample data";

pub async fn seed_sample_data(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = state
        .with_conn(ACTION, |conn| {
            seed(conn, Utc::now()).map_err(|err| ApiError::from_service(err, ACTION))
        })
        .await?;

    let message = match outcome {
        SeedOutcome::Seeded(_) => "Sample data seeded successfully",
        SeedOutcome::AlreadyPresent => "Sample data already present",
    };
    Ok(MessageResponse::new(message))
}
