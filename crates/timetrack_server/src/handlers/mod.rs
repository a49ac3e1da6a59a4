mod export;
mod init;
mod projects;
mod sync;
mod tasks;
mod time_entries;
mod users;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use timetrack_core::EntityId;

use crate::app_state::AppState;
use crate::errors::ApiError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/users/:id/details", get(users::user_details))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/api/projects/:id/details", get(projects::project_details))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/api/tasks/:id/details", get(tasks::task_details))
        .route("/api/tasks/project/:project_id", get(tasks::tasks_by_project))
        .route("/api/tasks/user/:user_id", get(tasks::tasks_by_user))
        .route(
            "/api/timeentries",
            get(time_entries::list_time_entries).post(time_entries::create_time_entry),
        )
        .route(
            "/api/timeentries/:id",
            get(time_entries::get_time_entry)
                .put(time_entries::update_time_entry)
                .delete(time_entries::delete_time_entry),
        )
        .route(
            "/api/timeentries/task/:task_id",
            get(time_entries::time_entries_by_task),
        )
        .route(
            "/api/timeentries/user/:user_id",
            get(time_entries::time_entries_by_user),
        )
        .route("/api/export", get(export::export_time_entries))
        .route("/api/sync/clockify", post(sync::sync_clockify))
        .route("/api/init/sample-data", post(init::seed_sample_data))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }

    pub fn deleted(entity: &str, id: EntityId) -> Json<Self> {
        Self::new(format!("{entity} with ID {id} deleted successfully"))
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(ApiError::from_rejection)
}

fn path_id(path: Result<Path<EntityId>, PathRejection>) -> Result<EntityId, ApiError> {
    path
        .map(|Path(id)| id)
        .map_err(ApiError::from_path_rejection)
}

/// 201 with a `Location` header pointing at the new row.
fn created<T: Serialize>(location: String, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}
