use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use timetrack_core::{
    Entity, EntityId, NewTimeEntry, TimeEntry, TimeEntryService, TimeEntryView,
};

use super::{created, json_body, path_id, MessageResponse};
use crate::app_state::AppState;
use crate::errors::ApiError;

pub async fn list_time_entries(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeEntryView>>, ApiError> {
    let entries = state
        .with_uow("retrieving time entries", |uow| {
            TimeEntryService::new(uow).list_time_entries()
        })
        .await?;
    Ok(Json(entries))
}

pub async fn get_time_entry(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<TimeEntryView>, ApiError> {
    let id = path_id(id)?;
    let entry = state
        .with_uow("retrieving time entry", move |uow| {
            TimeEntryService::new(uow).get_time_entry(id)
        })
        .await?;
    Ok(Json(entry))
}

pub async fn time_entries_by_task(
    State(state): State<AppState>,
    task_id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<TimeEntryView>>, ApiError> {
    let task_id = path_id(task_id)?;
    let entries = state
        .with_uow("retrieving time entries for task", move |uow| {
            TimeEntryService::new(uow).list_time_entries_by_task(task_id)
        })
        .await?;
    Ok(Json(entries))
}

pub async fn time_entries_by_user(
    State(state): State<AppState>,
    user_id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<TimeEntryView>>, ApiError> {
    let user_id = path_id(user_id)?;
    let entries = state
        .with_uow("retrieving time entries for user", move |uow| {
            TimeEntryService::new(uow).list_time_entries_by_user(user_id)
        })
        .await?;
    Ok(Json(entries))
}

pub async fn create_time_entry(
    State(state): State<AppState>,
    payload: Result<Json<NewTimeEntry>, JsonRejection>,
) -> Result<Response, ApiError> {
    let draft = json_body(payload)?;
    let entry = state
        .with_uow("creating time entry", move |uow| {
            TimeEntryService::new(uow).create_time_entry(&draft)
        })
        .await?;
    Ok(created(format!("/api/timeentries/{}", entry.id), entry))
}

pub async fn update_time_entry(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
    payload: Result<Json<NewTimeEntry>, JsonRejection>,
) -> Result<Json<TimeEntryView>, ApiError> {
    let id = path_id(id)?;
    let draft = json_body(payload)?;
    let entry = state
        .with_uow("updating time entry", move |uow| {
            TimeEntryService::new(uow).update_time_entry(id, &draft)
        })
        .await?;
    Ok(Json(entry))
}

pub async fn delete_time_entry(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = path_id(id)?;
    state
        .with_uow("deleting time entry", move |uow| {
            TimeEntryService::new(uow).delete_time_entry(id)
        })
        .await?;
    Ok(MessageResponse::deleted(TimeEntry::LABEL, id))
}
