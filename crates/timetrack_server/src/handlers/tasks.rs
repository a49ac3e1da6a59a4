use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use timetrack_core::{
    Entity, EntityId, NewTask, ReportService, TaskDetail, TaskItem, TaskService,
};

use super::{created, json_body, path_id, MessageResponse};
use crate::app_state::AppState;
use crate::errors::ApiError;

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskItem>>, ApiError> {
    let tasks = state
        .with_uow("retrieving tasks", |uow| TaskService::new(uow).list_tasks())
        .await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<TaskItem>, ApiError> {
    let id = path_id(id)?;
    let task = state
        .with_uow("retrieving task", move |uow| TaskService::new(uow).get_task(id))
        .await?;
    Ok(Json(task))
}

pub async fn task_details(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<TaskDetail>, ApiError> {
    let id = path_id(id)?;
    let detail = state
        .with_uow("retrieving task details", move |uow| {
            ReportService::new(uow).task_details(id)
        })
        .await?;
    Ok(Json(detail))
}

pub async fn tasks_by_project(
    State(state): State<AppState>,
    project_id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<TaskItem>>, ApiError> {
    let project_id = path_id(project_id)?;
    let tasks = state
        .with_uow("retrieving tasks for project", move |uow| {
            TaskService::new(uow).list_tasks_by_project(project_id)
        })
        .await?;
    Ok(Json(tasks))
}

pub async fn tasks_by_user(
    State(state): State<AppState>,
    user_id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Vec<TaskItem>>, ApiError> {
    let user_id = path_id(user_id)?;
    let tasks = state
        .with_uow("retrieving tasks for user", move |uow| {
            TaskService::new(uow).list_tasks_by_user(user_id)
        })
        .await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Response, ApiError> {
    let draft = json_body(payload)?;
    let task = state
        .with_uow("creating task", move |uow| {
            TaskService::new(uow).create_task(&draft)
        })
        .await?;
    Ok(created(format!("/api/tasks/{}", task.id), task))
}

pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<TaskItem>, ApiError> {
    let id = path_id(id)?;
    let draft = json_body(payload)?;
    let task = state
        .with_uow("updating task", move |uow| {
            TaskService::new(uow).update_task(id, &draft)
        })
        .await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = path_id(id)?;
    state
        .with_uow("deleting task", move |uow| TaskService::new(uow).delete_task(id))
        .await?;
    Ok(MessageResponse::deleted(TaskItem::LABEL, id))
}
