use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use timetrack_core::{
    Entity, EntityId, NewProject, Project, ProjectDetail, ProjectService, ReportService,
};

use super::{created, json_body, path_id, MessageResponse};
use crate::app_state::AppState;
use crate::errors::ApiError;

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state
        .with_uow("retrieving projects", |uow| {
            ProjectService::new(uow).list_projects()
        })
        .await?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Project>, ApiError> {
    let id = path_id(id)?;
    let project = state
        .with_uow("retrieving project", move |uow| {
            ProjectService::new(uow).get_project(id)
        })
        .await?;
    Ok(Json(project))
}

pub async fn project_details(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<ProjectDetail>, ApiError> {
    let id = path_id(id)?;
    let detail = state
        .with_uow("retrieving project details", move |uow| {
            ReportService::new(uow).project_details(id)
        })
        .await?;
    Ok(Json(detail))
}

pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> Result<Response, ApiError> {
    let draft = json_body(payload)?;
    let project = state
        .with_uow("creating project", move |uow| {
            ProjectService::new(uow).create_project(&draft)
        })
        .await?;
    Ok(created(format!("/api/projects/{}", project.id), project))
}

pub async fn update_project(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    let id = path_id(id)?;
    let draft = json_body(payload)?;
    let project = state
        .with_uow("updating project", move |uow| {
            ProjectService::new(uow).update_project(id, &draft)
        })
        .await?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = path_id(id)?;
    state
        .with_uow("deleting project", move |uow| {
            ProjectService::new(uow).delete_project(id)
        })
        .await?;
    Ok(MessageResponse::deleted(Project::LABEL, id))
}
