use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use timetrack_core::{
    Entity, EntityId, NewUser, ReportService, User, UserDetail, UserService,
};

use super::{created, json_body, path_id, MessageResponse};
use crate::app_state::AppState;
use crate::errors::ApiError;

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .with_uow("retrieving users", |uow| UserService::new(uow).list_users())
        .await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let id = path_id(id)?;
    let user = state
        .with_uow("retrieving user", move |uow| UserService::new(uow).get_user(id))
        .await?;
    Ok(Json(user))
}

pub async fn user_details(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<UserDetail>, ApiError> {
    let id = path_id(id)?;
    let detail = state
        .with_uow("retrieving user details", move |uow| {
            ReportService::new(uow).user_details(id)
        })
        .await?;
    Ok(Json(detail))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Response, ApiError> {
    let draft = json_body(payload)?;
    let user = state
        .with_uow("creating user", move |uow| {
            UserService::new(uow).create_user(&draft)
        })
        .await?;
    Ok(created(format!("/api/users/{}", user.id), user))
}

pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = path_id(id)?;
    let draft = json_body(payload)?;
    let user = state
        .with_uow("updating user", move |uow| {
            UserService::new(uow).update_user(id, &draft)
        })
        .await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = path_id(id)?;
    state
        .with_uow("deleting user", move |uow| UserService::new(uow).delete_user(id))
        .await?;
    Ok(MessageResponse::deleted(User::LABEL, id))
}
