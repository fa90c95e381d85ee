use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};

use dashboard_types::{CreateUserRequest, StatusResponse, UpdateUserRequest, User};

use super::validation::{validate_email, validate_page};
use crate::{
    api::ApiResult,
    auth::Caller,
    db::{repositories::UserRepository, PageRequest},
    state::AppState,
};

/// POST /users - Create a user
pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(payload) = payload?;
    validate_email(&payload.email)?;

    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo.create(&payload.email, &payload.name)?;

    tracing::info!("Created user {} (by {})", user.id, caller.email);
    Ok(Json(user))
}

/// GET /users - List users, newest first
pub async fn list_users(
    State(state): State<AppState>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<Vec<User>>> {
    let Query(page) = page?;
    validate_page(&page)?;

    let repo = UserRepository::new(state.db.pool.clone());
    Ok(Json(repo.list(page)?))
}

/// GET /users/:id - Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(user_id) = user_id?;
    let repo = UserRepository::new(state.db.pool.clone());
    Ok(Json(repo.get_by_id(user_id)?))
}

/// PATCH /users/:id - Update name and/or role
pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    user_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Path(user_id) = user_id?;
    let Json(payload) = payload?;

    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo.update(user_id, &payload)?;

    tracing::info!("Updated user {} (by {})", user_id, caller.email);
    Ok(Json(user))
}

/// DELETE /users/:id - Delete a user and everything that references it
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(user_id) = user_id?;
    let repo = UserRepository::new(state.db.pool.clone());
    repo.delete(user_id)?;

    tracing::info!("Deleted user {} (by {})", user_id, caller.email);
    Ok(Json(StatusResponse::deleted()))
}
