use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};

use dashboard_types::{CreatePostRequest, Post, StatusResponse, UpdatePostRequest};

use super::validation::validate_page;
use crate::{
    api::ApiResult,
    auth::Caller,
    db::{repositories::PostRepository, PageRequest},
    state::AppState,
};

/// POST /posts - Create a post; counters start at zero
pub async fn create_post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> ApiResult<Json<Post>> {
    let Json(payload) = payload?;

    let repo = PostRepository::new(state.db.pool.clone());
    let post = repo.create(&payload)?;

    tracing::info!(
        "Created post {} for user {} (by {})",
        post.id,
        post.user_id,
        caller.email
    );
    Ok(Json(post))
}

/// GET /posts - List posts, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<Vec<Post>>> {
    let Query(page) = page?;
    validate_page(&page)?;

    let repo = PostRepository::new(state.db.pool.clone());
    Ok(Json(repo.list(page)?))
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    post_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Post>> {
    let Path(post_id) = post_id?;
    let repo = PostRepository::new(state.db.pool.clone());
    Ok(Json(repo.get_by_id(post_id)?))
}

/// PATCH /posts/:id - Update content or set engagement counters
pub async fn update_post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    post_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> ApiResult<Json<Post>> {
    let Path(post_id) = post_id?;
    let Json(payload) = payload?;

    let repo = PostRepository::new(state.db.pool.clone());
    let post = repo.update(post_id, &payload)?;

    tracing::info!("Updated post {} (by {})", post_id, caller.email);
    Ok(Json(post))
}

/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    post_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(post_id) = post_id?;
    let repo = PostRepository::new(state.db.pool.clone());
    repo.delete(post_id)?;

    tracing::info!("Deleted post {} (by {})", post_id, caller.email);
    Ok(Json(StatusResponse::deleted()))
}
