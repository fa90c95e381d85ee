use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};

use dashboard_types::{CreateProfileRequest, Profile, StatusResponse, UpdateProfileRequest};

use super::validation::validate_page;
use crate::{
    api::ApiResult,
    auth::Caller,
    db::{repositories::ProfileRepository, PageRequest},
    state::AppState,
};

/// POST /profiles - Create a profile for an existing user
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<CreateProfileRequest>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let Json(payload) = payload?;

    let repo = ProfileRepository::new(state.db.pool.clone());
    let profile = repo.create(&payload)?;

    tracing::info!(
        "Created profile {} for user {} (by {})",
        profile.id,
        profile.user_id,
        caller.email
    );
    Ok(Json(profile))
}

/// GET /profiles
pub async fn list_profiles(
    State(state): State<AppState>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<Vec<Profile>>> {
    let Query(page) = page?;
    validate_page(&page)?;

    let repo = ProfileRepository::new(state.db.pool.clone());
    Ok(Json(repo.list(page)?))
}

/// GET /profiles/:id
pub async fn get_profile(
    State(state): State<AppState>,
    profile_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Profile>> {
    let Path(profile_id) = profile_id?;
    let repo = ProfileRepository::new(state.db.pool.clone());
    Ok(Json(repo.get_by_id(profile_id)?))
}

/// PATCH /profiles/:id
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    profile_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let Path(profile_id) = profile_id?;
    let Json(payload) = payload?;

    let repo = ProfileRepository::new(state.db.pool.clone());
    let profile = repo.update(profile_id, &payload)?;

    tracing::info!("Updated profile {} (by {})", profile_id, caller.email);
    Ok(Json(profile))
}

/// DELETE /profiles/:id
pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    profile_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(profile_id) = profile_id?;
    let repo = ProfileRepository::new(state.db.pool.clone());
    repo.delete(profile_id)?;

    tracing::info!("Deleted profile {} (by {})", profile_id, caller.email);
    Ok(Json(StatusResponse::deleted()))
}
