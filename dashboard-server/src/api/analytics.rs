use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use dashboard_types::{PlatformAnalytics, PostEngagement, UserAnalytics};

use super::validation::validate_page;
use crate::{
    api::ApiResult,
    db::{repositories::AnalyticsRepository, PageRequest},
    state::AppState,
};

/// GET /analytics/users/:id - Post totals and follower count for one user
pub async fn user_analytics(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<UserAnalytics>> {
    let Path(user_id) = user_id?;
    let repo = AnalyticsRepository::new(state.db.pool.clone());
    Ok(Json(repo.user_analytics(user_id)?))
}

/// GET /analytics/posts - Posts ranked by engagement
pub async fn post_engagement(
    State(state): State<AppState>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<Vec<PostEngagement>>> {
    let Query(page) = page?;
    validate_page(&page)?;

    let repo = AnalyticsRepository::new(state.db.pool.clone());
    Ok(Json(repo.post_engagement(page)?))
}

/// GET /admin/platform-analytics - Totals across the whole platform
pub async fn platform_analytics(
    State(state): State<AppState>,
) -> ApiResult<Json<PlatformAnalytics>> {
    let repo = AnalyticsRepository::new(state.db.pool.clone());
    Ok(Json(repo.platform_analytics()?))
}
