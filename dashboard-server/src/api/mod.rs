pub mod analytics;
pub mod auth;
pub mod error;
pub mod posts;
pub mod profiles;
pub mod users;
pub mod validation;

pub use error::{ApiError, ApiResult};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Build every route; all but the health check and login require a demo token
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        // User routes
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Profile routes
        .route(
            "/profiles",
            post(profiles::create_profile).get(profiles::list_profiles),
        )
        .route(
            "/profiles/:id",
            get(profiles::get_profile)
                .patch(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
        // Post routes
        .route("/posts", post(posts::create_post).get(posts::list_posts))
        .route(
            "/posts/:id",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        // Analytics routes
        .route("/analytics/users/:id", get(analytics::user_analytics))
        .route("/analytics/posts", get(analytics::post_engagement))
        .route("/admin/platform-analytics", get(analytics::platform_analytics))
        .route_layer(middleware::from_fn(crate::auth::require_demo_token));

    Router::new()
        .route("/", get(auth::health_check))
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .with_state(state)
}
