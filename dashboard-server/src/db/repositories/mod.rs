mod analytics_repository;
mod follower_repository;
mod post_repository;
mod profile_repository;
mod user_repository;

pub use analytics_repository::AnalyticsRepository;
pub use follower_repository::FollowerRepository;
pub use post_repository::PostRepository;
pub use profile_repository::ProfileRepository;
pub use user_repository::UserRepository;
