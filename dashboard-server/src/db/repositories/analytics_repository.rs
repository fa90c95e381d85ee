use dashboard_types::{PlatformAnalytics, Post, PostEngagement, UserAnalytics};
use rusqlite::{Connection, Params};

use super::user_repository::{user_exists, USER_NOT_FOUND};
use crate::db::rows::{query_many, FromRow};
use crate::db::{DbError, DbPool, DbResult, PageRequest};

/// Post count and counter sums, each sum pinned at the i64 bounds
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CounterTotals {
    posts: i64,
    likes: i64,
    comments: i64,
    shares: i64,
}

impl CounterTotals {
    fn add(self, likes: i64, comments: i64, shares: i64) -> Self {
        CounterTotals {
            posts: self.posts + 1,
            likes: self.likes.saturating_add(likes),
            comments: self.comments.saturating_add(comments),
            shares: self.shares.saturating_add(shares),
        }
    }
}

/// Fold the counters of every post matched by `sql`.
///
/// SQLite's `SUM` raises an error once an integer total leaves the i64
/// range, so the rows are summed here instead.
fn fold_counters<P: Params>(conn: &Connection, sql: &str, params: P) -> DbResult<CounterTotals> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut totals = CounterTotals::default();
    while let Some(row) = rows.next()? {
        totals = totals.add(row.get(0)?, row.get(1)?, row.get(2)?);
    }
    Ok(totals)
}

/// Read-only aggregates over users, posts and follower edges
pub struct AnalyticsRepository {
    pool: DbPool,
}

impl AnalyticsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Post totals and follower count for a single user
    pub fn user_analytics(&self, user_id: i64) -> DbResult<UserAnalytics> {
        let conn = self.pool.get()?;

        if !user_exists(&conn, user_id)? {
            return Err(DbError::NotFound(USER_NOT_FOUND.to_string()));
        }

        let totals = fold_counters(
            &conn,
            "SELECT likes, comments, shares FROM posts WHERE user_id = ?1",
            [user_id],
        )?;

        let followers: i64 = conn.query_row(
            "SELECT COUNT(*) FROM followers WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;

        Ok(UserAnalytics {
            user_id,
            total_posts: totals.posts,
            total_likes: totals.likes,
            total_comments: totals.comments,
            total_shares: totals.shares,
            followers,
        })
    }

    /// Posts ranked by likes + comments + shares, newest first on ties
    pub fn post_engagement(&self, page: PageRequest) -> DbResult<Vec<PostEngagement>> {
        let conn = self.pool.get()?;
        let (limit, offset) = page.limit_offset();
        // SQLite falls back to REAL arithmetic on overflow, so the ordering
        // expression stays valid for any stored counters
        let sql = format!(
            "SELECT {} FROM posts
             ORDER BY (likes + comments + shares) DESC, id DESC
             LIMIT ?1 OFFSET ?2",
            Post::COLUMNS
        );
        let posts: Vec<Post> = query_many(&conn, &sql, (limit, offset))?;
        Ok(posts.iter().map(PostEngagement::from).collect())
    }

    /// Counts and sums across every user and post
    pub fn platform_analytics(&self) -> DbResult<PlatformAnalytics> {
        let conn = self.pool.get()?;

        let total_users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        let totals = fold_counters(&conn, "SELECT likes, comments, shares FROM posts", [])?;

        Ok(PlatformAnalytics {
            total_users,
            total_posts: totals.posts,
            total_likes: totals.likes,
            total_comments: totals.comments,
            total_shares: totals.shares,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{FollowerRepository, PostRepository, UserRepository};
    use crate::db::Database;
    use dashboard_types::{CreatePostRequest, UpdatePostRequest};

    struct Fixture {
        _db: Database,
        users: UserRepository,
        posts: PostRepository,
        followers: FollowerRepository,
        analytics: AnalyticsRepository,
    }

    fn setup_test_db() -> Fixture {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        Fixture {
            users: UserRepository::new(db.pool.clone()),
            posts: PostRepository::new(db.pool.clone()),
            followers: FollowerRepository::new(db.pool.clone()),
            analytics: AnalyticsRepository::new(db.pool.clone()),
            _db: db,
        }
    }

    fn post_with(fx: &Fixture, user_id: i64, likes: i64, comments: i64, shares: i64) -> i64 {
        let post = fx
            .posts
            .create(&CreatePostRequest {
                user_id,
                content: "content".to_string(),
            })
            .unwrap();
        fx.posts
            .update(
                post.id,
                &UpdatePostRequest {
                    content: None,
                    likes: Some(likes),
                    comments: Some(comments),
                    shares: Some(shares),
                },
            )
            .unwrap();
        post.id
    }

    #[test]
    fn test_user_analytics_scenario() {
        let fx = setup_test_db();
        let user = fx.users.create("a@x.com", "A").unwrap();
        assert_eq!(user.id, 1);

        let post = fx
            .posts
            .create(&CreatePostRequest {
                user_id: 1,
                content: "hi".to_string(),
            })
            .unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.likes, 0);

        let updated = fx
            .posts
            .update(
                1,
                &UpdatePostRequest {
                    likes: Some(5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.likes, 5);

        let stats = fx.analytics.user_analytics(1).unwrap();
        assert_eq!(
            stats,
            UserAnalytics {
                user_id: 1,
                total_posts: 1,
                total_likes: 5,
                total_comments: 0,
                total_shares: 0,
                followers: 0,
            }
        );
    }

    #[test]
    fn test_user_analytics_without_posts_is_zero() {
        let fx = setup_test_db();
        fx.users.create("a@x.com", "A").unwrap();
        fx.users.create("b@x.com", "B").unwrap();
        fx.followers.follow(1, 2).unwrap();

        let stats = fx.analytics.user_analytics(1).unwrap();
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.total_likes, 0);
        assert_eq!(stats.followers, 1);
    }

    #[test]
    fn test_user_analytics_missing_user() {
        let fx = setup_test_db();
        assert!(matches!(
            fx.analytics.user_analytics(5),
            Err(DbError::NotFound(ref msg)) if msg == "User not found"
        ));
    }

    #[test]
    fn test_post_engagement_ordering() {
        let fx = setup_test_db();
        fx.users.create("a@x.com", "A").unwrap();

        let low = post_with(&fx, 1, 1, 0, 0);
        let tied_old = post_with(&fx, 1, 2, 2, 2);
        let top = post_with(&fx, 1, 10, 0, 0);
        let tied_new = post_with(&fx, 1, 0, 6, 0);

        let ranked = fx.analytics.post_engagement(PageRequest::default()).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|e| e.post_id).collect();
        assert_eq!(ids, vec![top, tied_new, tied_old, low]);
        assert_eq!(ranked[0].engagement, 10);
        assert_eq!(ranked[1].engagement, 6);
        assert_eq!(ranked[2].engagement, 6);

        let second_page = fx.analytics.post_engagement(PageRequest::new(2, 3)).unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].post_id, low);
    }

    #[test]
    fn test_platform_analytics_totals() {
        let fx = setup_test_db();
        assert_eq!(
            fx.analytics.platform_analytics().unwrap(),
            PlatformAnalytics {
                total_users: 0,
                total_posts: 0,
                total_likes: 0,
                total_comments: 0,
                total_shares: 0,
            }
        );

        fx.users.create("a@x.com", "A").unwrap();
        fx.users.create("b@x.com", "B").unwrap();
        post_with(&fx, 1, 3, 2, 1);
        post_with(&fx, 2, 4, 0, 5);

        let totals = fx.analytics.platform_analytics().unwrap();
        assert_eq!(totals.total_users, 2);
        assert_eq!(totals.total_posts, 2);
        assert_eq!(totals.total_likes, 7);
        assert_eq!(totals.total_comments, 2);
        assert_eq!(totals.total_shares, 6);
    }

    #[test]
    fn test_huge_counters_saturate_instead_of_failing() {
        let fx = setup_test_db();
        fx.users.create("a@x.com", "A").unwrap();
        let small = post_with(&fx, 1, 1, 0, 0);
        let huge = post_with(&fx, 1, i64::MAX, 1, 0);
        let half = post_with(&fx, 1, i64::MAX / 2, 0, 0);

        let ranked = fx.analytics.post_engagement(PageRequest::default()).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|e| e.post_id).collect();
        assert_eq!(ids, vec![huge, half, small]);
        assert_eq!(ranked[0].engagement, i64::MAX);
        assert_eq!(ranked[0].likes, i64::MAX);
        assert_eq!(ranked[1].engagement, i64::MAX / 2);
        assert_eq!(ranked[2].engagement, 1);

        let stats = fx.analytics.user_analytics(1).unwrap();
        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.total_likes, i64::MAX);
        assert_eq!(stats.total_comments, 1);

        let totals = fx.analytics.platform_analytics().unwrap();
        assert_eq!(totals.total_posts, 3);
        assert_eq!(totals.total_likes, i64::MAX);
    }

    #[test]
    fn test_counter_totals_saturate_both_ways() {
        let totals = CounterTotals::default()
            .add(i64::MAX, i64::MIN, 2)
            .add(5, -5, 3);
        assert_eq!(
            totals,
            CounterTotals {
                posts: 2,
                likes: i64::MAX,
                comments: i64::MIN,
                shares: 5,
            }
        );
    }
}
