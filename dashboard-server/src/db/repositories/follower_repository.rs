use chrono::Utc;

use dashboard_types::FollowerEdge;

use super::user_repository::{user_exists, USER_MISSING};
use crate::db::rows::{query_one, FromRow};
use crate::db::{DbError, DbPool, DbResult};

pub struct FollowerRepository {
    pool: DbPool,
}

impl FollowerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record that `follower_id` follows `user_id`
    pub fn follow(&self, user_id: i64, follower_id: i64) -> DbResult<FollowerEdge> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        if !user_exists(&tx, user_id)? || !user_exists(&tx, follower_id)? {
            return Err(DbError::InvalidReference(USER_MISSING.to_string()));
        }

        tx.execute(
            "INSERT INTO followers (user_id, follower_id, created_at) VALUES (?1, ?2, ?3)",
            (user_id, follower_id, Utc::now().to_rfc3339()),
        )
        .map_err(|e| DbError::from_write(e, "Already following", USER_MISSING))?;

        let sql = format!("SELECT {} FROM followers WHERE id = ?1", FollowerEdge::COLUMNS);
        let edge = query_one(&tx, &sql, [tx.last_insert_rowid()])?
            .ok_or_else(|| DbError::NotFound("Follower edge not found".to_string()))?;
        tx.commit()?;

        Ok(edge)
    }

    /// Number of users following `user_id`
    pub fn follower_count(&self, user_id: i64) -> DbResult<i64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM followers WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::UserRepository;
    use crate::db::Database;

    fn setup_test_db() -> (Database, FollowerRepository) {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        let users = UserRepository::new(db.pool.clone());
        users.create("a@x.com", "A").unwrap();
        users.create("b@x.com", "B").unwrap();
        users.create("c@x.com", "C").unwrap();
        let repo = FollowerRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn test_follow_counts_toward_followed_user() {
        let (_db, repo) = setup_test_db();

        let edge = repo.follow(1, 2).unwrap();
        assert_eq!((edge.user_id, edge.follower_id), (1, 2));
        repo.follow(1, 3).unwrap();

        assert_eq!(repo.follower_count(1).unwrap(), 2);
        assert_eq!(repo.follower_count(2).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_follow_is_conflict() {
        let (_db, repo) = setup_test_db();
        repo.follow(1, 2).unwrap();

        assert!(matches!(repo.follow(1, 2), Err(DbError::Conflict(_))));
        assert_eq!(repo.follower_count(1).unwrap(), 1);
    }

    #[test]
    fn test_follow_requires_both_users() {
        let (_db, repo) = setup_test_db();

        assert!(matches!(repo.follow(1, 99), Err(DbError::InvalidReference(_))));
        assert!(matches!(repo.follow(99, 1), Err(DbError::InvalidReference(_))));
        assert_eq!(repo.follower_count(1).unwrap(), 0);
    }
}
