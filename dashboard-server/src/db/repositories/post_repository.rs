use chrono::Utc;
use rusqlite::Connection;

use dashboard_types::{CreatePostRequest, Post, UpdatePostRequest};

use super::user_repository::{user_exists, USER_MISSING};
use crate::db::rows::{query_many, query_one, FromRow};
use crate::db::{DbError, DbPool, DbResult, PageRequest};

const POST_NOT_FOUND: &str = "Post not found";

pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a post with all counters at zero
    pub fn create(&self, post: &CreatePostRequest) -> DbResult<Post> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        if !user_exists(&tx, post.user_id)? {
            return Err(DbError::InvalidReference(USER_MISSING.to_string()));
        }

        tx.execute(
            "INSERT INTO posts (user_id, content, likes, comments, shares, created_at)
             VALUES (?1, ?2, 0, 0, 0, ?3)",
            (post.user_id, &post.content, Utc::now().to_rfc3339()),
        )
        .map_err(|e| DbError::from_write(e, "Post already exists", USER_MISSING))?;

        let created = fetch_post(&tx, tx.last_insert_rowid())?
            .ok_or_else(|| DbError::NotFound(POST_NOT_FOUND.to_string()))?;
        tx.commit()?;

        Ok(created)
    }

    pub fn get_by_id(&self, post_id: i64) -> DbResult<Post> {
        let conn = self.pool.get()?;
        fetch_post(&conn, post_id)?.ok_or_else(|| DbError::NotFound(POST_NOT_FOUND.to_string()))
    }

    /// Newest posts first
    pub fn list(&self, page: PageRequest) -> DbResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let (limit, offset) = page.limit_offset();
        let sql = format!(
            "SELECT {} FROM posts ORDER BY id DESC LIMIT ?1 OFFSET ?2",
            Post::COLUMNS
        );
        Ok(query_many(&conn, &sql, (limit, offset))?)
    }

    /// Set content and counters to exactly the supplied values
    pub fn update(&self, post_id: i64, changes: &UpdatePostRequest) -> DbResult<Post> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            "UPDATE posts SET
                content = COALESCE(?1, content),
                likes = COALESCE(?2, likes),
                comments = COALESCE(?3, comments),
                shares = COALESCE(?4, shares)
             WHERE id = ?5",
            (
                changes.content.as_deref(),
                changes.likes,
                changes.comments,
                changes.shares,
                post_id,
            ),
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(POST_NOT_FOUND.to_string()));
        }

        let post = fetch_post(&tx, post_id)?
            .ok_or_else(|| DbError::NotFound(POST_NOT_FOUND.to_string()))?;
        tx.commit()?;

        Ok(post)
    }

    pub fn delete(&self, post_id: i64) -> DbResult<()> {
        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM posts WHERE id = ?1", [post_id])?;
        if removed == 0 {
            return Err(DbError::NotFound(POST_NOT_FOUND.to_string()));
        }
        Ok(())
    }
}

fn fetch_post(conn: &Connection, post_id: i64) -> rusqlite::Result<Option<Post>> {
    let sql = format!("SELECT {} FROM posts WHERE id = ?1", Post::COLUMNS);
    query_one(conn, &sql, [post_id])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::UserRepository;
    use crate::db::Database;

    fn setup_test_db() -> (Database, PostRepository, i64) {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        let user = UserRepository::new(db.pool.clone())
            .create("a@x.com", "A")
            .expect("Failed to create user");
        let repo = PostRepository::new(db.pool.clone());
        (db, repo, user.id)
    }

    fn new_post(user_id: i64, content: &str) -> CreatePostRequest {
        CreatePostRequest {
            user_id,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_create_starts_counters_at_zero() {
        let (_db, repo, user_id) = setup_test_db();

        let post = repo.create(&new_post(user_id, "hi")).unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.content, "hi");
        assert_eq!((post.likes, post.comments, post.shares), (0, 0, 0));
    }

    #[test]
    fn test_create_for_missing_user_persists_nothing() {
        let (_db, repo, _user_id) = setup_test_db();

        let err = repo.create(&new_post(404, "orphan")).unwrap_err();
        assert!(matches!(err, DbError::InvalidReference(_)));
        assert!(repo.list(PageRequest::default()).unwrap().is_empty());
    }

    #[test]
    fn test_update_sets_counters_exactly() {
        let (_db, repo, user_id) = setup_test_db();
        let post = repo.create(&new_post(user_id, "hi")).unwrap();

        let first = repo
            .update(
                post.id,
                &UpdatePostRequest {
                    likes: Some(5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(first.likes, 5);

        let second = repo
            .update(
                post.id,
                &UpdatePostRequest {
                    likes: Some(3),
                    shares: Some(1),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(second.likes, 3);
        assert_eq!(second.comments, 0);
        assert_eq!(second.shares, 1);
        assert_eq!(second.content, "hi");
    }

    #[test]
    fn test_empty_update_leaves_row_unchanged() {
        let (_db, repo, user_id) = setup_test_db();
        let post = repo.create(&new_post(user_id, "hi")).unwrap();

        let same = repo.update(post.id, &UpdatePostRequest::default()).unwrap();
        assert_eq!(same, post);
    }

    #[test]
    fn test_missing_post_is_not_found() {
        let (_db, repo, _user_id) = setup_test_db();

        assert!(matches!(repo.get_by_id(3), Err(DbError::NotFound(_))));
        assert!(matches!(
            repo.update(3, &UpdatePostRequest::default()),
            Err(DbError::NotFound(_))
        ));
        assert!(matches!(repo.delete(3), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_list_newest_first_and_delete() {
        let (_db, repo, user_id) = setup_test_db();
        for i in 0..4 {
            repo.create(&new_post(user_id, &format!("post {}", i))).unwrap();
        }

        repo.delete(2).unwrap();

        let ids: Vec<i64> = repo
            .list(PageRequest::new(1, 10))
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![4, 3, 1]);
    }
}
