use chrono::Utc;
use rusqlite::Connection;

use dashboard_types::{UpdateUserRequest, User, DEFAULT_ROLE};

use crate::db::rows::{query_many, query_one, FromRow};
use crate::db::{DbError, DbPool, DbResult, PageRequest};

pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_MISSING: &str = "User does not exist";
const DUPLICATE_EMAIL: &str = "Email already exists";

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a user with the default role
    pub fn create(&self, email: &str, name: &str) -> DbResult<User> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO users (email, name, role, created_at) VALUES (?1, ?2, ?3, ?4)",
            (email, name, DEFAULT_ROLE, Utc::now().to_rfc3339()),
        )
        .map_err(|e| DbError::from_write(e, DUPLICATE_EMAIL, USER_MISSING))?;

        let user = fetch_user(&tx, tx.last_insert_rowid())?
            .ok_or_else(|| DbError::NotFound(USER_NOT_FOUND.to_string()))?;
        tx.commit()?;

        Ok(user)
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: i64) -> DbResult<User> {
        let conn = self.pool.get()?;
        fetch_user(&conn, user_id)?.ok_or_else(|| DbError::NotFound(USER_NOT_FOUND.to_string()))
    }

    /// Newest users first
    pub fn list(&self, page: PageRequest) -> DbResult<Vec<User>> {
        let conn = self.pool.get()?;
        let (limit, offset) = page.limit_offset();
        let sql = format!(
            "SELECT {} FROM users ORDER BY id DESC LIMIT ?1 OFFSET ?2",
            User::COLUMNS
        );
        Ok(query_many(&conn, &sql, (limit, offset))?)
    }

    /// Apply the supplied fields, leaving absent ones untouched
    pub fn update(&self, user_id: i64, changes: &UpdateUserRequest) -> DbResult<User> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            "UPDATE users SET name = COALESCE(?1, name), role = COALESCE(?2, role) WHERE id = ?3",
            (changes.name.as_deref(), changes.role.as_deref(), user_id),
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(USER_NOT_FOUND.to_string()));
        }

        let user = fetch_user(&tx, user_id)?
            .ok_or_else(|| DbError::NotFound(USER_NOT_FOUND.to_string()))?;
        tx.commit()?;

        Ok(user)
    }

    /// Delete a user; profiles, posts and follower edges go with it
    pub fn delete(&self, user_id: i64) -> DbResult<()> {
        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM users WHERE id = ?1", [user_id])?;
        if removed == 0 {
            return Err(DbError::NotFound(USER_NOT_FOUND.to_string()));
        }
        Ok(())
    }
}

fn fetch_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE id = ?1", User::COLUMNS);
    query_one(conn, &sql, [user_id])
}

/// Whether a user row with this id exists
pub(crate) fn user_exists(conn: &Connection, user_id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        [user_id],
        |row| row.get(0),
    )
}
