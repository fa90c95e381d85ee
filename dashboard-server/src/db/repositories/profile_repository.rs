use rusqlite::Connection;

use dashboard_types::{CreateProfileRequest, Profile, UpdateProfileRequest};

use super::user_repository::{user_exists, USER_MISSING};
use crate::db::rows::{query_many, query_one, FromRow};
use crate::db::{DbError, DbPool, DbResult, PageRequest};

const PROFILE_NOT_FOUND: &str = "Profile not found";

pub struct ProfileRepository {
    pool: DbPool,
}

impl ProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a profile for an existing user; missing text fields become empty
    pub fn create(&self, profile: &CreateProfileRequest) -> DbResult<Profile> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        if !user_exists(&tx, profile.user_id)? {
            return Err(DbError::InvalidReference(USER_MISSING.to_string()));
        }

        tx.execute(
            "INSERT INTO profiles (user_id, bio, avatar_url, location, website)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                profile.user_id,
                profile.bio.as_deref().unwrap_or_default(),
                profile.avatar_url.as_deref().unwrap_or_default(),
                profile.location.as_deref().unwrap_or_default(),
                profile.website.as_deref().unwrap_or_default(),
            ),
        )
        .map_err(|e| DbError::from_write(e, "Profile already exists", USER_MISSING))?;

        let created = fetch_profile(&tx, tx.last_insert_rowid())?
            .ok_or_else(|| DbError::NotFound(PROFILE_NOT_FOUND.to_string()))?;
        tx.commit()?;

        Ok(created)
    }

    pub fn get_by_id(&self, profile_id: i64) -> DbResult<Profile> {
        let conn = self.pool.get()?;
        fetch_profile(&conn, profile_id)?
            .ok_or_else(|| DbError::NotFound(PROFILE_NOT_FOUND.to_string()))
    }

    pub fn list(&self, page: PageRequest) -> DbResult<Vec<Profile>> {
        let conn = self.pool.get()?;
        let (limit, offset) = page.limit_offset();
        let sql = format!(
            "SELECT {} FROM profiles ORDER BY id DESC LIMIT ?1 OFFSET ?2",
            Profile::COLUMNS
        );
        Ok(query_many(&conn, &sql, (limit, offset))?)
    }

    pub fn update(&self, profile_id: i64, changes: &UpdateProfileRequest) -> DbResult<Profile> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            "UPDATE profiles SET
                bio = COALESCE(?1, bio),
                avatar_url = COALESCE(?2, avatar_url),
                location = COALESCE(?3, location),
                website = COALESCE(?4, website)
             WHERE id = ?5",
            (
                changes.bio.as_deref(),
                changes.avatar_url.as_deref(),
                changes.location.as_deref(),
                changes.website.as_deref(),
                profile_id,
            ),
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(PROFILE_NOT_FOUND.to_string()));
        }

        let profile = fetch_profile(&tx, profile_id)?
            .ok_or_else(|| DbError::NotFound(PROFILE_NOT_FOUND.to_string()))?;
        tx.commit()?;

        Ok(profile)
    }

    pub fn delete(&self, profile_id: i64) -> DbResult<()> {
        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM profiles WHERE id = ?1", [profile_id])?;
        if removed == 0 {
            return Err(DbError::NotFound(PROFILE_NOT_FOUND.to_string()));
        }
        Ok(())
    }
}

fn fetch_profile(conn: &Connection, profile_id: i64) -> rusqlite::Result<Option<Profile>> {
    let sql = format!("SELECT {} FROM profiles WHERE id = ?1", Profile::COLUMNS);
    query_one(conn, &sql, [profile_id])
}
