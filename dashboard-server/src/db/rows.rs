//! Typed row mapping.
//!
//! Each record type lists its columns once in `COLUMNS`; statements select
//! exactly that list so `from_row` can read fields by position.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{types::Type, Connection, OptionalExtension, Params, Row};

use dashboard_types::{FollowerEdge, Post, Profile, User};

/// Format SQLite uses for `CURRENT_TIMESTAMP` defaults
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait FromRow: Sized {
    /// Comma separated column list matching the field order read by `from_row`
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Run a query expected to yield at most one row
pub fn query_one<T: FromRow, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row).optional()
}

/// Run a query and collect every row
pub fn query_many<T: FromRow, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, T::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Read a timestamp column written either as RFC 3339 or by SQLite's default
pub fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Ok(ts.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc()),
    }
}

impl FromRow for User {
    const COLUMNS: &'static str = "id, email, name, role, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            role: row.get(3)?,
            created_at: timestamp_at(row, 4)?,
        })
    }
}

impl FromRow for Profile {
    const COLUMNS: &'static str = "id, user_id, bio, avatar_url, location, website";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Profile {
            id: row.get(0)?,
            user_id: row.get(1)?,
            bio: row.get(2)?,
            avatar_url: row.get(3)?,
            location: row.get(4)?,
            website: row.get(5)?,
        })
    }
}

impl FromRow for Post {
    const COLUMNS: &'static str = "id, user_id, content, likes, comments, shares, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Post {
            id: row.get(0)?,
            user_id: row.get(1)?,
            content: row.get(2)?,
            likes: row.get(3)?,
            comments: row.get(4)?,
            shares: row.get(5)?,
            created_at: timestamp_at(row, 6)?,
        })
    }
}

impl FromRow for FollowerEdge {
    const COLUMNS: &'static str = "id, user_id, follower_id, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(FollowerEdge {
            id: row.get(0)?,
            user_id: row.get(1)?,
            follower_id: row.get(2)?,
            created_at: timestamp_at(row, 3)?,
        })
    }
}
