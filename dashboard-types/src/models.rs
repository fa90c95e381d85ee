use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// Role assigned to every user created through the API
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub bio: String,
    pub avatar_url: String,
    pub location: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Sum of likes, comments and shares, pinned at the i64 bounds
    pub fn engagement(&self) -> i64 {
        self.likes
            .saturating_add(self.comments)
            .saturating_add(self.shares)
    }
}

/// One-way follow relationship: `follower_id` follows `user_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerEdge {
    pub id: i64,
    pub user_id: i64,
    pub follower_id: i64,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnalytics {
    pub user_id: i64,
    pub total_posts: i64,
    pub total_likes: i64,
    pub total_comments: i64,
    pub total_shares: i64,
    pub followers: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEngagement {
    pub post_id: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub engagement: i64,
}

impl From<&Post> for PostEngagement {
    fn from(post: &Post) -> Self {
        PostEngagement {
            post_id: post.id,
            likes: post.likes,
            comments: post.comments,
            shares: post.shares,
            engagement: post.engagement(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAnalytics {
    pub total_users: i64,
    pub total_posts: i64,
    pub total_likes: i64,
    pub total_comments: i64,
    pub total_shares: i64,
}
