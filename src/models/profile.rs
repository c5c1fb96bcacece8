use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the `profiles` table, keyed by account id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub name: Option<String>,
    pub role: Option<String>,
    pub user_level: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Privilege tier stored in `profiles.user_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserLevel {
    Standard = 1,
    Editor = 2,
    Administrator = 3,
}

impl UserLevel {
    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            1 => Some(UserLevel::Standard),
            2 => Some(UserLevel::Editor),
            3 => Some(UserLevel::Administrator),
            _ => None,
        }
    }

    pub fn as_level(self) -> i32 {
        self as i32
    }
}

impl Profile {
    /// Tiers compare by equality only; an editor is not "almost" an admin.
    pub fn is_admin(&self) -> bool {
        self.user_level == Some(UserLevel::Administrator.as_level())
    }
}
