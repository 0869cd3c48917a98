// Journal API response types.
// Defines structs for deserializing schedule, profile and auth responses.

use serde::{Deserialize, Serialize};

/// A single lesson in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonItem {
    /// Day of the lesson (YYYY-MM-DD).
    pub date: String,
    /// Lesson number within the day.
    pub lesson: u32,
    pub started_at: String,
    pub finished_at: String,
    pub subject: String,
    pub room: String,
    pub teacher: String,
}

/// The student's study group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub status: i32,
}

/// The student's stream (a set of groups).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub id: u64,
    pub name: String,
}

/// Earned, spent and remaining amounts of one point currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PointBalance {
    pub earned: i64,
    pub spent: i64,
    pub balance: i64,
}

/// Balances for both point currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GamingPoints {
    pub diamonds: PointBalance,
    pub coins: PointBalance,
}

/// The signed-in student's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub student_id: u64,
    pub full_name: String,
    pub photo_url: Option<String>,
    pub age: u32,
    pub group: Group,
    pub stream: Stream,
    pub points: GamingPoints,
    pub level: u32,
    pub is_debtor: bool,
    pub has_homework_issues: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieves_count: Option<u32>,
}

/// Response of the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Error body returned by the API on failures.
///
/// `detail` is usually a human-readable string, but validation failures
/// return a structured list; only the string form is shown to users.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Parse an error body, returning its readable detail if there is one.
    pub fn detail_from(body: &str) -> Option<String> {
        let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}
