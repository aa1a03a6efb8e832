//! Rule documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named block of free-text guidance synced into a tool's rules file.
///
/// At most one rule is active at a time; the store enforces that when a rule
/// is activated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rule {
    /// Create a new, inactive rule stamped with the current time.
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
            is_active: false,
            is_archived: false,
            order_index: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
