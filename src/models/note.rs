use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text annotation owned by exactly one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectNote {
    pub id: i64,
    pub project_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    pub content: Option<String>,
}
