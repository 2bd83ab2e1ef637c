use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Status a project starts in when none is supplied.
pub const DEFAULT_STATUS: &str = "Planned";

/// Priority a project starts with when none is supplied.
pub const DEFAULT_PRIORITY: &str = "Medium";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    /// Human-friendly code supplied by the caller, e.g. "P-101". Not unique.
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Status label (Planned / Active / Done / On-Hold).
    pub status: String,
    /// High / Medium / Low.
    pub priority: String,
    pub domain: Option<String>,
    pub next_steps: Option<String>,
    /// Target completion date, no time component.
    pub deadline: Option<NaiveDate>,
    pub project_type: Option<String>,
    pub tooling: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub domain: Option<String>,
    pub next_steps: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub project_type: Option<String>,
    pub tooling: Option<String>,
}

/// Partial update: fields left out of the payload are not touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub domain: Option<String>,
    pub next_steps: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub project_type: Option<String>,
    pub tooling: Option<String>,
}
