//! API response model for the per-project audit trail.

use crate::types::{ProjectId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One audited mutation. `before`/`after` are free-form snapshots taken by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub actor_user_id: Option<UserId>,
    /// e.g. `checklist.update`, `project.member.add`
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<i64>,
    #[serde(default)]
    pub before: Option<serde_json::Value>,
    #[serde(default)]
    pub after: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub note: String,
}
