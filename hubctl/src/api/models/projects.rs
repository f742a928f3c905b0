//! API request/response models for projects.

use crate::types::{ProjectId, TemplateId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request body for `POST /projects`. The server generates the checklist from the
/// template's activities as part of the same call.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub template_id: TemplateId,
    pub client_name: String,
}

/// Acknowledgement of `POST /projects`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreated {
    pub project_id: ProjectId,
    /// Number of checklist items generated from the template
    #[serde(default)]
    pub checklist_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub template_id: TemplateId,
    pub client_name: String,
    /// Lifecycle label: active / paused / done
    #[serde(default = "default_project_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_by_user_id: Option<UserId>,
    #[serde(default)]
    pub updated_by_user_id: Option<UserId>,
}

fn default_project_status() -> String {
    "active".to_string()
}
