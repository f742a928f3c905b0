//! API request/response models for project checklists.

use super::projects::Project;
use crate::types::{ActivityId, ChecklistItemId, ProjectId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistStatus {
    #[default]
    Todo,
    Doing,
    Blocked,
    Done,
}

impl ChecklistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ChecklistStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to-do" | "to do" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown checklist status '{other}' (expected todo, doing, blocked or done)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub project_id: ProjectId,
    /// `None` for items added by hand after the project was created
    #[serde(default)]
    pub activity_id: Option<ActivityId>,
    pub title: String,
    #[serde(default)]
    pub status: ChecklistStatus,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_by_user_id: Option<UserId>,
}

impl ChecklistItem {
    /// Apply a partial update in place. `None` fields are left untouched.
    pub fn apply(&mut self, update: &ChecklistItemUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(assignee) = &update.assignee {
            self.assignee = assignee.clone();
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
    }

    /// Every editable field, as sent when saving the item.
    pub fn editable_fields(&self) -> ChecklistItemUpdate {
        ChecklistItemUpdate {
            status: Some(self.status),
            assignee: Some(self.assignee.clone()),
            notes: Some(self.notes.clone()),
        }
    }
}

/// Response of `GET /projects/{id}/checklist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub project: Project,
    pub items: Vec<ChecklistItem>,
}

/// Request body for `PATCH /projects/{id}/checklist/{item_id}`. Absent fields are left
/// unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ChecklistStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ChecklistItemUpdate {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Default::default()
        }
    }

    pub fn status(status: ChecklistStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assignee.is_none() && self.notes.is_none()
    }
}

/// Request body for `POST /projects/{id}/checklist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewChecklistItem {
    pub title: String,
    pub status: ChecklistStatus,
    pub assignee: String,
    pub notes: String,
}
