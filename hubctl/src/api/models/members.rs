//! API request/response models for project membership.

use crate::types::UserId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Member,
    Lead,
    Viewer,
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            MemberRole::Member => "member",
            MemberRole::Lead => "lead",
            MemberRole::Viewer => "viewer",
        })
    }
}

/// Request body for `POST /projects/{id}/members`. The server answers 409 when the user
/// is already a member.
#[derive(Debug, Clone, Serialize)]
pub struct NewMember {
    pub user_id: UserId,
    pub role: MemberRole,
}

/// Entry of `GET /projects/{id}/members`. Name and email are `None` when the user row
/// no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub user_id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub joined_at: Option<NaiveDateTime>,
}
