//! API request/response models for users.

use crate::types::UserId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request body for creating a user. Emails are unique server-side.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    /// `Name <email>` rendering used in checklist notes.
    pub fn contact_line(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}
