//! API request and response data models.
//!
//! Request bodies are named `New*` / `*Update` and only derive `Serialize`; response
//! bodies derive both directions so tests can build fixtures with `serde_json::json!`
//! or by value.
//!
//! - [`users`]: user directory entries and creation requests
//! - [`templates`]: templates with nested phases and activities
//! - [`projects`]: projects and the creation acknowledgement
//! - [`checklist`]: checklist items, statuses and item updates
//! - [`members`]: project membership
//! - [`audit`]: audit log entries

pub mod audit;
pub mod checklist;
pub mod members;
pub mod projects;
pub mod templates;
pub mod users;

use serde::{Deserialize, Serialize};

/// Generic `{"ok": true}` acknowledgement returned by link endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}
