//! Common type definitions.
//!
//! # ID Types
//!
//! The ImplantHub API hands out integer primary keys. They are wrapped in type aliases so
//! signatures say which entity an id belongs to:
//!
//! - [`UserId`]: user account identifier, also used as the audit actor
//! - [`TemplateId`]: template identifier
//! - [`ActivityId`]: template activity identifier
//! - [`ProjectId`]: project identifier
//! - [`ChecklistItemId`]: checklist item identifier
//!
//! # Name matching
//!
//! Templates and checklist sections are matched by name rather than id. [`normalize_name`]
//! is the single comparison key used for both.

pub type UserId = i64;
pub type TemplateId = i64;
pub type PhaseId = i64;
pub type ActivityId = i64;
pub type ProjectId = i64;
pub type ChecklistItemId = i64;

/// Header carrying the acting user on mutating requests.
pub const ACTOR_HEADER: &str = "X-User-Id";

/// Comparison key for names: surrounding whitespace trimmed, case folded.
///
/// Example: "  Configurações Iniciais " -> "configurações iniciais"
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
