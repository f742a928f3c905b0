//! API request/response models for templates.
//!
//! A template is a two-level tree: phases, each holding an ordered list of activities.
//! Creating a project from a template produces one checklist item per activity.

use crate::types::{ActivityId, PhaseId, TemplateId};
use serde::{Deserialize, Serialize};

/// Template summary as returned by `GET /templates` and `POST /templates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for `POST /templates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    pub phases: Vec<NewPhase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPhase {
    pub name: String,
    pub order: i32,
    pub activities: Vec<NewActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewActivity {
    pub name: String,
    pub description: String,
    pub definition_of_done: String,
}

impl NewActivity {
    pub fn new(name: impl Into<String>, description: impl Into<String>, definition_of_done: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            definition_of_done: definition_of_done.into(),
        }
    }
}

/// Full template returned by `GET /templates/{id}`, phases sorted by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDetail {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub template_id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub phase_id: PhaseId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub definition_of_done: String,
}

/// Request body for `POST /templates/link-requirement`.
#[derive(Debug, Clone, Serialize)]
pub struct LinkRequirement {
    pub activity_id: ActivityId,
    pub requirement_title: String,
    pub requirement_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RequirementLinked {
    pub ok: bool,
    pub requirement_id: i64,
}

/// Request body for `POST /templates/link-decision`.
#[derive(Debug, Clone, Serialize)]
pub struct LinkDecision {
    pub activity_id: ActivityId,
    pub decision_title: String,
    pub decision_description: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DecisionLinked {
    pub ok: bool,
    pub decision_id: i64,
}
