//! Typed wrappers for each ImplantHub route.

use super::{ApiClient, HttpClient};
use crate::api::models::{
    Ack,
    audit::AuditEntry,
    checklist::{Checklist, ChecklistItem, ChecklistItemUpdate, NewChecklistItem},
    members::{NewMember, ProjectMember},
    projects::{NewProject, Project, ProjectCreated},
    templates::{DecisionLinked, LinkDecision, LinkRequirement, NewTemplate, RequirementLinked, Template, TemplateDetail},
    users::{NewUser, User},
};
use crate::errors::Result;
use crate::types::{ChecklistItemId, ProjectId, TemplateId};
use reqwest::Method;

impl<H: HttpClient> ApiClient<H> {
    pub async fn health(&self) -> Result<Ack> {
        self.get("/health").await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get("/users").await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.post("/users", user).await
    }

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        self.get("/templates").await
    }

    pub async fn get_template(&self, template_id: TemplateId) -> Result<TemplateDetail> {
        self.get(&format!("/templates/{template_id}")).await
    }

    pub async fn create_template(&self, template: &NewTemplate) -> Result<Template> {
        self.post("/templates", template).await
    }

    pub async fn link_requirement(&self, link: &LinkRequirement) -> Result<RequirementLinked> {
        self.post("/templates/link-requirement", link).await
    }

    pub async fn link_decision(&self, link: &LinkDecision) -> Result<DecisionLinked> {
        self.post("/templates/link-decision", link).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get("/projects").await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<ProjectCreated> {
        self.post("/projects", project).await
    }

    pub async fn get_checklist(&self, project_id: ProjectId) -> Result<Checklist> {
        self.get(&format!("/projects/{project_id}/checklist")).await
    }

    pub async fn update_checklist_item(
        &self,
        project_id: ProjectId,
        item_id: ChecklistItemId,
        update: &ChecklistItemUpdate,
    ) -> Result<ChecklistItem> {
        self.patch(&format!("/projects/{project_id}/checklist/{item_id}"), update).await
    }

    /// The created item is not decoded; callers reload the checklist instead.
    pub async fn create_checklist_item(&self, project_id: ProjectId, item: &NewChecklistItem) -> Result<()> {
        self.request_empty(
            Method::POST,
            &format!("/projects/{project_id}/checklist"),
            Some(serde_json::to_value(item)?),
        )
        .await
    }

    pub async fn delete_checklist_item(&self, project_id: ProjectId, item_id: ChecklistItemId) -> Result<()> {
        self.delete(&format!("/projects/{project_id}/checklist/{item_id}")).await
    }

    pub async fn add_member(&self, project_id: ProjectId, member: &NewMember) -> Result<Ack> {
        self.post(&format!("/projects/{project_id}/members"), member).await
    }

    pub async fn list_members(&self, project_id: ProjectId) -> Result<Vec<ProjectMember>> {
        self.get(&format!("/projects/{project_id}/members")).await
    }

    pub async fn list_audit(&self, project_id: ProjectId) -> Result<Vec<AuditEntry>> {
        self.get(&format!("/projects/{project_id}/audit")).await
    }
}
