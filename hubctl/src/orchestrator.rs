//! Project creation workflow.
//!
//! Creating a project from the form is a chain of dependent calls followed by a fan-out:
//!
//! 1. validate the form locally (no network call when the title is blank)
//! 2. resolve the default template through the [`TemplateProvisioner`]
//! 3. `POST /projects` with the display name `title • module`
//! 4. `GET /projects/{id}/checklist` for the generated items
//! 5. map the canonical sections to items by normalized title
//! 6. concurrently PATCH the sections that exist and POST one membership per responsible
//!    user, collecting every outcome in a [`BatchReport`]
//!
//! Steps 1-4 abort the workflow on failure. Step 6 never does: a section whose item is
//! missing is skipped, and a failed call is recorded next to its successful siblings.

use crate::api::models::checklist::{ChecklistItem, ChecklistItemUpdate, ChecklistStatus};
use crate::api::models::members::{MemberRole, NewMember};
use crate::api::models::projects::NewProject;
use crate::api::models::users::User;
use crate::batch::{BatchOperation, BatchReport, run_batch};
use crate::client::{ApiClient, HttpClient};
use crate::errors::{Error, Result};
use crate::provisioner::{CanonicalSection, TemplateProvisioner};
use crate::types::{ChecklistItemId, ProjectId, TemplateId, UserId};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Input of the project creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    /// Client name; required
    pub title: String,
    /// Module being implemented; appended to the display name when present
    pub module: String,
    /// Notes for the "Configurações iniciais" section
    pub initial_config: String,
    /// Status for the "Status da implantação" section
    pub status: ChecklistStatus,
    /// Notes for the "Pendências" section
    pub pending_notes: String,
    /// Users linked as members and listed under "Responsáveis", in selection order
    pub responsible_user_ids: Vec<UserId>,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("Project title is required"));
        }
        Ok(())
    }

    /// `title • module`, or just the title when no module is given.
    pub fn display_name(&self) -> String {
        let title = self.title.trim();
        let module = self.module.trim();
        if module.is_empty() {
            title.to_string()
        } else {
            format!("{title} • {module}")
        }
    }

    /// Selected user ids with repeats removed, first selection kept.
    fn responsible_users(&self) -> Vec<UserId> {
        let mut seen = Vec::with_capacity(self.responsible_user_ids.len());
        for id in &self.responsible_user_ids {
            if !seen.contains(id) {
                seen.push(*id);
            }
        }
        seen
    }
}

/// A call of the fan-out step, with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedCall {
    PatchItem {
        section: CanonicalSection,
        item_id: ChecklistItemId,
        update: ChecklistItemUpdate,
    },
    LinkMember {
        user_id: UserId,
        role: MemberRole,
    },
}

impl PlannedCall {
    pub fn operation(&self) -> BatchOperation {
        match self {
            PlannedCall::PatchItem { section, item_id, .. } => BatchOperation::PatchSection {
                section: *section,
                item_id: *item_id,
            },
            PlannedCall::LinkMember { user_id, .. } => BatchOperation::LinkMember { user_id: *user_id },
        }
    }
}

/// Checklist items backing each canonical section. When several items share a title the
/// first one wins.
pub fn section_lookup(items: &[ChecklistItem]) -> HashMap<CanonicalSection, &ChecklistItem> {
    let mut lookup = HashMap::new();
    for item in items {
        if let Some(section) = CanonicalSection::from_title(&item.title) {
            lookup.entry(section).or_insert(item);
        }
    }
    lookup
}

/// The fan-out calls for a freshly created checklist.
///
/// Section patches come first in template order, then one membership per responsible user,
/// then the "Responsáveis" notes. Users missing from `directory` are still linked but get
/// no `Name <email>` line.
pub fn plan_calls(items: &[ChecklistItem], form: &ProjectForm, directory: &[User]) -> Vec<PlannedCall> {
    let lookup = section_lookup(items);
    let mut calls = Vec::new();

    let free_text = [
        (CanonicalSection::InitialConfiguration, ChecklistItemUpdate::notes(form.initial_config.clone())),
        (CanonicalSection::DeploymentStatus, ChecklistItemUpdate::status(form.status)),
        (CanonicalSection::PendingItems, ChecklistItemUpdate::notes(form.pending_notes.clone())),
    ];
    for (section, update) in free_text {
        match lookup.get(&section) {
            Some(item) => calls.push(PlannedCall::PatchItem {
                section,
                item_id: item.id,
                update,
            }),
            None => debug!(section = section.title(), "Section not in checklist, skipping"),
        }
    }

    let responsible = form.responsible_users();
    if responsible.is_empty() {
        return calls;
    }

    calls.extend(responsible.iter().map(|&user_id| PlannedCall::LinkMember {
        user_id,
        role: MemberRole::Member,
    }));

    match lookup.get(&CanonicalSection::ResponsibleParties) {
        Some(item) => {
            let users: HashMap<UserId, &User> = directory.iter().map(|u| (u.id, u)).collect();
            let notes = responsible
                .iter()
                .filter_map(|id| users.get(id).map(|u| u.contact_line()))
                .collect::<Vec<_>>()
                .join("\n");
            calls.push(PlannedCall::PatchItem {
                section: CanonicalSection::ResponsibleParties,
                item_id: item.id,
                update: ChecklistItemUpdate::notes(notes),
            });
        }
        None => debug!(
            section = CanonicalSection::ResponsibleParties.title(),
            "Section not in checklist, skipping"
        ),
    }

    calls
}

/// Summary of a completed creation workflow.
#[derive(Debug)]
pub struct CreatedProject {
    pub project_id: ProjectId,
    pub template_id: TemplateId,
    pub client_name: String,
    /// Items in the generated checklist
    pub checklist_items: usize,
    pub batch: BatchReport,
    /// Human-readable completion message
    pub note: String,
}

pub struct ProjectCreator<'a, H: HttpClient> {
    client: &'a ApiClient<H>,
    provisioner: TemplateProvisioner<'a, H>,
}

impl<'a, H: HttpClient> ProjectCreator<'a, H> {
    pub fn new(client: &'a ApiClient<H>, provisioner: TemplateProvisioner<'a, H>) -> Self {
        Self { client, provisioner }
    }

    /// Run the whole workflow. `directory` supplies names and emails for the
    /// "Responsáveis" notes.
    #[instrument(skip_all, fields(title = %form.title), err)]
    pub async fn create_project(&self, form: &ProjectForm, directory: &[User]) -> Result<CreatedProject> {
        form.validate()?;

        let template_id = self.provisioner.ensure_default_template().await?;
        let client_name = form.display_name();

        let created = self
            .client
            .create_project(&NewProject {
                template_id,
                client_name: client_name.clone(),
            })
            .await?;
        let project_id = created.project_id;
        debug!(project_id, template_id, "Project created");

        let checklist = self.client.get_checklist(project_id).await.inspect_err(|e| {
            warn!(project_id, error = %e, "Project created but its checklist could not be loaded");
        })?;

        let plan = plan_calls(&checklist.items, form, directory);
        debug!(project_id, calls = plan.len(), "Dispatching section updates");

        let batch = run_batch(plan.into_iter().map(|call| (call.operation(), self.dispatch(project_id, call)))).await;

        let note = completion_note(&client_name, checklist.items.len(), &batch);
        info!(
            project_id,
            succeeded = batch.succeeded(),
            total = batch.len(),
            "Project creation finished"
        );

        Ok(CreatedProject {
            project_id,
            template_id,
            client_name,
            checklist_items: checklist.items.len(),
            batch,
            note,
        })
    }

    async fn dispatch(&self, project_id: ProjectId, call: PlannedCall) -> Result<()> {
        match call {
            PlannedCall::PatchItem { item_id, update, .. } => {
                self.client.update_checklist_item(project_id, item_id, &update).await?;
            }
            PlannedCall::LinkMember { user_id, role } => {
                self.client.add_member(project_id, &NewMember { user_id, role }).await?;
            }
        }
        Ok(())
    }
}

fn completion_note(client_name: &str, items: usize, batch: &BatchReport) -> String {
    let mut note = format!("Project '{client_name}' created with {items} checklist items");
    if !batch.is_empty() {
        note.push_str(&format!("; {} of {} follow-up updates applied", batch.succeeded(), batch.len()));
    }
    let failed: Vec<String> = batch.failures().map(|o| o.operation.to_string()).collect();
    if !failed.is_empty() {
        note.push_str(&format!(" (failed: {})", failed.join(", ")));
    }
    note
}
