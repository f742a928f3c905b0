//! Checklist editor.
//!
//! Holds one project's checklist in memory and keeps it in step with the server:
//!
//! ```text
//! Closed --open--> Loading --ok--> Loaded --close--> Closed
//!                     |
//!                     +--error--> Closed
//! ```
//!
//! Local edits ([`ChecklistEditor::update_local_item`]) never touch the network. Saving
//! sends every editable field of one item and adopts whatever the server returns. Adding
//! an item reloads the whole checklist so ids and ordering come from the server; deleting
//! one only drops it locally since no other item changes.

use crate::api::models::checklist::{ChecklistItem, ChecklistItemUpdate, NewChecklistItem};
use crate::api::models::projects::Project;
use crate::client::{ApiClient, HttpClient};
use crate::errors::{Error, Result};
use crate::types::{ChecklistItemId, ProjectId};
use tracing::{debug, info, instrument, warn};

/// Asks the person driving the editor to approve a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedChecklist {
    pub project: Project,
    pub items: Vec<ChecklistItem>,
}

impl LoadedChecklist {
    pub fn project_id(&self) -> ProjectId {
        self.project.id
    }

    pub fn project_name(&self) -> &str {
        &self.project.client_name
    }

    pub fn item(&self, item_id: ChecklistItemId) -> Option<&ChecklistItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    fn item_mut(&mut self, item_id: ChecklistItemId) -> Option<&mut ChecklistItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChecklistView {
    #[default]
    Closed,
    Loading {
        project_id: ProjectId,
    },
    Loaded(LoadedChecklist),
}

pub struct ChecklistEditor<H: HttpClient> {
    client: ApiClient<H>,
    view: ChecklistView,
}

impl<H: HttpClient> ChecklistEditor<H> {
    pub fn new(client: ApiClient<H>) -> Self {
        Self {
            client,
            view: ChecklistView::Closed,
        }
    }

    pub fn view(&self) -> &ChecklistView {
        &self.view
    }

    pub fn loaded(&self) -> Option<&LoadedChecklist> {
        match &self.view {
            ChecklistView::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        self.loaded().map(|l| l.items.as_slice()).unwrap_or_default()
    }

    pub fn item(&self, item_id: ChecklistItemId) -> Option<&ChecklistItem> {
        self.loaded().and_then(|l| l.item(item_id))
    }

    /// Fetch the project's checklist. On failure the editor ends up closed; the error is
    /// also visible through the client's [`ApiStatus`](crate::client::ApiStatus).
    #[instrument(skip(self), err)]
    pub async fn open(&mut self, project_id: ProjectId) -> Result<()> {
        self.view = ChecklistView::Loading { project_id };

        match self.client.get_checklist(project_id).await {
            Ok(checklist) => {
                debug!(project_id, items = checklist.items.len(), "Checklist loaded");
                self.view = ChecklistView::Loaded(LoadedChecklist {
                    project: checklist.project,
                    items: checklist.items,
                });
                Ok(())
            }
            Err(e) => {
                self.view = ChecklistView::Closed;
                Err(e)
            }
        }
    }

    /// Edit an item in memory only. Returns `false` when no such item is loaded.
    pub fn update_local_item(&mut self, item_id: ChecklistItemId, update: &ChecklistItemUpdate) -> bool {
        let ChecklistView::Loaded(loaded) = &mut self.view else {
            return false;
        };
        match loaded.item_mut(item_id) {
            Some(item) => {
                item.apply(update);
                true
            }
            None => false,
        }
    }

    /// Send status, assignee and notes of a loaded item, then replace the local copy with
    /// the server's answer.
    #[instrument(skip(self), err)]
    pub async fn save_item(&mut self, item_id: ChecklistItemId) -> Result<ChecklistItem> {
        let loaded = self.require_loaded()?;
        let project_id = loaded.project_id();
        let fields = loaded
            .item(item_id)
            .ok_or_else(|| Error::validation(format!("Item {item_id} is not in this checklist")))?
            .editable_fields();

        let saved = self.client.update_checklist_item(project_id, item_id, &fields).await?;

        if let ChecklistView::Loaded(loaded) = &mut self.view {
            if let Some(item) = loaded.item_mut(item_id) {
                *item = saved.clone();
            }
        }
        debug!(project_id, item_id, "Checklist item saved");
        Ok(saved)
    }

    /// Create a manual item and reload the checklist from the server. When only the reload
    /// fails the item exists server-side and the editor ends up closed.
    #[instrument(skip(self, item), fields(title = %item.title), err)]
    pub async fn add_item(&mut self, item: NewChecklistItem) -> Result<()> {
        if item.title.trim().is_empty() {
            return Err(Error::validation("Checklist item title is required"));
        }
        let project_id = self.require_loaded()?.project_id();

        let item = NewChecklistItem {
            title: item.title.trim().to_string(),
            ..item
        };
        self.client.create_checklist_item(project_id, &item).await?;
        info!(project_id, "Checklist item added");

        self.open(project_id).await.inspect_err(|e| {
            warn!(project_id, title = %item.title, error = %e, "Checklist item was created but the checklist could not be reloaded");
        })
    }

    /// Delete an item once `confirm` approves. Returns `false`, without any request, when
    /// the confirmation is declined.
    #[instrument(skip(self, confirm), err)]
    pub async fn delete_item(&mut self, item_id: ChecklistItemId, confirm: &mut impl Confirm) -> Result<bool> {
        let loaded = self.require_loaded()?;
        let project_id = loaded.project_id();
        let title = loaded
            .item(item_id)
            .ok_or_else(|| Error::validation(format!("Item {item_id} is not in this checklist")))?
            .title
            .clone();

        if !confirm.confirm(&format!("Delete checklist item '{title}'?")) {
            debug!(project_id, item_id, "Deletion cancelled");
            return Ok(false);
        }

        self.client.delete_checklist_item(project_id, item_id).await?;

        if let ChecklistView::Loaded(loaded) = &mut self.view {
            loaded.items.retain(|i| i.id != item_id);
        }
        info!(project_id, item_id, "Checklist item deleted");
        Ok(true)
    }

    /// Drop the loaded checklist, including unsaved edits.
    pub fn close(&mut self) {
        self.view = ChecklistView::Closed;
    }

    fn require_loaded(&self) -> Result<&LoadedChecklist> {
        self.loaded().ok_or_else(|| Error::validation("No checklist is open"))
    }
}
