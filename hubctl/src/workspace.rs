//! Session state driven by the presentation layer.
//!
//! A [`Workspace`] owns the API client, the cached user/template/project lists, the project
//! creation form and the checklist editor. It is the only writer of that state; the API
//! client is the only writer of the shared [`ApiStatus`].

use crate::api::models::projects::Project;
use crate::api::models::templates::Template;
use crate::api::models::users::{NewUser, User};
use crate::checklist::ChecklistEditor;
use crate::client::{ApiClient, ApiStatus, HttpClient, ReqwestHttpClient};
use crate::config::{Config, DefaultTemplateConfig};
use crate::errors::{Error, Result};
use crate::orchestrator::{CreatedProject, ProjectCreator, ProjectForm};
use crate::provisioner::TemplateProvisioner;
use crate::types::TemplateId;
use tracing::warn;

pub struct Workspace<H: HttpClient = ReqwestHttpClient> {
    client: ApiClient<H>,
    default_template: DefaultTemplateConfig,
    users: Vec<User>,
    templates: Vec<Template>,
    projects: Vec<Project>,
    form: ProjectForm,
    checklist: ChecklistEditor<H>,
}

impl Workspace<ReqwestHttpClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = ReqwestHttpClient::new(config.api.base_url.clone(), config.api.request_timeout)?;
        let client = ApiClient::new(http).with_actor(config.actor_user_id);
        Ok(Self::new(client, config.default_template.clone()))
    }
}

impl<H: HttpClient> Workspace<H> {
    pub fn new(client: ApiClient<H>, default_template: DefaultTemplateConfig) -> Self {
        let checklist = ChecklistEditor::new(client.clone());
        Self {
            client,
            default_template,
            users: Vec::new(),
            templates: Vec::new(),
            projects: Vec::new(),
            form: ProjectForm::default(),
            checklist,
        }
    }

    pub fn client(&self) -> &ApiClient<H> {
        &self.client
    }

    pub fn status(&self) -> &ApiStatus {
        self.client.status()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProjectForm {
        &mut self.form
    }

    pub fn checklist(&self) -> &ChecklistEditor<H> {
        &self.checklist
    }

    pub fn checklist_mut(&mut self) -> &mut ChecklistEditor<H> {
        &mut self.checklist
    }

    pub fn provisioner(&self) -> TemplateProvisioner<'_, H> {
        TemplateProvisioner::with_name(&self.client, &self.default_template.name, &self.default_template.description)
    }

    pub async fn refresh_users(&mut self) -> Result<()> {
        self.users = self.client.list_users().await?;
        Ok(())
    }

    pub async fn refresh_templates(&mut self) -> Result<()> {
        self.templates = self.client.list_templates().await?;
        Ok(())
    }

    pub async fn refresh_projects(&mut self) -> Result<()> {
        self.projects = self.client.list_projects().await?;
        Ok(())
    }

    pub async fn create_user(&mut self, user: NewUser) -> Result<User> {
        if user.name.trim().is_empty() || user.email.trim().is_empty() {
            return Err(Error::validation("User name and email are required"));
        }
        let user = NewUser {
            name: user.name.trim().to_string(),
            email: user.email.trim().to_string(),
        };
        let created = self.client.create_user(&user).await?;
        self.users.push(created.clone());
        Ok(created)
    }

    pub async fn ensure_default_template(&mut self) -> Result<TemplateId> {
        let id = self.provisioner().ensure_default_template().await?;
        if let Err(e) = self.refresh_templates().await {
            warn!(error = %e, "Could not refresh template list");
        }
        Ok(id)
    }

    /// Run the creation workflow for the current form. On success the project list is
    /// refreshed and the form reset; on failure the form is kept for another attempt.
    pub async fn submit_project_form(&mut self) -> Result<CreatedProject> {
        self.form.validate()?;

        let unknown_user = self
            .form
            .responsible_user_ids
            .iter()
            .any(|id| !self.users.iter().any(|u| u.id == *id));
        if unknown_user {
            if let Err(e) = self.refresh_users().await {
                warn!(error = %e, "Could not refresh user list; responsible notes may be incomplete");
            }
        }

        let created = {
            let creator = ProjectCreator::new(&self.client, self.provisioner());
            creator.create_project(&self.form, &self.users).await?
        };

        if let Err(e) = self.refresh_projects().await {
            warn!(error = %e, "Could not refresh project list");
        }
        self.form = ProjectForm::default();

        Ok(created)
    }
}
