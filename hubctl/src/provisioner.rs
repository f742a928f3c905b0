//! Default template provisioning.
//!
//! Every project is created from one well-known template. [`TemplateProvisioner`] finds
//! it by name (see [`normalize_name`]) and creates it only when no template with that name
//! exists, so calling it before every project creation costs a single read once the
//! template is in place.
//!
//! Two callers racing on an empty server can both see "absent" and both create the
//! template. Lookups keep working afterwards (the first match wins), so this is tolerated
//! rather than prevented.

use crate::api::models::templates::{NewActivity, NewPhase, NewTemplate, Template};
use crate::client::{ApiClient, HttpClient};
use crate::errors::Result;
use crate::types::{TemplateId, normalize_name};
use tracing::{debug, info, instrument};

pub const DEFAULT_TEMPLATE_NAME: &str = "Implantação padrão";
pub const DEFAULT_TEMPLATE_DESCRIPTION: &str = "Checklist base para acompanhar a implantação de um módulo em um cliente";

/// The checklist sections the project creation form fills in.
///
/// Their titles are the first four activities of the default template; after a project is
/// created the matching checklist items are found again by title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalSection {
    InitialConfiguration,
    DeploymentStatus,
    PendingItems,
    ResponsibleParties,
}

impl CanonicalSection {
    /// Template order
    pub const ALL: [CanonicalSection; 4] = [
        Self::InitialConfiguration,
        Self::DeploymentStatus,
        Self::PendingItems,
        Self::ResponsibleParties,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::InitialConfiguration => "Configurações iniciais",
            Self::DeploymentStatus => "Status da implantação",
            Self::PendingItems => "Pendências",
            Self::ResponsibleParties => "Responsáveis",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::InitialConfiguration => "Parâmetros e cadastros definidos na abertura do projeto",
            Self::DeploymentStatus => "Situação atual da implantação",
            Self::PendingItems => "O que ainda depende do cliente ou da equipe",
            Self::ResponsibleParties => "Pessoas responsáveis pelo projeto",
        }
    }

    /// Section whose title matches `title` after normalization.
    pub fn from_title(title: &str) -> Option<Self> {
        let key = normalize_name(title);
        Self::ALL.into_iter().find(|s| normalize_name(s.title()) == key)
    }
}

/// Payload for the default template: a kickoff phase holding the canonical sections in
/// order, followed by a follow-up phase with two example activities.
pub fn default_template_payload(name: &str, description: &str) -> NewTemplate {
    let kickoff = NewPhase {
        name: "Kickoff".to_string(),
        order: 1,
        activities: CanonicalSection::ALL
            .iter()
            .map(|section| NewActivity::new(section.title(), section.description(), ""))
            .collect(),
    };

    let follow_up = NewPhase {
        name: "Acompanhamento".to_string(),
        order: 2,
        activities: vec![
            NewActivity::new(
                "Treinamento da equipe",
                "Treinar os usuários-chave do cliente",
                "Usuários-chave operam o módulo sem apoio",
            ),
            NewActivity::new("Go-live", "Virada para produção", "Módulo em uso em produção"),
        ],
    };

    NewTemplate {
        name: name.to_string(),
        description: description.to_string(),
        phases: vec![kickoff, follow_up],
    }
}

/// First template whose normalized name equals the normalized `name`.
pub fn find_template_by_name<'a>(templates: &'a [Template], name: &str) -> Option<&'a Template> {
    let key = normalize_name(name);
    templates.iter().find(|t| normalize_name(&t.name) == key)
}

pub struct TemplateProvisioner<'a, H: HttpClient> {
    client: &'a ApiClient<H>,
    name: String,
    description: String,
}

impl<'a, H: HttpClient> TemplateProvisioner<'a, H> {
    pub fn new(client: &'a ApiClient<H>) -> Self {
        Self::with_name(client, DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE_DESCRIPTION)
    }

    pub fn with_name(client: &'a ApiClient<H>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Id of the default template, creating it if no template carries its name.
    #[instrument(skip(self), fields(template = %self.name), err)]
    pub async fn ensure_default_template(&self) -> Result<TemplateId> {
        let templates = self.client.list_templates().await?;

        if let Some(existing) = find_template_by_name(&templates, &self.name) {
            debug!(template_id = existing.id, "Default template already exists");
            return Ok(existing.id);
        }

        let payload = default_template_payload(&self.name, &self.description);
        let created = self.client.create_template(&payload).await?;

        info!(template_id = created.id, "Created default template");
        Ok(created.id)
    }
}
