//! # hubctl: client for the ImplantHub project tracker
//!
//! ImplantHub tracks client implementation projects. Each project is created from a
//! template whose phases and activities expand into a checklist; every checklist item
//! carries a status, an assignee and free-form notes. The server is a plain REST/JSON
//! service that records who changed what through an optional `X-User-Id` header.
//!
//! This crate is the client side of that service: it keeps the default template in place,
//! turns the project creation form into the calls that create and populate a project, and
//! keeps a locally edited checklist consistent with the server.
//!
//! ## Architecture
//!
//! - [`client`]: [`ApiClient`] over a swappable [`HttpClient`] transport (reqwest in
//!   production, [`MockHttpClient`] in tests), plus the shared [`ApiStatus`] signal
//! - [`provisioner`]: finds or creates the default template by normalized name
//! - [`orchestrator`]: the project creation workflow and its concurrent fan-out
//! - [`batch`]: fire-and-collect batches with one outcome per call
//! - [`checklist`]: the `Closed → Loading → Loaded` checklist editor
//! - [`workspace`]: cached lists, the creation form and the editor, as driven by the CLI
//! - [`config`], [`telemetry`], [`cli`]: the binary's ambient layers
//!
//! ## Example
//!
//! ```no_run
//! use hubctl::{ApiClient, ProjectForm, Workspace, config::DefaultTemplateConfig};
//! use hubctl::client::ReqwestHttpClient;
//! use std::time::Duration;
//!
//! # async fn demo() -> hubctl::Result<()> {
//! let http = ReqwestHttpClient::new("http://localhost:8000/".parse().unwrap(), Duration::from_secs(30))?;
//! let client = ApiClient::new(http).with_actor(Some(1));
//! let mut workspace = Workspace::new(client, DefaultTemplateConfig::default());
//!
//! *workspace.form_mut() = ProjectForm {
//!     title: "Acme".to_string(),
//!     module: "ERP".to_string(),
//!     responsible_user_ids: vec![1, 2],
//!     ..Default::default()
//! };
//! let created = workspace.submit_project_form().await?;
//! println!("{}", created.note);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod batch;
pub mod checklist;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod provisioner;
pub mod telemetry;
pub mod types;
pub mod workspace;

#[cfg(test)]
mod test;

pub use batch::{BatchOperation, BatchReport, OperationOutcome};
pub use checklist::{ChecklistEditor, ChecklistView, Confirm};
pub use client::{ApiClient, ApiStatus, HttpClient, MockHttpClient, ReqwestHttpClient};
pub use config::Config;
pub use errors::{Error, Result};
pub use orchestrator::{CreatedProject, ProjectCreator, ProjectForm};
pub use provisioner::{CanonicalSection, TemplateProvisioner};
pub use workspace::Workspace;
