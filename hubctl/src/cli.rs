//! Command-line presentation layer.
//!
//! Every command goes through a [`Workspace`], so the CLI exercises the same paths a richer
//! front end would. Tables go to stdout; `--json` prints the raw models instead.

use crate::api::models::checklist::{ChecklistItem, ChecklistItemUpdate, ChecklistStatus, NewChecklistItem};
use crate::api::models::members::{MemberRole, NewMember};
use crate::api::models::templates::{LinkDecision, LinkRequirement};
use crate::api::models::users::NewUser;
use crate::client::HttpClient;
use crate::errors::{Error, Result};
use crate::orchestrator::{CreatedProject, ProjectForm};
use crate::types::{ActivityId, ChecklistItemId, ProjectId, TemplateId, UserId};
use crate::workspace::Workspace;
use clap::Subcommand;
use serde::Serialize;
use serde_json::json;
use std::io::{BufRead, Write};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check that the API answers
    Health,
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Manage templates
    #[command(subcommand)]
    Templates(TemplatesCommand),
    /// Create and inspect projects
    #[command(subcommand)]
    Projects(ProjectsCommand),
    /// Edit a project's checklist
    #[command(subcommand)]
    Checklist(ChecklistCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum UsersCommand {
    List,
    Create { name: String, email: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TemplatesCommand {
    List,
    /// Show a template with its phases and activities
    Show { template_id: TemplateId },
    /// Create the default template unless one with its name exists
    EnsureDefault,
    /// Attach a requirement to a template activity
    LinkRequirement {
        activity_id: ActivityId,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Record a decision against a template activity
    LinkDecision {
        activity_id: ActivityId,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        rationale: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectsCommand {
    List,
    /// Create a project from the default template and fill in its canonical sections
    Create {
        /// Client name
        title: String,
        #[arg(long, default_value = "")]
        module: String,
        /// Notes for "Configurações iniciais"
        #[arg(long, default_value = "")]
        initial_config: String,
        /// Status for "Status da implantação" (todo, doing, blocked, done)
        #[arg(long, default_value = "todo")]
        status: ChecklistStatus,
        /// Notes for "Pendências"
        #[arg(long, default_value = "")]
        pending: String,
        /// Responsible user ids, comma separated, in display order
        #[arg(long, value_delimiter = ',')]
        responsible: Vec<UserId>,
    },
    Members { project_id: ProjectId },
    AddMember {
        project_id: ProjectId,
        user_id: UserId,
        #[arg(long, value_enum, default_value_t = MemberRole::Member)]
        role: MemberRole,
    },
    /// Show the audit trail of a project
    Audit { project_id: ProjectId },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ChecklistCommand {
    Show {
        project_id: ProjectId,
    },
    /// Change fields of one item and save it
    Set {
        project_id: ProjectId,
        item_id: ChecklistItemId,
        #[arg(long)]
        status: Option<ChecklistStatus>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Add a manual item
    Add {
        project_id: ProjectId,
        title: String,
        #[arg(long, default_value = "todo")]
        status: ChecklistStatus,
        #[arg(long, default_value = "")]
        assignee: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Delete {
        project_id: ProjectId,
        item_id: ChecklistItemId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run<H: HttpClient>(command: Command, json_output: bool, ws: &mut Workspace<H>) -> Result<()> {
    let out = Output { json: json_output };
    match command {
        Command::Health => {
            let ack = ws.client().health().await?;
            out.emit(&ack, || println!("API is up"))?;
        }
        Command::Users(cmd) => users(cmd, out, ws).await?,
        Command::Templates(cmd) => templates(cmd, out, ws).await?,
        Command::Projects(cmd) => projects(cmd, out, ws).await?,
        Command::Checklist(cmd) => checklist(cmd, out, ws).await?,
    }
    Ok(())
}

async fn users<H: HttpClient>(cmd: UsersCommand, out: Output, ws: &mut Workspace<H>) -> Result<()> {
    match cmd {
        UsersCommand::List => {
            ws.refresh_users().await?;
            out.emit(&ws.users(), || {
                for u in ws.users() {
                    println!("{:>5}  {:<30}  {}", u.id, u.name, u.email);
                }
            })?;
        }
        UsersCommand::Create { name, email } => {
            let user = ws.create_user(NewUser { name, email }).await?;
            out.emit(&user, || println!("Created user {} ({})", user.id, user.contact_line()))?;
        }
    }
    Ok(())
}

async fn templates<H: HttpClient>(cmd: TemplatesCommand, out: Output, ws: &mut Workspace<H>) -> Result<()> {
    match cmd {
        TemplatesCommand::List => {
            ws.refresh_templates().await?;
            out.emit(&ws.templates(), || {
                for t in ws.templates() {
                    println!("{:>5}  {:<30}  {}", t.id, t.name, t.description);
                }
            })?;
        }
        TemplatesCommand::Show { template_id } => {
            let template = ws.client().get_template(template_id).await?;
            out.emit(&template, || {
                println!("{} (#{})", template.name, template.id);
                for phase in &template.phases {
                    println!("  {}. {}", phase.order, phase.name);
                    for activity in &phase.activities {
                        println!("     [{}] {}", activity.id, activity.name);
                    }
                }
            })?;
        }
        TemplatesCommand::EnsureDefault => {
            let id = ws.ensure_default_template().await?;
            out.emit(&json!({ "template_id": id }), || println!("Default template: #{id}"))?;
        }
        TemplatesCommand::LinkRequirement {
            activity_id,
            title,
            description,
        } => {
            require("Requirement title", &title)?;
            let linked = ws
                .client()
                .link_requirement(&LinkRequirement {
                    activity_id,
                    requirement_title: title,
                    requirement_description: description,
                })
                .await?;
            out.emit(&linked, || {
                println!("Requirement {} linked to activity {activity_id}", linked.requirement_id)
            })?;
        }
        TemplatesCommand::LinkDecision {
            activity_id,
            title,
            description,
            rationale,
        } => {
            require("Decision title", &title)?;
            let linked = ws
                .client()
                .link_decision(&LinkDecision {
                    activity_id,
                    decision_title: title,
                    decision_description: description,
                    rationale,
                })
                .await?;
            out.emit(&linked, || {
                println!("Decision {} linked to activity {activity_id}", linked.decision_id)
            })?;
        }
    }
    Ok(())
}

async fn projects<H: HttpClient>(cmd: ProjectsCommand, out: Output, ws: &mut Workspace<H>) -> Result<()> {
    match cmd {
        ProjectsCommand::List => {
            ws.refresh_projects().await?;
            out.emit(&ws.projects(), || {
                for p in ws.projects() {
                    println!("{:>5}  {:<40}  {:<8}  template #{}", p.id, p.client_name, p.status, p.template_id);
                }
            })?;
        }
        ProjectsCommand::Create {
            title,
            module,
            initial_config,
            status,
            pending,
            responsible,
        } => {
            *ws.form_mut() = ProjectForm {
                title,
                module,
                initial_config,
                status,
                pending_notes: pending,
                responsible_user_ids: responsible,
            };
            let created = ws.submit_project_form().await?;
            out.emit(&created_summary(&created), || {
                println!("{}", created.note);
                for failure in created.batch.failures() {
                    if let Err(e) = &failure.result {
                        println!("  ! {}: {}", failure.operation, e.user_message());
                    }
                }
            })?;
        }
        ProjectsCommand::Members { project_id } => {
            let members = ws.client().list_members(project_id).await?;
            out.emit(&members, || {
                for m in &members {
                    println!(
                        "{:>5}  {:<30}  {:<30}  {}",
                        m.user_id,
                        m.name.as_deref().unwrap_or("-"),
                        m.email.as_deref().unwrap_or("-"),
                        m.role
                    );
                }
            })?;
        }
        ProjectsCommand::AddMember {
            project_id,
            user_id,
            role,
        } => {
            let ack = ws.client().add_member(project_id, &NewMember { user_id, role }).await?;
            out.emit(&ack, || println!("User {user_id} added to project {project_id} as {role}"))?;
        }
        ProjectsCommand::Audit { project_id } => {
            let entries = ws.client().list_audit(project_id).await?;
            out.emit(&entries, || {
                for e in &entries {
                    let when = e.created_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default();
                    let actor = e.actor_user_id.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
                    println!("{when:<16}  actor {actor:<5}  {:<22}  {}", e.action, e.note);
                }
            })?;
        }
    }
    Ok(())
}

async fn checklist<H: HttpClient>(cmd: ChecklistCommand, out: Output, ws: &mut Workspace<H>) -> Result<()> {
    match cmd {
        ChecklistCommand::Show { project_id } => {
            ws.checklist_mut().open(project_id).await?;
            print_checklist(out, ws)?;
        }
        ChecklistCommand::Set {
            project_id,
            item_id,
            status,
            assignee,
            notes,
        } => {
            let update = ChecklistItemUpdate { status, assignee, notes };
            if update.is_empty() {
                return Err(Error::validation("Nothing to change: pass --status, --assignee or --notes"));
            }
            let editor = ws.checklist_mut();
            editor.open(project_id).await?;
            if !editor.update_local_item(item_id, &update) {
                return Err(Error::validation(format!("Item {item_id} is not in project {project_id}")));
            }
            let saved = editor.save_item(item_id).await?;
            out.emit(&saved, || print_item(&saved))?;
        }
        ChecklistCommand::Add {
            project_id,
            title,
            status,
            assignee,
            notes,
        } => {
            require("Item title", &title)?;
            let editor = ws.checklist_mut();
            editor.open(project_id).await?;
            editor
                .add_item(NewChecklistItem {
                    title,
                    status,
                    assignee,
                    notes,
                })
                .await?;
            print_checklist(out, ws)?;
        }
        ChecklistCommand::Delete {
            project_id,
            item_id,
            yes,
        } => {
            let editor = ws.checklist_mut();
            editor.open(project_id).await?;
            let deleted = if yes {
                editor.delete_item(item_id, &mut |_: &str| true).await?
            } else {
                editor.delete_item(item_id, &mut prompt_stdin).await?
            };
            out.emit(&json!({ "deleted": deleted, "item_id": item_id }), || {
                if deleted {
                    println!("Deleted item {item_id}");
                } else {
                    println!("Cancelled");
                }
            })?;
        }
    }
    Ok(())
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(())
}

fn created_summary(created: &CreatedProject) -> serde_json::Value {
    let failures: Vec<_> = created
        .batch
        .failures()
        .map(|o| {
            json!({
                "operation": o.operation.to_string(),
                "error": o.result.as_ref().err().map(|e| e.to_string()),
            })
        })
        .collect();
    json!({
        "project_id": created.project_id,
        "template_id": created.template_id,
        "client_name": created.client_name,
        "checklist_items": created.checklist_items,
        "updates_applied": created.batch.succeeded(),
        "updates_total": created.batch.len(),
        "failures": failures,
        "note": created.note,
    })
}

fn print_checklist<H: HttpClient>(out: Output, ws: &Workspace<H>) -> Result<()> {
    let Some(loaded) = ws.checklist().loaded() else {
        return Err(Error::validation("No checklist is open"));
    };
    out.emit(&loaded.items, || {
        println!("{} (#{}, {})", loaded.project_name(), loaded.project_id(), loaded.project.status);
        for item in &loaded.items {
            print_item(item);
        }
    })
}

fn print_item(item: &ChecklistItem) {
    let assignee = if item.assignee.is_empty() { "-" } else { item.assignee.as_str() };
    println!("{:>5}  [{:<7}]  {:<30}  {}", item.id, item.status, item.title, assignee);
    for line in item.notes.lines() {
        println!("          {line}");
    }
}

/// `y`/`yes` on stdin approves; anything else, including EOF, declines.
fn prompt_stdin(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn emit<T: Serialize + ?Sized>(&self, value: &T, table: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            table();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiClient, MockHttpClient};
    use crate::config::DefaultTemplateConfig;
    use clap::Parser;
    use reqwest::Method;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Command {
        TestCli::try_parse_from(std::iter::once("hubctl").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_parse_project_create() {
        let cmd = parse(&[
            "projects",
            "create",
            "Acme",
            "--module",
            "ERP",
            "--status",
            "doing",
            "--responsible",
            "1,2",
        ]);
        match cmd {
            Command::Projects(ProjectsCommand::Create {
                title,
                module,
                status,
                responsible,
                ..
            }) => {
                assert_eq!(title, "Acme");
                assert_eq!(module, "ERP");
                assert_eq!(status, ChecklistStatus::Doing);
                assert_eq!(responsible, vec![1, 2]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(TestCli::try_parse_from(["hubctl", "checklist", "set", "1", "2", "--status", "paused"]).is_err());
    }

    #[tokio::test]
    async fn test_set_without_fields_makes_no_call() {
        let mock = MockHttpClient::new();
        let mut ws = Workspace::new(ApiClient::new(mock.clone()), DefaultTemplateConfig::default());

        let err = run(parse(&["checklist", "set", "3", "1"]), false, &mut ws).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_with_yes_skips_prompt() {
        let mock = MockHttpClient::new();
        mock.add_json(
            "GET /projects/3/checklist",
            json!({
                "project": {"id": 3, "template_id": 1, "client_name": "Acme"},
                "items": [{"id": 5, "project_id": 3, "title": "Extra"}]
            }),
        );
        mock.add_response("DELETE /projects/3/checklist/5", Ok(crate::client::HttpResponse::new(204, "")));
        let mut ws = Workspace::new(ApiClient::new(mock.clone()), DefaultTemplateConfig::default());

        run(parse(&["checklist", "delete", "3", "5", "--yes"]), true, &mut ws).await.unwrap();

        assert_eq!(mock.calls_with_method(Method::DELETE).len(), 1);
        assert!(ws.checklist().items().is_empty());
    }
}
