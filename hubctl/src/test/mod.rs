//! End-to-end tests: the real reqwest transport against a wiremock server.

pub mod utils;

use crate::api::models::checklist::{ChecklistItemUpdate, ChecklistStatus, NewChecklistItem};
use crate::batch::BatchOperation;
use crate::client::{ApiClient, ReqwestHttpClient};
use crate::errors::Error;
use crate::orchestrator::ProjectForm;
use crate::provisioner::CanonicalSection;
use crate::types::ACTOR_HEADER;
use serde_json::json;
use std::time::Duration;
use utils::{checklist_item, create_test_client, create_test_workspace, project};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test_log::test(tokio::test)]
async fn test_actor_header_only_on_mutations() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(header(ACTOR_HEADER, "7"))
        .and(body_json(json!({"name": "Ana", "email": "ana@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "Ana", "email": "ana@example.com", "created_at": "2024-05-02T10:11:12.123456"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, Some(7));
    client.list_users().await.unwrap();
    let user = client
        .create_user(&crate::api::models::users::NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(user.id, 3);

    let requests = server.received_requests().await.unwrap();
    let get = requests.iter().find(|r| r.method.as_str() == "GET").unwrap();
    assert!(get.headers.get(ACTOR_HEADER).is_none());
}

#[tokio::test]
async fn test_no_actor_header_without_actor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects/1/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = create_test_client(&server, None);
    client
        .add_member(
            1,
            &crate::api::models::members::NewMember {
                user_id: 2,
                role: Default::default(),
            },
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get(ACTOR_HEADER).is_none());
}

#[tokio::test]
async fn test_error_body_is_carried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects/1/members"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"detail": "Usuário já faz parte do projeto."})))
        .mount(&server)
        .await;

    let client = create_test_client(&server, Some(1));
    let err = client
        .add_member(
            1,
            &crate::api::models::members::NewMember {
                user_id: 2,
                role: Default::default(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(err.user_message(), "Usuário já faz parte do projeto. (HTTP 409)");
    assert!(!client.status().is_available());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let http = ReqwestHttpClient::new("http://127.0.0.1:1/".parse().unwrap(), Duration::from_secs(2)).unwrap();
    let client = ApiClient::new(http);

    let err = client.list_projects().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(!client.status().is_available());
    assert!(client.status().last_error().is_some());
}

#[test_log::test(tokio::test)]
async fn test_full_project_creation_with_partial_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Ana Souza", "email": "ana@example.com"},
            {"id": 2, "name": "Bruno Lima", "email": "bruno@example.com"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Implantação padrão", "description": ""})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .and(body_json(json!({"template_id": 1, "client_name": "Acme • ERP"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"project_id": 7, "checklist_items": 6})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/7/checklist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": project(7, "Acme • ERP"),
            "items": [
                checklist_item(11, 7, "Configurações iniciais"),
                checklist_item(12, 7, "Status da implantação"),
                checklist_item(13, 7, "Pendências"),
                checklist_item(14, 7, "Responsáveis"),
                checklist_item(15, 7, "Treinamento da equipe"),
                checklist_item(16, 7, "Go-live")
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/projects/7/checklist/11"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    for (id, title) in [(12, "Status da implantação"), (13, "Pendências")] {
        Mock::given(method("PATCH"))
            .and(path(format!("/api/projects/7/checklist/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(checklist_item(id, 7, title)))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("PATCH"))
        .and(path("/api/projects/7/checklist/14"))
        .and(body_json(json!({"notes": "Ana Souza <ana@example.com>\nBruno Lima <bruno@example.com>"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(checklist_item(14, 7, "Responsáveis")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects/7/members"))
        .and(header(ACTOR_HEADER, "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project(7, "Acme • ERP")])))
        .mount(&server)
        .await;

    let mut ws = create_test_workspace(&server, Some(1));
    *ws.form_mut() = ProjectForm {
        title: "Acme".to_string(),
        module: "ERP".to_string(),
        initial_config: "Filial 01".to_string(),
        status: ChecklistStatus::Doing,
        pending_notes: "Certificado digital".to_string(),
        responsible_user_ids: vec![1, 2],
    };

    let created = ws.submit_project_form().await.unwrap();

    assert_eq!(created.project_id, 7);
    assert_eq!(created.checklist_items, 6);
    assert_eq!(created.batch.len(), 6);
    assert_eq!(created.batch.succeeded(), 5);
    let failed: Vec<_> = created.batch.failures().map(|o| o.operation).collect();
    assert_eq!(
        failed,
        vec![BatchOperation::PatchSection {
            section: CanonicalSection::InitialConfiguration,
            item_id: 11,
        }]
    );
    assert_eq!(ws.projects().len(), 1);
    assert_eq!(ws.form(), &ProjectForm::default());
}

#[tokio::test]
async fn test_checklist_editing_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/7/checklist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": project(7, "Acme • ERP"),
            "items": [checklist_item(11, 7, "Pendências"), checklist_item(15, 7, "Go-live")]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let mut saved = checklist_item(11, 7, "Pendências");
    saved["status"] = json!("blocked");
    saved["assignee"] = json!("ana");
    saved["updated_by_user_id"] = json!(1);
    Mock::given(method("PATCH"))
        .and(path("/api/projects/7/checklist/11"))
        .and(body_json(json!({"status": "blocked", "assignee": "ana", "notes": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(saved))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/projects/7/checklist/15"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects/7/checklist"))
        .and(body_json(json!({"title": "Homologação", "status": "todo", "assignee": "", "notes": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(checklist_item(17, 7, "Homologação")))
        .expect(1)
        .mount(&server)
        .await;

    let mut ws = create_test_workspace(&server, Some(1));
    let editor = ws.checklist_mut();
    editor.open(7).await.unwrap();

    editor.update_local_item(
        11,
        &ChecklistItemUpdate {
            status: Some(ChecklistStatus::Blocked),
            assignee: Some("ana".to_string()),
            notes: None,
        },
    );
    let item = editor.save_item(11).await.unwrap();
    assert_eq!(item.updated_by_user_id, Some(1));
    assert_eq!(editor.item(11).unwrap().status, ChecklistStatus::Blocked);

    assert!(editor.delete_item(15, &mut |_: &str| true).await.unwrap());
    assert!(editor.item(15).is_none());

    // the reload after adding sees the server's new state
    Mock::given(method("GET"))
        .and(path("/api/projects/7/checklist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": project(7, "Acme • ERP"),
            "items": [checklist_item(11, 7, "Pendências"), checklist_item(17, 7, "Homologação")]
        })))
        .mount(&server)
        .await;
    editor
        .add_item(NewChecklistItem {
            title: "Homologação".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let ids: Vec<_> = editor.items().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![11, 17]);
}
