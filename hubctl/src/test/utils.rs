use crate::client::{ApiClient, ReqwestHttpClient};
use crate::config::DefaultTemplateConfig;
use crate::workspace::Workspace;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::MockServer;

pub fn create_test_client(server: &MockServer, actor: Option<i64>) -> ApiClient {
    let base = format!("{}/api", server.uri()).parse().expect("mock server uri is a valid url");
    let http = ReqwestHttpClient::new(base, Duration::from_secs(5)).expect("Failed to build HTTP client");
    ApiClient::new(http).with_actor(actor)
}

pub fn create_test_workspace(server: &MockServer, actor: Option<i64>) -> Workspace {
    Workspace::new(create_test_client(server, actor), DefaultTemplateConfig::default())
}

pub fn checklist_item(id: i64, project_id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "project_id": project_id,
        "activity_id": id,
        "title": title,
        "status": "todo",
        "assignee": "",
        "notes": "",
        "updated_at": "2024-05-02T10:11:12.123456",
        "updated_by_user_id": null
    })
}

pub fn project(id: i64, client_name: &str) -> Value {
    json!({
        "id": id,
        "template_id": 1,
        "client_name": client_name,
        "status": "active",
        "created_at": "2024-05-02T10:11:12.123456",
        "updated_at": "2024-05-02T10:11:12.123456",
        "created_by_user_id": 1,
        "updated_by_user_id": 1
    })
}
