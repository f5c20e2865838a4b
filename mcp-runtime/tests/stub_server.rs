use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use coolify_mcp_runtime::{CoolifyClient, CoolifyConfig, McpServer, dispatch};
use serde_json::{Map, Value, json};

const TOKEN: &str = "stub-token";

#[derive(Debug, Clone)]
struct Recorded {
    method: &'static str,
    path: String,
    query: HashMap<String, String>,
    body: Option<Value>,
}

#[derive(Default)]
struct Stub {
    envs: Mutex<Vec<Value>>,
    requests: Mutex<Vec<Recorded>>,
}

type Shared = Arc<Stub>;

impl Stub {
    fn record(
        &self,
        method: &'static str,
        path: String,
        query: HashMap<String, String>,
        body: Option<Value>,
    ) {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path,
            query,
            body,
        });
    }

    fn last(&self) -> Recorded {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthenticated." })),
    )
        .into_response()
}

async fn healthcheck() -> &'static str {
    "OK"
}

async fn list_projects(State(stub): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthenticated();
    }
    stub.record("GET", "/projects".into(), HashMap::new(), None);
    Json(json!([
        { "uuid": "p-1", "name": "web", "description": null, "id": 1 }
    ]))
    .into_response()
}

async fn get_project(State(stub): State<Shared>, Path(uuid): Path<String>) -> Response {
    stub.record("GET", format!("/projects/{uuid}"), HashMap::new(), None);
    if uuid == "p-1" {
        (
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"uuid":"p-1","name":"web","zeta":"last","alpha":"first"}"#,
        )
            .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Project not found" })),
        )
            .into_response()
    }
}

async fn create_project(State(stub): State<Shared>, Json(body): Json<Value>) -> Response {
    stub.record("POST", "/projects".into(), HashMap::new(), Some(body));
    (StatusCode::CREATED, Json(json!({ "uuid": "p-new" }))).into_response()
}

async fn list_servers() -> Response {
    (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").into_response()
}

async fn deploy(
    State(stub): State<Shared>,
    Path(uuid): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.record("POST", format!("/applications/{uuid}/deploy"), query, None);
    Json(json!({ "message": "Deployment request queued.", "deployment_uuid": "d-1" }))
}

async fn logs(
    State(stub): State<Shared>,
    Path(uuid): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> &'static str {
    stub.record("GET", format!("/applications/{uuid}/logs"), query, None);
    "booting\nlistening on :3000"
}

async fn list_envs(Path(uuid): Path<String>, State(stub): State<Shared>) -> Json<Value> {
    if uuid == "app-locked" {
        return Json(json!([{ "uuid": "env-9", "key": "SECRET", "value": null }]));
    }
    Json(Value::Array(stub.envs.lock().unwrap().clone()))
}

async fn create_env(
    State(stub): State<Shared>,
    Path(uuid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    stub.record(
        "POST",
        format!("/applications/{uuid}/envs"),
        HashMap::new(),
        Some(body.clone()),
    );
    let mut envs = stub.envs.lock().unwrap();
    let env_uuid = format!("env-{}", envs.len() + 1);
    let mut stored = body;
    stored["uuid"] = json!(env_uuid);
    envs.push(stored);
    (StatusCode::CREATED, Json(json!({ "uuid": env_uuid }))).into_response()
}

async fn update_database(
    State(stub): State<Shared>,
    Path(uuid): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record("PATCH", format!("/databases/{uuid}"), HashMap::new(), Some(body));
    Json(json!({ "message": "Database updated." }))
}

async fn update_application(
    State(stub): State<Shared>,
    Path(uuid): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record(
        "PATCH",
        format!("/applications/{uuid}"),
        HashMap::new(),
        Some(body),
    );
    Json(json!({ "uuid": uuid }))
}

async fn delete_service(State(stub): State<Shared>, Path(uuid): Path<String>) -> StatusCode {
    stub.record("DELETE", format!("/services/{uuid}"), HashMap::new(), None);
    StatusCode::NO_CONTENT
}

async fn trigger_backup(
    State(stub): State<Shared>,
    Path((uuid, backup_uuid)): Path<(String, String)>,
) -> Json<Value> {
    stub.record(
        "POST",
        format!("/databases/{uuid}/backups/{backup_uuid}/trigger"),
        HashMap::new(),
        None,
    );
    Json(json!({ "message": "Backup triggered." }))
}

async fn spawn_stub() -> (Shared, CoolifyClient) {
    let stub: Shared = Arc::new(Stub::default());
    let api = Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{uuid}", get(get_project))
        .route("/servers", get(list_servers))
        .route("/applications/{uuid}", patch(update_application))
        .route("/applications/{uuid}/deploy", post(deploy))
        .route("/applications/{uuid}/logs", get(logs))
        .route("/applications/{uuid}/envs", get(list_envs).post(create_env))
        .route("/databases/{uuid}", patch(update_database))
        .route("/services/{uuid}", delete(delete_service))
        .route(
            "/databases/{uuid}/backups/{backup_uuid}/trigger",
            post(trigger_backup),
        );
    let app = Router::new().nest("/api/v1", api).with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = CoolifyClient::new(&CoolifyConfig {
        api_url: format!("http://{addr}/"),
        api_token: TOKEN.to_string(),
    })
    .unwrap();
    (stub, client)
}

fn bag(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn not_found_is_normalized_into_error_text() {
    let (_stub, client) = spawn_stub().await;
    let result = dispatch(&client, "get_project", &bag(json!({ "uuid": "missing" }))).await;
    assert!(result.is_error);
    assert_eq!(result.text, "Error: Coolify API Error (404): Project not found");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_text() {
    let (_stub, client) = spawn_stub().await;
    let result = dispatch(&client, "list_servers", &Map::new()).await;
    assert_eq!(
        result.text,
        "Error: Coolify API Error (502): Request failed with status code 502"
    );
}

#[tokio::test]
async fn bad_token_surfaces_unauthenticated() {
    let (_stub, good) = spawn_stub().await;
    let bad = CoolifyClient::new(&CoolifyConfig {
        api_url: good.base_url().trim_end_matches("/api/v1").to_string(),
        api_token: "wrong".to_string(),
    })
    .unwrap();
    let result = dispatch(&bad, "list_projects", &Map::new()).await;
    assert_eq!(result.text, "Error: Coolify API Error (401): Unauthenticated.");
}

#[tokio::test]
async fn list_projects_is_repeatable() {
    let (_stub, client) = spawn_stub().await;
    let first = dispatch(&client, "list_projects", &Map::new()).await;
    let second = dispatch(&client, "list_projects", &Map::new()).await;
    assert!(!first.is_error);
    assert_eq!(first, second);

    let projects: Value = serde_json::from_str(&first.text).unwrap();
    assert_eq!(projects[0]["uuid"], "p-1");
    assert_eq!(projects[0]["id"], 1);
    assert_eq!(projects[0]["description"], Value::Null);
}

#[tokio::test]
async fn healthcheck_and_logs_pass_text_through() {
    let (stub, client) = spawn_stub().await;
    let health = dispatch(&client, "healthcheck", &Map::new()).await;
    assert_eq!(health.text, "OK");

    let logs = dispatch(
        &client,
        "get_application_logs",
        &bag(json!({ "uuid": "app-1", "lines": 50 })),
    )
    .await;
    assert_eq!(logs.text, "booting\nlistening on :3000");
    assert_eq!(stub.last().query.get("lines").map(String::as_str), Some("50"));

    dispatch(
        &client,
        "get_application_logs",
        &bag(json!({ "uuid": "app-1", "lines": 20.0 })),
    )
    .await;
    assert_eq!(stub.last().query.get("lines").map(String::as_str), Some("20"));
}

#[tokio::test]
async fn deploy_sends_force_only_when_requested() {
    let (stub, client) = spawn_stub().await;

    dispatch(&client, "deploy_application", &bag(json!({ "uuid": "app-1" }))).await;
    let plain = stub.last();
    assert_eq!(plain.method, "POST");
    assert_eq!(plain.path, "/applications/app-1/deploy");
    assert!(plain.query.is_empty());

    let result = dispatch(
        &client,
        "deploy_application",
        &bag(json!({ "uuid": "app-1", "force": true })),
    )
    .await;
    assert_eq!(stub.last().query.get("force").map(String::as_str), Some("true"));
    let body: Value = serde_json::from_str(&result.text).unwrap();
    assert_eq!(body["deployment_uuid"], "d-1");
}

#[tokio::test]
async fn created_env_shows_up_in_listing() {
    let (stub, client) = spawn_stub().await;
    let created = dispatch(
        &client,
        "create_application_env",
        &bag(json!({ "uuid": "app-1", "key": "PORT", "value": "3000", "is_preview": false })),
    )
    .await;
    assert!(!created.is_error, "{}", created.text);
    assert_eq!(
        stub.last().body,
        Some(json!({ "key": "PORT", "value": "3000", "is_preview": false }))
    );

    let listed = dispatch(&client, "list_application_envs", &bag(json!({ "uuid": "app-1" }))).await;
    let envs: Value = serde_json::from_str(&listed.text).unwrap();
    assert_eq!(envs[0]["key"], "PORT");
    assert_eq!(envs[0]["value"], "3000");
}

#[tokio::test]
async fn update_body_carries_only_recognized_fields() {
    let (stub, client) = spawn_stub().await;
    let result = dispatch(
        &client,
        "update_database",
        &bag(json!({ "uuid": "db-1", "is_public": true, "public_port": 5433, "bogus": 1 })),
    )
    .await;
    assert!(!result.is_error, "{}", result.text);
    assert_eq!(
        stub.last().body,
        Some(json!({ "is_public": true, "public_port": 5433 }))
    );

    dispatch(
        &client,
        "update_database",
        &bag(json!({ "uuid": "db-1", "public_port": 5434.0 })),
    )
    .await;
    assert_eq!(stub.last().body, Some(json!({ "public_port": 5434 })));
}

#[tokio::test]
async fn successful_writes_pass_bodies_through_untouched() {
    let (stub, client) = spawn_stub().await;

    let updated = dispatch(
        &client,
        "update_application",
        &bag(json!({ "uuid": "app-1", "name": "web-2" })),
    )
    .await;
    assert!(!updated.is_error, "{}", updated.text);
    assert_eq!(updated.text, "{\n  \"uuid\": \"app-1\"\n}");
    assert_eq!(stub.last().body, Some(json!({ "name": "web-2" })));

    let db = dispatch(
        &client,
        "update_database",
        &bag(json!({ "uuid": "db-1", "is_public": false })),
    )
    .await;
    assert!(!db.is_error, "{}", db.text);
    assert_eq!(db.text, "{\n  \"message\": \"Database updated.\"\n}");

    let deleted = dispatch(&client, "delete_service", &bag(json!({ "uuid": "svc-1" }))).await;
    assert!(!deleted.is_error, "{}", deleted.text);
    assert_eq!(deleted.text, "");
    assert_eq!(stub.last().method, "DELETE");
}

#[tokio::test]
async fn null_env_values_are_listed_as_null() {
    let (_stub, client) = spawn_stub().await;
    let listed = dispatch(
        &client,
        "list_application_envs",
        &bag(json!({ "uuid": "app-locked" })),
    )
    .await;
    assert!(!listed.is_error, "{}", listed.text);
    let envs: Value = serde_json::from_str(&listed.text).unwrap();
    assert_eq!(envs[0]["key"], "SECRET");
    assert_eq!(envs[0]["value"], Value::Null);
    assert!(envs[0].get("is_preview").is_none());
}

#[tokio::test]
async fn project_fields_keep_their_order() {
    let (_stub, client) = spawn_stub().await;
    let result = dispatch(&client, "get_project", &bag(json!({ "uuid": "p-1" }))).await;
    assert!(!result.is_error, "{}", result.text);
    let expected = r#"{
  "uuid": "p-1",
  "name": "web",
  "zeta": "last",
  "alpha": "first"
}"#;
    assert_eq!(result.text, expected);
}

#[tokio::test]
async fn create_project_posts_name_and_description() {
    let (stub, client) = spawn_stub().await;
    let result = dispatch(
        &client,
        "create_project",
        &bag(json!({ "name": "api", "description": "backend" })),
    )
    .await;
    assert_eq!(serde_json::from_str::<Value>(&result.text).unwrap()["uuid"], "p-new");
    assert_eq!(
        stub.last().body,
        Some(json!({ "name": "api", "description": "backend" }))
    );
}

#[tokio::test]
async fn nested_backup_path_uses_both_identifiers() {
    let (stub, client) = spawn_stub().await;
    let result = dispatch(
        &client,
        "trigger_database_backup",
        &bag(json!({ "uuid": "db-1", "backup_uuid": "bk-2" })),
    )
    .await;
    assert!(!result.is_error, "{}", result.text);
    assert_eq!(stub.last().path, "/databases/db-1/backups/bk-2/trigger");
}

#[tokio::test]
async fn tools_call_round_trips_through_jsonrpc() {
    let (_stub, client) = spawn_stub().await;
    let server = McpServer::new(client);
    let response = server
        .handle_incoming_message(json!({
            "jsonrpc": "2.0",
            "id": 11,
            "method": "tools/call",
            "params": { "name": "get_project", "arguments": { "uuid": "p-1" } }
        }))
        .await
        .unwrap();
    assert_eq!(response["id"], 11);
    assert!(response["result"].get("isError").is_none());
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let project: Value = serde_json::from_str(text).unwrap();
    assert_eq!(project["name"], "web");
}
