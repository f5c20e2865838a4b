use std::marker::PhantomData;
use std::time::Duration;

use coolify_core::CoolifyError;
use coolify_core::resources::{
    Application, CreatedResource, Database, DatabaseBackup, Deployment, EnvironmentVariable,
    HealthCheck, Message, PersistentStorage, Project, Server, Service, Team,
};
use coolify_core::settings::{
    ApplicationSettings, DatabaseBackupSettings, DatabaseSettings, EnvironmentVariableInput,
    PersistentStorageInput, ProjectSettings, ServiceSettings,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::util::{parse_response_body, to_pretty_json};

pub const API_PREFIX: &str = "/api/v1";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type ApiResult<T> = Result<T, CoolifyError>;

/// A successful response body, kept exactly as the server sent it.
///
/// `T` is the documented shape. [`ApiResponse::decode`] reads the body as
/// `T`; [`ApiResponse::into_value`] hands it on untouched, which is what the
/// tool surface does since Coolify answers many writes with partial bodies.
pub struct ApiResponse<T> {
    body: Value,
    shape: PhantomData<fn() -> T>,
}

impl<T> ApiResponse<T> {
    fn new(body: Value) -> Self {
        Self {
            body,
            shape: PhantomData,
        }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_value(self) -> Value {
        self.body
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn decode(self) -> ApiResult<T> {
        Ok(serde_json::from_value(self.body)?)
    }
}

impl<T> std::fmt::Debug for ApiResponse<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiResponse").field(&self.body).finish()
    }
}

/// Connection settings for one Coolify instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoolifyConfig {
    pub api_url: String,
    pub api_token: String,
}

/// Stateless client for the Coolify REST API.
///
/// One method per remote operation, one HTTP request per call. Cloning is
/// cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct CoolifyClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

impl std::fmt::Debug for CoolifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoolifyClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CoolifyClient {
    pub fn new(config: &CoolifyConfig) -> ApiResult<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    /// Same as [`CoolifyClient::new`] with a custom per-request timeout.
    pub fn with_timeout(config: &CoolifyConfig, timeout: Duration) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CoolifyError::transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: api_base_url(&config.api_url),
            token: config.api_token.clone(),
            timeout,
        })
    }

    /// `{api_url}/api/v1` with any trailing slash of `api_url` removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========== Health check ==========

    pub async fn healthcheck(&self) -> ApiResult<ApiResponse<HealthCheck>> {
        self.get(&["healthcheck"], &[]).await
    }

    // ========== Teams ==========

    pub async fn list_teams(&self) -> ApiResult<ApiResponse<Vec<Team>>> {
        self.get(&["teams"], &[]).await
    }

    pub async fn get_current_team(&self) -> ApiResult<ApiResponse<Team>> {
        self.get(&["teams", "current"], &[]).await
    }

    // ========== Projects ==========

    pub async fn list_projects(&self) -> ApiResult<ApiResponse<Vec<Project>>> {
        self.get(&["projects"], &[]).await
    }

    pub async fn get_project(&self, uuid: &str) -> ApiResult<ApiResponse<Project>> {
        self.get(&["projects", uuid], &[]).await
    }

    pub async fn create_project(
        &self,
        settings: &ProjectSettings,
    ) -> ApiResult<ApiResponse<CreatedResource>> {
        self.post(&["projects"], settings).await
    }

    pub async fn update_project(
        &self,
        uuid: &str,
        settings: &ProjectSettings,
    ) -> ApiResult<ApiResponse<Project>> {
        self.patch(&["projects", uuid], settings).await
    }

    pub async fn delete_project(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.delete(&["projects", uuid]).await
    }

    // ========== Servers ==========

    pub async fn list_servers(&self) -> ApiResult<ApiResponse<Vec<Server>>> {
        self.get(&["servers"], &[]).await
    }

    pub async fn get_server(&self, uuid: &str) -> ApiResult<ApiResponse<Server>> {
        self.get(&["servers", uuid], &[]).await
    }

    /// Applications, databases and services running on a server. The shape
    /// varies between Coolify versions, so it is returned untyped.
    pub async fn get_server_resources(&self, uuid: &str) -> ApiResult<ApiResponse<Value>> {
        self.get(&["servers", uuid, "resources"], &[]).await
    }

    pub async fn get_server_domains(&self, uuid: &str) -> ApiResult<ApiResponse<Value>> {
        self.get(&["servers", uuid, "domains"], &[]).await
    }

    // ========== Applications ==========

    pub async fn list_applications(&self) -> ApiResult<ApiResponse<Vec<Application>>> {
        self.get(&["applications"], &[]).await
    }

    pub async fn get_application(&self, uuid: &str) -> ApiResult<ApiResponse<Application>> {
        self.get(&["applications", uuid], &[]).await
    }

    pub async fn update_application(
        &self,
        uuid: &str,
        settings: &ApplicationSettings,
    ) -> ApiResult<ApiResponse<Application>> {
        self.patch(&["applications", uuid], settings).await
    }

    pub async fn delete_application(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.delete(&["applications", uuid]).await
    }

    pub async fn start_application(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["applications", uuid, "start"], &[]).await
    }

    pub async fn stop_application(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["applications", uuid, "stop"], &[]).await
    }

    pub async fn restart_application(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["applications", uuid, "restart"], &[]).await
    }

    /// Queue a deployment. `force` rebuilds without the build cache and is
    /// only sent when set.
    pub async fn deploy_application(
        &self,
        uuid: &str,
        force: bool,
    ) -> ApiResult<ApiResponse<Deployment>> {
        let query = deploy_query(force);
        self.action(&["applications", uuid, "deploy"], &query).await
    }

    /// Container logs as text. A JSON body is rendered pretty-printed.
    pub async fn get_application_logs(&self, uuid: &str, lines: Option<u64>) -> ApiResult<String> {
        let query = logs_query(lines);
        let body = self
            .get::<Value>(&["applications", uuid, "logs"], &query)
            .await?
            .into_value();
        Ok(match body {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => to_pretty_json(&other),
        })
    }

    // ========== Application environment variables ==========

    pub async fn list_application_envs(
        &self,
        uuid: &str,
    ) -> ApiResult<ApiResponse<Vec<EnvironmentVariable>>> {
        self.get(&["applications", uuid, "envs"], &[]).await
    }

    /// Coolify answers a create with just the new uuid and an update with
    /// the full variable, so the body is passed through undecoded.
    pub async fn create_application_env(
        &self,
        uuid: &str,
        env: &EnvironmentVariableInput,
    ) -> ApiResult<ApiResponse<Value>> {
        self.post(&["applications", uuid, "envs"], env).await
    }

    pub async fn update_application_env(
        &self,
        uuid: &str,
        env: &EnvironmentVariableInput,
    ) -> ApiResult<ApiResponse<Value>> {
        self.patch(&["applications", uuid, "envs"], env).await
    }

    pub async fn delete_application_env(
        &self,
        uuid: &str,
        env_uuid: &str,
    ) -> ApiResult<ApiResponse<Message>> {
        self.delete(&["applications", uuid, "envs", env_uuid]).await
    }

    // ========== Application persistent storage ==========

    pub async fn list_application_storages(
        &self,
        uuid: &str,
    ) -> ApiResult<ApiResponse<Vec<PersistentStorage>>> {
        self.get(&["applications", uuid, "storages"], &[]).await
    }

    pub async fn create_application_storage(
        &self,
        uuid: &str,
        storage: &PersistentStorageInput,
    ) -> ApiResult<ApiResponse<Value>> {
        self.post(&["applications", uuid, "storages"], storage).await
    }

    pub async fn delete_application_storage(
        &self,
        uuid: &str,
        storage_uuid: &str,
    ) -> ApiResult<ApiResponse<Message>> {
        self.delete(&["applications", uuid, "storages", storage_uuid])
            .await
    }

    // ========== Services ==========

    pub async fn list_services(&self) -> ApiResult<ApiResponse<Vec<Service>>> {
        self.get(&["services"], &[]).await
    }

    pub async fn get_service(&self, uuid: &str) -> ApiResult<ApiResponse<Service>> {
        self.get(&["services", uuid], &[]).await
    }

    pub async fn update_service(
        &self,
        uuid: &str,
        settings: &ServiceSettings,
    ) -> ApiResult<ApiResponse<Service>> {
        self.patch(&["services", uuid], settings).await
    }

    pub async fn delete_service(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.delete(&["services", uuid]).await
    }

    pub async fn start_service(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["services", uuid, "start"], &[]).await
    }

    pub async fn stop_service(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["services", uuid, "stop"], &[]).await
    }

    pub async fn restart_service(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["services", uuid, "restart"], &[]).await
    }

    // ========== Service environment variables ==========

    pub async fn list_service_envs(
        &self,
        uuid: &str,
    ) -> ApiResult<ApiResponse<Vec<EnvironmentVariable>>> {
        self.get(&["services", uuid, "envs"], &[]).await
    }

    pub async fn update_service_env(
        &self,
        uuid: &str,
        env: &EnvironmentVariableInput,
    ) -> ApiResult<ApiResponse<Value>> {
        self.patch(&["services", uuid, "envs"], env).await
    }

    // ========== Databases ==========

    pub async fn list_databases(&self) -> ApiResult<ApiResponse<Vec<Database>>> {
        self.get(&["databases"], &[]).await
    }

    pub async fn get_database(&self, uuid: &str) -> ApiResult<ApiResponse<Database>> {
        self.get(&["databases", uuid], &[]).await
    }

    pub async fn update_database(
        &self,
        uuid: &str,
        settings: &DatabaseSettings,
    ) -> ApiResult<ApiResponse<Database>> {
        self.patch(&["databases", uuid], settings).await
    }

    pub async fn delete_database(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.delete(&["databases", uuid]).await
    }

    pub async fn start_database(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["databases", uuid, "start"], &[]).await
    }

    pub async fn stop_database(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["databases", uuid, "stop"], &[]).await
    }

    pub async fn restart_database(&self, uuid: &str) -> ApiResult<ApiResponse<Message>> {
        self.action(&["databases", uuid, "restart"], &[]).await
    }

    // ========== Database backups ==========

    pub async fn list_database_backups(&self, uuid: &str) -> ApiResult<ApiResponse<Value>> {
        self.get(&["databases", uuid, "backups"], &[]).await
    }

    pub async fn create_database_backup(
        &self,
        uuid: &str,
        backup: &DatabaseBackupSettings,
    ) -> ApiResult<ApiResponse<DatabaseBackup>> {
        self.post(&["databases", uuid, "backups"], backup).await
    }

    pub async fn update_database_backup(
        &self,
        uuid: &str,
        backup_uuid: &str,
        backup: &DatabaseBackupSettings,
    ) -> ApiResult<ApiResponse<DatabaseBackup>> {
        self.patch(&["databases", uuid, "backups", backup_uuid], backup)
            .await
    }

    pub async fn delete_database_backup(
        &self,
        uuid: &str,
        backup_uuid: &str,
    ) -> ApiResult<ApiResponse<Message>> {
        self.delete(&["databases", uuid, "backups", backup_uuid])
            .await
    }

    pub async fn trigger_database_backup(
        &self,
        uuid: &str,
        backup_uuid: &str,
    ) -> ApiResult<ApiResponse<Message>> {
        self.action(&["databases", uuid, "backups", backup_uuid, "trigger"], &[])
            .await
    }

    // ========== Deployments ==========

    pub async fn list_deployments(&self) -> ApiResult<ApiResponse<Vec<Deployment>>> {
        self.get(&["deployments"], &[]).await
    }

    pub async fn get_deployment(&self, uuid: &str) -> ApiResult<ApiResponse<Deployment>> {
        self.get(&["deployments", uuid], &[]).await
    }

    // ========== Transport ==========

    async fn get<T>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ApiResult<ApiResponse<T>> {
        let request = self.request(Method::GET, segments, query)?;
        self.execute(request).await.map(ApiResponse::new)
    }

    /// Body-less POST used by start/stop/restart/deploy/trigger.
    async fn action<T>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ApiResult<ApiResponse<T>> {
        let request = self.request(Method::POST, segments, query)?;
        self.execute(request).await.map(ApiResponse::new)
    }

    async fn post<T, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        let request = self.request(Method::POST, segments, &[])?.json(body);
        self.execute(request).await.map(ApiResponse::new)
    }

    async fn patch<T, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        let request = self.request(Method::PATCH, segments, &[])?.json(body);
        self.execute(request).await.map(ApiResponse::new)
    }

    async fn delete<T>(&self, segments: &[&str]) -> ApiResult<ApiResponse<T>> {
        let request = self.request(Method::DELETE, segments, &[])?;
        self.execute(request).await.map(ApiResponse::new)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ApiResult<reqwest::RequestBuilder> {
        let url = endpoint_url(&self.base_url, segments, query)?;
        tracing::debug!(method = %method, path = url.path(), "coolify api request");
        Ok(self.http.request(method, url).bearer_auth(&self.token))
    }

    /// The single place HTTP failures are normalized.
    async fn execute(&self, request: reqwest::RequestBuilder) -> ApiResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| CoolifyError::transport(transport_message(&e, self.timeout)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoolifyError::transport(transport_message(&e, self.timeout)))?;
        let body = parse_response_body(&bytes);

        if !status.is_success() {
            return Err(CoolifyError::from_status(status.as_u16(), &body));
        }
        Ok(body)
    }
}

fn api_base_url(api_url: &str) -> String {
    format!("{}{API_PREFIX}", api_url.trim_end_matches('/'))
}

fn endpoint_url(base_url: &str, segments: &[&str], query: &[(&str, String)]) -> ApiResult<Url> {
    let invalid = |source| CoolifyError::InvalidUrl {
        url: base_url.to_string(),
        source,
    };
    let mut url = Url::parse(base_url).map_err(invalid)?;
    url.path_segments_mut()
        .map_err(|()| invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

fn deploy_query(force: bool) -> Vec<(&'static str, String)> {
    if force {
        vec![("force", "true".to_string())]
    } else {
        Vec::new()
    }
}

fn logs_query(lines: Option<u64>) -> Vec<(&'static str, String)> {
    match lines {
        Some(lines) if lines > 0 => vec![("lines", lines.to_string())],
        _ => Vec::new(),
    }
}

fn transport_message(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        format!("request timed out after {timeout:?}: {err}")
    } else {
        err.to_string()
    }
}
