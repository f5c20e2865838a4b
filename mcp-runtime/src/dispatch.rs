use std::fmt;

use coolify_core::CoolifyError;
use coolify_core::settings::{
    ApplicationSettings, DatabaseBackupSettings, DatabaseSettings, EnvironmentVariableInput,
    PersistentStorageInput, ProjectSettings, ServiceSettings,
};
use serde_json::{Map, Value, json};

use crate::client::{ApiResponse, CoolifyClient};
use crate::util::{
    arg_optional_bool, arg_optional_string, arg_optional_u64, required_string, required_text,
    settings_from_args, to_pretty_json,
};

/// Every operation the dispatcher can route. Each variant has exactly one
/// catalog entry with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Healthcheck,
    ListTeams,
    GetCurrentTeam,
    ListProjects,
    GetProject,
    CreateProject,
    UpdateProject,
    DeleteProject,
    ListServers,
    GetServer,
    GetServerResources,
    GetServerDomains,
    ListApplications,
    GetApplication,
    UpdateApplication,
    DeleteApplication,
    StartApplication,
    StopApplication,
    RestartApplication,
    DeployApplication,
    GetApplicationLogs,
    ListApplicationEnvs,
    CreateApplicationEnv,
    UpdateApplicationEnv,
    DeleteApplicationEnv,
    ListApplicationStorages,
    CreateApplicationStorage,
    DeleteApplicationStorage,
    ListServices,
    GetService,
    UpdateService,
    DeleteService,
    StartService,
    StopService,
    RestartService,
    ListServiceEnvs,
    UpdateServiceEnv,
    ListDatabases,
    GetDatabase,
    UpdateDatabase,
    DeleteDatabase,
    StartDatabase,
    StopDatabase,
    RestartDatabase,
    ListDatabaseBackups,
    CreateDatabaseBackup,
    UpdateDatabaseBackup,
    DeleteDatabaseBackup,
    TriggerDatabaseBackup,
    ListDeployments,
    GetDeployment,
}

impl Operation {
    pub const ALL: [Operation; 51] = [
        Operation::Healthcheck,
        Operation::ListTeams,
        Operation::GetCurrentTeam,
        Operation::ListProjects,
        Operation::GetProject,
        Operation::CreateProject,
        Operation::UpdateProject,
        Operation::DeleteProject,
        Operation::ListServers,
        Operation::GetServer,
        Operation::GetServerResources,
        Operation::GetServerDomains,
        Operation::ListApplications,
        Operation::GetApplication,
        Operation::UpdateApplication,
        Operation::DeleteApplication,
        Operation::StartApplication,
        Operation::StopApplication,
        Operation::RestartApplication,
        Operation::DeployApplication,
        Operation::GetApplicationLogs,
        Operation::ListApplicationEnvs,
        Operation::CreateApplicationEnv,
        Operation::UpdateApplicationEnv,
        Operation::DeleteApplicationEnv,
        Operation::ListApplicationStorages,
        Operation::CreateApplicationStorage,
        Operation::DeleteApplicationStorage,
        Operation::ListServices,
        Operation::GetService,
        Operation::UpdateService,
        Operation::DeleteService,
        Operation::StartService,
        Operation::StopService,
        Operation::RestartService,
        Operation::ListServiceEnvs,
        Operation::UpdateServiceEnv,
        Operation::ListDatabases,
        Operation::GetDatabase,
        Operation::UpdateDatabase,
        Operation::DeleteDatabase,
        Operation::StartDatabase,
        Operation::StopDatabase,
        Operation::RestartDatabase,
        Operation::ListDatabaseBackups,
        Operation::CreateDatabaseBackup,
        Operation::UpdateDatabaseBackup,
        Operation::DeleteDatabaseBackup,
        Operation::TriggerDatabaseBackup,
        Operation::ListDeployments,
        Operation::GetDeployment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Healthcheck => "healthcheck",
            Operation::ListTeams => "list_teams",
            Operation::GetCurrentTeam => "get_current_team",
            Operation::ListProjects => "list_projects",
            Operation::GetProject => "get_project",
            Operation::CreateProject => "create_project",
            Operation::UpdateProject => "update_project",
            Operation::DeleteProject => "delete_project",
            Operation::ListServers => "list_servers",
            Operation::GetServer => "get_server",
            Operation::GetServerResources => "get_server_resources",
            Operation::GetServerDomains => "get_server_domains",
            Operation::ListApplications => "list_applications",
            Operation::GetApplication => "get_application",
            Operation::UpdateApplication => "update_application",
            Operation::DeleteApplication => "delete_application",
            Operation::StartApplication => "start_application",
            Operation::StopApplication => "stop_application",
            Operation::RestartApplication => "restart_application",
            Operation::DeployApplication => "deploy_application",
            Operation::GetApplicationLogs => "get_application_logs",
            Operation::ListApplicationEnvs => "list_application_envs",
            Operation::CreateApplicationEnv => "create_application_env",
            Operation::UpdateApplicationEnv => "update_application_env",
            Operation::DeleteApplicationEnv => "delete_application_env",
            Operation::ListApplicationStorages => "list_application_storages",
            Operation::CreateApplicationStorage => "create_application_storage",
            Operation::DeleteApplicationStorage => "delete_application_storage",
            Operation::ListServices => "list_services",
            Operation::GetService => "get_service",
            Operation::UpdateService => "update_service",
            Operation::DeleteService => "delete_service",
            Operation::StartService => "start_service",
            Operation::StopService => "stop_service",
            Operation::RestartService => "restart_service",
            Operation::ListServiceEnvs => "list_service_envs",
            Operation::UpdateServiceEnv => "update_service_env",
            Operation::ListDatabases => "list_databases",
            Operation::GetDatabase => "get_database",
            Operation::UpdateDatabase => "update_database",
            Operation::DeleteDatabase => "delete_database",
            Operation::StartDatabase => "start_database",
            Operation::StopDatabase => "stop_database",
            Operation::RestartDatabase => "restart_database",
            Operation::ListDatabaseBackups => "list_database_backups",
            Operation::CreateDatabaseBackup => "create_database_backup",
            Operation::UpdateDatabaseBackup => "update_database_backup",
            Operation::DeleteDatabaseBackup => "delete_database_backup",
            Operation::TriggerDatabaseBackup => "trigger_database_backup",
            Operation::ListDeployments => "list_deployments",
            Operation::GetDeployment => "get_deployment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a tool call failed. `message` is what the agent reads.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ToolError {
    pub code: &'static str,
    pub message: String,
    pub field: Option<String>,
}

impl ToolError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    fn unknown_tool(name: &str) -> Self {
        Self::new("unknown_tool", format!("Unknown tool: {name}"))
    }
}

impl From<CoolifyError> for ToolError {
    fn from(err: CoolifyError) -> Self {
        let code = match &err {
            CoolifyError::Api { status: Some(_), .. } => "api_error",
            CoolifyError::Api { status: None, .. } => "connection_error",
            CoolifyError::InvalidUrl { .. } => "invalid_url",
            CoolifyError::Decode(_) => "unexpected_response",
        };
        Self::new(code, err.to_string())
    }
}

/// Uniform outcome of one dispatch: text content plus an error flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub text: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Strings pass through untouched; anything else is pretty-printed JSON.
    pub fn success(output: &Value) -> Self {
        let text = match output {
            Value::String(text) => text.clone(),
            other => to_pretty_json(other),
        };
        Self {
            text,
            is_error: false,
        }
    }

    pub fn failure(message: impl fmt::Display) -> Self {
        Self {
            text: format!("Error: {message}"),
            is_error: true,
        }
    }

    /// The MCP `tools/call` result object.
    pub fn to_value(&self) -> Value {
        let mut payload = json!({
            "content": [{ "type": "text", "text": self.text }]
        });
        if self.is_error {
            payload["isError"] = Value::Bool(true);
        }
        payload
    }
}

/// Route one tool call to the client and wrap the outcome. Never fails:
/// every error becomes an `isError` result.
pub async fn dispatch(client: &CoolifyClient, name: &str, args: &Map<String, Value>) -> ToolResult {
    match call_tool(client, name, args).await {
        Ok(output) => ToolResult::success(&output),
        Err(err) => {
            tracing::warn!(tool = name, code = err.code, error = %err.message, "tool call failed");
            ToolResult::failure(&err)
        }
    }
}

/// Resolve `name` and run it, returning the raw JSON result.
pub async fn call_tool(
    client: &CoolifyClient,
    name: &str,
    args: &Map<String, Value>,
) -> Result<Value, ToolError> {
    let operation = Operation::from_name(name).ok_or_else(|| ToolError::unknown_tool(name))?;
    execute(client, operation, args).await
}

async fn execute(
    client: &CoolifyClient,
    operation: Operation,
    args: &Map<String, Value>,
) -> Result<Value, ToolError> {
    let tool = operation.name();
    let uuid = || required_string(args, "uuid");

    match operation {
        Operation::Healthcheck => raw(client.healthcheck().await?),

        Operation::ListTeams => raw(client.list_teams().await?),
        Operation::GetCurrentTeam => raw(client.get_current_team().await?),

        Operation::ListProjects => raw(client.list_projects().await?),
        Operation::GetProject => raw(client.get_project(&uuid()?).await?),
        Operation::CreateProject => {
            required_string(args, "name")?;
            let settings: ProjectSettings = settings_from_args(tool, args)?;
            raw(client.create_project(&settings).await?)
        }
        Operation::UpdateProject => {
            let uuid = uuid()?;
            let settings: ProjectSettings = settings_from_args(tool, args)?;
            raw(client.update_project(&uuid, &settings).await?)
        }
        Operation::DeleteProject => raw(client.delete_project(&uuid()?).await?),

        Operation::ListServers => raw(client.list_servers().await?),
        Operation::GetServer => raw(client.get_server(&uuid()?).await?),
        Operation::GetServerResources => raw(client.get_server_resources(&uuid()?).await?),
        Operation::GetServerDomains => raw(client.get_server_domains(&uuid()?).await?),

        Operation::ListApplications => raw(client.list_applications().await?),
        Operation::GetApplication => raw(client.get_application(&uuid()?).await?),
        Operation::UpdateApplication => {
            let uuid = uuid()?;
            let settings: ApplicationSettings = settings_from_args(tool, args)?;
            raw(client.update_application(&uuid, &settings).await?)
        }
        Operation::DeleteApplication => raw(client.delete_application(&uuid()?).await?),
        Operation::StartApplication => raw(client.start_application(&uuid()?).await?),
        Operation::StopApplication => raw(client.stop_application(&uuid()?).await?),
        Operation::RestartApplication => raw(client.restart_application(&uuid()?).await?),
        Operation::DeployApplication => {
            let uuid = uuid()?;
            let force = arg_optional_bool(args, "force")?.unwrap_or(false);
            raw(client.deploy_application(&uuid, force).await?)
        }
        Operation::GetApplicationLogs => {
            let uuid = uuid()?;
            let lines = arg_optional_u64(args, "lines")?;
            Ok(Value::String(client.get_application_logs(&uuid, lines).await?))
        }

        Operation::ListApplicationEnvs => raw(client.list_application_envs(&uuid()?).await?),
        Operation::CreateApplicationEnv => {
            let uuid = uuid()?;
            let env = env_input(args, true)?;
            raw(client.create_application_env(&uuid, &env).await?)
        }
        Operation::UpdateApplicationEnv => {
            let uuid = uuid()?;
            let env = env_input(args, true)?;
            raw(client.update_application_env(&uuid, &env).await?)
        }
        Operation::DeleteApplicationEnv => {
            let uuid = uuid()?;
            let env_uuid = required_string(args, "env_uuid")?;
            raw(client.delete_application_env(&uuid, &env_uuid).await?)
        }

        Operation::ListApplicationStorages => {
            raw(client.list_application_storages(&uuid()?).await?)
        }
        Operation::CreateApplicationStorage => {
            let uuid = uuid()?;
            let storage = PersistentStorageInput {
                name: required_string(args, "name")?,
                mount_path: required_string(args, "mount_path")?,
                host_path: arg_optional_string(args, "host_path")?,
            };
            raw(client.create_application_storage(&uuid, &storage).await?)
        }
        Operation::DeleteApplicationStorage => {
            let uuid = uuid()?;
            let storage_uuid = required_string(args, "storage_uuid")?;
            raw(client.delete_application_storage(&uuid, &storage_uuid).await?)
        }

        Operation::ListServices => raw(client.list_services().await?),
        Operation::GetService => raw(client.get_service(&uuid()?).await?),
        Operation::UpdateService => {
            let uuid = uuid()?;
            let settings: ServiceSettings = settings_from_args(tool, args)?;
            raw(client.update_service(&uuid, &settings).await?)
        }
        Operation::DeleteService => raw(client.delete_service(&uuid()?).await?),
        Operation::StartService => raw(client.start_service(&uuid()?).await?),
        Operation::StopService => raw(client.stop_service(&uuid()?).await?),
        Operation::RestartService => raw(client.restart_service(&uuid()?).await?),
        Operation::ListServiceEnvs => raw(client.list_service_envs(&uuid()?).await?),
        Operation::UpdateServiceEnv => {
            let uuid = uuid()?;
            let env = env_input(args, false)?;
            raw(client.update_service_env(&uuid, &env).await?)
        }

        Operation::ListDatabases => raw(client.list_databases().await?),
        Operation::GetDatabase => raw(client.get_database(&uuid()?).await?),
        Operation::UpdateDatabase => {
            let uuid = uuid()?;
            let settings: DatabaseSettings = settings_from_args(tool, args)?;
            raw(client.update_database(&uuid, &settings).await?)
        }
        Operation::DeleteDatabase => raw(client.delete_database(&uuid()?).await?),
        Operation::StartDatabase => raw(client.start_database(&uuid()?).await?),
        Operation::StopDatabase => raw(client.stop_database(&uuid()?).await?),
        Operation::RestartDatabase => raw(client.restart_database(&uuid()?).await?),

        Operation::ListDatabaseBackups => raw(client.list_database_backups(&uuid()?).await?),
        Operation::CreateDatabaseBackup => {
            let uuid = uuid()?;
            let backup: DatabaseBackupSettings = settings_from_args(tool, args)?;
            raw(client.create_database_backup(&uuid, &backup).await?)
        }
        Operation::UpdateDatabaseBackup => {
            let uuid = uuid()?;
            let backup_uuid = required_string(args, "backup_uuid")?;
            let backup: DatabaseBackupSettings = settings_from_args(tool, args)?;
            raw(
                client
                    .update_database_backup(&uuid, &backup_uuid, &backup)
                    .await?,
            )
        }
        Operation::DeleteDatabaseBackup => {
            let uuid = uuid()?;
            let backup_uuid = required_string(args, "backup_uuid")?;
            raw(client.delete_database_backup(&uuid, &backup_uuid).await?)
        }
        Operation::TriggerDatabaseBackup => {
            let uuid = uuid()?;
            let backup_uuid = required_string(args, "backup_uuid")?;
            raw(client.trigger_database_backup(&uuid, &backup_uuid).await?)
        }

        Operation::ListDeployments => raw(client.list_deployments().await?),
        Operation::GetDeployment => raw(client.get_deployment(&uuid()?).await?),
    }
}

/// Success bodies go to the agent exactly as Coolify sent them.
fn raw<T>(response: ApiResponse<T>) -> Result<Value, ToolError> {
    Ok(response.into_value())
}

/// Service env updates only carry key and value.
fn env_input(
    args: &Map<String, Value>,
    with_flags: bool,
) -> Result<EnvironmentVariableInput, ToolError> {
    let mut env = EnvironmentVariableInput::new(
        required_string(args, "key")?,
        required_text(args, "value")?,
    );
    if with_flags {
        env.is_build_time = arg_optional_bool(args, "is_build_time")?;
        env.is_preview = arg_optional_bool(args, "is_preview")?;
    }
    Ok(env)
}
