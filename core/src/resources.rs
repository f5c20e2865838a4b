use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields the remote API returns that are not modeled explicitly.
///
/// Every resource flattens one of these so unknown upstream fields survive a
/// decode/encode round trip unchanged.
pub type Extra = Map<String, Value>;

/// Short acknowledgment returned by start/stop/restart/delete style actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Response to a create call that only echoes the new identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResource {
    pub uuid: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Result of `GET /healthcheck`.
///
/// Coolify answers with plain text on most versions and with a status object
/// on some, so both shapes decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HealthCheck {
    Status {
        status: String,
        message: Option<String>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub environments: Option<Vec<Environment>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A project environment (production, staging, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub project_id: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub uuid: String,
    pub name: String,
    pub ip: Option<String>,
    pub description: Option<String>,
    pub settings: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub fqdn: Option<String>,
    pub status: Option<String>,
    pub repository_project_id: Option<i64>,
    pub git_repository: Option<String>,
    pub git_branch: Option<String>,
    pub build_pack: Option<String>,
    pub environment_id: Option<i64>,
    pub destination_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Docker Compose based service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub docker_compose_raw: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Scheduled backup configuration attached to a database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseBackup {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub enabled: Option<bool>,
    pub frequency: Option<String>,
    pub save_s3: Option<bool>,
    pub s3_storage_uuid: Option<String>,
    pub databases_to_backup: Option<String>,
    pub dump_all: Option<bool>,
    pub database_backup_retention_amount_locally: Option<i64>,
    pub database_backup_retention_days_locally: Option<i64>,
    pub database_backup_retention_max_storage_locally: Option<f64>,
    pub database_backup_retention_amount_s3: Option<i64>,
    pub database_backup_retention_days_s3: Option<i64>,
    pub database_backup_retention_max_storage_s3: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub uuid: Option<String>,
    pub id: Option<i64>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub key: String,
    pub value: Option<String>,
    pub is_build_time: Option<bool>,
    pub is_preview: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Volume mounted into an application container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentStorage {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub name: String,
    pub mount_path: String,
    pub host_path: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
