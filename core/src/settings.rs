//! Request bodies for create/update calls.
//!
//! Every field is optional and omitted from the JSON body when unset, so a
//! PATCH only touches what the caller supplied. The structs double as the
//! allow-list of what a tool forwards from its argument bag: deserializing an
//! argument bag into one of them picks up the declared fields and drops
//! everything else, identifiers included.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildPack {
    Nixpacks,
    Static,
    Dockerfile,
    Dockercompose,
}

/// www / non-www redirect behaviour for an application's domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Redirect {
    Www,
    NonWww,
    Both,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// General, build, network, health check, resource limit and webhook
/// settings of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_pack: Option<BuildPack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile_target_build: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_custom_start_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_custom_build_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_paths: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_docker_run_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_deployment_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_deployment_command_container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_deployment_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_deployment_command_container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports_exposes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports_mappings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_registry_image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_registry_image_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_spa: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_auto_deploy_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_force_https_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_build_server: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_http_basic_auth_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_basic_auth_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_basic_auth_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_return_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_response_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_retries: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_start_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_swap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_swappiness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_reservation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpuset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpu_shares: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_webhook_secret_github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_webhook_secret_gitlab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_webhook_secret_bitbucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_webhook_secret_gitea: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_deploy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_domain_override: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_to_docker_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_container_label_escape_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_deploy: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_swap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_swappiness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_reservation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpuset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpu_shares: Option<i64>,
}

/// Backup schedule and retention settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseBackupSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_s3: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_storage_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub databases_to_backup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_backup_retention_amount_locally: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_backup_retention_days_locally: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_backup_retention_max_storage_locally: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_backup_retention_amount_s3: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_backup_retention_days_s3: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_backup_retention_max_storage_s3: Option<f64>,
}

/// Body of an environment variable create/update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariableInput {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_build_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_preview: Option<bool>,
}

impl EnvironmentVariableInput {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_build_time: None,
            is_preview: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentStorageInput {
    pub name: String,
    pub mount_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_fields_are_not_serialized() {
        let settings = ApplicationSettings {
            name: Some("web".to_string()),
            is_spa: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({ "name": "web", "is_spa": false })
        );
        assert_eq!(
            serde_json::to_value(ServiceSettings::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn argument_bag_decodes_only_declared_fields() {
        let settings: DatabaseBackupSettings = serde_json::from_value(json!({
            "uuid": "db-1",
            "backup_uuid": "bk-1",
            "frequency": "0 3 * * *",
            "enabled": true,
            "database_backup_retention_days_s3": 14,
            "dump_all": null,
            "unrelated": "ignored"
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({
                "enabled": true,
                "frequency": "0 3 * * *",
                "database_backup_retention_days_s3": 14
            })
        );
    }

    #[test]
    fn enum_settings_use_wire_spelling() {
        let settings: ApplicationSettings = serde_json::from_value(json!({
            "build_pack": "dockercompose",
            "redirect": "non-www"
        }))
        .unwrap();
        assert_eq!(settings.build_pack, Some(BuildPack::Dockercompose));
        assert_eq!(settings.redirect, Some(Redirect::NonWww));

        let err = serde_json::from_value::<ApplicationSettings>(json!({ "redirect": "apex" }));
        assert!(err.is_err());
    }

    #[test]
    fn env_input_omits_unset_flags() {
        let mut env = EnvironmentVariableInput::new("API_KEY", "secret");
        env.is_preview = Some(true);
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "key": "API_KEY", "value": "secret", "is_preview": true })
        );
    }
}
