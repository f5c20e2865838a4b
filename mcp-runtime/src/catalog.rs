//! The static tool catalog advertised through `tools/list`.
//!
//! Pure data: one `ToolDefinition` per operation, in the order hosts see them.
//! The JSON input schema is rendered from the parameter records on demand.

use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Boolean,
    Number,
}

impl ParamType {
    fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
            ParamType::Number => "number",
        }
    }
}

/// One field of a tool's input schema.
#[derive(Debug)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamType,
    pub description: &'static str,
    pub required: bool,
    /// Allowed values for enum-typed string fields; empty otherwise.
    pub allowed: &'static [&'static str],
}

#[derive(Debug)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [Param],
}

impl ToolDefinition {
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.params {
            let mut property = json!({
                "type": param.kind.as_str(),
                "description": param.description,
            });
            if !param.allowed.is_empty() {
                property["enum"] = json!(param.allowed);
            }
            properties.insert(param.name.to_string(), property);
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_params().collect::<Vec<_>>(),
        })
    }

    pub fn required_params(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params
            .iter()
            .filter(|param| param.required)
            .map(|param| param.name)
    }

    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

pub fn tool_definitions() -> &'static [ToolDefinition] {
    TOOL_CATALOG
}

pub fn find_tool(name: &str) -> Option<&'static ToolDefinition> {
    TOOL_CATALOG.iter().find(|tool| tool.name == name)
}

const fn required(name: &'static str, kind: ParamType, description: &'static str) -> Param {
    Param {
        name,
        kind,
        description,
        required: true,
        allowed: &[],
    }
}

const fn optional(name: &'static str, kind: ParamType, description: &'static str) -> Param {
    Param {
        name,
        kind,
        description,
        required: false,
        allowed: &[],
    }
}

const fn choice(
    name: &'static str,
    allowed: &'static [&'static str],
    description: &'static str,
) -> Param {
    Param {
        name,
        kind: ParamType::String,
        description,
        required: false,
        allowed,
    }
}

static TOOL_CATALOG: &[ToolDefinition] = &[
    ToolDefinition {
        name: "healthcheck",
        description: "Check if Coolify API is healthy and accessible",
        params: &[],
    },
    ToolDefinition {
        name: "list_teams",
        description: "List all teams you have access to",
        params: &[],
    },
    ToolDefinition {
        name: "get_current_team",
        description: "Get the current team information",
        params: &[],
    },
    ToolDefinition {
        name: "list_projects",
        description: "List all projects in Coolify",
        params: &[],
    },
    ToolDefinition {
        name: "get_project",
        description: "Get detailed information about a specific project",
        params: &[
            required("uuid", ParamType::String, "The UUID of the project"),
        ],
    },
    ToolDefinition {
        name: "create_project",
        description: "Create a new project in Coolify",
        params: &[
            required("name", ParamType::String, "The name of the project"),
            optional("description", ParamType::String, "The description of the project"),
        ],
    },
    ToolDefinition {
        name: "update_project",
        description: "Update an existing project",
        params: &[
            required("uuid", ParamType::String, "The UUID of the project"),
            optional("name", ParamType::String, "The new name of the project"),
            optional("description", ParamType::String, "The new description of the project"),
        ],
    },
    ToolDefinition {
        name: "delete_project",
        description: "Delete a project",
        params: &[
            required("uuid", ParamType::String, "The UUID of the project to delete"),
        ],
    },
    ToolDefinition {
        name: "list_servers",
        description: "List all servers connected to Coolify",
        params: &[],
    },
    ToolDefinition {
        name: "get_server",
        description: "Get detailed information about a specific server",
        params: &[
            required("uuid", ParamType::String, "The UUID of the server"),
        ],
    },
    ToolDefinition {
        name: "get_server_resources",
        description: "Get resources (applications, databases, services) running on a server",
        params: &[
            required("uuid", ParamType::String, "The UUID of the server"),
        ],
    },
    ToolDefinition {
        name: "get_server_domains",
        description: "Get all domains configured on a server",
        params: &[
            required("uuid", ParamType::String, "The UUID of the server"),
        ],
    },
    ToolDefinition {
        name: "list_applications",
        description: "List all applications deployed in Coolify",
        params: &[],
    },
    ToolDefinition {
        name: "get_application",
        description: "Get detailed information about a specific application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
        ],
    },
    ToolDefinition {
        name: "update_application",
        description: "Update application settings including general, build, network, healthcheck, resource limits, and webhooks",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
            optional("name", ParamType::String, "Application name"),
            optional("description", ParamType::String, "Application description"),
            optional("domains", ParamType::String, "Comma-separated list of domains (FQDN)"),
            choice(
                "build_pack",
                &["nixpacks", "static", "dockerfile", "dockercompose"],
                "Build pack type",
            ),
            optional("base_directory", ParamType::String, "Base directory for all commands"),
            optional("publish_directory", ParamType::String, "Publish directory"),
            optional("dockerfile_location", ParamType::String, "Dockerfile location"),
            optional("watch_paths", ParamType::String, "Watch paths for auto-deploy"),
            optional("install_command", ParamType::String, "Install command"),
            optional("build_command", ParamType::String, "Build command"),
            optional("start_command", ParamType::String, "Start command"),
            optional("pre_deployment_command", ParamType::String, "Pre-deployment command"),
            optional("post_deployment_command", ParamType::String, "Post-deployment command"),
            optional("ports_exposes", ParamType::String, "Ports to expose (e.g., \"3000,8080\")"),
            optional("ports_mappings", ParamType::String, "Port mappings (e.g., \"3000:3000\")"),
            choice("redirect", &["www", "non-www", "both"], "Redirect setting for www/non-www"),
            optional("git_repository", ParamType::String, "Git repository URL"),
            optional("git_branch", ParamType::String, "Git branch"),
            optional("git_commit_sha", ParamType::String, "Specific git commit SHA"),
            optional("is_static", ParamType::Boolean, "Is this a static site"),
            optional("is_spa", ParamType::Boolean, "Is this a single-page application"),
            optional(
                "is_auto_deploy_enabled",
                ParamType::Boolean,
                "Enable auto-deploy on git push",
            ),
            optional("is_force_https_enabled", ParamType::Boolean, "Force HTTPS"),
            optional("use_build_server", ParamType::Boolean, "Use build server"),
            optional(
                "is_http_basic_auth_enabled",
                ParamType::Boolean,
                "Enable HTTP Basic Authentication",
            ),
            optional("http_basic_auth_username", ParamType::String, "HTTP Basic Auth username"),
            optional("http_basic_auth_password", ParamType::String, "HTTP Basic Auth password"),
            optional("health_check_enabled", ParamType::Boolean, "Enable health check"),
            optional("health_check_path", ParamType::String, "Health check path"),
            optional("health_check_port", ParamType::String, "Health check port"),
            optional(
                "health_check_interval",
                ParamType::Number,
                "Health check interval in seconds",
            ),
            optional("health_check_timeout", ParamType::Number, "Health check timeout in seconds"),
            optional("health_check_retries", ParamType::Number, "Health check retries count"),
            optional(
                "health_check_start_period",
                ParamType::Number,
                "Health check start period in seconds",
            ),
            optional("limits_memory", ParamType::String, "Memory limit (e.g., \"512M\", \"1G\")"),
            optional("limits_memory_swap", ParamType::String, "Memory swap limit"),
            optional("limits_memory_reservation", ParamType::String, "Memory reservation"),
            optional("limits_cpus", ParamType::String, "CPU limit (e.g., \"0.5\", \"2\")"),
            optional("limits_cpu_shares", ParamType::Number, "CPU shares"),
            optional("manual_webhook_secret_github", ParamType::String, "GitHub webhook secret"),
            optional("manual_webhook_secret_gitlab", ParamType::String, "GitLab webhook secret"),
            optional(
                "manual_webhook_secret_bitbucket",
                ParamType::String,
                "Bitbucket webhook secret",
            ),
            optional("manual_webhook_secret_gitea", ParamType::String, "Gitea webhook secret"),
            optional("custom_labels", ParamType::String, "Custom Docker labels"),
            optional("custom_docker_run_options", ParamType::String, "Custom docker run options"),
            optional("instant_deploy", ParamType::Boolean, "Deploy immediately after update"),
            optional(
                "connect_to_docker_network",
                ParamType::Boolean,
                "Connect to predefined Docker network",
            ),
        ],
    },
    ToolDefinition {
        name: "delete_application",
        description: "Delete an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application to delete"),
        ],
    },
    ToolDefinition {
        name: "start_application",
        description: "Start an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application to start"),
        ],
    },
    ToolDefinition {
        name: "stop_application",
        description: "Stop an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application to stop"),
        ],
    },
    ToolDefinition {
        name: "restart_application",
        description: "Restart an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application to restart"),
        ],
    },
    ToolDefinition {
        name: "deploy_application",
        description: "Deploy/redeploy an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application to deploy"),
            optional("force", ParamType::Boolean, "Force rebuild without cache"),
        ],
    },
    ToolDefinition {
        name: "get_application_logs",
        description: "Get logs from an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
            optional("lines", ParamType::Number, "Number of log lines to retrieve (default: 100)"),
        ],
    },
    ToolDefinition {
        name: "list_application_envs",
        description: "List environment variables for an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
        ],
    },
    ToolDefinition {
        name: "create_application_env",
        description: "Create a new environment variable for an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
            required("key", ParamType::String, "Environment variable key (name)"),
            required("value", ParamType::String, "Environment variable value"),
            optional("is_build_time", ParamType::Boolean, "Whether this is a build-time variable"),
            optional("is_preview", ParamType::Boolean, "Whether this is for preview deployments"),
        ],
    },
    ToolDefinition {
        name: "update_application_env",
        description: "Update an existing environment variable for an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
            required("key", ParamType::String, "Environment variable key (name)"),
            required("value", ParamType::String, "New value for the environment variable"),
            optional("is_build_time", ParamType::Boolean, "Whether this is a build-time variable"),
            optional("is_preview", ParamType::Boolean, "Whether this is for preview deployments"),
        ],
    },
    ToolDefinition {
        name: "delete_application_env",
        description: "Delete an environment variable from an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
            required(
                "env_uuid",
                ParamType::String,
                "The UUID of the environment variable to delete",
            ),
        ],
    },
    ToolDefinition {
        name: "list_application_storages",
        description: "List persistent storage volumes for an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
        ],
    },
    ToolDefinition {
        name: "create_application_storage",
        description: "Create a persistent storage volume for an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
            required("name", ParamType::String, "Name of the storage volume"),
            required(
                "mount_path",
                ParamType::String,
                "Mount path inside the container (e.g., \"/data\")",
            ),
            optional("host_path", ParamType::String, "Optional host path for the volume"),
        ],
    },
    ToolDefinition {
        name: "delete_application_storage",
        description: "Delete a persistent storage volume from an application",
        params: &[
            required("uuid", ParamType::String, "The UUID of the application"),
            required("storage_uuid", ParamType::String, "The UUID of the storage volume to delete"),
        ],
    },
    ToolDefinition {
        name: "list_services",
        description: "List all services (Docker Compose based) in Coolify",
        params: &[],
    },
    ToolDefinition {
        name: "get_service",
        description: "Get detailed information about a specific service",
        params: &[
            required("uuid", ParamType::String, "The UUID of the service"),
        ],
    },
    ToolDefinition {
        name: "update_service",
        description: "Update service settings",
        params: &[
            required("uuid", ParamType::String, "The UUID of the service"),
            optional("name", ParamType::String, "Service name"),
            optional("description", ParamType::String, "Service description"),
            optional("docker_compose_raw", ParamType::String, "Docker Compose YAML content"),
            optional("instant_deploy", ParamType::Boolean, "Deploy immediately after update"),
        ],
    },
    ToolDefinition {
        name: "delete_service",
        description: "Delete a service",
        params: &[
            required("uuid", ParamType::String, "The UUID of the service to delete"),
        ],
    },
    ToolDefinition {
        name: "start_service",
        description: "Start a service",
        params: &[
            required("uuid", ParamType::String, "The UUID of the service to start"),
        ],
    },
    ToolDefinition {
        name: "stop_service",
        description: "Stop a service",
        params: &[
            required("uuid", ParamType::String, "The UUID of the service to stop"),
        ],
    },
    ToolDefinition {
        name: "restart_service",
        description: "Restart a service",
        params: &[
            required("uuid", ParamType::String, "The UUID of the service to restart"),
        ],
    },
    ToolDefinition {
        name: "list_service_envs",
        description: "List environment variables for a service",
        params: &[
            required("uuid", ParamType::String, "The UUID of the service"),
        ],
    },
    ToolDefinition {
        name: "update_service_env",
        description: "Update an environment variable for a service",
        params: &[
            required("uuid", ParamType::String, "The UUID of the service"),
            required("key", ParamType::String, "Environment variable key (name)"),
            required("value", ParamType::String, "Environment variable value"),
        ],
    },
    ToolDefinition {
        name: "list_databases",
        description: "List all databases in Coolify",
        params: &[],
    },
    ToolDefinition {
        name: "get_database",
        description: "Get detailed information about a specific database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database"),
        ],
    },
    ToolDefinition {
        name: "update_database",
        description: "Update database settings including resource limits",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database"),
            optional("name", ParamType::String, "Database name"),
            optional("description", ParamType::String, "Database description"),
            optional("image", ParamType::String, "Docker image for the database"),
            optional("is_public", ParamType::Boolean, "Make database publicly accessible"),
            optional("public_port", ParamType::Number, "Public port number"),
            optional("limits_memory", ParamType::String, "Memory limit (e.g., \"512M\", \"1G\")"),
            optional("limits_memory_swap", ParamType::String, "Memory swap limit"),
            optional("limits_memory_reservation", ParamType::String, "Memory reservation"),
            optional("limits_cpus", ParamType::String, "CPU limit"),
            optional("limits_cpu_shares", ParamType::Number, "CPU shares"),
        ],
    },
    ToolDefinition {
        name: "delete_database",
        description: "Delete a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database to delete"),
        ],
    },
    ToolDefinition {
        name: "start_database",
        description: "Start a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database to start"),
        ],
    },
    ToolDefinition {
        name: "stop_database",
        description: "Stop a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database to stop"),
        ],
    },
    ToolDefinition {
        name: "restart_database",
        description: "Restart a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database to restart"),
        ],
    },
    ToolDefinition {
        name: "list_database_backups",
        description: "List backup configurations for a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database"),
        ],
    },
    ToolDefinition {
        name: "create_database_backup",
        description: "Create a new backup configuration for a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database"),
            optional("enabled", ParamType::Boolean, "Enable the backup"),
            optional("frequency", ParamType::String, "Backup frequency (cron expression)"),
            optional("save_s3", ParamType::Boolean, "Save backup to S3"),
            optional("s3_storage_uuid", ParamType::String, "S3 storage configuration UUID"),
            optional(
                "databases_to_backup",
                ParamType::String,
                "Comma-separated list of databases to backup",
            ),
            optional("dump_all", ParamType::Boolean, "Dump all databases"),
        ],
    },
    ToolDefinition {
        name: "update_database_backup",
        description: "Update a backup configuration for a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database"),
            required("backup_uuid", ParamType::String, "The UUID of the backup configuration"),
            optional("enabled", ParamType::Boolean, "Enable the backup"),
            optional("frequency", ParamType::String, "Backup frequency (cron expression)"),
            optional("save_s3", ParamType::Boolean, "Save backup to S3"),
            optional("s3_storage_uuid", ParamType::String, "S3 storage configuration UUID"),
            optional(
                "databases_to_backup",
                ParamType::String,
                "Comma-separated list of databases to backup",
            ),
            optional("dump_all", ParamType::Boolean, "Dump all databases"),
            optional(
                "database_backup_retention_amount_locally",
                ParamType::Number,
                "Number of backups to retain locally",
            ),
            optional(
                "database_backup_retention_days_locally",
                ParamType::Number,
                "Days to retain backups locally",
            ),
            optional(
                "database_backup_retention_amount_s3",
                ParamType::Number,
                "Number of backups to retain in S3",
            ),
            optional(
                "database_backup_retention_days_s3",
                ParamType::Number,
                "Days to retain backups in S3",
            ),
        ],
    },
    ToolDefinition {
        name: "delete_database_backup",
        description: "Delete a backup configuration from a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database"),
            required(
                "backup_uuid",
                ParamType::String,
                "The UUID of the backup configuration to delete",
            ),
        ],
    },
    ToolDefinition {
        name: "trigger_database_backup",
        description: "Trigger an immediate backup for a database",
        params: &[
            required("uuid", ParamType::String, "The UUID of the database"),
            required("backup_uuid", ParamType::String, "The UUID of the backup configuration"),
        ],
    },
    ToolDefinition {
        name: "list_deployments",
        description: "List all deployments (recent deployment history)",
        params: &[],
    },
    ToolDefinition {
        name: "get_deployment",
        description: "Get detailed information about a specific deployment",
        params: &[
            required("uuid", ParamType::String, "The UUID of the deployment"),
        ],
    },
];
