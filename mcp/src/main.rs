use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coolify_mcp_runtime::{ConfigSources, USAGE, run};

#[derive(Parser)]
#[command(
    name = "coolify-mcp",
    version,
    about = "Coolify MCP server: Coolify API tools over stdio"
)]
struct Cli {
    /// Coolify instance URL, e.g. https://coolify.example.com
    #[arg(long = "url")]
    url: Option<String>,

    /// Coolify API token
    #[arg(long = "token")]
    token: Option<String>,

    /// Coolify instance URL (positional form)
    #[arg(value_name = "COOLIFY_URL")]
    positional_url: Option<String>,

    /// Coolify API token (positional form)
    #[arg(value_name = "API_TOKEN")]
    positional_token: Option<String>,
}

impl Cli {
    fn into_sources(self) -> ConfigSources {
        ConfigSources {
            url_flag: self.url,
            token_flag: self.token,
            url_positional: self.positional_url,
            token_positional: self.positional_token,
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coolify_mcp=info,coolify_mcp_runtime=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.into_sources().resolve(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}\n\n{USAGE}");
            std::process::exit(1);
        }
    };

    tracing::debug!(api_url = %config.api_url, "configuration resolved");
    let code = run(config).await;
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_flags_parse() {
        let cli = Cli::try_parse_from([
            "coolify-mcp",
            "--url",
            "https://coolify.example.com",
            "--token",
            "abc",
        ])
        .unwrap();
        let sources = cli.into_sources();
        assert_eq!(sources.url_flag.as_deref(), Some("https://coolify.example.com"));
        assert_eq!(sources.token_flag.as_deref(), Some("abc"));
        assert_eq!(sources.url_positional, None);
    }

    #[test]
    fn positional_pair_parses() {
        let cli =
            Cli::try_parse_from(["coolify-mcp", "https://coolify.example.com", "abc"]).unwrap();
        let sources = cli.into_sources();
        assert_eq!(
            sources.url_positional.as_deref(),
            Some("https://coolify.example.com")
        );
        assert_eq!(sources.token_positional.as_deref(), Some("abc"));
    }

    #[test]
    fn no_arguments_is_not_a_parse_error() {
        let cli = Cli::try_parse_from(["coolify-mcp"]).unwrap();
        assert_eq!(cli.into_sources(), ConfigSources::default());
    }
}
