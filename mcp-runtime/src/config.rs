use thiserror::Error;

use crate::client::CoolifyConfig;

pub const API_URL_ENV: &str = "COOLIFY_API_URL";
pub const API_TOKEN_ENV: &str = "COOLIFY_API_TOKEN";

pub const USAGE: &str = "\
Usage: coolify-mcp --url <COOLIFY_URL> --token <API_TOKEN>
   or: coolify-mcp <COOLIFY_URL> <API_TOKEN>
   or: set COOLIFY_API_URL and COOLIFY_API_TOKEN (a .env file is honored)";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Coolify API URL is required")]
    MissingUrl,
    #[error("Coolify API token is required")]
    MissingToken,
}

/// Raw configuration inputs as they arrive from the command line.
///
/// Resolution order per value: named flag, then positional argument, then
/// environment. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub url_flag: Option<String>,
    pub token_flag: Option<String>,
    pub url_positional: Option<String>,
    pub token_positional: Option<String>,
}

impl ConfigSources {
    pub fn resolve(
        self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<CoolifyConfig, ConfigError> {
        let api_url = first_present([self.url_flag, self.url_positional, env(API_URL_ENV)])
            .ok_or(ConfigError::MissingUrl)?;
        let api_token =
            first_present([self.token_flag, self.token_positional, env(API_TOKEN_ENV)])
                .ok_or(ConfigError::MissingToken)?;
        Ok(CoolifyConfig { api_url, api_token })
    }
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn full_env(key: &str) -> Option<String> {
        match key {
            API_URL_ENV => Some("http://env.example.com".to_string()),
            API_TOKEN_ENV => Some("env-token".to_string()),
            _ => None,
        }
    }

    #[test]
    fn flags_win_over_positionals_and_env() {
        let sources = ConfigSources {
            url_flag: Some("http://flag.example.com".to_string()),
            token_flag: Some("flag-token".to_string()),
            url_positional: Some("http://positional.example.com".to_string()),
            token_positional: Some("positional-token".to_string()),
        };
        let config = sources.resolve(full_env).unwrap();
        assert_eq!(config.api_url, "http://flag.example.com");
        assert_eq!(config.api_token, "flag-token");
    }

    #[test]
    fn positionals_win_over_env() {
        let sources = ConfigSources {
            url_positional: Some("http://positional.example.com".to_string()),
            ..ConfigSources::default()
        };
        let config = sources.resolve(full_env).unwrap();
        assert_eq!(config.api_url, "http://positional.example.com");
        assert_eq!(config.api_token, "env-token");
    }

    #[test]
    fn env_alone_is_enough() {
        let config = ConfigSources::default().resolve(full_env).unwrap();
        assert_eq!(
            config,
            CoolifyConfig {
                api_url: "http://env.example.com".to_string(),
                api_token: "env-token".to_string(),
            }
        );
    }

    #[test]
    fn missing_values_are_reported() {
        assert_eq!(
            ConfigSources::default().resolve(no_env).unwrap_err(),
            ConfigError::MissingUrl
        );

        let sources = ConfigSources {
            url_flag: Some("http://flag.example.com".to_string()),
            token_flag: Some("   ".to_string()),
            ..ConfigSources::default()
        };
        assert_eq!(sources.resolve(no_env).unwrap_err(), ConfigError::MissingToken);
    }
}
