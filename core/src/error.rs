use serde_json::Value;
use thiserror::Error;

/// Failure of a single Coolify API call.
///
/// Every client method funnels its failures into this type, so the text an
/// agent sees for a failed call is always shaped the same way:
/// `Coolify API Error (<status>): <message>`.
#[derive(Debug, Error)]
pub enum CoolifyError {
    /// The HTTP exchange failed: either the server answered with an error
    /// status, or no response was obtained (connect failure, timeout, broken
    /// body). `status` is `None` in the latter case.
    #[error("Coolify API Error ({}): {message}", status_label(.status))]
    Api {
        status: Option<u16>,
        message: String,
    },
    /// The configured base URL cannot be turned into a request URL.
    #[error("Invalid Coolify API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// A body read through `ApiResponse::decode` did not match its shape.
    #[error("Unexpected response from Coolify API: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CoolifyError {
    /// Normalize an HTTP error status and its decoded body.
    ///
    /// Prefers the `message` field of a JSON error body and falls back to the
    /// generic status text.
    pub fn from_status(status: u16, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        CoolifyError::Api {
            status: Some(status),
            message,
        }
    }

    /// Normalize a failure that happened before any response was obtained.
    pub fn transport(message: impl Into<String>) -> Self {
        CoolifyError::Api {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoolifyError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no response".to_string(),
    }
}
