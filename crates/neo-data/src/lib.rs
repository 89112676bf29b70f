//! Backend access for the NEO dashboard: configuration, HTTP source,
//! query cache and the deduplicating query client

pub mod cache;
pub mod client;
pub mod config;
pub mod connectivity;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_support;

use serde_json::Value;
use thiserror::Error;

// Re-exports
pub use cache::{CacheEntry, QueryCache, DEFAULT_CACHE_TTL};
pub use client::{FetchResult, QueryClient, QuerySnapshot, RequestOutcome};
pub use config::{ApiConfig, ConfigError};
pub use connectivity::ConnectivityMonitor;
pub use sources::{HttpNeoSource, NeoSource};

/// Body of a non-2xx response, parsed as JSON when possible
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Empty,
    Text(String),
    Json(Value),
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ErrorBody::Empty;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Null) => ErrorBody::Empty,
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(raw.to_string()),
        }
    }
}

/// Errors that can occur while fetching NEO data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Request failed with status {status}")]
    Http { status: u16, body: ErrorBody },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Request was cancelled")]
    Cancelled,
}

impl FetchError {
    /// Build an error from a non-2xx status and its raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        FetchError::Http {
            status,
            body: ErrorBody::parse(body),
        }
    }

    /// Whether the backend could not be reached at all
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }

    /// Text shown in the error banner.
    ///
    /// Precedence: a plain string body, then the `message` field of a
    /// structured body, then the status line, then the error's own message.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http { status, body } => match body {
                ErrorBody::Text(text) => text.clone(),
                ErrorBody::Json(Value::String(text)) => text.clone(),
                ErrorBody::Json(Value::Object(map)) if map.contains_key("message") => {
                    match &map["message"] {
                        Value::String(message) => message.clone(),
                        other => other.to_string(),
                    }
                }
                _ => format!("Request failed with status {}", status),
            },
            FetchError::Transport(message) | FetchError::Decode(message) if !message.is_empty() => {
                self.to_string()
            }
            FetchError::Cancelled => self.to_string(),
            _ => "Unknown error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_wins_for_structured_body() {
        let error = FetchError::from_response(500, r#"{ "message": "rate limited" }"#);
        assert_eq!(error.user_message(), "rate limited");
    }

    #[test]
    fn test_string_body_is_used_verbatim() {
        let error = FetchError::from_response(502, "Bad gateway upstream");
        assert_eq!(error.user_message(), "Bad gateway upstream");

        let error = FetchError::from_response(400, r#""startDate is invalid""#);
        assert_eq!(error.user_message(), "startDate is invalid");
    }

    #[test]
    fn test_non_string_message_is_stringified() {
        let error = FetchError::from_response(429, r#"{ "message": 42 }"#);
        assert_eq!(error.user_message(), "42");
    }

    #[test]
    fn test_status_fallback() {
        assert_eq!(
            FetchError::from_response(404, "").user_message(),
            "Request failed with status 404"
        );
        assert_eq!(
            FetchError::from_response(500, r#"{ "error": "boom" }"#).user_message(),
            "Request failed with status 500"
        );
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(FetchError::Transport(String::new()).user_message(), "Unknown error");
        assert_eq!(
            FetchError::Transport("connection refused".into()).user_message(),
            "Transport error: connection refused"
        );
    }
}
