//! Errors raised while talking to the network.

use thiserror::Error;

/// Failures of the analysis backend and of page downloads.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The liveness probe failed, so the real request was never sent.
    #[error("Backend at {url} is unreachable. Make sure the OnCode server is running.")]
    Unreachable { url: String },

    /// The server answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Build an [`ClientError::Http`] from a response body, preferring the
    /// backend's `{"error": "..."}` message when there is one.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("detail"))
                    .and_then(|e| e.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                let body = body.trim();
                if body.is_empty() {
                    "Request failed".to_string()
                } else {
                    body.to_string()
                }
            });
        Self::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message_is_surfaced() {
        let err = ClientError::from_body(500, r#"{"error": "model overloaded"}"#);
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "model overloaded (HTTP 500)");
    }

    #[test]
    fn test_plain_body() {
        let err = ClientError::from_body(404, "Not Found\n");
        assert_eq!(err.to_string(), "Not Found (HTTP 404)");

        let err = ClientError::from_body(502, "");
        assert_eq!(err.to_string(), "Request failed (HTTP 502)");
    }

    #[test]
    fn test_unreachable_message() {
        let err = ClientError::Unreachable {
            url: "http://127.0.0.1:8000".to_string(),
        };
        assert!(err.to_string().contains("unreachable"));
        assert_eq!(err.status(), None);
    }
}
