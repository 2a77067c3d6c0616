//! HTTP client for the OnCode analysis backend.
//!
//! Endpoints:
//! - `GET /` liveness probe
//! - `GET /conversation/{problem_id}` stored history for a problem
//! - `POST /chat` one chat turn, answers with the updated history
//! - `POST /analyze` review of the current code

use std::time::Duration;

use oncode_core::{ConversationMessage, ProblemData};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClientError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Body of `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub code: &'a str,
    pub message: &'a str,
    pub problem_id: &'a str,
    pub problem_data: &'a ProblemData,
}

/// Body of `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub code: &'a str,
    pub problem_data: &'a ProblemData,
}

#[derive(Debug, Default, Deserialize)]
struct ConversationResponse {
    #[serde(default)]
    conversation_history: Vec<ConversationMessage>,
}

/// Result of `POST /analyze`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// Backend client. Chat and analyze calls carry no request timeout; only
/// connecting is bounded.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    /// `api_key` is ignored when blank.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = Client::builder()
            .user_agent(concat!("oncode/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|source| ClientError::Transport {
                url: base_url.clone(),
                source,
            })?;

        let api_key = Some(api_key.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe: succeeds iff `GET /` answers 2xx.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = self.endpoint("/");
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_body(status.as_u16(), &body))
        }
    }

    /// Stored conversation for a problem, oldest message first.
    pub async fn conversation(
        &self,
        problem_id: &str,
    ) -> Result<Vec<ConversationMessage>, ClientError> {
        let url = self.endpoint(&format!(
            "/conversation/{}",
            urlencoding::encode(problem_id)
        ));
        let response: ConversationResponse =
            self.send_json(self.request(Method::GET, &url), &url).await?;
        Ok(response.conversation_history)
    }

    /// Send one chat message; returns the full updated conversation.
    pub async fn chat(
        &self,
        request: &ChatRequest<'_>,
    ) -> Result<Vec<ConversationMessage>, ClientError> {
        let url = self.endpoint("/chat");
        debug!(
            "Chat for {} ({} chars of code)",
            request.problem_id,
            request.code.len()
        );
        let response: ConversationResponse = self
            .send_json(self.request(Method::POST, &url).json(request), &url)
            .await?;
        Ok(response.conversation_history)
    }

    /// Probe the backend, then analyze. A failed probe means `/analyze` is
    /// never called.
    pub async fn analyze(&self, request: &AnalyzeRequest<'_>) -> Result<Analysis, ClientError> {
        if let Err(e) = self.health().await {
            warn!("Backend probe failed: {}", e);
            return Err(ClientError::Unreachable {
                url: self.base_url.clone(),
            });
        }

        let url = self.endpoint("/analyze");
        self.send_json(self.request(Method::POST, &url).json(request), &url)
            .await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        url: &str,
    ) -> Result<T, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &body));
        }

        response.json().await.map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
