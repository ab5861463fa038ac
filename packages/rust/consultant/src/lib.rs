//! On-page strategy consultant backed by a hosted generative model.
//!
//! The conversation lives in a [`ChatSession`] owned by the caller; the
//! client itself is stateless and cheap to share. Failures never reach the
//! visitor as errors, only as an apology in the reply text.

mod catalog;
mod session;

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tokyon_shared::{ConsultantConfig, Result, TokyonError};
use tracing::{debug, instrument, warn};
use url::Url;

pub use catalog::{SERVICES, Service, find_service, system_instruction};
pub use session::{ChatSession, ChatTurn, Role};

/// User-Agent string for model requests.
const USER_AGENT: &str = concat!("Tokyon/", env!("CARGO_PKG_VERSION"));

pub const UNAVAILABLE_REPLY: &str =
    "O sistema de consultoria está indisponível no momento (Configuração de API pendente).";
pub const FAILURE_REPLY: &str = "Ocorreu um erro de comunicação com nosso sistema de consultoria. Por favor, tente novamente.";
pub const EMPTY_REPLY: &str = "Desculpe, não consegui processar sua solicitação no momento.";

/// Why a consultant turn produced no model text.
#[derive(Debug, thiserror::Error)]
pub enum ConsultantError {
    #[error("consultant API key is not configured")]
    NotConfigured,

    #[error("consultant request failed: {0}")]
    Network(String),

    #[error("consultant API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("consultant returned no text")]
    EmptyReply,
}

// ---------------------------------------------------------------------------
// Response envelope (generateContent)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Sends consultant turns to the hosted model.
#[derive(Clone)]
pub struct ConsultantClient {
    http: Client,
    url: Url,
    api_key: Option<String>,
    temperature: f32,
    system_instruction: String,
}

impl ConsultantClient {
    /// Build a client. `api_key: None` yields the "unavailable" reply for every message.
    pub fn new(
        endpoint: &Url,
        api_key: Option<String>,
        model: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TokyonError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: generate_url(endpoint, model)?,
            api_key,
            temperature,
            system_instruction: system_instruction(),
        })
    }

    /// Build a client from config, reading the API key from the environment.
    pub fn from_config(config: &ConsultantConfig) -> Result<Self> {
        if config.api_key().is_none() {
            warn!(var = %config.api_key_env, "consultant API key not set; chat will be unavailable");
        }
        Self::new(
            &config.endpoint,
            config.api_key(),
            &config.model,
            config.temperature,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Send one visitor message and return the text to show them.
    ///
    /// On success the exchange is appended to `session`; on failure the
    /// session is untouched and an apology is returned.
    pub async fn send_message(&self, session: &mut ChatSession, message: &str) -> String {
        match self.try_send(session, message).await {
            Ok(reply) => reply,
            Err(ConsultantError::NotConfigured) => UNAVAILABLE_REPLY.to_string(),
            Err(ConsultantError::EmptyReply) => EMPTY_REPLY.to_string(),
            Err(e) => {
                warn!(error = %e, "consultant turn failed");
                FAILURE_REPLY.to_string()
            }
        }
    }

    /// Like [`send_message`](Self::send_message) but surfaces the failure.
    #[instrument(skip_all, fields(history = session.turns().len()))]
    pub async fn try_send(
        &self,
        session: &mut ChatSession,
        message: &str,
    ) -> std::result::Result<String, ConsultantError> {
        let api_key = self.api_key.as_deref().ok_or(ConsultantError::NotConfigured)?;

        let body = self.request_body(session, message);
        let response = self
            .http
            .post(self.url.clone())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ConsultantError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ConsultantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ConsultantError::Network(format!("invalid response body: {e}")))?;

        let reply = parsed.text();
        if reply.trim().is_empty() {
            return Err(ConsultantError::EmptyReply);
        }

        debug!(reply_len = reply.len(), "consultant replied");
        session.push_exchange(message, &reply);
        Ok(reply)
    }

    fn request_body(&self, session: &ChatSession, message: &str) -> Value {
        let mut contents: Vec<Value> = session
            .turns()
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::User => "user",
                    Role::Model => "model",
                };
                json!({ "role": role, "parts": [{ "text": turn.text }] })
            })
            .collect();
        contents.push(json!({ "role": "user", "parts": [{ "text": message }] }));

        json!({
            "systemInstruction": { "parts": [{ "text": self.system_instruction }] },
            "contents": contents,
            "generationConfig": { "temperature": self.temperature },
        })
    }
}

/// `{endpoint}/v1beta/models/{model}:generateContent`, keeping any base path.
fn generate_url(endpoint: &Url, model: &str) -> Result<Url> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("v1beta/models/{model}:generateContent"))
        .map_err(|e| TokyonError::config(format!("invalid consultant endpoint: {e}")))
}
