//! GraphQL transport to the Pipefy API.
//!
//! Both operations send the document with variables, so quotes and line
//! breaks typed by visitors never reach the query text.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tokyon_shared::{PipefyCredentials, Result, TokyonError};
use tracing::{debug, instrument};

use crate::error::SubmissionError;
use crate::types::{FieldMapping, RecordCreationRequest, RecordId, RemoteFieldDescriptor};

/// User-Agent string for outbound calls.
const USER_AGENT: &str = concat!("Tokyon/", env!("CARGO_PKG_VERSION"));

const START_FORM_QUERY: &str = r#"
query StartFormFields($pipe_id: ID!) {
  pipe(id: $pipe_id) {
    start_form_fields {
      id
      label
      type
    }
  }
}
"#;

const CREATE_CARD_MUTATION: &str = r#"
mutation CreateCard($pipe_id: ID!, $title: String!, $fields: [FieldValueInput]) {
  createCard(input: { pipe_id: $pipe_id, title: $title, fields_attributes: $fields }) {
    card {
      id
      title
    }
  }
}
"#;

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct PipeData {
    pipe: Option<PipeFields>,
}

#[derive(Debug, Deserialize)]
struct PipeFields {
    #[serde(default)]
    start_form_fields: Vec<RemoteFieldDescriptor>,
}

#[derive(Debug, Deserialize)]
struct CreateCardData {
    #[serde(rename = "createCard")]
    create_card: Option<CreateCardPayload>,
}

#[derive(Debug, Deserialize)]
struct CreateCardPayload {
    card: Option<Card>,
}

#[derive(Debug, Deserialize)]
struct Card {
    id: RemoteId,
}

/// Pipefy returns ids as strings, but be lenient about numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteId {
    Text(String),
    Number(i64),
}

impl From<RemoteId> for RecordId {
    fn from(id: RemoteId) -> Self {
        match id {
            RemoteId::Text(s) => RecordId(s),
            RemoteId::Number(n) => RecordId(n.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Build a reqwest client with appropriate settings.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| TokyonError::Network(format!("failed to build HTTP client: {e}")))
}

/// One authenticated conversation with the Pipefy API.
pub(crate) struct PipefyClient<'a> {
    http: &'a Client,
    endpoint: &'a str,
    credentials: &'a PipefyCredentials,
}

impl<'a> PipefyClient<'a> {
    pub(crate) fn new(http: &'a Client, endpoint: &'a str, credentials: &'a PipefyCredentials) -> Self {
        Self {
            http,
            endpoint,
            credentials,
        }
    }

    /// Ask the pipe for its current start-form fields.
    #[instrument(skip_all, fields(pipe_id = %self.credentials.pipe_id))]
    pub(crate) async fn discover_fields(&self) -> Result<Vec<RemoteFieldDescriptor>> {
        let variables = json!({ "pipe_id": self.credentials.pipe_id });
        let body = self.post(START_FORM_QUERY, variables).await?;

        let response: GraphqlResponse<PipeData> = serde_json::from_value(body)
            .map_err(|e| TokyonError::parse(format!("unexpected discovery response: {e}")))?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            return Err(TokyonError::parse(format!(
                "discovery returned errors: {}",
                first_error_message(&errors)
            )));
        }

        let fields = response
            .data
            .and_then(|d| d.pipe)
            .map(|p| p.start_form_fields)
            .ok_or_else(|| TokyonError::parse("discovery response carried no pipe"))?;

        debug!(?fields, "discovered start form fields");
        Ok(fields)
    }

    /// Create one card. Never retried: a retry could duplicate the card.
    #[instrument(skip_all, fields(pipe_id = %self.credentials.pipe_id, fields = request.fields.len()))]
    pub(crate) async fn create_card(
        &self,
        request: &RecordCreationRequest,
    ) -> std::result::Result<RecordId, SubmissionError> {
        let variables = json!({
            "pipe_id": self.credentials.pipe_id,
            "title": request.title,
            "fields": fields_attributes(&request.fields),
        });
        debug!(%variables, "creating card");

        let (status, text) = self.send(CREATE_CARD_MUTATION, variables).await?;

        // Pipefy reports auth and validation failures as GraphQL errors, sometimes
        // alongside a non-2xx status. Those carry the remote's own message.
        let body: Option<Value> = serde_json::from_str(&text).ok();
        if let Some(errors) = body.as_ref().and_then(graphql_errors) {
            return Err(SubmissionError::RemoteRejected {
                message: first_error_message(&errors),
                details: Some(Value::Array(errors)),
            });
        }

        if !status.is_success() {
            return Err(SubmissionError::RemoteUnavailable(format!(
                "HTTP {status}: {}",
                truncate(&text, 300)
            )));
        }

        let response: GraphqlResponse<CreateCardData> = body
            .ok_or_else(|| {
                SubmissionError::RemoteUnavailable(format!(
                    "creation response is not JSON: {}",
                    truncate(&text, 300)
                ))
            })
            .and_then(|b| {
                serde_json::from_value(b).map_err(|e| {
                    SubmissionError::RemoteUnavailable(format!("unexpected creation response: {e}"))
                })
            })?;

        response
            .data
            .and_then(|d| d.create_card)
            .and_then(|c| c.card)
            .map(|card| RecordId::from(card.id))
            .ok_or_else(|| {
                SubmissionError::RemoteUnavailable("creation response carried no card".into())
            })
    }

    /// Send one operation and read the raw body, whatever the status.
    async fn send(&self, query: &str, variables: Value) -> Result<(StatusCode, String)> {
        let response = self
            .http
            .post(self.endpoint)
            .bearer_auth(&self.credentials.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| TokyonError::Network(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TokyonError::Network(format!("{}: failed to read body: {e}", self.endpoint)))?;
        Ok((status, text))
    }

    async fn post(&self, query: &str, variables: Value) -> Result<Value> {
        let (status, text) = self.send(query, variables).await?;
        if !status.is_success() {
            return Err(TokyonError::Network(format!(
                "{}: HTTP {status}: {}",
                self.endpoint,
                truncate(&text, 300)
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| TokyonError::parse(format!("{}: invalid JSON body: {e}", self.endpoint)))
    }
}

fn fields_attributes(fields: &[FieldMapping]) -> Value {
    Value::Array(
        fields
            .iter()
            .map(|f| json!({ "field_id": f.field_id, "field_value": f.field_value }))
            .collect(),
    )
}

/// A non-empty GraphQL `errors` array, if the body carries one.
fn graphql_errors(body: &Value) -> Option<Vec<Value>> {
    body.get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
        .cloned()
}

/// The first error's `message`, or a generic placeholder.
fn first_error_message(errors: &[Value]) -> String {
    errors
        .first()
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown Pipefy error")
        .to_string()
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
