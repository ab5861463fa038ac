//! Lead delivery into a Pipefy pipe.
//!
//! Each submission discovers the pipe's current start-form schema, maps the
//! lead's company/email/phone/description onto fields it can safely write
//! free text into, and creates exactly one card titled after the company.
//! Discovery is best-effort: if it fails the card is still created with the
//! title alone.

mod error;
mod matcher;
mod pipefy;
mod types;

use std::time::Duration;

use reqwest::Client;
use tokyon_shared::{PipefyConfig, PipefyCredentials, Result};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

pub use error::{ErrorKind, SubmissionError};
pub use matcher::{Slot, compose_description, map_fields, plan_record};
pub use types::{
    FieldMapping, FieldType, LeadSubmission, RecordCreationRequest, RecordId,
    RemoteFieldDescriptor,
};

use pipefy::PipefyClient;

/// Delivers leads to one configured pipe.
///
/// Holds no per-submission state; share it freely across requests.
#[derive(Debug, Clone)]
pub struct LeadAdapter {
    http: Client,
    endpoint: String,
    credentials: Option<PipefyCredentials>,
}

impl LeadAdapter {
    /// Build an adapter. `credentials: None` makes every submission fail
    /// with [`SubmissionError::Misconfigured`] before any network call.
    pub fn new(
        endpoint: impl Into<String>,
        credentials: Option<PipefyCredentials>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            http: pipefy::build_client(timeout)?,
            endpoint: endpoint.into(),
            credentials,
        })
    }

    /// Build an adapter from config, resolving credentials from the environment.
    pub fn from_config(config: &PipefyConfig) -> Result<Self> {
        Self::new(
            config.endpoint.as_str(),
            PipefyCredentials::from_env(config),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Whether credentials were resolved.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Turn a lead into a card and return the card id.
    pub async fn submit(
        &self,
        lead: &LeadSubmission,
    ) -> std::result::Result<RecordId, SubmissionError> {
        let span = info_span!("submit_lead", submission_id = %Uuid::now_v7());
        self.submit_inner(lead).instrument(span).await
    }

    async fn submit_inner(
        &self,
        lead: &LeadSubmission,
    ) -> std::result::Result<RecordId, SubmissionError> {
        lead.validate()?;

        let credentials = self.credentials.as_ref().ok_or_else(|| {
            SubmissionError::misconfigured("Pipefy token or pipe id is not set")
        })?;

        let client = PipefyClient::new(&self.http, &self.endpoint, credentials);

        let fields = match client.discover_fields().await {
            Ok(fields) => fields,
            Err(e) => {
                warn!(error = %e, "schema discovery failed, continuing without field mapping");
                Vec::new()
            }
        };

        let request = plan_record(lead, &fields);
        info!(
            discovered = fields.len(),
            mapped = request.fields.len(),
            "lead mapped onto pipe schema"
        );
        if request.fields.iter().any(|f| f.field_value == request.description) {
            debug!(description = %request.description, "combined lead description");
        } else {
            // Title-only or partial card: the log is the only place phone and
            // challenge survive.
            info!(
                description = %request.description,
                "no description field on pipe, lead details not stored on card"
            );
        }

        match client.create_card(&request).await {
            Ok(id) => {
                info!(card_id = %id, "card created");
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "card creation failed");
                Err(e)
            }
        }
    }
}
