//! Lead and remote-schema types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SubmissionError;

// ---------------------------------------------------------------------------
// LeadSubmission
// ---------------------------------------------------------------------------

/// A lead captured by the contact form.
///
/// Absent keys and JSON `null` both read as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    /// Company name. Required.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    /// Contact e-mail. Required.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Phone / WhatsApp, possibly empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    /// Free-text description of the prospect's challenge, possibly empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub challenge: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl LeadSubmission {
    /// Check the required fields. Whitespace-only counts as missing.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        let mut missing = Vec::new();
        if self.company.trim().is_empty() {
            missing.push("company");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SubmissionError::InvalidInput {
                missing: missing.join(", "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Remote schema
// ---------------------------------------------------------------------------

/// Declared type of a remote form field.
///
/// Only the free-text-compatible variants are ever written to; everything
/// else (selects, connectors, dates, numbers...) lands in [`FieldType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    ShortText,
    LongText,
    Email,
    Phone,
    Text,
    Other(String),
}

impl FieldType {
    /// Whether arbitrary free text can be written into this field.
    pub fn accepts_free_text(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ShortText => "short_text",
            Self::LongText => "long_text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Text => "text",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "short_text" => Self::ShortText,
            "long_text" => Self::LongText,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "text" => Self::Text,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for FieldType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

/// One input slot in the remote pipe's start form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFieldDescriptor {
    /// Opaque identifier in the remote system.
    pub id: String,
    /// Human-readable name, if the remote has one.
    #[serde(default)]
    pub label: Option<String>,
    /// Declared type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl RemoteFieldDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
            field_type: field_type.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Creation request
// ---------------------------------------------------------------------------

/// A value bound to a discovered remote field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub field_id: String,
    pub field_value: String,
}

/// Everything needed to create one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordCreationRequest {
    /// Card title; always the company name.
    pub title: String,
    /// Matched field values; may be empty.
    pub fields: Vec<FieldMapping>,
    /// Combined human-readable summary of the whole lead.
    pub description: String,
}

/// Identifier the remote system assigned to a created card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
