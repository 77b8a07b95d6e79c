use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{Field, TranslateError};

/// Inbound body of `POST /api/translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub input_language: String,
    pub output_language: String,
    pub input: String,
}

impl TranslationRequest {
    /// Validate a parsed body field by field, in wire order.
    ///
    /// A field is rejected when it is absent, not a string, or empty.
    /// Emptiness is checked before trimming.
    pub fn from_value(body: &Value) -> Result<Self, TranslateError> {
        let required = |field: Field| -> Result<String, TranslateError> {
            match body.get(field.key()).and_then(Value::as_str) {
                Some(s) if !s.is_empty() => Ok(s.to_string()),
                _ => Err(TranslateError::MissingField(field)),
            }
        };

        Ok(Self {
            input_language: required(Field::InputLanguage)?,
            output_language: required(Field::OutputLanguage)?,
            input: required(Field::Input)?,
        })
    }

    pub fn trimmed(&self) -> Self {
        Self {
            input_language: self.input_language.trim().to_string(),
            output_language: self.output_language.trim().to_string(),
            input: self.input.trim().to_string(),
        }
    }
}

/// `200` body. `timestamp` is only set on records persisted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSuccess {
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// `400` body, and `500` when the provider answered without text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationError {
    pub error: String,
}

/// `500` body when the provider call itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationInternalError {
    pub message: String,
}

/// A (code, display name) pair offered by the language pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub value: String,
    pub label: String,
}

impl LanguageOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}
