use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::types::{TranslationError, TranslationInternalError};

pub const INVALID_REPLY_MESSAGE: &str = "Failed to retrieve a valid translation.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Could not process the translation request.";

/// Required request fields, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    InputLanguage,
    OutputLanguage,
    Input,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::InputLanguage => "input_language",
            Field::OutputLanguage => "output_language",
            Field::Input => "input",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Field::InputLanguage => "Invalid or missing 'input_language' parameter.",
            Field::OutputLanguage => "Invalid or missing 'output_language' parameter.",
            Field::Input => "Invalid or missing 'input' text to translate.",
        }
    }
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("{}", .0.message())]
    MissingField(Field),

    #[error("request body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("request body is null")]
    NullBody,

    #[error("provider returned no text content")]
    MalformedReply,

    #[error("provider call failed: {0:#}")]
    Provider(anyhow::Error),
}

impl TranslateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TranslateError::MissingField(_) => StatusCode::BAD_REQUEST,
            TranslateError::InvalidBody(_)
            | TranslateError::NullBody
            | TranslateError::MalformedReply
            | TranslateError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            TranslateError::MissingField(field) => (
                status,
                Json(TranslationError {
                    error: field.message().to_string(),
                }),
            )
                .into_response(),
            TranslateError::MalformedReply => (
                status,
                Json(TranslationError {
                    error: INVALID_REPLY_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            // Details stay in the logs.
            TranslateError::InvalidBody(_) | TranslateError::NullBody | TranslateError::Provider(_) => (
                status,
                Json(TranslationInternalError {
                    message: INTERNAL_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
