use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, error, info_span, Instrument};
use uuid::Uuid;

use crate::llm::StatelessLLMInterface;
use crate::state::AppState;

use super::error::TranslateError;
use super::prompt::build_prompt;
use super::types::{TranslationRequest, TranslationSuccess};

/// `POST /api/translate`
pub async fn translate_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let span = info_span!("translate", request_id = %Uuid::new_v4());

    match translate(state.llm.as_ref(), &body).instrument(span).await {
        Ok(success) => (StatusCode::OK, Json(success)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Validate the raw body, ask the provider once, and shape the result.
///
/// Retries happen only inside the provider client.
pub async fn translate(
    llm: &dyn StatelessLLMInterface,
    body: &[u8],
) -> Result<TranslationSuccess, TranslateError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        error!("Translation error: unreadable request body: {}", e);
        TranslateError::from(e)
    })?;
    if value.is_null() {
        error!("Translation error: request body is null");
        return Err(TranslateError::NullBody);
    }

    let request = TranslationRequest::from_value(&value)
        .inspect_err(|e| debug!("Rejected translate request: {}", e))?
        .trimmed();

    debug!(
        "Translating {} chars from {} to {} via {}",
        request.input.chars().count(),
        request.input_language,
        request.output_language,
        llm.name()
    );

    let completion = llm
        .chat_completion(&build_prompt(&request))
        .await
        .map_err(|e| {
            error!("Translation error: {:#}", e);
            TranslateError::Provider(e)
        })?;

    match completion.content {
        Some(text) => Ok(TranslationSuccess {
            translation: text.trim().to_string(),
            timestamp: None,
        }),
        None => {
            error!("Translation error: {} returned no text content", llm.name());
            Err(TranslateError::MalformedReply)
        }
    }
}
