use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::translate::{LanguageOption, TranslationRequest, TranslationSuccess};

use super::api::{ApiResponse, TranslateApi};
use super::clipboard::Clipboard;
use super::error::ClientError;
use super::languages::find_language;
use super::storage::LocalStorage;

/// Advisory input length shown next to the text box. Not enforced.
pub const INPUT_CHAR_BUDGET: usize = 1000;

pub const FALLBACK_ERROR: &str = "An unexpected error occurred.";

/// What a reply body means for the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Translated(String),
    Failed(String),
}

/// Read a reply in the order `translation` (only with 200), `error`, `message`.
pub fn classify_reply(status: u16, body: &Value) -> ReplyOutcome {
    let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);

    if status == 200 {
        if let Some(translation) = text("translation") {
            return ReplyOutcome::Translated(translation);
        }
    }

    text("error")
        .or_else(|| text("message"))
        .map(ReplyOutcome::Failed)
        .unwrap_or_else(|| ReplyOutcome::Failed(FALLBACK_ERROR.to_string()))
}

/// Local state of the translation form.
///
/// At most one of the translated text and the error string is non-empty.
#[derive(Debug, Clone)]
pub struct TranslationForm {
    pub input_language: Option<LanguageOption>,
    pub output_language: Option<LanguageOption>,
    pub input_text: String,
    translated_text: String,
    loading: bool,
    error: String,
}

impl Default for TranslationForm {
    fn default() -> Self {
        Self {
            input_language: find_language("en"),
            output_language: find_language("ur"),
            input_text: String::new(),
            translated_text: String::new(),
            loading: false,
            error: String::new(),
        }
    }
}

/// A request that has left the form but not yet been answered.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub request: TranslationRequest,
    submitted_at: String,
}

impl TranslationForm {
    pub fn new(
        input_language: Option<LanguageOption>,
        output_language: Option<LanguageOption>,
        input_text: impl Into<String>,
    ) -> Self {
        Self {
            input_language,
            output_language,
            input_text: input_text.into(),
            ..Self::default()
        }
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Length as a browser text area counts it (UTF-16 code units).
    pub fn char_count(&self) -> usize {
        self.input_text.encode_utf16().count()
    }

    pub fn over_budget(&self) -> bool {
        self.char_count() > INPUT_CHAR_BUDGET
    }

    pub fn counter_label(&self) -> String {
        format!("{} / {} characters", self.char_count(), INPUT_CHAR_BUDGET)
    }

    /// The body sent on submit. Unselected languages go out as empty strings.
    pub fn request(&self) -> TranslationRequest {
        let code = |option: &Option<LanguageOption>| {
            option.as_ref().map(|o| o.value.clone()).unwrap_or_default()
        };

        TranslationRequest {
            input_language: code(&self.input_language),
            output_language: code(&self.output_language),
            input: self.input_text.clone(),
        }
    }

    /// Clear the previous result and enter the loading state.
    pub fn start_submission(&mut self) -> PendingSubmission {
        self.error.clear();
        self.translated_text.clear();
        self.loading = true;

        if self.over_budget() {
            warn!("Input is {} characters, over the advisory {}", self.char_count(), INPUT_CHAR_BUDGET);
        }

        PendingSubmission {
            request: self.request(),
            submitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Show the translation or an error and leave the loading state.
    /// A successful translation replaces the stored history.
    pub fn finish_submission(
        &mut self,
        pending: PendingSubmission,
        reply: Result<ApiResponse, ClientError>,
        storage: &LocalStorage,
    ) {
        match reply {
            Ok(response) => match classify_reply(response.status, &response.body) {
                ReplyOutcome::Translated(translation) => {
                    let record = TranslationSuccess {
                        translation: translation.clone(),
                        timestamp: Some(pending.submitted_at),
                    };
                    if let Err(e) = storage.save_history(&[record]) {
                        warn!("Could not store translation history: {}", e);
                    }
                    self.translated_text = translation;
                }
                ReplyOutcome::Failed(message) => {
                    debug!("Translate request failed with status {}", response.status);
                    self.error = message;
                }
            },
            Err(e) => {
                error!("Translation error: {}", e);
                self.error = FALLBACK_ERROR.to_string();
            }
        }

        self.loading = false;
    }

    /// Send the current fields, then show the translation or an error.
    pub async fn submit(&mut self, api: &TranslateApi, storage: &LocalStorage) {
        let pending = self.start_submission();
        let reply = api.post(&pending.request).await;
        self.finish_submission(pending, reply, storage);
    }

    /// Copy the displayed translation. Returns false when there is none.
    pub fn copy_translation(&self, clipboard: &mut dyn Clipboard) -> Result<bool, ClientError> {
        if self.translated_text.is_empty() {
            return Ok(false);
        }
        clipboard.write_text(&self.translated_text)?;
        Ok(true)
    }
}
