use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("local storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("local storage holds invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}
