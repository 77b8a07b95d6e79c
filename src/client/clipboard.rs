use tracing::debug;

use super::error::ClientError;

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClientError>;
}

/// The desktop clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClientError> {
        self.inner.set_text(text)?;
        debug!("Copied {} chars to the clipboard", text.chars().count());
        Ok(())
    }
}
