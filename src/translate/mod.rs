pub mod error;
pub mod handler;
pub mod prompt;
pub mod types;

pub use handler::translate_handler;
pub use types::{LanguageOption, TranslationRequest, TranslationSuccess};
