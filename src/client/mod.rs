pub mod api;
pub mod clipboard;
pub mod error;
pub mod form;
pub mod languages;
pub mod storage;

pub use api::TranslateApi;
pub use clipboard::SystemClipboard;
pub use form::TranslationForm;
pub use storage::LocalStorage;
