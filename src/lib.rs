pub mod config;
pub mod error;
pub mod interactive;
pub mod lang;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod record;
pub mod request;
pub mod store;
pub mod translator;

pub use config::Config;
pub use error::{Result, TranscacheError};
pub use lang::{Lang, SourceLang};
pub use request::{TranslateInput, TranslateResponse, TranslationRequest};
pub use translator::{TranslationService, FAILURE_SENTINEL};
