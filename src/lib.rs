//! Scraper for Google Translate's public web endpoints.
//!
//! Three operations are exposed, all resolving to `None` when nothing could be
//! retrieved:
//!
//! - [`translate_text`]: plain translation through the mobile page
//! - [`translate_info`]: detected language, pronunciations, definitions,
//!   examples and alternative translations
//! - [`synthesize_audio`]: MP3 speech for a short text
//!
//! Every request is retried up to [`retry::MAX_ATTEMPTS`] times on empty
//! results and retryable failures.

pub mod config;
pub mod error;
pub mod extract;
pub mod info;
pub mod lang;
pub mod retry;
pub mod translate;
pub mod transport;

pub use config::Config;
pub use error::Error;
pub use info::{
    Definition, DefinitionGroup, ExtraTranslation, ExtraTranslationGroup, Pronunciation,
    TranslationInfo,
};
pub use lang::{
    all_languages, is_valid_code, language_list, language_name, languages, map_inbound_code,
    map_outbound_code, replace_excepted_code, LanguageType,
};
pub use translate::{synthesize_audio, translate_info, translate_text};
pub use transport::Endpoint;
