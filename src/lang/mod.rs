//! Language codes and their translation to and from Google's code set.
//!
//! # Architecture
//!
//! - `registry`: the static tables (codes, exceptions, mappings)
//! - `code`: lookups over the tables used by the request builders
//!
//! # Example
//!
//! ```rust
//! use translate_scraper::lang::{is_valid_code, map_outbound_code, replace_excepted_code, LanguageType};
//!
//! assert!(is_valid_code(Some("zh_HANT"), Some(LanguageType::Target)));
//! let source = replace_excepted_code(LanguageType::Source, "zh_HANT");
//! assert_eq!(map_outbound_code(source), "zh-CN");
//! ```

mod code;
mod registry;

pub use code::{
    all_languages, is_valid_code, language_list, language_name, languages, map_inbound_code,
    map_outbound_code, replace_excepted_code, LanguageList, LanguageType,
};
pub use registry::{LanguageMap, LanguageRegistry};
