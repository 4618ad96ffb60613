use crate::lang::{LanguageMap, LanguageRegistry};
use std::fmt;
use std::str::FromStr;

/// Whether a code is used as the translation source or target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageType {
    Source,
    Target,
}

impl fmt::Display for LanguageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageType::Source => f.write_str("source"),
            LanguageType::Target => f.write_str("target"),
        }
    }
}

impl FromStr for LanguageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(LanguageType::Source),
            "target" => Ok(LanguageType::Target),
            other => Err(format!("Unknown language type: '{}'", other)),
        }
    }
}

/// The three code lists, keyed by code with the English name as value.
#[derive(Debug, Clone, Copy)]
pub struct LanguageList {
    pub all: &'static LanguageMap,
    pub source: &'static LanguageMap,
    pub target: &'static LanguageMap,
}

pub fn languages() -> LanguageList {
    let registry = LanguageRegistry::get();
    LanguageList {
        all: registry.list(None),
        source: registry.list(Some(LanguageType::Source)),
        target: registry.list(Some(LanguageType::Target)),
    }
}

/// Codes usable in `direction` (all codes minus that direction's exceptions)
pub fn language_list(direction: LanguageType) -> &'static LanguageMap {
    LanguageRegistry::get().list(Some(direction))
}

pub fn all_languages() -> &'static LanguageMap {
    LanguageRegistry::get().list(None)
}

/// English display name of a code
pub fn language_name(code: &str) -> Option<&'static str> {
    LanguageRegistry::get()
        .get_by_code(code)
        .map(|(_, name)| name)
}

/// Check a code against the full set, or against one direction's set.
///
/// A missing code is never valid.
pub fn is_valid_code(code: Option<&str>, direction: Option<LanguageType>) -> bool {
    code.is_some_and(|code| LanguageRegistry::get().list(direction).contains_key(code))
}

/// Swap a code that is not usable in `direction` for its designated replacement.
pub fn replace_excepted_code(direction: LanguageType, code: &str) -> &str {
    LanguageRegistry::get()
        .exceptions(direction)
        .iter()
        .find(|(excepted, _)| *excepted == code)
        .map(|(_, replacement)| *replacement)
        .unwrap_or(code)
}

/// Internal code to the code Google expects in requests
pub fn map_outbound_code(code: &str) -> &str {
    LanguageRegistry::get()
        .request_mapping(code)
        .unwrap_or(code)
}

/// Code found in a Google response back to the internal code
pub fn map_inbound_code(code: &str) -> &str {
    LanguageRegistry::get()
        .response_mapping(code)
        .unwrap_or(code)
}
