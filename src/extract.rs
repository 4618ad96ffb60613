//! Positional extraction from the batch-execute response.
//!
//! The decoded payload has no published schema. It is a nested array read by
//! fixed index:
//!
//! ```text
//! [sourceInfo, targetInfo, detectedCode, extra]
//! ```
//!
//! Every lookup is an optional projection, so a missing or mistyped slot at any
//! depth yields "not present" for that one field.

use crate::info::{
    Definition, DefinitionGroup, ExtraTranslation, ExtraTranslationGroup, Pronunciation,
    TranslationInfo,
};
use crate::lang::map_inbound_code;
use crate::transport::RPC_ID;
use serde_json::Value;

// Top-level slots
const SOURCE: usize = 0;
const TARGET: usize = 1;
const DETECTED: usize = 2;
const EXTRA: usize = 3;

// Slots inside `extra`
const DEFINITIONS: usize = 1;
const EXAMPLES: usize = 2;
const SIMILAR: usize = 3;
const TRANSLATIONS: usize = 5;
const DETECTED_FALLBACK: usize = 8;

/// Subtracting the raw rank from this gives "higher is more frequent"
const FREQUENCY_BASE: i64 = 4;

/// Optional index-path access into loosely-typed JSON arrays.
pub trait Positional {
    /// Follow `path` through nested arrays
    fn at(&self, path: &[usize]) -> Option<&Value>;

    /// Non-empty string at `path`
    fn str_at(&self, path: &[usize]) -> Option<&str> {
        self.at(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Elements of the array at `path`; empty when absent or not an array
    fn items_at(&self, path: &[usize]) -> std::slice::Iter<'_, Value> {
        self.at(path)
            .and_then(Value::as_array)
            .map(|items| items.iter())
            .unwrap_or_default()
    }
}

impl Positional for Value {
    fn at(&self, path: &[usize]) -> Option<&Value> {
        path.iter().try_fold(self, |value, &index| value.get(index))
    }
}

/// First non-empty string found by descending through leading elements
fn leading_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Array(items) => items.first().and_then(leading_str),
        _ => None,
    }
}

fn owned(s: &str) -> String {
    s.to_string()
}

/// Unwrap the batch-execute envelope and parse the JSON string it carries.
///
/// The body looks like:
///
/// ```text
/// )]}'
///
/// 1234
/// [["wrb.fr","MkEWBc","[[...escaped JSON...]]",null,null,null,"generic"],...]
/// ```
pub fn decode_batch_response(raw: &str) -> Option<Value> {
    raw.lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .flat_map(|chunk| match chunk {
            Value::Array(envelopes) => envelopes,
            _ => Vec::new(),
        })
        .find(|envelope| {
            envelope.str_at(&[0]) == Some("wrb.fr") && envelope.str_at(&[1]) == Some(RPC_ID)
        })
        .and_then(|envelope| {
            envelope
                .str_at(&[2])
                .and_then(|inner| serde_json::from_str(inner).ok())
        })
}

/// Build [`TranslationInfo`] out of a decoded payload. Never fails.
pub fn extract_info(data: &Value) -> TranslationInfo {
    TranslationInfo {
        detected_source: detected_source(data),
        typo: data.str_at(&[SOURCE, 1, 0, 4]).map(owned),
        pronunciation: Pronunciation {
            query: data.str_at(&[SOURCE, 0]).map(owned),
            translation: data.str_at(&[TARGET, 0, 0, 1]).map(owned),
        },
        definitions: definitions(data),
        examples: data
            .items_at(&[EXTRA, EXAMPLES, 0])
            .filter_map(|pair| pair.str_at(&[1]))
            .map(owned)
            .collect(),
        similar: data
            .items_at(&[EXTRA, SIMILAR, 0])
            .filter_map(|term| term.str_at(&[]))
            .map(owned)
            .collect(),
        extra_translations: extra_translations(data),
    }
}

fn detected_source(data: &Value) -> Option<String> {
    data.str_at(&[SOURCE, 2])
        .or_else(|| data.str_at(&[TARGET, 3]))
        .or_else(|| data.str_at(&[DETECTED]))
        .or_else(|| data.at(&[EXTRA, DETECTED_FALLBACK]).and_then(leading_str))
        .or_else(|| data.str_at(&[EXTRA, TRANSLATIONS, 0, 0, 3]))
        .map(|code| map_inbound_code(code).to_string())
}

fn definitions(data: &Value) -> Vec<DefinitionGroup> {
    data.items_at(&[EXTRA, DEFINITIONS, 0])
        .map(|group| DefinitionGroup {
            kind: group.str_at(&[0]).map(owned).unwrap_or_default(),
            list: group
                .items_at(&[1])
                .filter_map(|entry| {
                    Some(Definition {
                        definition: entry.str_at(&[0])?.to_string(),
                        example: entry.str_at(&[1]).map(owned),
                        field: entry.str_at(&[4, 0, 0]).map(owned),
                        synonyms: entry
                            .items_at(&[5])
                            .flat_map(|synonym_group| synonym_group.items_at(&[0]))
                            .filter_map(leading_str)
                            .map(owned)
                            .collect(),
                    })
                })
                .collect(),
        })
        .collect()
}

fn extra_translations(data: &Value) -> Vec<ExtraTranslationGroup> {
    data.items_at(&[EXTRA, TRANSLATIONS, 0])
        .map(|group| ExtraTranslationGroup {
            kind: group.str_at(&[0]).map(owned).unwrap_or_default(),
            list: group
                .items_at(&[1])
                .filter_map(|entry| {
                    Some(ExtraTranslation {
                        word: entry.str_at(&[0])?.to_string(),
                        article: entry.str_at(&[1]).map(owned),
                        meanings: entry
                            .items_at(&[2])
                            .filter_map(|meaning| meaning.str_at(&[]))
                            .map(owned)
                            .collect(),
                        frequency: entry
                            .at(&[3])
                            .and_then(Value::as_i64)
                            .map(|rank| FREQUENCY_BASE - rank),
                    })
                })
                .collect(),
        })
        .collect()
}
