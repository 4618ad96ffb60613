//! Translation metadata returned by the info endpoint.

use crate::retry::EmptyResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranslationInfo {
    /// Internal code of the detected source language
    pub detected_source: Option<String>,
    /// Suggested spelling when the query looks mistyped
    pub typo: Option<String>,
    pub pronunciation: Pronunciation,
    pub definitions: Vec<DefinitionGroup>,
    pub examples: Vec<String>,
    pub similar: Vec<String>,
    pub extra_translations: Vec<ExtraTranslationGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pronunciation {
    pub query: Option<String>,
    pub translation: Option<String>,
}

/// Definitions sharing a part of speech
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionGroup {
    #[serde(rename = "type")]
    pub kind: String,
    pub list: Vec<Definition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definition {
    pub definition: String,
    pub example: Option<String>,
    /// Usage domain or register label (e.g. "informal")
    pub field: Option<String>,
    pub synonyms: Vec<String>,
}

/// Alternative translations sharing a part of speech
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraTranslationGroup {
    #[serde(rename = "type")]
    pub kind: String,
    pub list: Vec<ExtraTranslation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraTranslation {
    pub word: String,
    pub article: Option<String>,
    pub meanings: Vec<String>,
    /// 1 (rare) to 3 (common); higher means more frequent
    pub frequency: Option<i64>,
}

impl TranslationInfo {
    /// JSON form with every null, empty string and empty list stripped out
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self)
            .map(strip_empty)
            .unwrap_or(Value::Null)
    }
}

impl EmptyResult for TranslationInfo {
    fn is_empty_result(&self) -> bool {
        false
    }
}

/// Recursively drop null, `""` and `[]` from objects and arrays.
///
/// Children are cleaned first, so a list that only held blanks is removed as
/// well. Numbers, booleans and empty objects are kept.
pub fn strip_empty(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, strip_empty(value)))
                .filter(|(_, value)| !is_blank(value))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(strip_empty)
                .filter(|value| !is_blank(value))
                .collect(),
        ),
        other => other,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
