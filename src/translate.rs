use crate::config::Config;
use crate::extract::{decode_batch_response, extract_info};
use crate::info::TranslationInfo;
use crate::lang::{is_valid_code, map_outbound_code, replace_excepted_code, LanguageType};
use crate::transport::{request, Params, Payload, RPC_ID};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use scraper::{Html, Selector};
use serde_json::json;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Longest URL-escaped query the mobile endpoint accepts
pub const MAX_QUERY_LENGTH: usize = 7500;

/// Longest text sent to speech synthesis in one request
pub const MAX_SPEECH_LENGTH: usize = 200;

/// Marker present on Google's soft error page
const ERROR_PAGE_MARKER: &str = "#af-error-page";

static RESULT_SELECTOR: OnceLock<Selector> = OnceLock::new();

/// Everything except alphanumerics and `-_.!~*'()`, matching a browser's
/// `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component the way the web client does
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Validate a code, apply the direction's exception and map it to Google's code set
fn provider_code(code: &str, direction: LanguageType) -> Option<String> {
    if !is_valid_code(Some(code), None) {
        warn!("Unknown {} language code: '{}'", direction, code);
        return None;
    }

    Some(map_outbound_code(replace_excepted_code(direction, code)).to_string())
}

/// Translate `query` through the mobile web page.
///
/// Returns `None` for unknown codes, queries over [`MAX_QUERY_LENGTH`] once
/// escaped, and whenever no translation could be scraped.
pub async fn translate_text(
    client: &reqwest::Client,
    config: &Config,
    source: &str,
    target: &str,
    query: &str,
) -> Option<String> {
    let source = provider_code(source, LanguageType::Source)?;
    let target = provider_code(target, LanguageType::Target)?;

    let encoded_query = encode_component(query);
    if encoded_query.len() > MAX_QUERY_LENGTH {
        warn!(
            "Query too long to translate: {} escaped characters (max {})",
            encoded_query.len(),
            MAX_QUERY_LENGTH
        );
        return None;
    }

    let params = Params::Text {
        source,
        target,
        query: encoded_query,
    };

    request(client, config, &params, |payload| {
        parse_result_container(&payload.into_text()?)
    })
    .await
}

/// Pull the translated text out of the mobile page's HTML
pub fn parse_result_container(html: &str) -> Option<String> {
    let selector = RESULT_SELECTOR
        .get_or_init(|| Selector::parse(".result-container").expect("static selector is valid"));

    let document = Html::parse_document(html);
    let text: String = document.select(selector).next()?.text().collect();
    let text = text.trim();

    if text.is_empty() || text.contains(ERROR_PAGE_MARKER) {
        debug!("No usable translation in response page");
        return None;
    }

    Some(text.to_string())
}

/// Form body for the metadata RPC
fn build_info_body(query: &str, source: &str, target: &str) -> String {
    let request_data = json!([[query, source, target, true], [null]]).to_string();
    let request_body = json!([[[RPC_ID, request_data, null, "generic"]]]).to_string();

    format!("f.req={}", encode_component(&request_body))
}

/// Fetch detected language, pronunciations, definitions, examples and
/// alternative translations for `query`.
pub async fn translate_info(
    client: &reqwest::Client,
    config: &Config,
    source: &str,
    target: &str,
    query: &str,
) -> Option<TranslationInfo> {
    let source = provider_code(source, LanguageType::Source)?;
    let target = provider_code(target, LanguageType::Target)?;

    let params = Params::Info {
        body: build_info_body(query, &source, &target),
    };

    request(client, config, &params, |payload| {
        let data = decode_batch_response(&payload.into_text()?)?;
        Some(extract_info(&data))
    })
    .await
}

/// Cut text to [`MAX_SPEECH_LENGTH`] characters, at the last space when there is one
pub fn truncate_for_speech(text: &str) -> &str {
    let Some((cut, _)) = text.char_indices().nth(MAX_SPEECH_LENGTH) else {
        return text;
    };

    if text[cut..].starts_with(' ') {
        return &text[..cut];
    }

    let head = &text[..cut];
    match head.rfind(' ') {
        Some(space) => &text[..space],
        None => head,
    }
}

/// Synthesize speech for `text` in `lang`, returning MP3 bytes.
pub async fn synthesize_audio(
    client: &reqwest::Client,
    config: &Config,
    lang: &str,
    text: &str,
    slow: bool,
) -> Option<Vec<u8>> {
    let lang = provider_code(lang, LanguageType::Target)?;

    let spoken = truncate_for_speech(text);
    if spoken.len() < text.len() {
        debug!(
            "Speech text cut from {} to {} characters",
            text.chars().count(),
            spoken.chars().count()
        );
    }

    let params = Params::Audio {
        lang,
        text: encode_component(spoken),
        text_length: spoken.chars().count(),
        speed: if slow { 0.1 } else { 1.0 },
    };

    request(client, config, &params, Payload::into_bytes).await
}
