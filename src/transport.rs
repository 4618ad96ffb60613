//! Outbound HTTP calls to the three upstream endpoints.
//!
//! - `info`: POST to the batch-execute RPC, answers with wrapped JSON
//! - `text`: GET of the mobile page, answers with HTML
//! - `audio`: GET of the speech endpoint, answers with MP3 bytes

use crate::config::Config;
use crate::error::Error;
use crate::retry::{with_retry, EmptyResult, MAX_ATTEMPTS};
use rand::seq::SliceRandom;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// RPC id of the translation metadata call
pub const RPC_ID: &str = "MkEWBc";

const BATCH_EXECUTE_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";
const TEXT_PATH: &str = "/m";
const AUDIO_PATH: &str = "/translate_tts";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36 Edg/123.0.2420.97",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// Pick a browser user agent for one attempt
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Info,
    Text,
    Audio,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Info => "info",
            Endpoint::Text => "text",
            Endpoint::Audio => "audio",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        match selector {
            "info" => Ok(Endpoint::Info),
            "text" => Ok(Endpoint::Text),
            "audio" => Ok(Endpoint::Audio),
            other => Err(Error::InvalidEndpoint(other.to_string())),
        }
    }
}

/// Endpoint-specific request parameters.
///
/// `query` and `text` are expected to be URL-escaped already.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    Info {
        body: String,
    },
    Text {
        source: String,
        target: String,
        query: String,
    },
    Audio {
        lang: String,
        text: String,
        text_length: usize,
        speed: f32,
    },
}

impl Params {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Params::Info { .. } => Endpoint::Info,
            Params::Text { .. } => Endpoint::Text,
            Params::Audio { .. } => Endpoint::Audio,
        }
    }
}

/// Raw response body, typed by the endpoint's response encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    pub fn into_text(self) -> Option<String> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Bytes(_) => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            Payload::Text(_) => None,
        }
    }
}

/// Build the full URL for a request
fn endpoint_url(base_url: &str, params: &Params) -> String {
    match params {
        Params::Info { .. } => format!(
            "{}{}?rpcids={}&rt=c",
            base_url, BATCH_EXECUTE_PATH, RPC_ID
        ),
        Params::Text {
            source,
            target,
            query,
        } => format!(
            "{}{}?sl={}&tl={}&q={}",
            base_url, TEXT_PATH, source, target, query
        ),
        Params::Audio {
            lang,
            text,
            text_length,
            speed,
        } => format!(
            "{}{}?tl={}&q={}&textlen={}&speed={}&client=tw-ob",
            base_url, AUDIO_PATH, lang, text, text_length, speed
        ),
    }
}

/// Issue a single HTTP call, without retries.
pub async fn retrieve(
    client: &reqwest::Client,
    config: &Config,
    params: &Params,
) -> Result<Payload, Error> {
    let url = endpoint_url(&config.base_url, params);

    let request = match params {
        Params::Info { body } => client
            .post(&url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.clone())
            .timeout(config.request_timeout),
        Params::Text { .. } => client.get(&url).timeout(config.request_timeout),
        Params::Audio { .. } => client.get(&url).timeout(config.audio_timeout),
    };

    let response = request
        .header(USER_AGENT, random_user_agent())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status(status.as_u16()));
    }

    match params.endpoint() {
        Endpoint::Audio => Ok(Payload::Bytes(response.bytes().await?.to_vec())),
        Endpoint::Info | Endpoint::Text => Ok(Payload::Text(response.text().await?)),
    }
}

/// Call an endpoint with bounded retries, turning each response into a value
/// with `process`.
///
/// `process` returning `None` (or an empty value) counts as an empty result
/// and triggers a fresh attempt.
pub async fn request<T, P>(
    client: &reqwest::Client,
    config: &Config,
    params: &Params,
    process: P,
) -> Option<T>
where
    P: Fn(Payload) -> Option<T>,
    T: EmptyResult,
{
    let endpoint = params.endpoint();
    let process = &process;

    with_retry(&config.retry, endpoint, move |attempt| async move {
        debug!("{}: Sending attempt {}/{}", endpoint, attempt + 1, MAX_ATTEMPTS);
        let payload = retrieve(client, config, params).await?;
        Ok(process(payload))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryConfig;
    use wiremock::{
        matchers::{header, header_exists, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_config(base_url: &str) -> Config {
        Config {
            retry: RetryConfig::immediate(),
            ..Config::with_base_url(base_url)
        }
    }

    // ==================== Endpoint Tests ====================

    #[test]
    fn test_endpoint_from_str_known_selectors() {
        assert_eq!("info".parse::<Endpoint>().ok(), Some(Endpoint::Info));
        assert_eq!("text".parse::<Endpoint>().ok(), Some(Endpoint::Text));
        assert_eq!("audio".parse::<Endpoint>().ok(), Some(Endpoint::Audio));
    }

    #[test]
    fn test_endpoint_from_str_rejects_unknown_selector() {
        let err = "speech".parse::<Endpoint>().unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(ref s) if s == "speech"));
        assert!(err.to_string().contains("speech"));
    }

    #[test]
    fn test_endpoint_display_round_trips() {
        for endpoint in [Endpoint::Info, Endpoint::Text, Endpoint::Audio] {
            assert_eq!(endpoint.to_string().parse::<Endpoint>().ok(), Some(endpoint));
        }
    }

    #[test]
    fn test_params_endpoint() {
        let params = Params::Audio {
            lang: "en".to_string(),
            text: "hi".to_string(),
            text_length: 2,
            speed: 1.0,
        };
        assert_eq!(params.endpoint(), Endpoint::Audio);
    }

    // ==================== URL Tests ====================

    #[test]
    fn test_text_url() {
        let params = Params::Text {
            source: "auto".to_string(),
            target: "es".to_string(),
            query: "hello%20world".to_string(),
        };
        assert_eq!(
            endpoint_url("https://translate.google.com", &params),
            "https://translate.google.com/m?sl=auto&tl=es&q=hello%20world"
        );
    }

    #[test]
    fn test_audio_url_formats_speed() {
        let normal = Params::Audio {
            lang: "en".to_string(),
            text: "hi".to_string(),
            text_length: 2,
            speed: 1.0,
        };
        let slow = Params::Audio {
            lang: "en".to_string(),
            text: "hi".to_string(),
            text_length: 2,
            speed: 0.1,
        };
        assert!(endpoint_url("", &normal).ends_with("textlen=2&speed=1&client=tw-ob"));
        assert!(endpoint_url("", &slow).ends_with("textlen=2&speed=0.1&client=tw-ob"));
    }

    #[test]
    fn test_info_url_carries_rpc_id() {
        let params = Params::Info {
            body: String::new(),
        };
        assert_eq!(
            endpoint_url("", &params),
            "/_/TranslateWebserverUi/data/batchexecute?rpcids=MkEWBc&rt=c"
        );
    }

    #[test]
    fn test_random_user_agent_comes_from_pool() {
        for _ in 0..20 {
            assert!(USER_AGENTS.contains(&random_user_agent()));
        }
    }

    // ==================== retrieve Tests (wiremock) ====================

    #[tokio::test]
    async fn test_retrieve_info_posts_form_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(BATCH_EXECUTE_PATH))
            .and(query_param("rpcids", RPC_ID))
            .and(header("Content-Type", FORM_CONTENT_TYPE))
            .and(header_exists("User-Agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string(")]}'\n"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let params = Params::Info {
            body: "f.req=abc".to_string(),
        };

        let payload = retrieve(&reqwest::Client::new(), &config, &params)
            .await
            .expect("Should succeed");

        assert_eq!(payload, Payload::Text(")]}'\n".to_string()));
    }

    #[tokio::test]
    async fn test_retrieve_audio_reads_bytes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(AUDIO_PATH))
            .and(query_param("client", "tw-ob"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xF3, 0x44]))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let params = Params::Audio {
            lang: "en".to_string(),
            text: "hi".to_string(),
            text_length: 2,
            speed: 1.0,
        };

        let payload = retrieve(&reqwest::Client::new(), &config, &params)
            .await
            .expect("Should succeed");

        assert_eq!(payload.into_bytes(), Some(vec![0xFF, 0xF3, 0x44]));
    }

    #[tokio::test]
    async fn test_retrieve_maps_status_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TEXT_PATH))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let params = Params::Text {
            source: "en".to_string(),
            target: "es".to_string(),
            query: "hi".to_string(),
        };

        let err = retrieve(&reqwest::Client::new(), &config, &params)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Status(429)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_retrieve_malformed_base_url_is_not_retryable() {
        let config = create_test_config("not a url");
        let params = Params::Text {
            source: "en".to_string(),
            target: "es".to_string(),
            query: "hi".to_string(),
        };

        let err = retrieve(&reqwest::Client::new(), &config, &params)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Network(ref e) if e.is_builder()));
        assert!(!err.is_retryable());
    }

    // ==================== request Tests (wiremock) ====================

    #[tokio::test]
    async fn test_request_retries_server_errors_up_to_max_attempts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TEXT_PATH))
            .respond_with(ResponseTemplate::new(503))
            .expect(u64::from(MAX_ATTEMPTS))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let params = Params::Text {
            source: "en".to_string(),
            target: "es".to_string(),
            query: "hi".to_string(),
        };

        let result = request(&reqwest::Client::new(), &config, &params, Payload::into_text).await;

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_request_does_not_retry_client_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TEXT_PATH))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let params = Params::Text {
            source: "en".to_string(),
            target: "es".to_string(),
            query: "hi".to_string(),
        };

        let result = request(&reqwest::Client::new(), &config, &params, Payload::into_text).await;

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_request_connection_refused_resolves_absent() {
        // Nothing listens on port 1
        let config = create_test_config("http://127.0.0.1:1");
        let params = Params::Text {
            source: "en".to_string(),
            target: "es".to_string(),
            query: "hi".to_string(),
        };

        let result = request(&reqwest::Client::new(), &config, &params, Payload::into_text).await;

        assert!(result.is_none());
    }
}
