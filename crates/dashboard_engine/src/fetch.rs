use std::time::Duration;

use dashboard_core::Page;
use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Url;

use crate::wire::decode_page;
use crate::{FailureKind, FetchError};

const API_KEY_HEADER: &str = "x-api-key";
const NEXT_TOKEN_PARAM: &str = "next_token";

/// Where pages come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub base_url: String,
    /// Path below `base_url`, e.g. `animal/data`.
    pub resource: String,
    pub api_key: Option<String>,
}

impl ApiEndpoint {
    /// `<base>/<resource>[?next_token=<token>]`
    pub fn page_url(&self, token: Option<&str>) -> Result<Url, FetchError> {
        let base = self.base_url.trim_end_matches('/');
        let resource = self.resource.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{resource}"))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if let Some(token) = token {
            url.query_pairs_mut().append_pair(NEXT_TOKEN_PARAM, token);
        }
        Ok(url)
    }
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// One network call per page. Failures are returned unchanged; no retries.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, token: Option<&str>) -> Result<Page, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPageFetcher {
    endpoint: ApiEndpoint,
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestPageFetcher {
    pub fn new(endpoint: ApiEndpoint, settings: FetchSettings) -> Result<Self, FetchError> {
        endpoint.page_url(None)?;
        let client = Self::build_client(&endpoint, &settings)?;
        Ok(Self {
            endpoint,
            settings,
            client,
        })
    }

    fn build_client(
        endpoint: &ApiEndpoint,
        settings: &FetchSettings,
    ) -> Result<reqwest::Client, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = endpoint.api_key.as_deref() {
            let mut value = HeaderValue::from_str(key)
                .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch(&self, token: Option<&str>) -> Result<Page, FetchError> {
        let url = self.endpoint.page_url(token)?;
        engine_debug!("GET {} (has_token={})", url.path(), token.is_some());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        let page = decode_page(&bytes)?;
        engine_debug!(
            "Fetched page records={} count={} total={:?} has_more={}",
            page.records.len(),
            page.declared_count,
            page.total_count,
            page.has_more()
        );
        Ok(page)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
