use std::time::Duration;

use futures_util::StreamExt;
use newsdesk_core::{HttpMethod, Page, Payload, RequestSpec};
use newsdesk_logging::{newsdesk_debug, newsdesk_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::{decode_payload, server_error_message, DispatchError, FailureKind};

/// Base URL of the backend serving each page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub ask: String,
    pub sources: String,
    pub search: String,
    pub aggregate: String,
    pub scrape: String,
    pub explore: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ask: "http://localhost:8002".to_string(),
            sources: "http://localhost:8002".to_string(),
            search: "http://localhost:8000".to_string(),
            aggregate: "http://localhost:8003".to_string(),
            scrape: "http://localhost:8000".to_string(),
            explore: "http://localhost:8000".to_string(),
        }
    }
}

impl Endpoints {
    /// Every page served from the same base.
    pub fn uniform(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            ask: base.clone(),
            sources: base.clone(),
            search: base.clone(),
            aggregate: base.clone(),
            scrape: base.clone(),
            explore: base,
        }
    }

    pub fn base_for(&self, page: Page) -> &str {
        match page {
            Page::Ask => &self.ask,
            Page::Sources => &self.sources,
            Page::Search => &self.search,
            Page::Aggregate => &self.aggregate,
            Page::Scrape => &self.scrape,
            Page::Explore => &self.explore,
        }
    }
}

/// Timeouts are off unless set; requests then wait on the client defaults.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub endpoints: Endpoints,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    /// Sends one request for `page` and decodes its response. Never retries.
    async fn dispatch(&self, page: Page, request: &RequestSpec) -> Result<Payload, DispatchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    settings: DispatchSettings,
}

impl ReqwestDispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, DispatchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|err| {
            newsdesk_warn!("http client setup failed: {}", err);
            DispatchError::no_response()
        })
    }

    /// Joins the page's base URL with the request path and query.
    pub(crate) fn endpoint_url(
        &self,
        page: Page,
        request: &RequestSpec,
    ) -> Result<Url, DispatchError> {
        let base = self.settings.endpoints.base_for(page).trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{}", request.path)).map_err(|err| {
            DispatchError::new(
                FailureKind::InvalidEndpoint,
                format!("Endpoint '{base}' for {page} is not a valid URL: {err}"),
            )
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, DispatchError> {
        let max_bytes = self.settings.max_bytes;
        let too_large = || {
            DispatchError::new(
                FailureKind::TooLarge { max_bytes },
                format!("Response too large (over {max_bytes} bytes)."),
            )
        };

        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(too_large());
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn dispatch(&self, page: Page, request: &RequestSpec) -> Result<Payload, DispatchError> {
        let url = self.endpoint_url(page, request)?;
        let client = self.build_client()?;
        newsdesk_debug!("{} {} {}", page, request.method, url);

        let builder = match request.method {
            HttpMethod::Get => client.get(url),
            HttpMethod::Post => {
                let fields = request.body.clone().unwrap_or_default();
                let object: serde_json::Map<String, serde_json::Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect();
                let body = serde_json::to_vec(&object).map_err(|err| {
                    newsdesk_warn!("{} request body did not serialize: {}", page, err);
                    DispatchError::malformed()
                })?;
                client
                    .post(url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body)
            }
        };

        let response = builder
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;

        if !status.is_success() {
            let message = server_error_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}.", status.as_u16()));
            newsdesk_warn!("{} failed with {}: {}", page, status, message);
            return Err(DispatchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        decode_payload(page, &body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchError {
    newsdesk_warn!("request failed without a response: {}", err);
    if err.is_timeout() {
        return DispatchError::new(
            FailureKind::Timeout,
            "The server did not respond in time.",
        );
    }
    DispatchError::no_response()
}
