//! Sanity HTTP query client.
//!
//! Provides a sync HTTP client for the Sanity query API
//! (`GET /v{version}/data/query/{dataset}`).

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};
use tracing::debug;
use ureq::Agent;

use crate::error::ContentError;
use crate::query::Query;
use crate::source::ContentSource;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Characters left unescaped in query-string values.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Connection settings for a Sanity project.
#[derive(Clone, Debug)]
pub struct SanityConfig {
    /// Project identifier.
    pub project_id: String,
    /// Dataset name.
    pub dataset: String,
    /// Pinned API version (`YYYY-MM-DD`).
    pub api_version: String,
    /// Use the CDN-backed API host.
    pub use_cdn: bool,
}

/// Sanity query API client.
pub struct SanityClient {
    agent: Agent,
    config: SanityConfig,
    base_url: Option<String>,
}

impl SanityClient {
    /// Create a client with the default timeout.
    #[must_use]
    pub fn new(config: SanityConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            config,
            base_url: None,
        }
    }

    /// Send queries to `base_url` instead of the project's API host.
    ///
    /// The versioned query path is appended as usual.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_owned());
        self
    }

    /// Connection settings.
    pub fn config(&self) -> &SanityConfig {
        &self.config
    }

    /// Get the query endpoint for the configured dataset.
    fn api_url(&self) -> String {
        let base = self.base_url.clone().unwrap_or_else(|| {
            let host = if self.config.use_cdn { "apicdn" } else { "api" };
            format!("https://{}.{host}.sanity.io", self.config.project_id)
        });
        format!(
            "{base}/v{}/data/query/{}",
            self.config.api_version, self.config.dataset
        )
    }

    /// Build the full request URL for a query.
    ///
    /// Parameters are passed as `$name=<json>` pairs, as the query API expects.
    pub(crate) fn query_url(&self, query: &Query) -> String {
        let mut url = format!(
            "{}?query={}",
            self.api_url(),
            utf8_percent_encode(query.groq(), QUERY_ENCODE_SET)
        );
        for (name, value) in query.params() {
            url.push_str("&%24");
            url.push_str(&utf8_percent_encode(name, QUERY_ENCODE_SET).to_string());
            url.push('=');
            url.push_str(&utf8_percent_encode(&value.to_string(), QUERY_ENCODE_SET).to_string());
        }
        url
    }
}

impl ContentSource for SanityClient {
    fn fetch_raw(&self, query: &Query) -> Result<Value, ContentError> {
        let url = self.query_url(query);
        debug!(tags = ?query.tags(), "Querying content repository");

        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ContentError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let mut envelope: Map<String, Value> = body.read_json()?;
        envelope.remove("result").ok_or(ContentError::MissingResult)
    }
}
