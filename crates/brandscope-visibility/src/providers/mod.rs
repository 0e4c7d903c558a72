//! External capabilities consumed by the visibility pipelines.
//!
//! Each capability is an object-safe async trait so the service can hold
//! whichever implementations the configuration enables, and tests can swap in
//! in-process fakes. The HTTP implementations live in the submodules.

pub mod chat;
pub mod dataforseo;
pub mod google;
pub mod serper;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

pub use chat::ChatCompletionsEngine;
pub use dataforseo::DataForSeoClient;
pub use google::GoogleSearchClient;
pub use serper::SerperClient;

use crate::error::ProviderError;
use crate::types::SearchPage;

/// Organic web search with related questions and searches.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short provider name for logs and status reporting.
    fn name(&self) -> &str;

    /// Run one query. Result order is the provider's relevance order.
    async fn search(&self, query: &str) -> Result<SearchPage, ProviderError>;
}

/// A generative-AI assistant that answers a single prompt.
#[async_trait]
pub trait AnswerEngine: Send + Sync {
    /// Engine name recorded on prompts whose answer mentions the brand.
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Batched monthly search-volume lookup.
///
/// Terms missing from the returned map have no known volume.
#[async_trait]
pub trait VolumeLookup: Send + Sync {
    fn name(&self) -> &str;

    async fn volumes(&self, terms: &[String]) -> Result<HashMap<String, u64>, ProviderError>;
}

/// Shared `reqwest` client settings for every provider.
pub(crate) fn http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ProviderError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Strip any trailing slash so endpoint paths can be appended verbatim.
pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Check the status, then parse the body as `T`.
///
/// Non-2xx responses become [`ProviderError::UnexpectedStatus`] carrying the
/// (truncated) body so provider-side error messages reach the logs.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    context: &str,
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::UnexpectedStatus {
            provider,
            status: status.as_u16(),
            body: truncate(&body, 512),
        });
    }

    serde_json::from_str(&body).map_err(|source| ProviderError::Deserialize {
        context: format!("{provider} {context}"),
        source,
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// Hostname of `url` without a scheme, port or path, or empty if absent.
pub(crate) fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default()
}
