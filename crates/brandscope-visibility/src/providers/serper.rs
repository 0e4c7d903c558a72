//! Serper (Google results API) search provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{host_of, http_client, read_json, trim_base_url, SearchProvider};
use crate::error::ProviderError;
use crate::types::{SearchItem, SearchPage};

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";
const PROVIDER: &str = "serper";

/// Search provider backed by `POST /search` on the Serper API.
///
/// Serper is the only configured provider that returns "people also ask"
/// questions and related searches, so prompt harvesting works best with it.
pub struct SerperClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganic>,
    #[serde(default)]
    people_also_ask: Vec<SerperQuestion>,
    #[serde(default)]
    related_searches: Vec<SerperRelated>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerperQuestion {
    #[serde(default)]
    question: String,
}

#[derive(Debug, Deserialize)]
struct SerperRelated {
    #[serde(default)]
    query: String,
}

impl SerperClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (wiremock in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            base_url: trim_base_url(base_url),
        })
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search(&self, query: &str) -> Result<SearchPage, ProviderError> {
        tracing::debug!(provider = PROVIDER, query, "search request");

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await?;
        let data: SerperResponse = read_json(PROVIDER, query, response).await?;

        let results = data
            .organic
            .into_iter()
            .filter(|item| !item.link.is_empty())
            .map(|item| SearchItem {
                display_domain: host_of(&item.link),
                title: item.title,
                url: item.link,
                snippet: item.snippet,
                publish_date: item.date,
            })
            .collect();

        Ok(SearchPage {
            results,
            related_questions: data
                .people_also_ask
                .into_iter()
                .map(|q| q.question)
                .filter(|q| !q.trim().is_empty())
                .collect(),
            related_searches: data
                .related_searches
                .into_iter()
                .map(|r| r.query)
                .filter(|q| !q.trim().is_empty())
                .collect(),
        })
    }
}
