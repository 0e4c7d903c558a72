//! Google Programmable Search (Custom Search JSON API) provider.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{http_client, read_json, trim_base_url, SearchProvider};
use crate::error::ProviderError;
use crate::types::{SearchItem, SearchPage};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const PROVIDER: &str = "google";

/// Search provider backed by `GET /customsearch/v1`.
///
/// The API returns organic results only; related questions and searches are
/// always empty, so prompt harvesting leans on the fallback prompts.
pub struct GoogleSearchClient {
    client: Client,
    api_key: String,
    engine_id: String,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomSearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    display_link: String,
    #[serde(default)]
    snippet: String,
    pagemap: Option<PageMap>,
}

#[derive(Debug, Deserialize)]
struct PageMap {
    #[serde(default)]
    metatags: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl CustomSearchItem {
    fn published_time(&self) -> Option<String> {
        self.pagemap
            .as_ref()?
            .metatags
            .first()?
            .get("article:published_time")?
            .as_str()
            .map(str::to_string)
    }
}

impl GoogleSearchClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(
        api_key: &str,
        engine_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, engine_id, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (wiremock in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built, or
    /// [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        engine_id: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let raw = format!("{}/customsearch/v1", trim_base_url(base_url));
        let endpoint = Url::parse(&raw).map_err(|e| ProviderError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: http_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            engine_id: engine_id.to_owned(),
            endpoint,
        })
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.engine_id)
            .append_pair("q", query)
            .append_pair("num", "10");
        url
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search(&self, query: &str) -> Result<SearchPage, ProviderError> {
        tracing::debug!(provider = PROVIDER, query, "search request");

        let response = self.client.get(self.build_url(query)).send().await?;
        let data: CustomSearchResponse = read_json(PROVIDER, query, response).await?;

        let results = data
            .items
            .into_iter()
            .filter(|item| !item.link.is_empty())
            .map(|item| {
                let publish_date = item.published_time();
                SearchItem {
                    title: item.title,
                    url: item.link,
                    display_domain: item.display_link,
                    snippet: item.snippet,
                    publish_date,
                }
            })
            .collect();

        Ok(SearchPage {
            results,
            ..SearchPage::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_encodes_query_and_fixes_result_count() {
        let client = GoogleSearchClient::with_base_url(
            "k",
            "cx1",
            30,
            "test-agent",
            "https://www.googleapis.com/",
        )
        .expect("client construction should not fail");
        let url = client.build_url("acme & co");
        assert_eq!(url.path(), "/customsearch/v1");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".to_string(), "acme & co".to_string())));
        assert!(pairs.contains(&("cx".to_string(), "cx1".to_string())));
        assert!(pairs.contains(&("num".to_string(), "10".to_string())));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = GoogleSearchClient::with_base_url("k", "cx1", 30, "ua", "not a url");
        assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
    }
}
