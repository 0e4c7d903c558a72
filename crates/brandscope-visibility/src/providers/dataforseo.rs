//! DataForSEO Google Ads search-volume lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{http_client, read_json, trim_base_url, VolumeLookup};
use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api.dataforseo.com";
const PROVIDER: &str = "dataforseo";

/// United States.
const LOCATION_CODE: u32 = 2840;
const LANGUAGE_CODE: &str = "en";

/// Bulk volume lookup backed by the live Google Ads search-volume endpoint.
pub struct DataForSeoClient {
    client: Client,
    login: String,
    password: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct VolumeTask<'a> {
    keywords: &'a [String],
    location_code: u32,
    language_code: &'static str,
}

#[derive(Debug, Deserialize)]
struct VolumeResponse {
    #[serde(default)]
    tasks: Vec<VolumeTaskResult>,
}

#[derive(Debug, Deserialize)]
struct VolumeTaskResult {
    #[serde(default)]
    result: Option<Vec<KeywordVolume>>,
}

#[derive(Debug, Deserialize)]
struct KeywordVolume {
    keyword: String,
    search_volume: Option<u64>,
}

impl DataForSeoClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(
        login: &str,
        password: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(login, password, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (wiremock in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        login: &str,
        password: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http_client(timeout_secs, user_agent)?,
            login: login.to_owned(),
            password: password.to_owned(),
            base_url: trim_base_url(base_url),
        })
    }
}

#[async_trait]
impl VolumeLookup for DataForSeoClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn volumes(&self, terms: &[String]) -> Result<HashMap<String, u64>, ProviderError> {
        if terms.is_empty() {
            return Ok(HashMap::new());
        }
        tracing::debug!(provider = PROVIDER, count = terms.len(), "volume lookup");

        let body = [VolumeTask {
            keywords: terms,
            location_code: LOCATION_CODE,
            language_code: LANGUAGE_CODE,
        }];
        let response = self
            .client
            .post(format!(
                "{}/v3/keywords_data/google_ads/search_volume/live",
                self.base_url
            ))
            .basic_auth(&self.login, Some(&self.password))
            .json(&body)
            .send()
            .await?;
        let data: VolumeResponse = read_json(PROVIDER, "search_volume", response).await?;

        Ok(data
            .tasks
            .into_iter()
            .filter_map(|task| task.result)
            .flatten()
            .filter_map(|entry| entry.search_volume.map(|volume| (entry.keyword, volume)))
            .collect())
    }
}
