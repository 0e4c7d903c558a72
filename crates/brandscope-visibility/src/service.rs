//! `VisibilityService`: the facade the server and CLI call into.

use std::sync::Arc;
use std::time::Duration;

use brandscope_core::AppConfig;
use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::articles::aggregate_articles;
use crate::error::{ProviderError, VisibilityError};
use crate::planner::plan_queries;
use crate::prompts::{run_prompts, PromptSettings};
use crate::providers::{
    AnswerEngine, ChatCompletionsEngine, DataForSeoClient, GoogleSearchClient, SearchProvider,
    SerperClient, VolumeLookup,
};
use crate::types::{ArticlesReport, CapabilityStatus, PromptsReport};

/// Per-request limits.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// How many planner queries an article run issues.
    pub article_query_limit: usize,
    pub prompts: PromptSettings,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            article_query_limit: 2,
            prompts: PromptSettings::default(),
        }
    }
}

impl ServiceSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            article_query_limit: config.article_query_limit,
            prompts: PromptSettings {
                prompt_limit: config.prompt_limit,
                inter_request_delay: Duration::from_millis(config.ai_inter_request_delay_ms),
            },
        }
    }
}

/// Brand visibility operations over whichever capabilities are configured.
///
/// Holds no per-request state; every call seeds its own RNG, so one instance
/// can be shared across concurrent requests.
pub struct VisibilityService {
    search: Option<Arc<dyn SearchProvider>>,
    engines: Vec<Arc<dyn AnswerEngine>>,
    volumes: Option<Arc<dyn VolumeLookup>>,
    settings: ServiceSettings,
}

impl VisibilityService {
    #[must_use]
    pub fn new(
        search: Option<Arc<dyn SearchProvider>>,
        engines: Vec<Arc<dyn AnswerEngine>>,
        volumes: Option<Arc<dyn VolumeLookup>>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            search,
            engines,
            volumes,
            settings,
        }
    }

    /// Wire provider clients from whatever credentials `config` carries.
    ///
    /// Serper is preferred over Google Custom Search when both are set.
    /// Engines are ordered ChatGPT, then Perplexity.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError::Upstream`] if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, VisibilityError> {
        let timeout = config.http_timeout_secs;
        let ua = config.user_agent.as_str();

        let search: Option<Arc<dyn SearchProvider>> = match (
            config.serper_api_key.as_deref(),
            config.google_search_api_key.as_deref(),
            config.google_search_engine_id.as_deref(),
        ) {
            (Some(key), _, _) => Some(Arc::new(SerperClient::new(key, timeout, ua)?)),
            (None, Some(key), Some(cx)) => {
                Some(Arc::new(GoogleSearchClient::new(key, cx, timeout, ua)?))
            }
            _ => None,
        };

        let mut engines: Vec<Arc<dyn AnswerEngine>> = Vec::new();
        if let Some(key) = config.openai_api_key.as_deref() {
            engines.push(Arc::new(ChatCompletionsEngine::openai(
                key,
                &config.openai_model,
                timeout,
                ua,
            )?));
        }
        if let Some(key) = config.perplexity_api_key.as_deref() {
            engines.push(Arc::new(ChatCompletionsEngine::perplexity(
                key,
                &config.perplexity_model,
                timeout,
                ua,
            )?));
        }

        let volumes: Option<Arc<dyn VolumeLookup>> = match (
            config.dataforseo_login.as_deref(),
            config.dataforseo_password.as_deref(),
        ) {
            (Some(login), Some(password)) => Some(Arc::new(DataForSeoClient::new(
                login, password, timeout, ua,
            )?)),
            _ => None,
        };

        let service = Self::new(search, engines, volumes, ServiceSettings::from_config(config));
        let status = service.status();
        tracing::info!(
            search_provider = status.search_provider.as_deref().unwrap_or("none"),
            answer_engines = ?status.answer_engines,
            volume_lookup = status.volume_lookup,
            "visibility service configured"
        );
        Ok(service)
    }

    /// Which capabilities are configured. No side effects.
    #[must_use]
    pub fn status(&self) -> CapabilityStatus {
        CapabilityStatus {
            search: self.search.is_some(),
            answer_engine: !self.engines.is_empty(),
            volume_lookup: self.volumes.is_some(),
            search_provider: self.search.as_ref().map(|s| s.name().to_string()),
            answer_engines: self.engines.iter().map(|e| e.name().to_string()).collect(),
        }
    }

    /// Discover, classify and rank third-party articles about `brand`.
    ///
    /// # Errors
    ///
    /// - [`VisibilityError::InvalidBrand`] if `brand` is blank.
    /// - [`VisibilityError::Configuration`] if no search provider is set.
    /// - [`VisibilityError::Upstream`] if any search call fails.
    pub async fn get_articles(&self, brand: &str) -> Result<ArticlesReport, VisibilityError> {
        let brand = validate_brand(brand)?;
        let search = self.require_search()?;

        let queries: Vec<String> = plan_queries(brand)
            .into_iter()
            .take(self.settings.article_query_limit)
            .collect();

        let mut rng = StdRng::from_os_rng();
        let articles = aggregate_articles(search.as_ref(), &queries, brand, &mut rng)
            .await
            .map_err(|e| upstream_failure(brand, "articles", e))?;

        tracing::info!(brand, count = articles.len(), "article run complete");
        Ok(ArticlesReport {
            brand: brand.to_string(),
            total: articles.len(),
            articles,
        })
    }

    /// Probe answer engines with candidate prompts about `brand`.
    ///
    /// Harvest, volume lookup and individual engine failures degrade the
    /// result rather than failing it.
    ///
    /// # Errors
    ///
    /// - [`VisibilityError::InvalidBrand`] if `brand` is blank.
    /// - [`VisibilityError::Configuration`] if no search provider or no
    ///   answer engine is set.
    pub async fn get_prompts(&self, brand: &str) -> Result<PromptsReport, VisibilityError> {
        self.get_prompts_at(brand, Utc::now().date_naive()).await
    }

    /// [`Self::get_prompts`] with the trend window anchored at `anchor`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_prompts`].
    pub async fn get_prompts_at(
        &self,
        brand: &str,
        anchor: NaiveDate,
    ) -> Result<PromptsReport, VisibilityError> {
        let brand = validate_brand(brand)?;
        let search = self.require_search()?;
        if self.engines.is_empty() {
            return Err(VisibilityError::Configuration(
                "no answer engine configured (set OPENAI_API_KEY or PERPLEXITY_API_KEY)"
                    .to_string(),
            ));
        }

        let mut rng = StdRng::from_os_rng();
        let run = run_prompts(
            search.as_ref(),
            &self.engines,
            self.volumes.as_deref(),
            brand,
            &self.settings.prompts,
            anchor,
            &mut rng,
        )
        .await;

        tracing::info!(
            brand,
            count = run.prompts.len(),
            failed_probes = run.failed_probes,
            "prompt run complete"
        );
        Ok(PromptsReport {
            brand: brand.to_string(),
            total: run.prompts.len(),
            prompts: run.prompts,
            failed_probes: run.failed_probes,
        })
    }

    fn require_search(&self) -> Result<&Arc<dyn SearchProvider>, VisibilityError> {
        self.search.as_ref().ok_or_else(|| {
            VisibilityError::Configuration(
                "no search provider configured (set SERPER_API_KEY or \
                 GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_ENGINE_ID)"
                    .to_string(),
            )
        })
    }
}

fn validate_brand(brand: &str) -> Result<&str, VisibilityError> {
    let trimmed = brand.trim();
    if trimmed.is_empty() {
        return Err(VisibilityError::InvalidBrand);
    }
    Ok(trimmed)
}

fn upstream_failure(brand: &str, operation: &str, error: ProviderError) -> VisibilityError {
    tracing::error!(brand, operation, error = %error, "upstream call failed");
    VisibilityError::Upstream(error)
}
