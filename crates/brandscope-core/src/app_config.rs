use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub serper_api_key: Option<String>,
    pub google_search_api_key: Option<String>,
    pub google_search_engine_id: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub perplexity_api_key: Option<String>,
    pub perplexity_model: String,
    pub dataforseo_login: Option<String>,
    pub dataforseo_password: Option<String>,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub article_query_limit: usize,
    pub prompt_limit: usize,
    pub ai_inter_request_delay_ms: u64,
}

impl AppConfig {
    /// Whether any search provider credential is present.
    #[must_use]
    pub fn has_search(&self) -> bool {
        self.serper_api_key.is_some() || self.google_search_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("serper_api_key", &redact(&self.serper_api_key))
            .field("google_search_api_key", &redact(&self.google_search_api_key))
            .field("google_search_engine_id", &self.google_search_engine_id)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("openai_model", &self.openai_model)
            .field("perplexity_api_key", &redact(&self.perplexity_api_key))
            .field("perplexity_model", &self.perplexity_model)
            .field("dataforseo_login", &self.dataforseo_login)
            .field("dataforseo_password", &redact(&self.dataforseo_password))
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("article_query_limit", &self.article_query_limit)
            .field("prompt_limit", &self.prompt_limit)
            .field("ai_inter_request_delay_ms", &self.ai_inter_request_delay_ms)
            .finish()
    }
}
