//! OpenAI-compatible chat completions answer engine.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{http_client, read_json, trim_base_url, AnswerEngine};
use crate::error::ProviderError;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

const PROVIDER: &str = "chat_completions";

/// An answer engine speaking the `POST {base}/chat/completions` protocol.
///
/// OpenAI and Perplexity share the wire format, so one client serves both;
/// `name` is what gets recorded on prompts the engine mentioned the brand in.
pub struct ChatCompletionsEngine {
    client: Client,
    name: String,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionsEngine {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(
        name: &str,
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http_client(timeout_secs, user_agent)?,
            name: name.to_owned(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: trim_base_url(base_url),
        })
    }

    /// The "ChatGPT" engine against the OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn openai(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::new("ChatGPT", api_key, model, OPENAI_BASE_URL, timeout_secs, user_agent)
    }

    /// The "Perplexity" engine against the Perplexity API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn perplexity(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::new(
            "Perplexity",
            api_key,
            model,
            PERPLEXITY_BASE_URL,
            timeout_secs,
            user_agent,
        )
    }
}

#[async_trait]
impl AnswerEngine for ChatCompletionsEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        tracing::debug!(engine = %self.name, model = %self.model, "chat completion request");

        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let data: ChatResponse = read_json(PROVIDER, &self.name, response).await?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse { provider: PROVIDER })
    }
}
