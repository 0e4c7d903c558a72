use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Highest planner prefix the article aggregator may be configured to issue.
const MAX_ARTICLE_QUERIES: usize = 4;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a credential pair is incomplete or a value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a credential pair is incomplete or a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `.env` templates with `KEY=` stay inert.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("BRANDSCOPE_ENV", "development"))?;

    let bind_addr = or_default("BRANDSCOPE_BIND_ADDR", "0.0.0.0:3001")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BRANDSCOPE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("BRANDSCOPE_LOG_LEVEL", "info");

    let serper_api_key = optional("SERPER_API_KEY");
    let google_search_api_key = optional("GOOGLE_SEARCH_API_KEY");
    let google_search_engine_id = optional("GOOGLE_SEARCH_ENGINE_ID");
    require_pair(
        ("GOOGLE_SEARCH_API_KEY", google_search_api_key.as_ref()),
        ("GOOGLE_SEARCH_ENGINE_ID", google_search_engine_id.as_ref()),
    )?;

    let openai_api_key = optional("OPENAI_API_KEY");
    let openai_model = or_default("OPENAI_MODEL", "gpt-4o-mini");
    let perplexity_api_key = optional("PERPLEXITY_API_KEY");
    let perplexity_model = or_default("PERPLEXITY_MODEL", "sonar");

    let dataforseo_login = optional("DATAFORSEO_LOGIN");
    let dataforseo_password = optional("DATAFORSEO_PASSWORD");
    require_pair(
        ("DATAFORSEO_LOGIN", dataforseo_login.as_ref()),
        ("DATAFORSEO_PASSWORD", dataforseo_password.as_ref()),
    )?;

    let http_timeout_secs = parse_u64("BRANDSCOPE_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BRANDSCOPE_USER_AGENT", "brandscope/0.1 (brand-visibility)");

    let article_query_limit = parse_usize("BRANDSCOPE_ARTICLE_QUERY_LIMIT", "2")?;
    if article_query_limit == 0 || article_query_limit > MAX_ARTICLE_QUERIES {
        return Err(invalid(
            "BRANDSCOPE_ARTICLE_QUERY_LIMIT",
            format!("must be between 1 and {MAX_ARTICLE_QUERIES}, got {article_query_limit}"),
        ));
    }

    let prompt_limit = parse_usize("BRANDSCOPE_PROMPT_LIMIT", "10")?;
    if prompt_limit == 0 {
        return Err(invalid(
            "BRANDSCOPE_PROMPT_LIMIT",
            "must be at least 1".to_string(),
        ));
    }

    let ai_inter_request_delay_ms = parse_u64("BRANDSCOPE_AI_INTER_REQUEST_DELAY_MS", "250")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        serper_api_key,
        google_search_api_key,
        google_search_engine_id,
        openai_api_key,
        openai_model,
        perplexity_api_key,
        perplexity_model,
        dataforseo_login,
        dataforseo_password,
        http_timeout_secs,
        user_agent,
        article_query_limit,
        prompt_limit,
        ai_inter_request_delay_ms,
    })
}

/// Credentials that only work together: one set without the other is an error.
fn require_pair(
    (first_var, first): (&str, Option<&String>),
    (second_var, second): (&str, Option<&String>),
) -> Result<(), ConfigError> {
    match (first, second) {
        (Some(_), None) => Err(ConfigError::MissingEnvVar(second_var.to_string())),
        (None, Some(_)) => Err(ConfigError::MissingEnvVar(first_var.to_string())),
        _ => Ok(()),
    }
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDSCOPE_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
