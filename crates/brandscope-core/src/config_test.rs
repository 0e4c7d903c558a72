use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BRANDSCOPE_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3001");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.serper_api_key.is_none());
    assert!(cfg.google_search_api_key.is_none());
    assert!(cfg.openai_api_key.is_none());
    assert!(cfg.perplexity_api_key.is_none());
    assert!(cfg.dataforseo_login.is_none());
    assert_eq!(cfg.openai_model, "gpt-4o-mini");
    assert_eq!(cfg.perplexity_model, "sonar");
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "brandscope/0.1 (brand-visibility)");
    assert_eq!(cfg.article_query_limit, 2);
    assert_eq!(cfg.prompt_limit, 10);
    assert_eq!(cfg.ai_inter_request_delay_ms, 250);
    assert!(!cfg.has_search());
}

#[test]
fn build_app_config_reads_credentials() {
    let mut map = HashMap::new();
    map.insert("SERPER_API_KEY", "serper-key");
    map.insert("OPENAI_API_KEY", "sk-test");
    map.insert("OPENAI_MODEL", "gpt-4o");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.serper_api_key.as_deref(), Some("serper-key"));
    assert_eq!(cfg.openai_api_key.as_deref(), Some("sk-test"));
    assert_eq!(cfg.openai_model, "gpt-4o");
    assert!(cfg.has_search());
}

#[test]
fn build_app_config_treats_blank_credentials_as_unset() {
    let mut map = HashMap::new();
    map.insert("OPENAI_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.openai_api_key.is_none());
}

#[test]
fn build_app_config_fails_with_google_key_but_no_engine_id() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_SEARCH_API_KEY", "google-key");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_SEARCH_ENGINE_ID"),
        "expected MissingEnvVar(GOOGLE_SEARCH_ENGINE_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_dataforseo_password_but_no_login() {
    let mut map = HashMap::new();
    map.insert("DATAFORSEO_PASSWORD", "secret");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DATAFORSEO_LOGIN"),
        "expected MissingEnvVar(DATAFORSEO_LOGIN), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("BRANDSCOPE_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDSCOPE_BIND_ADDR"),
        "expected InvalidEnvVar(BRANDSCOPE_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_on_invalid_brandscope_env() {
    let mut map = HashMap::new();
    map.insert("BRANDSCOPE_ENV", "producton");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDSCOPE_ENV"),
        "expected InvalidEnvVar(BRANDSCOPE_ENV), got: {result:?}"
    );
}

#[test]
fn article_query_limit_override() {
    let mut map = HashMap::new();
    map.insert("BRANDSCOPE_ARTICLE_QUERY_LIMIT", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.article_query_limit, 3);
}

#[test]
fn article_query_limit_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("BRANDSCOPE_ARTICLE_QUERY_LIMIT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDSCOPE_ARTICLE_QUERY_LIMIT"),
        "expected InvalidEnvVar(BRANDSCOPE_ARTICLE_QUERY_LIMIT), got: {result:?}"
    );
}

#[test]
fn article_query_limit_rejects_more_than_planner_offers() {
    let mut map = HashMap::new();
    map.insert("BRANDSCOPE_ARTICLE_QUERY_LIMIT", "5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDSCOPE_ARTICLE_QUERY_LIMIT"),
        "expected InvalidEnvVar(BRANDSCOPE_ARTICLE_QUERY_LIMIT), got: {result:?}"
    );
}

#[test]
fn prompt_limit_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("BRANDSCOPE_PROMPT_LIMIT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDSCOPE_PROMPT_LIMIT"),
        "expected InvalidEnvVar(BRANDSCOPE_PROMPT_LIMIT), got: {result:?}"
    );
}

#[test]
fn ai_inter_request_delay_ms_invalid() {
    let mut map = HashMap::new();
    map.insert("BRANDSCOPE_AI_INTER_REQUEST_DELAY_MS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDSCOPE_AI_INTER_REQUEST_DELAY_MS"),
        "expected InvalidEnvVar(BRANDSCOPE_AI_INTER_REQUEST_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("OPENAI_API_KEY", "sk-very-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("sk-very-secret"));
    assert!(rendered.contains("[redacted]"));
}
