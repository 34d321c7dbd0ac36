use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const HF_INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?;

    let env = parse_environment(&or_default("TUBESENSE_ENV", "development"));
    let bind_addr = parse_addr("TUBESENSE_BIND_ADDR", "127.0.0.1:5000")?;
    let log_level = or_default("TUBESENSE_LOG_LEVEL", "info");
    let cors_origin = or_default("TUBESENSE_CORS_ORIGIN", "http://localhost:5173");

    let youtube_base_url = or_default(
        "TUBESENSE_YOUTUBE_BASE_URL",
        "https://www.googleapis.com/youtube/v3/",
    );
    let max_comments = parse_positive_usize("TUBESENSE_MAX_COMMENTS", "500")?;
    let request_timeout_secs = parse_u64("TUBESENSE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TUBESENSE_USER_AGENT", "tubesense/0.1 (comment-analytics)");

    let keyword_model_url = or_default(
        "TUBESENSE_KEYWORD_MODEL_URL",
        &format!("{HF_INFERENCE_BASE}/yanekyuk/camembert-keyword-extractor"),
    );
    let sentiment_model_url = or_default(
        "TUBESENSE_SENTIMENT_MODEL_URL",
        &format!("{HF_INFERENCE_BASE}/nlptown/bert-base-multilingual-uncased-sentiment"),
    );
    let toxicity_model_url = or_default(
        "TUBESENSE_TOXICITY_MODEL_URL",
        &format!("{HF_INFERENCE_BASE}/s-nlp/roberta_toxicity_classifier"),
    );
    let toxic_label = or_default("TUBESENSE_TOXIC_LABEL", "toxic");
    let hf_api_token = lookup("HF_API_TOKEN").ok().filter(|t| !t.is_empty());
    let classifier_max_in_flight = parse_positive_usize("TUBESENSE_CLASSIFIER_MAX_IN_FLIGHT", "1")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cors_origin,
        youtube_api_key,
        youtube_base_url,
        max_comments,
        request_timeout_secs,
        user_agent,
        keyword_model_url,
        sentiment_model_url,
        toxicity_model_url,
        toxic_label,
        hf_api_token,
        classifier_max_in_flight,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
