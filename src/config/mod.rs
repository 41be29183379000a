use crate::error::{ApiError, Result};
use ::config::{Environment, Source};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_APP_TITLE: &str = "Book Recommendation MCP";

/// Process-wide settings, read once at startup.
///
/// Field names mirror the environment variables they come from
/// (`OPENROUTER_API_KEY` -> `openrouter_api_key`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub openrouter_model: String,
    pub openrouter_temperature: f32,
    pub openrouter_max_tokens: u32,
    pub openrouter_timeout_seconds: u64,
    pub openrouter_max_concurrent_requests: usize,
    pub your_site_url: String,
    pub app_title: String,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_source(Environment::default())
    }

    /// Layer the given source over the built-in defaults and validate the result.
    pub fn from_source<S>(source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = ::config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("openrouter_base_url", DEFAULT_BASE_URL)?
            .set_default("openrouter_model", DEFAULT_MODEL)?
            .set_default("openrouter_temperature", 0.7)?
            .set_default("openrouter_max_tokens", 1500)?
            .set_default("openrouter_timeout_seconds", 60)?
            .set_default("openrouter_max_concurrent_requests", 16)?
            .set_default("your_site_url", DEFAULT_SITE_URL)?
            .set_default("app_title", DEFAULT_APP_TITLE)?
            .add_source(source)
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.openrouter_base_url.trim_end_matches('/')
        )
    }

    fn validate(&self) -> Result<()> {
        if self.openrouter_api_key.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "OPENROUTER_API_KEY is empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.openrouter_temperature) {
            return Err(ApiError::ConfigError(format!(
                "OPENROUTER_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.openrouter_temperature
            )));
        }
        if self.openrouter_max_tokens == 0 {
            return Err(ApiError::ConfigError(
                "OPENROUTER_MAX_TOKENS must be greater than zero".to_string(),
            ));
        }
        if self.openrouter_timeout_seconds == 0 {
            return Err(ApiError::ConfigError(
                "OPENROUTER_TIMEOUT_SECONDS must be greater than zero".to_string(),
            ));
        }
        if self.openrouter_max_concurrent_requests == 0 {
            return Err(ApiError::ConfigError(
                "OPENROUTER_MAX_CONCURRENT_REQUESTS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::{File, FileFormat};

    fn from_json(json: &str) -> Result<Config> {
        Config::from_source(File::from_str(json, FileFormat::Json))
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_json(r#"{ "openrouter_api_key": "sk-test" }"#).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.openrouter_model, DEFAULT_MODEL);
        assert_eq!(config.openrouter_max_tokens, 1500);
        assert_eq!(config.openrouter_max_concurrent_requests, 16);
        assert_eq!(config.your_site_url, DEFAULT_SITE_URL);
        assert_eq!(
            config.completions_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = from_json("{}");
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let result = from_json(r#"{ "openrouter_api_key": "   " }"#);
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let result = from_json(
            r#"{ "openrouter_api_key": "sk-test", "openrouter_temperature": 3.5 }"#,
        );
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let config = from_json(
            r#"{ "openrouter_api_key": "sk-test", "openrouter_base_url": "http://127.0.0.1:9000/v1/" }"#,
        )
        .unwrap();

        assert_eq!(
            config.completions_url(),
            "http://127.0.0.1:9000/v1/chat/completions"
        );
    }
}
