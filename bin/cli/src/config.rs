use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use dcat_quality_core::llm_client::config::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};
use dcat_quality_core::{LlmConfig, SystemPersona};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// OpenAI API key. Absence is reported on the first completion call.
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,

    /// OpenAI base URL (optional)
    pub openai_base_url: Option<String>,

    /// Model name for LLM operations
    pub model_name: String,

    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,

    #[validate(range(min = 1))]
    pub max_tokens: u32,

    /// Per-call timeout in seconds
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: None,
            model_name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup, then validate them
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Settings::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let settings = Settings {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url: non_empty("OPENAI_BASE_URL"),
            model_name: non_empty("MODEL_NAME").unwrap_or(defaults.model_name),
            temperature: parse_var(&non_empty, "LLM_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_var(&non_empty, "LLM_MAX_TOKENS", defaults.max_tokens)?,
            timeout_secs: parse_var(&non_empty, "LLM_TIMEOUT_SECS", defaults.timeout_secs)?,
        };

        settings
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
        Ok(settings)
    }

    pub fn llm_config(&self, persona: SystemPersona) -> LlmConfig {
        let mut config = LlmConfig::new()
            .with_model(self.model_name.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_persona(persona);
        if let Some(api_key) = &self.openai_api_key {
            config = config.with_api_key(api_key.clone());
        }
        if let Some(base_url) = &self.openai_base_url {
            config = config.with_base_url(base_url.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert!(settings.openai_api_key.is_none());
        assert_eq!(settings.model_name, "gpt-4o");
        assert_eq!(settings.temperature, 0.5);
        assert_eq!(settings.max_tokens, 4096);
        assert_eq!(settings.timeout_secs, 120);
    }

    #[test]
    fn test_reads_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MODEL_NAME", "gpt-4o-mini"),
            ("LLM_TEMPERATURE", "0.2"),
            ("LLM_MAX_TOKENS", "1024"),
            ("LLM_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        let config = settings.llm_config(SystemPersona::StatisticsOffice);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.persona, SystemPersona::StatisticsOffice);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let settings = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(settings.openai_api_key.is_none());
    }

    #[test]
    fn test_rejects_unparseable_number() {
        let err = Settings::from_lookup(lookup(&[("LLM_MAX_TOKENS", "viele")])).unwrap_err();
        assert!(err.to_string().contains("LLM_MAX_TOKENS"));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Settings::from_lookup(lookup(&[("LLM_TEMPERATURE", "3.5")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("LLM_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let settings = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret")])).unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
