use crate::error::{Error, Result};
use std::env;

pub const OPTIMAL_KEYWORD_DENSITY_MIN: f64 = 1.0;
pub const OPTIMAL_KEYWORD_DENSITY_MAX: f64 = 3.0;

pub const OPTIMAL_TITLE_LENGTH_MIN: usize = 50;
pub const OPTIMAL_TITLE_LENGTH_MAX: usize = 60;

pub const OPTIMAL_META_DESC_LENGTH_MIN: usize = 150;
pub const OPTIMAL_META_DESC_LENGTH_MAX: usize = 160;

pub const RECOMMENDED_INTERNAL_LINKS_MIN: usize = 5;
pub const RECOMMENDED_INTERNAL_LINKS_MAX: usize = 10;

pub const MIN_WORD_COUNT: usize = 300;

pub const TOP_RECOMMENDATIONS: usize = 8;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_LLM_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let llm_model = env::var("SEO_LLM_MODEL")
            .unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());

        let request_timeout_secs = match env::var("SEO_REQUEST_TIMEOUT") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(Error::Config(format!(
                        "SEO_REQUEST_TIMEOUT must be a positive number of seconds, got '{}'",
                        raw
                    )))
                }
            },
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let user_agent = env::var("SEO_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            anthropic_api_key,
            llm_model,
            request_timeout_secs,
            user_agent,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub enable_ai: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            enable_ai: false,
        }
    }
}
