use std::{env, fs, path::Path};

use serde::Deserialize;

const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ANSWER_BASE_URL: &str = "https://api.tavily.com";
const DEFAULT_SEARCH_DEPTH: &str = "basic";
/// default per-tier request timeout in milliseconds
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// tier-1 chat-completion resolver config; absent means the tier is skipped
    pub chat: Option<ChatConfig>,
    /// tier-2 answer resolver config; absent means the tier is skipped
    pub answer: Option<AnswerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// api key for the chat-completion endpoint
    pub api_key: String,
    #[serde(default = "default_chat_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    /// request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerConfig {
    /// api key for the AI-answer endpoint
    pub api_key: String,
    #[serde(default = "default_answer_base_url")]
    pub base_url: String,
    #[serde(default = "default_search_depth")]
    pub search_depth: String,
    /// request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_chat_base_url() -> String {
    DEFAULT_CHAT_BASE_URL.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_answer_base_url() -> String {
    DEFAULT_ANSWER_BASE_URL.to_string()
}

fn default_search_depth() -> String {
    DEFAULT_SEARCH_DEPTH.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Self {
        let data = fs::read_to_string(path.as_ref()).expect(&format!("failed to load config file {:?}", path.as_ref()));

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Self {
        let config = toml::from_str::<Config>(toml_str).expect("failed to parse the toml str");
        config
    }

    /// Builds a config from the process environment. A tier is configured
    /// only when its api key variable is set and non-empty; a missing key
    /// never raises, it just leaves the tier disabled.
    pub fn from_env() -> Self {
        let chat = non_empty_var("OPENAI_API_KEY").map(|api_key| ChatConfig {
            api_key,
            base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| default_chat_base_url()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| default_chat_model()),
            timeout: timeout_var("OPENAI_TIMEOUT_MS"),
        });

        let answer = non_empty_var("TAVILY_API_KEY").map(|api_key| AnswerConfig {
            api_key,
            base_url: env::var("TAVILY_BASE_URL").unwrap_or_else(|_| default_answer_base_url()),
            search_depth: env::var("TAVILY_SEARCH_DEPTH").unwrap_or_else(|_| default_search_depth()),
            timeout: timeout_var("TAVILY_TIMEOUT_MS"),
        });

        Self {
            chat,
            answer,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn timeout_var(name: &str) -> u64 {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_TIMEOUT_MS)
}
