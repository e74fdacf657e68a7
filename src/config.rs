// src/config.rs
use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/chat_gen";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

#[derive(Clone, Debug)]
pub struct AnswerClientConfig {
    pub endpoint: String,
    /// No timeout unless configured.
    pub timeout: Option<Duration>,
    /// Treat non-2xx responses as failures instead of answers.
    pub strict_status: bool,
    /// Treat a missing `ans` field as a failure instead of appending `undefined`.
    pub require_answer: bool,
}

impl Default for AnswerClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            strict_status: false,
            require_answer: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub session_ttl: Duration,
    pub answer: AnswerClientConfig,
}

impl Config {
    /// Reads configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: bind_raw.clone() })?;

        let session_ttl = match get("SESSION_TTL_SECS") {
            Some(v) => Duration::from_secs(parse_u64("SESSION_TTL_SECS", &v)?),
            None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        let timeout = match get("ANSWER_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(parse_u64("ANSWER_TIMEOUT_SECS", &v)?)),
            None => None,
        };

        let strict_status = match get("ANSWER_STRICT_STATUS") {
            Some(v) => parse_bool("ANSWER_STRICT_STATUS", &v)?,
            None => false,
        };

        let require_answer = match get("ANSWER_REQUIRE_FIELD") {
            Some(v) => parse_bool("ANSWER_REQUIRE_FIELD", &v)?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            static_dir: get("STATIC_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("public")),
            session_ttl,
            answer: AnswerClientConfig {
                endpoint: get("ANSWER_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                timeout,
                strict_status,
                require_answer,
            },
        })
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value: value.to_string() })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: value.to_string() }),
    }
}
