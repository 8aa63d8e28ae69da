//! Configuration for the AI dispatcher
//!
//! Built explicitly by the host application and handed to
//! `Dispatcher::new`, so tests can substitute values without
//! touching process environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default provider endpoint (OpenAI-compatible chat completions)
pub const DEFAULT_API_BASE: &str
  = "https://api.groq.com/openai/v1";

/// Default generation budget when a request leaves it unset
pub const DEFAULT_MAX_TOKENS: u32 = 1500;

/// Default outbound request deadline
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Keys seeded from a config template start with this prefix;
/// they are treated the same as a missing key
const PLACEHOLDER_KEY_PREFIX: &str = "your_";

/// Dispatcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig
{   /// Provider API base URL
    pub api_base: String
  , /// Provider credential; `None` or a placeholder short-circuits
    /// every dispatch to a fallback failure without network I/O
    pub api_key: Option<String>
  , /// Outbound request deadline in milliseconds
    pub timeout_ms: u64
  , /// Retry exactly once after a transport-level failure.
    /// Provider-status and parse failures never retry.
    pub retry_once: bool
  , /// Generation budget applied when the request leaves it unset
    pub default_max_tokens: u32
}

impl Default for AiConfig
{   fn default() -> Self
    {   AiConfig
        {   api_base: DEFAULT_API_BASE.to_string()
          , api_key: None
          , timeout_ms: DEFAULT_TIMEOUT_MS
          , retry_once: false
          , default_max_tokens: DEFAULT_MAX_TOKENS
        }
    }
}

impl AiConfig
{   /// Create a configuration with the given credential and
    /// defaults for everything else
    pub fn new(api_key: Option<String>) -> Self
    {   AiConfig
        {   api_key
          , ..AiConfig::default()
        }
    }

    /// Read configuration from environment variables, applying
    /// the defaults above for anything unset:
    /// CLINIQ_AI_API_KEY, CLINIQ_AI_API_BASE,
    /// CLINIQ_AI_TIMEOUT_MS, CLINIQ_AI_RETRY_ONCE,
    /// CLINIQ_AI_MAX_TOKENS
    pub fn from_env() -> Self
    {   AiConfig
        {   api_base: std::env::var("CLINIQ_AI_API_BASE")
              .ok()
              .filter(|s| !s.is_empty())
              .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
          , api_key: std::env::var("CLINIQ_AI_API_KEY")
              .ok()
              .filter(|s| !s.is_empty())
          , timeout_ms: std::env::var("CLINIQ_AI_TIMEOUT_MS")
              .ok()
              .and_then(|v| v.parse::<u64>().ok())
              .unwrap_or(DEFAULT_TIMEOUT_MS)
          , retry_once: std::env::var("CLINIQ_AI_RETRY_ONCE")
              .ok()
              .and_then(|v| v.parse::<bool>().ok())
              .unwrap_or(false)
          , default_max_tokens: std::env::var("CLINIQ_AI_MAX_TOKENS")
              .ok()
              .and_then(|v| v.parse::<u32>().ok())
              .unwrap_or(DEFAULT_MAX_TOKENS)
        }
    }

    /// The credential, if present and not a template placeholder
    pub fn usable_api_key(&self) -> Option<&str>
    {   match &self.api_key
        {   Some(key)
              if !key.is_empty()
                && !key.starts_with(PLACEHOLDER_KEY_PREFIX)
            => Some(key.as_str())
          , _ => None
        }
    }

    /// The outbound deadline as a `Duration`
    pub fn timeout(&self) -> Duration
    {   Duration::from_millis(self.timeout_ms)
    }
}
