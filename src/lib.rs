pub mod error;
pub mod config;
pub mod dispatch;
pub mod normalize;
pub mod roles;
pub mod features;
use serde::{Deserialize, Serialize};

/*

cliniq-ai is the AI contract layer for the ClinIQ clinic backend:
it turns clinical-feature inputs into constrained chat-completion
requests, sends one request to the provider, and hands back a
normalized three-way result the routing layer can persist or relay.

cliniq-ai/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Core request/result types and re-exports
│   ├── error.rs        # Custom error types and handling
│   ├── config.rs       # Dispatcher configuration (endpoint, key, knobs)
│   ├── dispatch.rs     # Prompt dispatcher + provider wire types
│   ├── normalize.rs    # Response normalizer (text vs. strict JSON)
│   ├── roles.rs        # Role/plan capability tables
│   └── features/       # Per-feature prompt + schema contracts
│       ├── mod.rs
│       ├── symptom_check.rs
│       ├── prescription.rs
│       └── triage.rs
└── tests/              # Integration tests (spy/scripted transports)

*/

// Re-export the main entry points
pub use config::AiConfig;
pub use dispatch::Dispatcher;

/// Model alias used for the `Fast` tier (low latency)
pub const FAST_MODEL: &str = "llama-3.1-8b-instant";
/// Model alias used for the `Quality` tier (higher accuracy)
pub const QUALITY_MODEL: &str = "llama-3.3-70b-versatile";

/// CLINIQ-AI STRUCTURES:

/// Named quality/latency tradeoff selecting the underlying model.
/// Unknown tier names resolve to `Quality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ModelTier
{   /// Lightweight, low-latency model
    Fast
  , /// Larger, higher-accuracy model
    Quality
}

impl ModelTier
{   /// Parse a tier name; anything unrecognized maps to `Quality`
    pub fn from_name(name: &str) -> Self
    {   match name
        {   "fast" => ModelTier::Fast
          , "quality" => ModelTier::Quality
          , other => {
              log::debug!(
                "Unknown model tier '{}', using quality",
                other
              );
              ModelTier::Quality
            }
        }
    }

    /// Resolve the tier to its concrete model alias
    pub fn model_id(&self) -> &'static str
    {   match self
        {   ModelTier::Fast => FAST_MODEL
          , ModelTier::Quality => QUALITY_MODEL
        }
    }
}

impl Default for ModelTier
{   fn default() -> Self
    {   ModelTier::Quality
    }
}

/// A single completion request, constructed fresh per call.
/// Never cached or reused across dispatches.
#[derive(Debug, Clone, PartialEq)]
pub struct AiRequest
{   /// Fixed per feature: role, output contract, domain constraints
    pub system_prompt: String
  , /// Rendered from caller-supplied clinical data; never empty
    pub user_message: String
  , /// Which model alias to use
    pub model_tier: ModelTier
  , /// Whether the reply must be a single parseable JSON object
    pub expect_json: bool
  , /// Generation budget; falls back to the configured default
    pub max_tokens: Option<u32>
}

/// Normalized outcome of one dispatch. Exactly one variant is
/// ever produced; a `Failure` with `is_fallback` set means the
/// feature degraded gracefully and the caller must treat it as
/// a normal outcome, not an exception path.
#[derive(Debug, Clone, PartialEq)]
pub enum AiResult
{   /// Parsed JSON object (when `expect_json` was set)
    Structured(serde_json::Map<String, serde_json::Value>)
  , /// Verbatim completion text (when `expect_json` was unset)
    Text(String)
  , /// Absorbed error; nothing in this crate ever propagates a
    /// fault past the dispatcher
    Failure
    {   reason: String
      , is_fallback: bool
    }
}

impl AiResult
{   /// True for either success variant
    pub fn is_success(&self) -> bool
    {   !matches!(self, AiResult::Failure { .. })
    }

    /// The failure reason, if this is a failure
    pub fn failure_reason(&self) -> Option<&str>
    {   match self
        {   AiResult::Failure { reason, .. } => Some(reason)
          , _ => None
        }
    }
}
