//! Response normalizer
//!
//! Validates the raw completion text against the caller's declared
//! expectation. Centralizing this here gives every call site the
//! same "garbage in, structured failure out" behavior.

use log::{debug, error};

/// Normalize a raw completion per the caller's expectation.
///
/// `expect_json=false` wraps the text verbatim. `expect_json=true`
/// requires a single JSON object; anything else (parse error, or a
/// top-level array/scalar) degrades to a fallback failure. Pure
/// function of its inputs; calling it twice on the same pair yields
/// structurally equal results.
pub fn normalize(
  raw_text: &str
, expect_json: bool
) -> crate::AiResult
{   if !expect_json
    {   return crate::AiResult::Text(raw_text.to_string());
    }

    match serde_json::from_str::<serde_json::Value>(raw_text)
    {   Ok(serde_json::Value::Object(map)) => {
          debug!(
            "Normalized structured response with {} fields",
            map.len()
          );
          crate::AiResult::Structured(map)
        }
      , Ok(other) => {
          error!(
            "Expected a JSON object, got {}",
            json_kind(&other)
          );
          crate::error::Error::MalformedJson.into_failure()
        }
      , Err(e) => {
          error!("JSON parse error: {}", e);
          crate::error::Error::MalformedJson.into_failure()
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str
{   match value
    {   serde_json::Value::Null => "null"
      , serde_json::Value::Bool(_) => "a boolean"
      , serde_json::Value::Number(_) => "a number"
      , serde_json::Value::String(_) => "a string"
      , serde_json::Value::Array(_) => "an array"
      , serde_json::Value::Object(_) => "an object"
    }
}
