use async_trait::async_trait;
use log::{debug, trace, error, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ===== Wire Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

/// Output-framing hint; asks the provider to emit a single JSON
/// object. A hint only — parsing stays defensive downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat
{   #[serde(rename = "type")]
    pub format_type: String
}

impl ResponseFormat
{   pub fn json_object() -> Self
    {   ResponseFormat
        {   format_type: "json_object".to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest
{   pub model: String
  , pub max_tokens: u32
  , pub messages: Vec<ChatMessage>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   #[serde(default)]
    pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody
{   error: Option<ErrorDetail>
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorDetail
{   message: Option<String>
}

// ===== Transport Seam =====

/// Raw provider reply before status/payload interpretation
#[derive(Debug, Clone)]
pub struct ProviderReply
{   pub status: u16
  , pub body: String
}

impl ProviderReply
{   pub fn is_success(&self) -> bool
    {   (200..300).contains(&self.status)
    }
}

/// One round trip to the completion endpoint. The dispatcher owns
/// all interpretation; implementations only move bytes. Test
/// doubles implement this to count calls or script replies.
#[async_trait]
pub trait CompletionTransport: Send + Sync
{   async fn execute(
      &self
    , api_key: &str
    , body: &ChatRequest
    ) -> Result<ProviderReply, crate::error::Error>;
}

/// reqwest-backed transport with the configured deadline
pub struct HttpTransport
{   http: reqwest::Client
  , endpoint: String
}

impl HttpTransport
{   pub fn new(config: &crate::AiConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating HttpTransport");
        let http = reqwest::Client::builder()
          .timeout(config.timeout())
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            crate::error::Error::InvalidConfiguration(
              e.to_string()
            )
          })?;

        Ok(HttpTransport
        {   http
          , endpoint: format!(
              "{}/chat/completions",
              config.api_base.trim_end_matches('/')
            )
        })
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport
{   async fn execute(
      &self
    , api_key: &str
    , body: &ChatRequest
    ) -> Result<ProviderReply, crate::error::Error>
    {   trace!("POST {}", self.endpoint);

        let response = self.http
          .post(&self.endpoint)
          .header("Authorization", format!("Bearer {}", api_key))
          .header("Content-Type", "application/json")
          .json(body)
          .send()
          .await
          .map_err(|e| {
            if e.is_timeout()
            {   error!("Provider request timed out");
                crate::error::Error::Timeout
            } else
            {   error!("HTTP error: {}", e);
                crate::error::Error::HttpError(e.to_string())
            }
          })?;

        let status = response.status().as_u16();
        trace!("Provider response status: {}", status);

        let body = response.text().await
          .map_err(|e| {
            error!("Failed to read provider body: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        Ok(ProviderReply { status, body })
    }
}

// ===== Prompt Dispatcher =====

/// Issues the single outbound model-completion request and returns
/// the normalized three-way result. Stateless per call: concurrent
/// dispatches share nothing mutable and need no coordination.
pub struct Dispatcher
{   config: crate::AiConfig
  , transport: Arc<dyn CompletionTransport>
}

impl Dispatcher
{   /// Create a dispatcher over the real HTTP transport
    pub fn new(config: crate::AiConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating Dispatcher");
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Dispatcher
        {   config
          , transport
        })
    }

    /// Create a dispatcher over a caller-supplied transport
    /// (test doubles, alternative providers)
    pub fn with_transport(
      config: crate::AiConfig
    , transport: Arc<dyn CompletionTransport>
    ) -> Self
    {   Dispatcher
        {   config
          , transport
        }
    }

    /// Dispatch one request: single round trip, no queuing.
    /// Every error kind is absorbed into a fallback-flagged
    /// `Failure`; this never returns a fault to the caller.
    pub async fn dispatch(
      &self
    , request: &crate::AiRequest
    ) -> crate::AiResult
    {   debug!(
          "Dispatching request (tier: {:?}, expect_json: {})",
          request.model_tier, request.expect_json
        );
        match self.try_dispatch(request).await
        {   Ok(result) => result
          , Err(e) => {
              error!("Dispatch failed: {}", e);
              e.into_failure()
            }
        }
    }

    async fn try_dispatch(
      &self
    , request: &crate::AiRequest
    ) -> Result<crate::AiResult, crate::error::Error>
    {   if request.system_prompt.trim().is_empty()
        {   return Err(crate::error::Error::EmptyPrompt(
              "system prompt".to_string()
            ));
        }
        if request.user_message.trim().is_empty()
        {   return Err(crate::error::Error::EmptyPrompt(
              "user message".to_string()
            ));
        }

        // Fast-fail before any I/O when no credential is usable
        let api_key = match self.config.usable_api_key()
        {   Some(key) => key.to_string()
          , None => {
              warn!(
                "API key missing or placeholder, returning fallback"
              );
              return Err(crate::error::Error::MissingApiKey);
            }
        };

        let body = ChatRequest
        {   model: request.model_tier.model_id().to_string()
          , max_tokens: request.max_tokens
              .unwrap_or(self.config.default_max_tokens)
          , messages: vec![
              ChatMessage
              {   role: "system".to_string()
                , content: request.system_prompt.clone()
              }
            , ChatMessage
              {   role: "user".to_string()
                , content: request.user_message.clone()
              }
            ]
          , response_format: request.expect_json
              .then(ResponseFormat::json_object)
        };

        trace!("Chat request: {:?}", body);

        let reply
          = self.send_with_retry(&api_key, &body).await?;

        if !reply.is_success()
        {   error!(
              "Provider HTTP {}: {}", reply.status, reply.body
            );
            return Err(crate::error::Error::ApiError
            {   status: reply.status
              , message: extract_error_message(&reply.body)
            });
        }

        let chat: ChatResponse
          = serde_json::from_str(&reply.body)
            .map_err(|e| {
              error!("Unreadable provider envelope: {}", e);
              crate::error::Error::Other(format!(
                "Unreadable provider response: {}", e
              ))
            })?;

        let completion = chat.choices.first()
          .map(|c| c.message.content.clone())
          .unwrap_or_default();

        if completion.is_empty()
        {   error!("Provider returned no completion text");
            return Err(crate::error::Error::EmptyCompletion);
        }

        Ok(crate::normalize::normalize(
          &completion,
          request.expect_json
        ))
    }

    /// One attempt, plus exactly one more after a transport-level
    /// failure when `retry_once` is configured. Provider-status
    /// and parse failures are terminal.
    async fn send_with_retry(
      &self
    , api_key: &str
    , body: &ChatRequest
    ) -> Result<ProviderReply, crate::error::Error>
    {   match self.transport.execute(api_key, body).await
        {   Ok(reply) => Ok(reply)
          , Err(e) if self.config.retry_once
              && is_transport_error(&e)
            => {
              warn!("Transport failure ({}), retrying once", e);
              self.transport.execute(api_key, body).await
            }
          , Err(e) => Err(e)
        }
    }
}

fn is_transport_error(e: &crate::error::Error) -> bool
{   matches!(
      e,
      crate::error::Error::HttpError(_)
        | crate::error::Error::Timeout
    )
}

/// Best-effort extraction of the provider's error message field
fn extract_error_message(body: &str) -> Option<String>
{   serde_json::from_str::<ErrorBody>(body)
      .ok()
      .and_then(|b| b.error)
      .and_then(|e| e.message)
      .filter(|m| !m.is_empty())
}
