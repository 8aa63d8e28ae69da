use std::fmt;

/// Custom error type for cliniq-ai operations
/// Implements Clone so results can cross task boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API credential absent or a known placeholder value
    MissingApiKey
  , /// A required prompt field was empty
    EmptyPrompt(String)
  , /// Transport-level failure (connect, DNS, TLS)
    HttpError(String)
  , /// The outbound request hit the configured deadline
    Timeout
  , /// Provider answered with a non-success status
    ApiError
    {   status: u16
      , message: Option<String>
    }
  , /// Provider answered 2xx but with no completion text
    EmptyCompletion
  , /// JSON output was requested but could not be parsed
    MalformedJson
  , /// A feature schema field was missing or empty
    MissingField(String)
  , /// Caller-supplied feature input failed validation
    InvalidInput(String)
  , /// Role is not authorized for the requested capability
    RoleDenied(crate::roles::Role)
  , /// Capability requires a higher subscription plan
    PlanRequired(crate::roles::Plan)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey => {
              write!(f,
                "AI service unavailable — API key not configured"
              )
            }
          , Error::EmptyPrompt(which) => {
              write!(f, "Empty {} in AI request", which)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::ApiError { status, message } => {
              match message
              {   Some(msg) => write!(f, "{}", msg)
                , None => write!(
                    f, "provider returned {}", status
                  )
              }
            }
          , Error::EmptyCompletion => {
              write!(f, "empty response from provider")
            }
          , Error::MalformedJson => {
              write!(f,
                "AI returned malformed JSON — could not parse response"
              )
            }
          , Error::MissingField(field) => {
              write!(f,
                "AI response missing required field: {}",
                field
              )
            }
          , Error::InvalidInput(msg) => {
              write!(f, "{}", msg)
            }
          , Error::RoleDenied(role) => {
              write!(f,
                "Role {:?} is not authorized for this feature",
                role
              )
            }
          , Error::PlanRequired(plan) => {
              write!(f, "Requires {:?} subscription", plan)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error
{   /// Absorb this error into the dispatcher's result contract.
    /// Every error kind surfaces as a fallback-flagged failure;
    /// nothing escapes the dispatch path as a fault.
    pub fn into_failure(self) -> crate::AiResult
    {   crate::AiResult::Failure
        {   reason: self.to_string()
          , is_fallback: true
        }
    }
}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
