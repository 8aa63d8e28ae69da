//! Smart triage: visit-urgency assessment for the front desk
//! and doctors

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// System prompt for the triage feature
pub const SMART_TRIAGE_SYSTEM: &str = r#"You are an intelligent triage assistant at ClinIQ Pro clinic. You help the front desk and doctors quickly assess the urgency of an incoming patient visit based on the provided reason and patient details.

RULES:
1. Respond with ONLY a valid JSON object — no markdown, no extra text.
2. "priority" must be exactly one of: "Emergency", "Urgent", "Semi-Urgent", "Routine"
3. "waitTime" is the recommended maximum wait time (e.g., "Immediately", "Within 1 hour", "Within 24 hours", "Schedule within a week")
4. "recommendation" is a concise, actionable note for the receptionist (1 sentence)
5. "flagForDoctor" is a boolean — true if the doctor should be informed immediately

OUTPUT FORMAT:
{
  "priority": "Emergency | Urgent | Semi-Urgent | Routine",
  "waitTime": "string",
  "recommendation": "string",
  "flagForDoctor": true | false
}"#;

/// Generation budget for a triage assessment
const TRIAGE_MAX_TOKENS: u32 = 300;

/// Caller-supplied incoming visit
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TriageVisit
{   /// Reason for visit as given at the front desk
    pub reason: Option<String>
  , /// Chief complaint, used when no reason was recorded
    pub chief_complaint: Option<String>
  , pub age: Option<u16>
}

impl TriageVisit
{   /// Validate the visit and build the dispatch request
    pub fn to_request(&self)
      -> Result<crate::AiRequest, crate::error::Error>
    {   let reason = self.reason
          .as_deref()
          .map(str::trim)
          .filter(|s| !s.is_empty())
          .or_else(|| {
            self.chief_complaint
              .as_deref()
              .map(str::trim)
              .filter(|s| !s.is_empty())
          });

        let reason = match reason
        {   Some(r) => r
          , None => {
              return Err(crate::error::Error::InvalidInput(
                "Reason for visit is required.".to_string()
              ));
            }
        };

        let user_message = format!(
          "Triage the following patient visit:\n\n\
           Patient Age: {}\n\
           Reason for Visit: {}\n\n\
           Assess urgency and provide your triage recommendation.",
          self.age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
          reason
        );

        debug!("Built triage request");
        Ok(crate::AiRequest
        {   system_prompt: SMART_TRIAGE_SYSTEM.to_string()
          , user_message
          , model_tier: crate::ModelTier::Fast
          , expect_json: true
          , max_tokens: Some(TRIAGE_MAX_TOKENS)
        })
    }
}

/// Closed priority scale; out-of-enum labels pass through as
/// `Unknown`, same policy as the symptom-check risk scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority
{   Emergency
  , Urgent
  , SemiUrgent
  , Routine
  , Unknown
}

impl Priority
{   /// Map the provider's label onto the closed scale
    pub fn from_label(label: &str) -> Self
    {   match label
        {   "Emergency" => Priority::Emergency
          , "Urgent" => Priority::Urgent
          , "Semi-Urgent" => Priority::SemiUrgent
          , "Routine" => Priority::Routine
          , other => {
              warn!(
                "Out-of-enum priority '{}', labeling Unknown",
                other
              );
              Priority::Unknown
            }
        }
    }
}

/// Validated triage assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageAssessment
{   pub priority: Priority
  , /// Recommended maximum wait time
    pub wait_time: String
  , /// Actionable note for the receptionist
    pub recommendation: String
  , /// Whether the doctor should be informed immediately
    pub flag_for_doctor: bool
}

/// Raw provider-shaped assessment before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssessment
{   #[serde(default)]
    priority: Option<String>
  , #[serde(default)]
    wait_time: Option<String>
  , #[serde(default)]
    recommendation: Option<String>
  , #[serde(default)]
    flag_for_doctor: bool
}

/// Validate the normalized mapping against the assessment schema.
/// Wait time and recommendation are required; a missing doctor
/// flag defaults to false.
pub fn parse_assessment(
  data: &serde_json::Map<String, serde_json::Value>
) -> Result<TriageAssessment, crate::error::Error>
{   let raw: RawAssessment = serde_json::from_value(
      serde_json::Value::Object(data.clone())
    ).map_err(|e| {
      warn!("Triage assessment shape mismatch: {}", e);
      crate::error::Error::MalformedJson
    })?;

    let wait_time = raw.wait_time
      .filter(|w| !w.trim().is_empty())
      .ok_or_else(|| crate::error::Error::MissingField(
        "waitTime".to_string()
      ))?;

    let recommendation = raw.recommendation
      .filter(|r| !r.trim().is_empty())
      .ok_or_else(|| crate::error::Error::MissingField(
        "recommendation".to_string()
      ))?;

    let priority = raw.priority
      .as_deref()
      .map(Priority::from_label)
      .unwrap_or(Priority::Unknown);

    Ok(TriageAssessment
    {   priority
      , wait_time
      , recommendation
      , flag_for_doctor: raw.flag_for_doctor
    })
}
