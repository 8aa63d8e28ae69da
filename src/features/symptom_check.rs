//! Symptom checker: structured differential diagnosis for the
//! attending doctor

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// System prompt for the differential-diagnosis feature
pub const SYMPTOM_CHECKER_SYSTEM: &str = r#"You are a clinical decision-support AI integrated into ClinIQ Pro — a licensed clinic management system used exclusively by qualified, registered medical professionals.

Your role is to assist the attending doctor by generating a structured differential diagnosis based on the patient information provided. You are a medical second-opinion tool, NOT a replacement for physician judgment.

CRITICAL RULES:
1. Respond with ONLY a valid JSON object. Zero markdown, zero prose, zero extra text — pure JSON only.
2. Order "possibleConditions" from most to least likely based on the symptom profile.
3. "riskLevel" must be exactly one of: "Low", "Moderate", "High", "Critical" — nothing else.
4. "suggestedTests" should be practical, evidence-based investigations the doctor can order.
5. "clinicalSummary" must be a brief, professional 1-2 sentence summary for the doctor.
6. "urgency" must clearly state the recommended follow-up timeline.
7. If symptoms are vague or insufficient for a differential, still return the JSON with appropriately cautious values.
8. Base responses on current clinical guidelines (WHO, UpToDate standards).

STRICT OUTPUT FORMAT — respond with exactly this JSON structure:
{
  "possibleConditions": ["string", "string", ...],
  "riskLevel": "Low | Moderate | High | Critical",
  "suggestedTests": ["string", "string", ...],
  "clinicalSummary": "string",
  "urgency": "string"
}"#;

/// Generation budget for a differential diagnosis
const SYMPTOM_CHECK_MAX_TOKENS: u32 = 1200;

/// Shortest symptom description worth analyzing
const MIN_SYMPTOM_CHARS: usize = 5;

/// Caller-supplied patient case
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SymptomCheckCase
{   /// Presenting symptoms as described to the doctor
    pub symptoms: String
  , pub age: Option<u16>
  , pub gender: Option<String>
  , /// Relevant medical history, if known
    pub history: Option<String>
}

impl SymptomCheckCase
{   /// Validate the case and build the dispatch request
    pub fn to_request(&self)
      -> Result<crate::AiRequest, crate::error::Error>
    {   let symptoms = self.symptoms.trim();
        if symptoms.len() < MIN_SYMPTOM_CHARS
        {   return Err(crate::error::Error::InvalidInput(
              "Please provide a meaningful description of symptoms."
                .to_string()
            ));
        }

        let user_message = format!(
          "Analyze the following patient case and return a differential diagnosis:\n\n\
           Patient Demographics:\n\
           - Age: {}\n\
           - Gender: {}\n\n\
           Presenting Symptoms:\n{}\n\n\
           Relevant Medical History:\n{}\n\n\
           Provide a structured clinical analysis.",
          self.age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
          self.gender.as_deref().unwrap_or("Not specified"),
          symptoms,
          self.history
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or("No known history provided")
        );

        debug!("Built symptom-check request");
        Ok(crate::AiRequest
        {   system_prompt: SYMPTOM_CHECKER_SYSTEM.to_string()
          , user_message
          , model_tier: crate::ModelTier::Quality
          , expect_json: true
          , max_tokens: Some(SYMPTOM_CHECK_MAX_TOKENS)
        })
    }
}

/// Closed risk scale. A provider value outside the instructed set
/// is passed through labeled `Unknown` rather than coerced to a
/// clinical level or rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel
{   Low
  , Moderate
  , High
  , Critical
  , Unknown
}

impl RiskLevel
{   /// Map the provider's label onto the closed scale
    pub fn from_label(label: &str) -> Self
    {   match label
        {   "Low" => RiskLevel::Low
          , "Moderate" => RiskLevel::Moderate
          , "High" => RiskLevel::High
          , "Critical" => RiskLevel::Critical
          , other => {
              warn!(
                "Out-of-enum risk level '{}', labeling Unknown",
                other
              );
              RiskLevel::Unknown
            }
        }
    }
}

/// Validated differential-diagnosis report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomCheckReport
{   /// Ordered most to least likely
    pub possible_conditions: Vec<String>
  , pub risk_level: RiskLevel
  , pub suggested_tests: Vec<String>
  , pub clinical_summary: String
  , /// Recommended follow-up timeline
    pub urgency: String
}

/// Raw provider-shaped report before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport
{   #[serde(default)]
    possible_conditions: Vec<String>
  , #[serde(default)]
    risk_level: Option<String>
  , #[serde(default)]
    suggested_tests: Vec<String>
  , #[serde(default)]
    clinical_summary: String
  , #[serde(default)]
    urgency: Option<String>
}

/// Validate the normalized mapping against the report schema.
/// List fields default to empty and a missing urgency falls back
/// to a review note; an absent clinical summary is rejected.
pub fn parse_report(
  data: &serde_json::Map<String, serde_json::Value>
) -> Result<SymptomCheckReport, crate::error::Error>
{   let raw: RawReport = serde_json::from_value(
      serde_json::Value::Object(data.clone())
    ).map_err(|e| {
      warn!("Symptom-check report shape mismatch: {}", e);
      crate::error::Error::MalformedJson
    })?;

    if raw.clinical_summary.trim().is_empty()
    {   return Err(crate::error::Error::MissingField(
          "clinicalSummary".to_string()
        ));
    }

    let risk_level = raw.risk_level
      .as_deref()
      .map(RiskLevel::from_label)
      .unwrap_or(RiskLevel::Unknown);

    Ok(SymptomCheckReport
    {   possible_conditions: raw.possible_conditions
      , risk_level
      , suggested_tests: raw.suggested_tests
      , clinical_summary: raw.clinical_summary
      , urgency: raw.urgency
          .filter(|u| !u.trim().is_empty())
          .unwrap_or_else(|| "Review with patient".to_string())
    })
}
