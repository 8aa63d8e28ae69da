//! Prescription explainer: free-text, patient-friendly rendering
//! of a doctor's prescription

use log::debug;
use serde::{Deserialize, Serialize};

/// System prompt for the prescription-explainer feature
pub const PRESCRIPTION_EXPLAINER_SYSTEM: &str = r#"You are a patient communication specialist at ClinIQ Pro clinic. Your sole job is to convert a doctor's prescription into a clear, friendly, and reassuring explanation that any patient — regardless of medical knowledge — can fully understand.

STYLE GUIDELINES:
1. Write directly to the patient in second person: "You have been prescribed..."
2. Use everyday language — never use Latin abbreviations (say "twice a day" not "BID", "before meals" not "AC")
3. For each medicine, briefly explain what it does in one simple sentence
4. Mention the most important practical notes: take with/without food, avoid alcohol, common side effects to watch for
5. Keep the total response under 180 words
6. Use short paragraphs (not bullet points) for a natural, conversational feel
7. End with one warm, reassuring closing sentence
8. Never alarm the patient — be supportive and positive
9. Do NOT start with "Sure", "Of course", or any AI preamble — go straight into the explanation"#;

/// Generation budget for an explanation
const EXPLAIN_MAX_TOKENS: u32 = 600;

/// One prescribed medicine; only the name is required
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Medicine
{   pub name: String
  , pub dosage: Option<String>
  , pub frequency: Option<String>
  , pub duration: Option<String>
}

/// Caller-supplied prescription to explain
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrescriptionOrder
{   pub diagnosis: Option<String>
  , pub medicines: Vec<Medicine>
  , /// Doctor's additional instructions
    pub instructions: Option<String>
}

impl PrescriptionOrder
{   /// Validate the order and build the dispatch request.
    /// Expects free text back, so the result arrives as `Text`.
    pub fn to_request(&self)
      -> Result<crate::AiRequest, crate::error::Error>
    {   let named: Vec<&Medicine> = self.medicines
          .iter()
          .filter(|m| !m.name.trim().is_empty())
          .collect();

        if named.is_empty()
        {   return Err(crate::error::Error::InvalidInput(
              "At least one medicine with a name is required."
                .to_string()
            ));
        }

        let med_list = named
          .iter()
          .enumerate()
          .map(|(i, m)| render_medicine(i + 1, m))
          .collect::<Vec<_>>()
          .join("\n");

        let user_message = format!(
          "Generate a patient-friendly explanation for this prescription:\n\n\
           Diagnosis: {}\n\n\
           Prescribed Medicines:\n{}\n\n\
           Doctor's Additional Instructions: {}\n\n\
           Write the explanation now.",
          self.diagnosis.as_deref().unwrap_or("Not specified"),
          med_list,
          self.instructions
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("None")
        );

        debug!(
          "Built prescription-explainer request ({} medicines)",
          named.len()
        );
        Ok(crate::AiRequest
        {   system_prompt: PRESCRIPTION_EXPLAINER_SYSTEM
              .to_string()
          , user_message
          , model_tier: crate::ModelTier::Fast
          , expect_json: false
          , max_tokens: Some(EXPLAIN_MAX_TOKENS)
        })
    }
}

/// "1. Amoxicillin — 500mg, twice a day for 7 days"
fn render_medicine(index: usize, medicine: &Medicine) -> String
{   let mut line = format!("{}. {}", index, medicine.name.trim());
    if let Some(dosage) = medicine.dosage
      .as_deref()
      .filter(|s| !s.is_empty())
    {   line.push_str(&format!(" — {}", dosage));
    }
    if let Some(frequency) = medicine.frequency
      .as_deref()
      .filter(|s| !s.is_empty())
    {   line.push_str(&format!(", {}", frequency));
    }
    if let Some(duration) = medicine.duration
      .as_deref()
      .filter(|s| !s.is_empty())
    {   line.push_str(&format!(" for {}", duration));
    }
    line
}
