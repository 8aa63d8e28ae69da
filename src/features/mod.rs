//! Clinical feature contracts
//!
//! Each feature owns its system prompt, its caller-input
//! validation, its request builder, and the typed schema check
//! applied to the structured mapping after normalization. The
//! dispatcher stays feature-agnostic; schema conformance lives
//! here.

pub mod symptom_check;
pub mod prescription;
pub mod triage;

// Re-export for convenience
pub use symptom_check::{SymptomCheckCase, SymptomCheckReport, RiskLevel};
pub use prescription::{PrescriptionOrder, Medicine};
pub use triage::{TriageVisit, TriageAssessment, Priority};
