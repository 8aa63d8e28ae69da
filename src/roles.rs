//! Roles, plans, and the AI capability table
//!
//! Closed enumerations replacing string comparison at call sites:
//! what a role may do lives in one table, not scattered guards.

use log::debug;
use serde::{Deserialize, Serialize};

/// Staff and patient roles known to the clinic backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   Admin
  , Doctor
  , Receptionist
  , Patient
}

/// Subscription plans; Pro unlocks the heavier AI features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan
{   Free
  , Pro
}

/// AI capabilities exposed by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability
{   /// Differential diagnosis from presenting symptoms
    SymptomCheck
  , /// Patient-friendly prescription explanation
    ExplainPrescription
  , /// Visit-urgency assessment
    Triage
}

impl Role
{   /// Whether this role may exercise the capability.
    /// Symptom check and prescription explanation are for the
    /// attending doctor; triage also serves the front desk.
    pub fn allows(&self, capability: Capability) -> bool
    {   match capability
        {   Capability::SymptomCheck => {
              matches!(self, Role::Doctor)
            }
          , Capability::ExplainPrescription => {
              matches!(self, Role::Doctor)
            }
          , Capability::Triage => {
              matches!(self, Role::Doctor | Role::Receptionist)
            }
        }
    }
}

impl Plan
{   /// Whether this plan covers the capability.
    /// Symptom check requires Pro; the rest ship on Free.
    pub fn allows(&self, capability: Capability) -> bool
    {   match capability
        {   Capability::SymptomCheck => {
              matches!(self, Plan::Pro)
            }
          , _ => true
        }
    }
}

/// Combined role + plan check for one capability
pub fn authorize(
  role: Role
, plan: Plan
, capability: Capability
) -> Result<(), crate::error::Error>
{   debug!(
      "Authorizing {:?}/{:?} for {:?}",
      role, plan, capability
    );
    if !role.allows(capability)
    {   return Err(crate::error::Error::RoleDenied(role));
    }
    if !plan.allows(capability)
    {   return Err(crate::error::Error::PlanRequired(Plan::Pro));
    }
    Ok(())
}
