//! Applicant decisioning for HSA onboarding: field validation against
//! extracted document data, weighted risk aggregation, an ordered decision
//! policy, and the append-only audit contract.

pub mod audit;
pub mod domain;
pub(crate) mod evaluation;
pub(crate) mod matching;
pub(crate) mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use audit::{
    AuditEntry, AuditError, AuditRecorder, AuditTrail, EvaluationSnapshot, SYSTEM_VERSION,
};
pub use domain::{
    ApplicationId, EvaluationRequest, ExtractedEmploymentData, ExtractedIdentityData,
    MailingAddress, PersonalInfoClaim, ValidationInputError, ValidationKind, ValidationResult,
};
pub use evaluation::{
    DecisionEvaluator, DecisionOutcome, DecisionResult, PolicyConfig, PolicyConfigError,
};
pub use risk::{RiskFactor, RiskWeights};
pub use router::{decision_router, EvaluateApplicationRequest};
pub use service::{DecisionServiceError, OnboardingDecisionService};
