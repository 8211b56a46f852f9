use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, EvaluationRequest, ExtractedEmploymentData, ExtractedIdentityData,
    PersonalInfoClaim,
};
use super::evaluation::DecisionResult;

/// Version tag stamped on every audit entry.
pub const SYSTEM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Immutable copy of the inputs behind one decision, persisted alongside it
/// so the trail can reconstruct exactly what was evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSnapshot {
    pub claim: PersonalInfoClaim,
    pub identity: ExtractedIdentityData,
    pub employment: Option<ExtractedEmploymentData>,
}

impl From<EvaluationRequest> for EvaluationSnapshot {
    fn from(request: EvaluationRequest) -> Self {
        Self {
            claim: request.claim,
            identity: request.identity,
            employment: request.employment,
        }
    }
}

/// Append-only record of one decision. Never updated or deleted; an
/// application accrues one entry per evaluation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub application_id: ApplicationId,
    pub decision: DecisionResult,
    pub snapshot: EvaluationSnapshot,
    pub system_version: String,
    pub recorded_at: DateTime<Utc>,
}

/// Chronological decision history for one application, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrail {
    pub application_id: ApplicationId,
    pub entries: Vec<AuditEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction for the append-only decision audit log. The write
/// path guarantees at-least-once durable append; a failed write never
/// alters a decision already returned to the caller.
pub trait AuditRecorder: Send + Sync {
    fn record(
        &self,
        decision: &DecisionResult,
        snapshot: EvaluationSnapshot,
    ) -> Result<AuditEntry, AuditError>;

    /// Entries oldest-first; `None` when nothing was recorded for the
    /// application.
    fn trail(&self, application_id: &ApplicationId) -> Result<Option<AuditTrail>, AuditError>;
}

/// Error enumeration for audit store failures.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit store unavailable: {0}")]
    Unavailable(String),
}
