use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::audit::{AuditError, AuditRecorder, AuditTrail, EvaluationSnapshot};
use super::domain::{ApplicationId, EvaluationRequest, ValidationInputError};
use super::evaluation::{DecisionEvaluator, DecisionResult, PolicyConfig, PolicyConfigError};

/// Service composing the pure evaluator with the audit collaborator. The
/// decision is computed first and the audit append follows; the evaluator
/// itself never touches the store.
pub struct OnboardingDecisionService<A> {
    evaluator: DecisionEvaluator,
    audit: Arc<A>,
}

impl<A> OnboardingDecisionService<A>
where
    A: AuditRecorder + 'static,
{
    pub fn new(audit: Arc<A>, config: PolicyConfig) -> Result<Self, PolicyConfigError> {
        Ok(Self {
            evaluator: DecisionEvaluator::new(config)?,
            audit,
        })
    }

    /// Evaluate an application and append the audit entry for the outcome.
    /// `today` pins the expiry comparison date; callers that omit it get
    /// the current UTC date.
    pub fn evaluate(
        &self,
        request: EvaluationRequest,
        today: Option<NaiveDate>,
    ) -> Result<DecisionResult, DecisionServiceError> {
        let today = today.unwrap_or_else(|| Utc::now().date_naive());

        let result = self.evaluator.evaluate(&request, today)?;
        self.audit.record(&result, EvaluationSnapshot::from(request))?;

        info!(
            application_id = %result.application_id.0,
            decision = result.decision.label(),
            risk_score = result.risk_score,
            "application decision recorded"
        );

        Ok(result)
    }

    /// Chronological decision history for API responses.
    pub fn audit_trail(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<AuditTrail>, DecisionServiceError> {
        Ok(self.audit.trail(application_id)?)
    }

    pub fn policy(&self) -> &PolicyConfig {
        self.evaluator.config()
    }
}

/// Error raised by the decision service.
#[derive(Debug, thiserror::Error)]
pub enum DecisionServiceError {
    #[error(transparent)]
    Input(#[from] ValidationInputError),
    #[error(transparent)]
    Config(#[from] PolicyConfigError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
