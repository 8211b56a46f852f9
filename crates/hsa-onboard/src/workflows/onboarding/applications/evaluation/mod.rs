pub(crate) mod config;
pub(crate) mod policy;
pub(crate) mod rules;

pub use config::{PolicyConfig, PolicyConfigError};
pub use policy::DecisionOutcome;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, EvaluationRequest, ValidationInputError, ValidationResult};
use super::matching::FieldMatcher;
use super::risk;
use policy::decide_outcome;

/// Stateless evaluator applying the configured policy to one application.
/// Pure over its inputs plus the supplied evaluation date, so concurrent
/// use needs no locking.
pub struct DecisionEvaluator {
    matcher: FieldMatcher,
    config: PolicyConfig,
}

impl DecisionEvaluator {
    /// Fails fast when the threshold configuration is invalid; a bad config
    /// must be fixed, not retried.
    pub fn new(config: PolicyConfig) -> Result<Self, PolicyConfigError> {
        let config = config.validated()?;
        let matcher = FieldMatcher::new(
            config.name_match_threshold,
            config.address_match_threshold,
        );
        Ok(Self { matcher, config })
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Evaluate one application. Deterministic for identical inputs and
    /// `today` (only the `created_at` stamp differs between calls).
    pub fn evaluate(
        &self,
        request: &EvaluationRequest,
        today: NaiveDate,
    ) -> Result<DecisionResult, ValidationInputError> {
        request.validated()?;

        let output = rules::run_checks(request, &self.matcher, &self.config, today);
        let risk_score = risk::aggregate(&output.risk_factors, self.config.risk_weights);
        let decision = decide_outcome(output.signals, risk_score, &self.config);
        let reasoning = build_reasoning(&output.validations);

        Ok(DecisionResult {
            application_id: request.application_id.clone(),
            decision,
            risk_score,
            reasoning,
            validation_results: output.validations,
            created_at: Utc::now(),
        })
    }
}

/// One clause per failed or borderline validation; placeholders for data
/// that was simply absent never surface here.
fn build_reasoning(validations: &[ValidationResult]) -> String {
    let clauses: Vec<String> = validations
        .iter()
        .filter(|validation| {
            !validation.is_valid
                || (validation.confidence > 0.0 && validation.confidence < 1.0)
        })
        .map(|validation| format!("{}: {}", validation.field_name, validation.details))
        .collect();

    if clauses.is_empty() {
        "All checks passed".to_string()
    } else {
        clauses.join("; ")
    }
}

/// Evaluation output: the decision, its score, and the full validation
/// trail. Produced exactly once per evaluation call and immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub application_id: ApplicationId,
    pub decision: DecisionOutcome,
    pub risk_score: f64,
    pub reasoning: String,
    pub validation_results: Vec<ValidationResult>,
    pub created_at: DateTime<Utc>,
}
