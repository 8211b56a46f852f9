use serde::{Deserialize, Serialize};

use super::config::PolicyConfig;

/// Final decision for an evaluated application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Approve,
    Reject,
    ManualReview,
}

impl DecisionOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionOutcome::Approve => "approve",
            DecisionOutcome::Reject => "reject",
            DecisionOutcome::ManualReview => "manual_review",
        }
    }
}

/// Signal summary the precedence rules consume, derived from the validation
/// list by the rules module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ValidationSignals {
    /// A definite expired-ID determination. An expiry the extractor could
    /// not read fails its validation but does not set this flag, so it
    /// routes to review rather than rejection.
    pub id_expired: bool,
    pub any_invalid: bool,
}

/// Tagged precedence rules. Ordering is the crux of correctness: the rules
/// are evaluated in `RULE_ORDER` and the first one that applies decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrecedenceRule {
    /// Expired ID is a hard stop no later rule can override.
    HardReject,
    /// Aggregate risk at or above the manual-review threshold.
    ThresholdReview,
    /// Any failed validation, regardless of how low the risk score is.
    InvalidFieldReview,
    /// Aggregate risk at or below the auto-approve threshold (inclusive).
    AutoApprove,
    /// Conservative fallback for risk between the two thresholds.
    DefaultReview,
}

pub(crate) const RULE_ORDER: [PrecedenceRule; 5] = [
    PrecedenceRule::HardReject,
    PrecedenceRule::ThresholdReview,
    PrecedenceRule::InvalidFieldReview,
    PrecedenceRule::AutoApprove,
    PrecedenceRule::DefaultReview,
];

impl PrecedenceRule {
    pub(crate) fn apply(
        self,
        signals: ValidationSignals,
        risk_score: f64,
        config: &PolicyConfig,
    ) -> Option<DecisionOutcome> {
        match self {
            PrecedenceRule::HardReject => signals.id_expired.then_some(DecisionOutcome::Reject),
            PrecedenceRule::ThresholdReview => (risk_score >= config.manual_review_threshold)
                .then_some(DecisionOutcome::ManualReview),
            PrecedenceRule::InvalidFieldReview => signals
                .any_invalid
                .then_some(DecisionOutcome::ManualReview),
            PrecedenceRule::AutoApprove => {
                (risk_score <= config.auto_approve_threshold).then_some(DecisionOutcome::Approve)
            }
            PrecedenceRule::DefaultReview => Some(DecisionOutcome::ManualReview),
        }
    }
}

pub(crate) fn decide_outcome(
    signals: ValidationSignals,
    risk_score: f64,
    config: &PolicyConfig,
) -> DecisionOutcome {
    for rule in RULE_ORDER {
        if let Some(decision) = rule.apply(signals, risk_score, config) {
            return decision;
        }
    }
    DecisionOutcome::ManualReview
}
