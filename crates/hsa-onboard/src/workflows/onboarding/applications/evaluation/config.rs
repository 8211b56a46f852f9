use serde::{Deserialize, Serialize};

use super::super::risk::RiskWeights;

/// Threshold configuration governing field matching and the decision rules.
/// Immutable once handed to an evaluator; the defaults are tunable dials,
/// not constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub name_match_threshold: f64,
    pub address_match_threshold: f64,
    pub document_quality_threshold: f64,
    pub auto_approve_threshold: f64,
    pub manual_review_threshold: f64,
    pub risk_weights: RiskWeights,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            name_match_threshold: 0.85,
            address_match_threshold: 0.80,
            document_quality_threshold: 0.5,
            auto_approve_threshold: 0.2,
            manual_review_threshold: 0.5,
            risk_weights: RiskWeights::default(),
        }
    }
}

impl PolicyConfig {
    /// Range- and ordering-check the thresholds. The evaluator refuses to
    /// construct from a config that fails here.
    pub fn validated(self) -> Result<Self, PolicyConfigError> {
        let bounded = [
            ("name_match_threshold", self.name_match_threshold),
            ("address_match_threshold", self.address_match_threshold),
            ("document_quality_threshold", self.document_quality_threshold),
            ("auto_approve_threshold", self.auto_approve_threshold),
            ("manual_review_threshold", self.manual_review_threshold),
            ("risk_weights.max_weight", self.risk_weights.max_weight),
            ("risk_weights.mean_weight", self.risk_weights.mean_weight),
        ];
        for (field, value) in bounded {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PolicyConfigError::OutOfRange { field, value });
            }
        }

        if self.auto_approve_threshold > self.manual_review_threshold {
            return Err(PolicyConfigError::InvertedThresholds {
                auto_approve: self.auto_approve_threshold,
                manual_review: self.manual_review_threshold,
            });
        }

        Ok(self)
    }
}

/// Configuration errors are fatal to that configuration; they must be fixed,
/// not retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyConfigError {
    #[error("policy threshold {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error(
        "auto-approve threshold {auto_approve} exceeds manual-review threshold {manual_review}"
    )]
    InvertedThresholds {
        auto_approve: f64,
        manual_review: f64,
    },
}
