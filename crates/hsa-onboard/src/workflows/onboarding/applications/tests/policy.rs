use super::common::*;
use crate::workflows::onboarding::applications::evaluation::{
    DecisionEvaluator, DecisionOutcome, PolicyConfig, PolicyConfigError,
};
use crate::workflows::onboarding::applications::evaluation::rules;
use crate::workflows::onboarding::applications::evaluation::policy::{
    decide_outcome, PrecedenceRule, ValidationSignals, RULE_ORDER,
};

fn signals(id_expired: bool, any_invalid: bool) -> ValidationSignals {
    ValidationSignals {
        id_expired,
        any_invalid,
    }
}

#[test]
fn rule_order_is_fixed() {
    assert_eq!(
        RULE_ORDER,
        [
            PrecedenceRule::HardReject,
            PrecedenceRule::ThresholdReview,
            PrecedenceRule::InvalidFieldReview,
            PrecedenceRule::AutoApprove,
            PrecedenceRule::DefaultReview,
        ]
    );
}

#[test]
fn expired_id_rejects_no_matter_how_low_the_risk() {
    let config = policy_config();
    let decision = decide_outcome(signals(true, true), 0.0, &config);
    assert_eq!(decision, DecisionOutcome::Reject);
}

#[test]
fn risk_at_the_review_threshold_goes_to_manual_review() {
    let config = policy_config();
    let decision = decide_outcome(signals(false, false), config.manual_review_threshold, &config);
    assert_eq!(decision, DecisionOutcome::ManualReview);
}

#[test]
fn any_invalid_validation_forces_review_even_at_zero_risk() {
    let config = policy_config();
    let decision = decide_outcome(signals(false, true), 0.0, &config);
    assert_eq!(decision, DecisionOutcome::ManualReview);
}

#[test]
fn risk_at_the_approve_threshold_still_approves() {
    let config = policy_config();
    let decision = decide_outcome(signals(false, false), config.auto_approve_threshold, &config);
    assert_eq!(decision, DecisionOutcome::Approve);
}

#[test]
fn risk_between_the_thresholds_defaults_to_review() {
    let config = policy_config();
    let decision = decide_outcome(signals(false, false), 0.35, &config);
    assert_eq!(decision, DecisionOutcome::ManualReview);
}

#[test]
fn hard_reject_ignores_an_unverifiable_expiry() {
    // A missing expiry fails its validation but is not a definite expired
    // determination, so it routes to review via the invalid-field rule.
    let request = {
        let mut request = request("no-expiry");
        request.identity.expiry_date = None;
        request
    };
    let evaluator = evaluator();
    let result = evaluator
        .evaluate(&request, today())
        .expect("evaluation succeeds");
    assert_eq!(result.decision, DecisionOutcome::ManualReview);
}

#[test]
fn inverted_thresholds_fail_validation() {
    let config = PolicyConfig {
        auto_approve_threshold: 0.6,
        manual_review_threshold: 0.3,
        ..PolicyConfig::default()
    };
    match config.clone().validated() {
        Err(PolicyConfigError::InvertedThresholds {
            auto_approve,
            manual_review,
        }) => {
            assert_eq!(auto_approve, 0.6);
            assert_eq!(manual_review, 0.3);
        }
        other => panic!("expected inverted threshold error, got {other:?}"),
    }

    assert!(DecisionEvaluator::new(config).is_err());
}

#[test]
fn out_of_range_thresholds_fail_validation() {
    let config = PolicyConfig {
        name_match_threshold: 1.5,
        ..PolicyConfig::default()
    };
    match config.validated() {
        Err(PolicyConfigError::OutOfRange { field, value }) => {
            assert_eq!(field, "name_match_threshold");
            assert_eq!(value, 1.5);
        }
        other => panic!("expected out-of-range error, got {other:?}"),
    }
}

#[test]
fn signals_derive_from_the_validation_list() {
    let evaluator = evaluator();
    let config = evaluator.config().clone();
    let matcher = crate::workflows::onboarding::applications::matching::FieldMatcher::new(
        config.name_match_threshold,
        config.address_match_threshold,
    );

    let mut expired = request("signals-expired");
    expired.identity.expiry_date =
        Some(chrono::NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date"));
    let output = rules::run_checks(&expired, &matcher, &config, today());
    assert!(output.signals.id_expired);
    assert!(output.signals.any_invalid);

    let clean = request("signals-clean");
    let output = rules::run_checks(&clean, &matcher, &config, today());
    assert!(!output.signals.id_expired);
    assert!(!output.signals.any_invalid);
}
