use super::common::*;
use crate::workflows::onboarding::applications::audit::SYSTEM_VERSION;
use crate::workflows::onboarding::applications::domain::ApplicationId;
use crate::workflows::onboarding::applications::evaluation::{DecisionOutcome, PolicyConfig};
use crate::workflows::onboarding::applications::service::{
    DecisionServiceError, OnboardingDecisionService,
};
use std::sync::Arc;

#[test]
fn evaluate_records_exactly_one_audit_entry() {
    let (service, audit) = build_service();
    let request = request("audited");
    let id = request.application_id.clone();

    let result = service
        .evaluate(request, Some(today()))
        .expect("evaluation succeeds");

    let entries = audit.entries_for(&id);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].decision, result);
    assert_eq!(entries[0].system_version, SYSTEM_VERSION);
    assert_eq!(entries[0].snapshot.claim, claim());
}

#[test]
fn repeated_evaluations_accumulate_a_chronological_trail() {
    let (service, _) = build_service();
    let request = request("trail");
    let id = request.application_id.clone();

    for _ in 0..3 {
        service
            .evaluate(request.clone(), Some(today()))
            .expect("evaluation succeeds");
    }

    let trail = service
        .audit_trail(&id)
        .expect("trail fetch succeeds")
        .expect("trail present");

    assert_eq!(trail.entries.len(), 3);
    assert_eq!(trail.application_id, id);
    assert_eq!(trail.created_at, trail.entries[0].recorded_at);
    assert_eq!(trail.updated_at, trail.entries[2].recorded_at);
    assert!(trail
        .entries
        .windows(2)
        .all(|pair| pair[0].recorded_at <= pair[1].recorded_at));
}

#[test]
fn input_errors_leave_no_audit_entry() {
    let (service, audit) = build_service();
    let mut request = request("invalid");
    request.claim.full_name = String::new();
    let id = request.application_id.clone();

    match service.evaluate(request, Some(today())) {
        Err(DecisionServiceError::Input(error)) => {
            assert!(error.missing_fields.contains(&"claim.full_name"));
        }
        other => panic!("expected input error, got {other:?}"),
    }

    assert!(audit.entries_for(&id).is_empty());
}

#[test]
fn audit_failures_surface_after_the_decision_was_computed() {
    let service = OnboardingDecisionService::new(Arc::new(UnavailableAudit), policy_config())
        .expect("default config is valid");

    match service.evaluate(request("offline"), Some(today())) {
        Err(DecisionServiceError::Audit(error)) => {
            assert!(error.to_string().contains("unavailable"));
        }
        other => panic!("expected audit error, got {other:?}"),
    }
}

#[test]
fn trail_is_none_for_unknown_applications() {
    let (service, _) = build_service();
    let trail = service
        .audit_trail(&ApplicationId("never-seen".to_string()))
        .expect("trail fetch succeeds");
    assert!(trail.is_none());
}

#[test]
fn service_refuses_inverted_threshold_config() {
    let config = PolicyConfig {
        auto_approve_threshold: 0.9,
        manual_review_threshold: 0.1,
        ..PolicyConfig::default()
    };
    let result = OnboardingDecisionService::new(Arc::new(MemoryAudit::default()), config);
    assert!(result.is_err());
}

#[test]
fn recorded_outcome_matches_the_returned_decision() {
    let (service, audit) = build_service();

    let mut mismatch = request("mismatch");
    mismatch.identity.date_of_birth =
        chrono::NaiveDate::from_ymd_opt(1991, 1, 15).expect("valid date");
    let id = mismatch.application_id.clone();

    let result = service
        .evaluate(mismatch, Some(today()))
        .expect("evaluation succeeds");

    assert_eq!(result.decision, DecisionOutcome::ManualReview);
    let entries = audit.entries_for(&id);
    assert_eq!(entries[0].decision.decision, DecisionOutcome::ManualReview);
}
