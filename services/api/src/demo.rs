use crate::infra::{parse_date, InMemoryAuditStore};
use chrono::{Duration, NaiveDate, Utc};
use clap::Args;
use hsa_onboard::error::AppError;
use hsa_onboard::workflows::onboarding::applications::{
    ApplicationId, DecisionServiceError, EvaluationRequest, ExtractedIdentityData, MailingAddress,
    OnboardingDecisionService, PersonalInfoClaim, PolicyConfig,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the expiry check (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());

    let audit = Arc::new(InMemoryAuditStore::default());
    let service = OnboardingDecisionService::new(audit, PolicyConfig::default())
        .map_err(DecisionServiceError::from)?;

    println!("HSA onboarding decision demo (evaluated {today})");

    let applicants = [
        clean_applicant(today),
        expired_id_applicant(today),
        mismatched_applicant(today),
    ];

    for request in applicants {
        let id = request.application_id.clone();
        match service.evaluate(request, Some(today)) {
            Ok(result) => {
                println!("\n{} -> {}", id.0, result.decision.label());
                println!("  risk score {:.3}", result.risk_score);
                println!("  {}", result.reasoning);
                for validation in &result.validation_results {
                    let status = if validation.is_valid { "ok" } else { "failed" };
                    println!(
                        "  - {} [{}] confidence {:.2}: {}",
                        validation.field_name, status, validation.confidence, validation.details
                    );
                }
            }
            Err(err) => println!("\n{} -> evaluation failed: {err}", id.0),
        }
    }

    println!();
    for id in ["demo-clean", "demo-expired", "demo-mismatch"] {
        let trail = service
            .audit_trail(&ApplicationId(id.to_string()))
            .map_err(AppError::from)?;
        match trail {
            Some(trail) => println!(
                "Audit trail for {id}: {} entry(ies), last recorded {}",
                trail.entries.len(),
                trail.updated_at
            ),
            None => println!("Audit trail for {id}: empty"),
        }
    }

    Ok(())
}

fn address() -> MailingAddress {
    MailingAddress {
        street: "123 Main Street".to_string(),
        city: "Cedar Falls".to_string(),
        state: "IA".to_string(),
        zip: "50613".to_string(),
    }
}

fn base_identity(today: NaiveDate) -> ExtractedIdentityData {
    ExtractedIdentityData {
        document_type: "driver's license".to_string(),
        id_number: "D1234567".to_string(),
        full_name: "Jane Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15).expect("valid date"),
        address: Some(address()),
        issue_date: Some(today - Duration::days(365 * 2)),
        expiry_date: Some(today + Duration::days(365)),
        issuing_authority: Some("Iowa Department of Transportation".to_string()),
        field_confidence: Default::default(),
    }
}

fn base_claim() -> PersonalInfoClaim {
    PersonalInfoClaim {
        full_name: "Jane A. Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15).expect("valid date"),
        address: Some(address()),
        employer_name: Some("Acme Corporation".to_string()),
    }
}

fn clean_applicant(today: NaiveDate) -> EvaluationRequest {
    EvaluationRequest {
        application_id: ApplicationId("demo-clean".to_string()),
        claim: base_claim(),
        identity: base_identity(today),
        employment: None,
    }
}

fn expired_id_applicant(today: NaiveDate) -> EvaluationRequest {
    let mut identity = base_identity(today);
    identity.expiry_date = Some(today - Duration::days(30));
    EvaluationRequest {
        application_id: ApplicationId("demo-expired".to_string()),
        claim: base_claim(),
        identity,
        employment: None,
    }
}

fn mismatched_applicant(today: NaiveDate) -> EvaluationRequest {
    let mut claim = base_claim();
    claim.full_name = "Robert Johnson".to_string();
    claim.date_of_birth = NaiveDate::from_ymd_opt(1988, 3, 10).expect("valid date");
    EvaluationRequest {
        application_id: ApplicationId("demo-mismatch".to_string()),
        claim,
        identity: base_identity(today),
        employment: None,
    }
}
