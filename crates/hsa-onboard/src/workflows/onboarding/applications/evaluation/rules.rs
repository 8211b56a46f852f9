use chrono::NaiveDate;

use super::super::domain::{EvaluationRequest, ValidationKind, ValidationResult};
use super::super::matching::{FieldMatcher, MatchScore};
use super::super::risk::RiskFactor;
use super::config::PolicyConfig;
use super::policy::ValidationSignals;

pub(crate) struct CheckOutput {
    pub validations: Vec<ValidationResult>,
    pub risk_factors: Vec<RiskFactor>,
    pub signals: ValidationSignals,
}

/// Run every per-field check for one application. Comparison shortfalls
/// degrade to risk factors; only structurally missing input is an error,
/// and that is rejected before this point.
pub(crate) fn run_checks(
    request: &EvaluationRequest,
    matcher: &FieldMatcher,
    config: &PolicyConfig,
    today: NaiveDate,
) -> CheckOutput {
    let claim = &request.claim;
    let identity = &request.identity;

    let mut validations = Vec::new();
    let mut risk_factors = Vec::new();
    let mut id_expired = false;

    // ID expiry: an exact date comparison against the evaluation date. The
    // expiry-equals-today case is still valid.
    match identity.expiry_date {
        Some(expiry) => {
            let expired = expiry < today;
            validations.push(ValidationResult {
                field_name: "id_expiry".to_string(),
                validation_type: ValidationKind::IdExpiry,
                is_valid: !expired,
                confidence: 1.0,
                details: if expired {
                    format!("ID expired on {expiry}; evaluated on {today}")
                } else {
                    format!("ID valid until {expiry}")
                },
                claimed_value: None,
                extracted_value: Some(expiry.to_string()),
            });
            if expired {
                risk_factors.push(RiskFactor::new("expired_id", 1.0));
                id_expired = true;
            }
        }
        None => {
            validations.push(ValidationResult {
                field_name: "id_expiry".to_string(),
                validation_type: ValidationKind::IdExpiry,
                is_valid: false,
                confidence: 0.0,
                details: "no expiry date extracted from document".to_string(),
                claimed_value: None,
                extracted_value: None,
            });
            risk_factors.push(RiskFactor::new("unverifiable_id_expiry", 1.0));
        }
    }

    // Name: fuzzy comparison, borderline agreement still contributes risk.
    let name_score = matcher.compare_name(&claim.full_name, &identity.full_name);
    validations.push(ValidationResult {
        field_name: "full_name".to_string(),
        validation_type: ValidationKind::NameMatch,
        is_valid: name_score.agrees,
        confidence: name_score.confidence,
        details: fuzzy_detail(name_score, config.name_match_threshold),
        claimed_value: Some(claim.full_name.clone()),
        extracted_value: Some(identity.full_name.clone()),
    });
    push_fuzzy_risk(&mut risk_factors, "name", name_score);

    // Date of birth: exact only.
    let dob_score = FieldMatcher::compare_date(claim.date_of_birth, identity.date_of_birth);
    validations.push(ValidationResult {
        field_name: "date_of_birth".to_string(),
        validation_type: ValidationKind::DobMatch,
        is_valid: dob_score.agrees,
        confidence: dob_score.confidence,
        details: if dob_score.agrees {
            "exact match".to_string()
        } else {
            "date of birth mismatch".to_string()
        },
        claimed_value: Some(claim.date_of_birth.to_string()),
        extracted_value: Some(identity.date_of_birth.to_string()),
    });
    if !dob_score.agrees {
        risk_factors.push(RiskFactor::new("dob_mismatch", 1.0));
    }

    // Address: compared only when both sides carry one. Absence of data is
    // not evidence of fraud, so the placeholder passes with no risk.
    match (claim.address.as_ref(), identity.address.as_ref()) {
        (Some(claimed), Some(extracted)) => {
            let score = matcher.compare_address(claimed, extracted);
            validations.push(ValidationResult {
                field_name: "address".to_string(),
                validation_type: ValidationKind::AddressMatch,
                is_valid: score.agrees,
                confidence: score.confidence,
                details: fuzzy_detail(score, config.address_match_threshold),
                claimed_value: Some(claimed.to_string()),
                extracted_value: Some(extracted.to_string()),
            });
            push_fuzzy_risk(&mut risk_factors, "address", score);
        }
        _ => {
            validations.push(ValidationResult {
                field_name: "address".to_string(),
                validation_type: ValidationKind::AddressMatch,
                is_valid: true,
                confidence: 0.0,
                details: "address not verifiable".to_string(),
                claimed_value: claim.address.as_ref().map(ToString::to_string),
                extracted_value: identity.address.as_ref().map(ToString::to_string),
            });
        }
    }

    // Document quality: mean of the extractor's per-field confidences when
    // it reported any; otherwise the same pass-through as a missing address.
    if identity.field_confidence.is_empty() {
        validations.push(ValidationResult {
            field_name: "document_quality".to_string(),
            validation_type: ValidationKind::DocumentQuality,
            is_valid: true,
            confidence: 0.0,
            details: "extraction confidence not reported".to_string(),
            claimed_value: None,
            extracted_value: None,
        });
    } else {
        let mean = identity.field_confidence.values().sum::<f64>()
            / identity.field_confidence.len() as f64;
        let mean = mean.clamp(0.0, 1.0);
        let is_valid = mean >= config.document_quality_threshold;
        validations.push(ValidationResult {
            field_name: "document_quality".to_string(),
            validation_type: ValidationKind::DocumentQuality,
            is_valid,
            confidence: mean,
            details: format!("mean extraction confidence {mean:.2}"),
            claimed_value: None,
            extracted_value: None,
        });
        if !is_valid {
            risk_factors.push(RiskFactor::new("low_document_quality", 1.0 - mean));
        }
    }

    // Employer: only when an employer document was supplied. A mismatch
    // degrades to risk and review, never to rejection on its own.
    if let Some(employment) = &request.employment {
        let claimed_employer = claim.employer_name.as_deref().unwrap_or("");
        let score = matcher.compare_employer(claimed_employer, &employment.employer_name);
        validations.push(ValidationResult {
            field_name: "employer_name".to_string(),
            validation_type: ValidationKind::EmployerMatch,
            is_valid: score.agrees,
            confidence: score.confidence,
            details: fuzzy_detail(score, config.name_match_threshold),
            claimed_value: claim.employer_name.clone(),
            extracted_value: Some(employment.employer_name.clone()),
        });
        push_fuzzy_risk(&mut risk_factors, "employer", score);
    }

    let any_invalid = validations.iter().any(|validation| !validation.is_valid);

    CheckOutput {
        validations,
        risk_factors,
        signals: ValidationSignals {
            id_expired,
            any_invalid,
        },
    }
}

/// Fuzzy comparisons feed risk whenever they scored below a perfect match:
/// severity `1 - confidence` covers both outright failures and borderline
/// agreements.
fn push_fuzzy_risk(risk_factors: &mut Vec<RiskFactor>, field: &str, score: MatchScore) {
    if score.confidence < 1.0 {
        let label = if score.agrees {
            format!("{field}_variation")
        } else {
            format!("{field}_mismatch")
        };
        risk_factors.push(RiskFactor::new(label, 1.0 - score.confidence));
    }
}

fn fuzzy_detail(score: MatchScore, threshold: f64) -> String {
    if score.confidence >= 1.0 {
        "exact match".to_string()
    } else if score.agrees {
        format!("close match (similarity {:.2})", score.confidence)
    } else {
        format!(
            "similarity {:.2} below threshold {:.2}",
            score.confidence, threshold
        )
    }
}
