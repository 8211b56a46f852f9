use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Postal address broken into the components the matcher compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl fmt::Display for MailingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.street, self.city, self.state, self.zip
        )
    }
}

/// Applicant-asserted identity, immutable once submitted for evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfoClaim {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub address: Option<MailingAddress>,
    pub employer_name: Option<String>,
}

/// Fields the vision extractor read from a government ID. Untrusted input:
/// the evaluator validates these against the claim and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedIdentityData {
    pub document_type: String,
    pub id_number: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub address: Option<MailingAddress>,
    pub issue_date: Option<NaiveDate>,
    /// The extractor may fail to read the expiry; that degrades to a failed
    /// expiry validation rather than an input error.
    pub expiry_date: Option<NaiveDate>,
    pub issuing_authority: Option<String>,
    /// Per-field OCR confidence scores reported by the extractor, keyed by
    /// field name. Empty when the extractor reported none.
    #[serde(default)]
    pub field_confidence: BTreeMap<String, f64>,
}

/// Fields extracted from an employer document, supplied only when the
/// application requires employment verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEmploymentData {
    pub employer_name: String,
    pub employee_name: String,
    pub document_date: Option<NaiveDate>,
    pub health_plan_type: Option<String>,
}

/// The unit of input for one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub application_id: ApplicationId,
    pub claim: PersonalInfoClaim,
    pub identity: ExtractedIdentityData,
    pub employment: Option<ExtractedEmploymentData>,
}

impl EvaluationRequest {
    /// Reject structurally missing mandatory input before any comparison
    /// runs; the error names every missing field so callers can prompt for
    /// correction.
    pub fn validated(&self) -> Result<(), ValidationInputError> {
        let mut missing_fields = Vec::new();

        if self.application_id.0.trim().is_empty() {
            missing_fields.push("application_id");
        }
        if self.claim.full_name.trim().is_empty() {
            missing_fields.push("claim.full_name");
        }
        if self.identity.full_name.trim().is_empty() {
            missing_fields.push("identity.full_name");
        }
        if self.identity.id_number.trim().is_empty() {
            missing_fields.push("identity.id_number");
        }

        if missing_fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationInputError { missing_fields })
        }
    }
}

/// Raised when mandatory claim or identity fields are structurally absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", .missing_fields.join(", "))]
pub struct ValidationInputError {
    pub missing_fields: Vec<&'static str>,
}

/// The kinds of per-field checks an evaluation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    NameMatch,
    DobMatch,
    AddressMatch,
    IdExpiry,
    DocumentQuality,
    EmployerMatch,
}

/// Result of one field check, created fresh per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub field_name: String,
    pub validation_type: ValidationKind,
    pub is_valid: bool,
    pub confidence: f64,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_value: Option<String>,
}
