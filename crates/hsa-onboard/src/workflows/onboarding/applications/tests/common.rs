use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use crate::workflows::onboarding::applications::audit::{
    AuditEntry, AuditError, AuditRecorder, AuditTrail, EvaluationSnapshot, SYSTEM_VERSION,
};
use crate::workflows::onboarding::applications::domain::{
    ApplicationId, EvaluationRequest, ExtractedEmploymentData, ExtractedIdentityData,
    MailingAddress, PersonalInfoClaim,
};
use crate::workflows::onboarding::applications::evaluation::{
    DecisionEvaluator, DecisionResult, PolicyConfig,
};
use crate::workflows::onboarding::applications::service::OnboardingDecisionService;

/// Fixed evaluation date so expiry checks are reproducible.
pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn policy_config() -> PolicyConfig {
    PolicyConfig::default()
}

pub(super) fn address() -> MailingAddress {
    MailingAddress {
        street: "123 Main Street".to_string(),
        city: "Cedar Falls".to_string(),
        state: "IA".to_string(),
        zip: "50613".to_string(),
    }
}

pub(super) fn claim() -> PersonalInfoClaim {
    PersonalInfoClaim {
        full_name: "Jane Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15).expect("valid date"),
        address: Some(address()),
        employer_name: Some("Acme Corporation".to_string()),
    }
}

pub(super) fn identity() -> ExtractedIdentityData {
    ExtractedIdentityData {
        document_type: "driver's license".to_string(),
        id_number: "D1234567".to_string(),
        full_name: "Jane Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15).expect("valid date"),
        address: Some(address()),
        issue_date: Some(NaiveDate::from_ymd_opt(2020, 1, 15).expect("valid date")),
        expiry_date: Some(NaiveDate::from_ymd_opt(2027, 1, 15).expect("valid date")),
        issuing_authority: Some("Iowa Department of Transportation".to_string()),
        field_confidence: Default::default(),
    }
}

pub(super) fn employment() -> ExtractedEmploymentData {
    ExtractedEmploymentData {
        employer_name: "Acme Corp".to_string(),
        employee_name: "Jane Doe".to_string(),
        document_date: Some(NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date")),
        health_plan_type: Some("HDHP".to_string()),
    }
}

pub(super) fn request(suffix: &str) -> EvaluationRequest {
    EvaluationRequest {
        application_id: ApplicationId(format!("app-{suffix}")),
        claim: claim(),
        identity: identity(),
        employment: None,
    }
}

pub(super) fn evaluator() -> DecisionEvaluator {
    DecisionEvaluator::new(policy_config()).expect("default config is valid")
}

pub(super) fn build_service() -> (OnboardingDecisionService<MemoryAudit>, Arc<MemoryAudit>) {
    let audit = Arc::new(MemoryAudit::default());
    let service = OnboardingDecisionService::new(audit.clone(), policy_config())
        .expect("default config is valid");
    (service, audit)
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    entries: Arc<Mutex<HashMap<ApplicationId, Vec<AuditEntry>>>>,
}

impl MemoryAudit {
    pub(super) fn entries_for(&self, id: &ApplicationId) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .get(id)
            .cloned()
            .unwrap_or_default()
    }
}

impl AuditRecorder for MemoryAudit {
    fn record(
        &self,
        decision: &DecisionResult,
        snapshot: EvaluationSnapshot,
    ) -> Result<AuditEntry, AuditError> {
        let entry = AuditEntry {
            application_id: decision.application_id.clone(),
            decision: decision.clone(),
            snapshot,
            system_version: SYSTEM_VERSION.to_string(),
            recorded_at: Utc::now(),
        };
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .entry(entry.application_id.clone())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    fn trail(&self, application_id: &ApplicationId) -> Result<Option<AuditTrail>, AuditError> {
        let guard = self.entries.lock().expect("audit mutex poisoned");
        Ok(guard.get(application_id).map(|entries| AuditTrail {
            application_id: application_id.clone(),
            created_at: entries
                .first()
                .map(|entry| entry.recorded_at)
                .unwrap_or_else(Utc::now),
            updated_at: entries
                .last()
                .map(|entry| entry.recorded_at)
                .unwrap_or_else(Utc::now),
            entries: entries.clone(),
        }))
    }
}

pub(super) struct UnavailableAudit;

impl AuditRecorder for UnavailableAudit {
    fn record(
        &self,
        _decision: &DecisionResult,
        _snapshot: EvaluationSnapshot,
    ) -> Result<AuditEntry, AuditError> {
        Err(AuditError::Unavailable("audit store offline".to_string()))
    }

    fn trail(&self, _application_id: &ApplicationId) -> Result<Option<AuditTrail>, AuditError> {
        Err(AuditError::Unavailable("audit store offline".to_string()))
    }
}
