use chrono::{NaiveDate, Utc};
use hsa_onboard::workflows::onboarding::applications::{
    ApplicationId, AuditEntry, AuditError, AuditRecorder, AuditTrail, DecisionResult,
    EvaluationSnapshot, SYSTEM_VERSION,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Volatile audit store for local runs and tests; production deployments
/// swap in a durable backend behind the same trait.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditStore {
    entries: Arc<Mutex<HashMap<ApplicationId, Vec<AuditEntry>>>>,
}

impl AuditRecorder for InMemoryAuditStore {
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
        let mut guard = self.entries.lock().expect("audit mutex poisoned");
        guard
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

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
