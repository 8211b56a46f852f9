use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAuditStore};
use crate::routes::with_decision_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hsa_onboard::config::AppConfig;
use hsa_onboard::error::AppError;
use hsa_onboard::telemetry;
use hsa_onboard::workflows::onboarding::applications::{
    DecisionServiceError, OnboardingDecisionService,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let policy = config
        .decisions
        .policy_config()
        .map_err(DecisionServiceError::from)?;
    let audit = Arc::new(InMemoryAuditStore::default());
    let service = Arc::new(
        OnboardingDecisionService::new(audit, policy).map_err(DecisionServiceError::from)?,
    );

    let app = with_decision_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hsa onboarding decision service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
