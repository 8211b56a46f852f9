use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::onboarding::applications::{PolicyConfig, PolicyConfigError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub decisions: DecisionSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let decisions = DecisionSettings {
            auto_approve_threshold: read_threshold("HSA_AUTO_APPROVE_THRESHOLD")?,
            manual_review_threshold: read_threshold("HSA_MANUAL_REVIEW_THRESHOLD")?,
            name_match_threshold: read_threshold("HSA_NAME_MATCH_THRESHOLD")?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            decisions,
        })
    }
}

fn read_threshold(var: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidThreshold { var }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Environment overrides for the decision policy thresholds. Anything left
/// unset falls back to the `PolicyConfig` defaults.
#[derive(Debug, Clone, Default)]
pub struct DecisionSettings {
    pub auto_approve_threshold: Option<f64>,
    pub manual_review_threshold: Option<f64>,
    pub name_match_threshold: Option<f64>,
}

impl DecisionSettings {
    /// Fold the overrides into the policy defaults and re-validate, so an
    /// inverted pair from the environment is caught at startup.
    pub fn policy_config(&self) -> Result<PolicyConfig, PolicyConfigError> {
        let mut config = PolicyConfig::default();
        if let Some(value) = self.auto_approve_threshold {
            config.auto_approve_threshold = value;
        }
        if let Some(value) = self.manual_review_threshold {
            config.manual_review_threshold = value;
        }
        if let Some(value) = self.name_match_threshold {
            config.name_match_threshold = value;
        }
        config.validated()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { var } => {
                write!(f, "{var} must parse to a floating point threshold")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
