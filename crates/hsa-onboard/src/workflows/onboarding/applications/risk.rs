use serde::{Deserialize, Serialize};

/// Scalar severity contributed by one failed or borderline check. Ephemeral:
/// exists only while a single evaluation runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskFactor {
    pub label: String,
    pub severity: f64,
}

impl RiskFactor {
    pub fn new(label: impl Into<String>, severity: f64) -> Self {
        Self {
            label: label.into(),
            severity: severity.clamp(0.0, 1.0),
        }
    }
}

/// Weights combining factor severities into one score. The max term keeps a
/// single critical failure from being diluted by many mild discrepancies;
/// the mean term still reflects cumulative minor risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub max_weight: f64,
    pub mean_weight: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            max_weight: 0.6,
            mean_weight: 0.4,
        }
    }
}

/// `max(severities) * w_max + mean(severities) * w_mean`, clamped to [0, 1].
/// An empty factor list scores 0.0.
pub fn aggregate(factors: &[RiskFactor], weights: RiskWeights) -> f64 {
    if factors.is_empty() {
        return 0.0;
    }

    let max = factors
        .iter()
        .map(|factor| factor.severity)
        .fold(0.0_f64, f64::max);
    let mean =
        factors.iter().map(|factor| factor.severity).sum::<f64>() / factors.len() as f64;

    (max * weights.max_weight + mean * weights.mean_weight).clamp(0.0, 1.0)
}
