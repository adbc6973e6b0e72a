//! Environment configuration loading from .env files
//!
//! Defaults used by the `qsim` CLI. The library itself only takes explicit
//! parameters; these helpers resolve the documented defaults, optionally
//! overridden by environment variables:
//!
//! | variable            | default |
//! |---------------------|---------|
//! | `QSIM_SHOTS`        | 8192    |
//! | `QSIM_FEATURE_MODE` | tf      |
//! | `QSIM_MAX_FEATURES` | 1024    |
//! | `QSIM_MAX_QUBITS`   | 24      |
//! | `QSIM_SEED`         | unset   |

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::backend::DEFAULT_MAX_QUBITS;
use crate::estimator::DEFAULT_SHOTS;
use crate::text::{FeatureMode, DEFAULT_MAX_FEATURES};

// Automatically load .env when config module is accessed
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

/// Ensure environment is loaded
#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    ensure_loaded();
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Load shot count from environment
/// Default: 8192
pub fn default_shots() -> u64 {
    env_parse::<u64>("QSIM_SHOTS")
        .filter(|&s| s > 0)
        .unwrap_or(DEFAULT_SHOTS)
}

/// Load bag-of-words weighting from environment
/// Default: tf
pub fn default_feature_mode() -> FeatureMode {
    env_parse("QSIM_FEATURE_MODE").unwrap_or_default()
}

/// Load vocabulary size from environment
/// Default: 1024
pub fn default_max_features() -> usize {
    env_parse::<usize>("QSIM_MAX_FEATURES")
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_FEATURES)
}

/// Load simulator qubit limit from environment
/// Default: 24
pub fn max_qubits() -> usize {
    env_parse("QSIM_MAX_QUBITS").unwrap_or(DEFAULT_MAX_QUBITS)
}

/// Load sampling seed from environment
/// Default: none (system entropy)
pub fn seed() -> Option<u64> {
    env_parse("QSIM_SEED")
}

/// Parâmetros de uma execução de similaridade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Shots por estimativa
    pub shots: u64,
    /// Ponderação do modo texto
    pub feature_mode: FeatureMode,
    /// Tamanho máximo do vocabulário
    pub max_features: usize,
    /// Limite de qubits do simulador
    pub max_qubits: usize,
    /// Seed da amostragem
    pub seed: Option<u64>,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            feature_mode: FeatureMode::Tf,
            max_features: DEFAULT_MAX_FEATURES,
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }
}

impl SimilarityConfig {
    /// Carrega do ambiente (com fallback nos defaults)
    pub fn from_env() -> Self {
        Self {
            shots: default_shots(),
            feature_mode: default_feature_mode(),
            max_features: default_max_features(),
            max_qubits: max_qubits(),
            seed: seed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimilarityConfig::default();
        assert_eq!(config.shots, 8192);
        assert_eq!(config.feature_mode, FeatureMode::Tf);
        assert_eq!(config.max_features, 1024);
        assert_eq!(config.max_qubits, 24);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_unset_variable_is_none() {
        assert_eq!(env_parse::<u64>("QSIM_TEST_SURELY_UNSET_VARIABLE"), None);
    }
}
