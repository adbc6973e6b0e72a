//! Relatório de uma comparação (resultado + metadados do chamador)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::estimator::SimilarityResult;
use crate::text::FeatureMode;

/// Origem dos vetores comparados
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Vectors,
    Text,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vectors => write!(f, "vectors"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Relatório serializável
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_mode: Option<FeatureMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_features: Option<usize>,
    pub n_qubits_per_register: usize,
    pub shots: u64,
    #[serde(flatten)]
    pub result: SimilarityResult,
}

impl SimilarityReport {
    /// Relatório do modo `vectors`
    pub fn vectors(n_qubits_per_register: usize, shots: u64, result: SimilarityResult) -> Self {
        Self {
            mode: Mode::Vectors,
            feature_mode: None,
            max_features: None,
            n_qubits_per_register,
            shots,
            result,
        }
    }

    /// Relatório do modo `text`
    pub fn text(
        feature_mode: FeatureMode,
        max_features: usize,
        n_qubits_per_register: usize,
        shots: u64,
        result: SimilarityResult,
    ) -> Self {
        Self {
            mode: Mode::Text,
            feature_mode: Some(feature_mode),
            max_features: Some(max_features),
            n_qubits_per_register,
            shots,
            result,
        }
    }

    /// JSON indentado
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
