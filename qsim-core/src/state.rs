//! Statevector normalizado

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Tolerância padrão para verificação de normalização
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Estado quântico puro de `num_qubits` qubits
///
/// Invariantes: `amplitudes.len() == 2^num_qubits` e soma de |a|² igual a 1.
/// Só é construído por [`crate::encoding::encode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    /// Amplitudes complexas (índice k ↔ estado da base |k⟩)
    amplitudes: Vec<Complex64>,
    /// Número de qubits (log2 do comprimento)
    num_qubits: usize,
}

impl StateVector {
    pub(crate) fn from_normalized(amplitudes: Vec<Complex64>, num_qubits: usize) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Amplitudes do estado
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Número de qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Comprimento (2^n)
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Sempre falso: um statevector tem ao menos uma amplitude
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Soma dos módulos ao quadrado
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Verifica normalização
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm_sqr() - 1.0).abs() < epsilon
    }

    /// Parte real das amplitudes
    pub fn real_parts(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.re).collect()
    }

    /// Produto interno ⟨self|other⟩, ou `None` se os comprimentos diferem
    pub fn inner_product(&self, other: &StateVector) -> Option<Complex64> {
        if self.len() != other.len() {
            return None;
        }
        Some(
            self.amplitudes
                .iter()
                .zip(&other.amplitudes)
                .map(|(a, b)| a.conj() * b)
                .sum(),
        )
    }

    /// Fidelidade exata |⟨self|other⟩|²
    pub fn fidelity(&self, other: &StateVector) -> Option<f64> {
        self.inner_product(other).map(|ip| ip.norm_sqr())
    }
}
