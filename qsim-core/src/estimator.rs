//! Estimativa de similaridade pelo SWAP test
//!
//! P(ancilla = 0) = (1 + |⟨ψ|φ⟩|²) / 2, logo |⟨ψ|φ⟩|² = 2·p0 − 1.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::Backend;
use crate::circuit::build_swap_test;
use crate::error::{QuantumError, QuantumResult};
use crate::state::StateVector;

/// Número padrão de shots
pub const DEFAULT_SHOTS: u64 = 8192;

/// Resultado de uma estimativa
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Probabilidade de medir a ancilla em 0
    pub p0: f64,
    /// |⟨ψ|φ⟩|², em [0, 1]
    pub fidelity: f64,
    /// |⟨ψ|φ⟩| = sqrt(fidelity)
    pub overlap: f64,
}

impl SimilarityResult {
    /// Deriva fidelity e overlap a partir de p0
    pub fn from_p0(p0: f64) -> Self {
        let fidelity = fidelity_from_p0(p0);
        Self {
            p0,
            fidelity,
            overlap: overlap_from_fidelity(fidelity),
        }
    }
}

/// clamp(2·p0 − 1, 0, 1)
pub fn fidelity_from_p0(p0: f64) -> f64 {
    (2.0 * p0 - 1.0).clamp(0.0, 1.0)
}

/// sqrt(max(0, fidelity))
pub fn overlap_from_fidelity(fidelity: f64) -> f64 {
    fidelity.max(0.0).sqrt()
}

/// Executa um SWAP test no backend e estima a similaridade
///
/// Uma única rodada de `shots` medições; sem retentativas.
pub fn estimate_similarity<B: Backend + ?Sized>(
    backend: &B,
    state_a: &[Complex64],
    state_b: &[Complex64],
    shots: u64,
) -> QuantumResult<SimilarityResult> {
    if shots == 0 {
        return Err(QuantumError::InvalidShots(shots));
    }

    let circuit = build_swap_test(state_a, state_b)?;
    let counts = backend.run(&circuit, shots)?;

    let p0 = counts.get("0") as f64 / shots as f64;
    let result = SimilarityResult::from_p0(p0);

    debug!(
        backend = backend.name(),
        shots,
        zeros = counts.get("0"),
        fidelity = result.fidelity,
        "swap test estimate"
    );
    Ok(result)
}

/// SWAP test reutilizável sobre um backend
#[derive(Clone, Debug)]
pub struct SwapTest<B> {
    backend: B,
    shots: u64,
}

impl<B: Backend> SwapTest<B> {
    /// Cria com [`DEFAULT_SHOTS`]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            shots: DEFAULT_SHOTS,
        }
    }

    /// Define número de shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Compara dois statevectors
    pub fn estimate(&self, a: &StateVector, b: &StateVector) -> QuantumResult<SimilarityResult> {
        estimate_similarity(&self.backend, a.amplitudes(), b.amplitudes(), self.shots)
    }
}
