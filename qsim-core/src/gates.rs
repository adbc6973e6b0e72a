//! # Quantum Gates — Portas do SWAP test
//!
//! Matrizes single-qubit usadas pelo simulador.
//!
//! - **Single-qubit**: H (Hadamard)
//! - **Three-qubit**: CSWAP (Fredkin), aplicado como permutação de amplitudes
//!   em [`crate::backend`]

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

/// Matriz 2x2 complexa para gates single-qubit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2x2 {
    /// Elementos: [[a, b], [c, d]]
    pub elements: [[Complex64; 2]; 2],
}

impl Matrix2x2 {
    /// Aplica gate a um par de amplitudes [alpha, beta]
    pub fn apply(&self, state: [Complex64; 2]) -> [Complex64; 2] {
        let [alpha, beta] = state;
        let [[a, b], [c, d]] = self.elements;

        [a * alpha + b * beta, c * alpha + d * beta]
    }
}

/// Trait para portas single-qubit
pub trait QuantumGate: Send + Sync {
    /// Nome da porta
    fn name(&self) -> &'static str;

    /// Matriz da porta
    fn matrix(&self) -> Matrix2x2;
}

/// Porta Hadamard: cria superposição
#[derive(Clone, Copy, Debug, Default)]
pub struct Hadamard;

impl QuantumGate for Hadamard {
    fn name(&self) -> &'static str {
        "H"
    }

    fn matrix(&self) -> Matrix2x2 {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Matrix2x2 {
            elements: [[h, h], [h, -h]],
        }
    }
}
