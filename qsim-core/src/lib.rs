//! # ⚛️ qsim-core — SWAP-Test Similarity
//!
//! Estima a similaridade entre dois vetores reais (ou dois textos como
//! bag-of-words) com um SWAP test simulado.
//!
//! ## Computational Complexity
//!
//! **Encoding — O(d):**
//! - d = comprimento do vetor, preenchido até 2^n
//!
//! **Simulation — O(G × 2^(2n+1)):**
//! - G = 2 + n instruções unitárias sobre 1 + 2n qubits
//! - Memória: 2^(2n+1) amplitudes complexas, limitada por `max_qubits`
//!
//! **Sampling — O(shots)**
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  text / input (pré-processamento)               │
//! └───────────────────────┬─────────────────────────┘
//!                         ▼
//! ┌─────────────────────────────────────────────────┐
//! │  encoding: pad 2^n + normalização → StateVector │
//! └───────────────────────┬─────────────────────────┘
//!                         ▼
//! ┌─────────────────────────────────────────────────┐
//! │  circuit: ancilla + A + B, H, CSWAP…, H, M      │
//! └───────────────────────┬─────────────────────────┘
//!                         ▼
//! ┌─────────────────────────────────────────────────┐
//! │  backend (simulador) → estimator: p0, F, |⟨ψ|φ⟩|│
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qsim_core::prelude::*;
//!
//! let (a, b) = encode_pair(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
//! let swap_test = SwapTest::new(ExactBackend::new()).with_shots(1024);
//! let result = swap_test.estimate(&a, &b).unwrap();
//! assert_eq!(result.fidelity, 1.0);
//! ```

pub mod backend;
pub mod circuit;
pub mod config;
pub mod encoding;
pub mod error;
pub mod estimator;
pub mod gates;
pub mod input;
pub mod report;
pub mod state;
pub mod text;

pub use backend::{Backend, Counts, ExactBackend, StatevectorSimulator, DEFAULT_MAX_QUBITS};
pub use circuit::{build_swap_test, Circuit, Instruction, SwapTestLayout};
pub use config::SimilarityConfig;
pub use encoding::{encode, encode_pair, next_power_of_two, normalize};
pub use error::{Operand, QuantumError, QuantumResult};
pub use estimator::{
    estimate_similarity, fidelity_from_p0, overlap_from_fidelity, SimilarityResult, SwapTest,
    DEFAULT_SHOTS,
};
pub use gates::{Hadamard, Matrix2x2, QuantumGate};
pub use input::parse_vector_arg;
pub use report::{Mode, SimilarityReport};
pub use state::StateVector;
pub use text::{build_vocab, text_to_vectors, tokenize, vectorize, FeatureMode, DEFAULT_MAX_FEATURES};

/// Prelude com os tipos mais usados
pub mod prelude {
    pub use crate::backend::{Backend, ExactBackend, StatevectorSimulator};
    pub use crate::encoding::{encode, encode_pair};
    pub use crate::error::{QuantumError, QuantumResult};
    pub use crate::estimator::{estimate_similarity, SimilarityResult, SwapTest};
    pub use crate::state::StateVector;
    pub use crate::text::{text_to_vectors, FeatureMode};
}
