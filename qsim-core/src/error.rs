//! Tipos de erro para qsim-core

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resultado customizado para operações de similaridade
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Operando de uma comparação
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    A,
    B,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "vector A"),
            Self::B => write!(f, "vector B"),
        }
    }
}

/// Formata um operando opcional para as mensagens de erro
fn operand_label(operand: &Option<Operand>) -> String {
    match operand {
        Some(op) => op.to_string(),
        None => "input vector".to_string(),
    }
}

/// Erros que podem ocorrer na codificação, construção ou execução do circuito
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    #[error("Cannot normalize {}: L2 norm is zero", operand_label(.operand))]
    ZeroVector { operand: Option<Operand> },

    #[error("Cannot normalize {}: element {index} is not finite", operand_label(.operand))]
    NonFinite { operand: Option<Operand>, index: usize },

    #[error("Shape mismatch: statevector lengths {left} and {right} differ")]
    ShapeMismatch { left: usize, right: usize },

    #[error("Statevector for {operand} has length {len}, which is not a power of two")]
    NotPowerOfTwo { operand: Operand, len: usize },

    #[error("Invalid shot count: {0} (must be positive)")]
    InvalidShots(u64),

    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    #[error("Classical bit {clbit} out of range for a circuit with {num_clbits} classical bits")]
    ClbitOutOfRange { clbit: usize, num_clbits: usize },

    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    #[error("Backend failure: {0}")]
    Backend(String),

    #[error("Could not parse vector: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl QuantumError {
    /// Associa o operando a erros de codificação que ainda não o identificam
    pub fn for_operand(self, op: Operand) -> Self {
        match self {
            Self::ZeroVector { operand: None } => Self::ZeroVector { operand: Some(op) },
            Self::NonFinite { operand: None, index } => Self::NonFinite {
                operand: Some(op),
                index,
            },
            other => other,
        }
    }
}

impl From<std::io::Error> for QuantumError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
