//! # Statevector Encoding
//!
//! Converte vetores reais arbitrários em statevectors válidos:
//!
//! ```text
//! [3, 4, 0]  ──pad──▶  [3, 4, 0, 0]  ──/‖v‖──▶  [0.6, 0.8, 0, 0]   (n = 2)
//! ```
//!
//! A codificação é pura e determinística.

use num_complex::Complex64;
use tracing::debug;

use crate::error::{Operand, QuantumError, QuantumResult};
use crate::state::StateVector;

/// Menor potência de dois ≥ `n` (mínimo 1)
pub fn next_power_of_two(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    n.next_power_of_two()
}

/// Normaliza o vetor pela norma L2
///
/// A norma é calculada sobre `v / max|v|`, sem overflow nem underflow
/// para magnitudes extremas.
pub fn normalize(values: &[f64]) -> QuantumResult<Vec<f64>> {
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(QuantumError::NonFinite {
            operand: None,
            index,
        });
    }

    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return Err(QuantumError::ZeroVector { operand: None });
    }

    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();
    // max |scaled| = 1, logo norm ∈ [1, √len]
    let norm = scaled.iter().map(|v| v * v).sum::<f64>().sqrt();
    Ok(scaled.into_iter().map(|v| v / norm).collect())
}

/// Codifica um vetor real em statevector
///
/// Preenche com zeros à direita até a próxima potência de dois e normaliza.
/// Vetor vazio vira `[0]` e falha como vetor nulo.
pub fn encode(raw: &[f64]) -> QuantumResult<StateVector> {
    let target_len = next_power_of_two(raw.len());
    let mut padded = raw.to_vec();
    padded.resize(target_len, 0.0);

    let normalized = normalize(&padded)?;
    let num_qubits = target_len.trailing_zeros() as usize;

    debug!(
        input_len = raw.len(),
        target_len, num_qubits, "encoded vector into statevector"
    );

    let amplitudes = normalized
        .into_iter()
        .map(|v| Complex64::new(v, 0.0))
        .collect();
    Ok(StateVector::from_normalized(amplitudes, num_qubits))
}

/// Codifica os dois operandos de uma comparação
///
/// Erros de codificação identificam o operando; contagens de qubits
/// diferentes resultam em [`QuantumError::ShapeMismatch`].
pub fn encode_pair(a: &[f64], b: &[f64]) -> QuantumResult<(StateVector, StateVector)> {
    let state_a = encode(a).map_err(|e| e.for_operand(Operand::A))?;
    let state_b = encode(b).map_err(|e| e.for_operand(Operand::B))?;

    if state_a.num_qubits() != state_b.num_qubits() {
        return Err(QuantumError::ShapeMismatch {
            left: state_a.len(),
            right: state_b.len(),
        });
    }
    Ok((state_a, state_b))
}
