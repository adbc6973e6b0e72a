//! # SWAP-Test Circuit
//!
//! Descrição abstrata de circuito e construção do SWAP test.
//!
//! ## Layout
//!
//! ```text
//! q0        ──────────────────── H ──●──●── … ──●── H ── M ══ c0
//! q1..qn    ── init(|ψ⟩) ───────────×──┼── … ──┼──────────
//!                                      │  ×    │
//! qn+1..q2n ── init(|φ⟩) ───────────×──┼── … ──┼──────────
//!                                         ×    ×
//! ```
//!
//! P(c0 = 0) = (1 + |⟨ψ|φ⟩|²) / 2

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

use crate::error::{Operand, QuantumError, QuantumResult};
use crate::state::NORM_TOLERANCE;

/// Instrução do circuito
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Prepara `qubits` no estado `amplitudes` (bit j do índice ↔ `qubits[j]`)
    Initialize {
        qubits: Vec<usize>,
        amplitudes: Vec<Complex64>,
    },
    /// Hadamard
    Hadamard { qubit: usize },
    /// Fredkin: troca `target_a` e `target_b` se `control` = 1
    ControlledSwap {
        control: usize,
        target_a: usize,
        target_b: usize,
    },
    /// Mede `qubit` em `clbit`
    Measure { qubit: usize, clbit: usize },
}

impl Instruction {
    /// Nome curto (estilo OpenQASM)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "initialize",
            Self::Hadamard { .. } => "h",
            Self::ControlledSwap { .. } => "cswap",
            Self::Measure { .. } => "measure",
        }
    }

    /// Qubits tocados pela instrução
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Self::Initialize { qubits, .. } => qubits.clone(),
            Self::Hadamard { qubit } | Self::Measure { qubit, .. } => vec![*qubit],
            Self::ControlledSwap {
                control,
                target_a,
                target_b,
            } => vec![*control, *target_a, *target_b],
        }
    }
}

/// Circuito quântico: qubits, bits clássicos e sequência de instruções
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Cria circuito vazio
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Retorna referência às instruções
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Retorna número de instruções
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Verifica se circuito está vazio
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Número de instruções com o nome dado
    pub fn count_ops(&self, name: &str) -> usize {
        self.instructions.iter().filter(|i| i.name() == name).count()
    }

    fn check_qubit(&self, qubit: usize) -> QuantumResult<()> {
        if qubit >= self.num_qubits {
            return Err(QuantumError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Adiciona preparação de estado arbitrário num bloco de qubits
    pub fn initialize(&mut self, amplitudes: &[Complex64], qubits: &[usize]) -> QuantumResult<&mut Self> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        if has_duplicates(qubits) {
            return Err(QuantumError::InvalidCircuit(
                "initialize targets repeated qubits".to_string(),
            ));
        }
        let expected = 1usize << qubits.len();
        if amplitudes.len() != expected {
            return Err(QuantumError::ShapeMismatch {
                left: amplitudes.len(),
                right: expected,
            });
        }
        let norm_sqr: f64 = amplitudes.iter().map(|a| a.norm_sqr()).sum();
        if !((norm_sqr - 1.0).abs() <= NORM_TOLERANCE) {
            return Err(QuantumError::InvalidCircuit(format!(
                "initialize amplitudes must have unit norm (sum of squares = {norm_sqr})"
            )));
        }
        self.instructions.push(Instruction::Initialize {
            qubits: qubits.to_vec(),
            amplitudes: amplitudes.to_vec(),
        });
        Ok(self)
    }

    /// Adiciona Hadamard
    pub fn h(&mut self, qubit: usize) -> QuantumResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.instructions.push(Instruction::Hadamard { qubit });
        Ok(self)
    }

    /// Adiciona controlled-SWAP
    pub fn cswap(&mut self, control: usize, target_a: usize, target_b: usize) -> QuantumResult<&mut Self> {
        for q in [control, target_a, target_b] {
            self.check_qubit(q)?;
        }
        if has_duplicates(&[control, target_a, target_b]) {
            return Err(QuantumError::InvalidCircuit(format!(
                "cswap operands must be distinct, got ({control}, {target_a}, {target_b})"
            )));
        }
        self.instructions.push(Instruction::ControlledSwap {
            control,
            target_a,
            target_b,
        });
        Ok(self)
    }

    /// Adiciona medição
    pub fn measure(&mut self, qubit: usize, clbit: usize) -> QuantumResult<&mut Self> {
        self.check_qubit(qubit)?;
        if clbit >= self.num_clbits {
            return Err(QuantumError::ClbitOutOfRange {
                clbit,
                num_clbits: self.num_clbits,
            });
        }
        self.instructions.push(Instruction::Measure { qubit, clbit });
        Ok(self)
    }
}

fn has_duplicates(qubits: &[usize]) -> bool {
    qubits
        .iter()
        .enumerate()
        .any(|(i, q)| qubits[..i].contains(q))
}

/// Índices de qubits do SWAP test para registradores de `n` qubits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapTestLayout {
    /// Qubits por registrador
    pub n: usize,
}

impl SwapTestLayout {
    pub const ANCILLA: usize = 0;

    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Total de qubits (1 + 2n)
    pub fn num_qubits(&self) -> usize {
        1 + 2 * self.n
    }

    /// Registrador A: 1..=n
    pub fn register_a(&self) -> RangeInclusive<usize> {
        1..=self.n
    }

    /// Registrador B: n+1..=2n
    pub fn register_b(&self) -> RangeInclusive<usize> {
        self.n + 1..=2 * self.n
    }
}

fn check_power_of_two(operand: Operand, len: usize) -> QuantumResult<usize> {
    if !len.is_power_of_two() {
        return Err(QuantumError::NotPowerOfTwo { operand, len });
    }
    Ok(len.trailing_zeros() as usize)
}

/// Constrói o circuito do SWAP test para dois statevectors
///
/// Falha se os comprimentos diferem ou não são potência de dois.
pub fn build_swap_test(state_a: &[Complex64], state_b: &[Complex64]) -> QuantumResult<Circuit> {
    if state_a.len() != state_b.len() {
        return Err(QuantumError::ShapeMismatch {
            left: state_a.len(),
            right: state_b.len(),
        });
    }
    let n = check_power_of_two(Operand::A, state_a.len())?;
    check_power_of_two(Operand::B, state_b.len())?;

    let layout = SwapTestLayout::new(n);
    let a_qubits: Vec<usize> = layout.register_a().collect();
    let b_qubits: Vec<usize> = layout.register_b().collect();
    let ancilla = SwapTestLayout::ANCILLA;

    let mut qc = Circuit::new(layout.num_qubits(), 1);
    qc.initialize(state_a, &a_qubits)?;
    qc.initialize(state_b, &b_qubits)?;

    qc.h(ancilla)?;
    for (&qa, &qb) in a_qubits.iter().zip(&b_qubits) {
        qc.cswap(ancilla, qa, qb)?;
    }
    qc.h(ancilla)?;
    qc.measure(ancilla, 0)?;

    debug!(
        qubits_per_register = n,
        num_qubits = qc.num_qubits(),
        instructions = qc.len(),
        "built swap-test circuit"
    );
    Ok(qc)
}
