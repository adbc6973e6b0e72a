//! # Simulation Backends
//!
//! Fronteira de execução de circuitos: circuito + shots → contagens.
//!
//! ```text
//! ┌──────────────┐  run(circuit, shots)  ┌──────────────────────────┐
//! │  Estimator   │ ────────────────────▶ │  Backend                 │
//! │              │ ◀──────────────────── │  ├ StatevectorSimulator  │
//! └──────────────┘   Counts {"0": 6144}  │  └ ExactBackend          │
//!                                        └──────────────────────────┘
//! ```
//!
//! Convenção de bits: qubit q ↔ bit q do índice da base (little-endian).
//! Strings de resultado têm o clbit 0 como caractere mais à direita.

use num_complex::Complex64;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::circuit::{Circuit, Instruction};
use crate::error::{QuantumError, QuantumResult};
use crate::gates::{Hadamard, QuantumGate};

/// Limite padrão de qubits simulados (2^24 amplitudes ≈ 256 MiB)
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// Contagens de medição por string de bits clássicos
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contagem de um resultado (0 se nunca observado)
    pub fn get(&self, outcome: &str) -> u64 {
        self.0.get(outcome).copied().unwrap_or(0)
    }

    /// Soma `count` ao resultado
    pub fn record(&mut self, outcome: impl Into<String>, count: u64) {
        if count > 0 {
            *self.0.entry(outcome.into()).or_insert(0) += count;
        }
    }

    /// Total de shots registrados
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (outcome, count) in iter {
            counts.record(outcome, count);
        }
        counts
    }
}

/// Backend de execução de circuitos
pub trait Backend: Send + Sync {
    /// Nome do backend
    fn name(&self) -> &str;

    /// Executa o circuito `shots` vezes e retorna as contagens
    fn run(&self, circuit: &Circuit, shots: u64) -> QuantumResult<Counts>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, circuit: &Circuit, shots: u64) -> QuantumResult<Counts> {
        (**self).run(circuit, shots)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, circuit: &Circuit, shots: u64) -> QuantumResult<Counts> {
        (**self).run(circuit, shots)
    }
}

/// Simulador denso de statevector
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatevectorSimulator {
    /// Máximo de qubits aceitos
    pub max_qubits: usize,
    /// Seed da amostragem (None = entropia do sistema)
    pub seed: Option<u64>,
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }
}

impl StatevectorSimulator {
    /// Cria simulador com configuração padrão
    pub fn new() -> Self {
        Self::default()
    }

    /// Define seed da amostragem
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Define limite de qubits
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Valida o circuito para este backend
    ///
    /// Exige: qubits dentro do limite, `initialize` apenas sobre qubits ainda
    /// não tocados e nenhuma operação após a medição de um qubit.
    fn transpile(&self, circuit: &Circuit) -> QuantumResult<()> {
        if circuit.num_qubits() > self.max_qubits {
            return Err(QuantumError::Backend(format!(
                "circuit needs {} qubits, simulator supports at most {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }

        let mut touched = vec![false; circuit.num_qubits()];
        let mut measured = vec![false; circuit.num_qubits()];
        for inst in circuit.instructions() {
            let qubits = inst.qubits();
            if let Some(&q) = qubits.iter().find(|&&q| q >= circuit.num_qubits()) {
                return Err(QuantumError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: circuit.num_qubits(),
                });
            }
            if let Some(&q) = qubits.iter().find(|&&q| measured[q]) {
                return Err(QuantumError::Backend(format!(
                    "{} on qubit {q} after it was measured",
                    inst.name()
                )));
            }
            if let Instruction::Initialize { .. } = inst {
                if let Some(&q) = qubits.iter().find(|&&q| touched[q]) {
                    return Err(QuantumError::Backend(format!(
                        "initialize on qubit {q}, which is no longer in |0⟩"
                    )));
                }
            }
            if let Instruction::Measure { qubit, .. } = inst {
                measured[*qubit] = true;
            }
            for q in qubits {
                touched[q] = true;
            }
        }
        Ok(())
    }

    /// Evolui |0…0⟩ pelas instruções unitárias do circuito
    fn evolve(&self, circuit: &Circuit) -> Vec<Complex64> {
        let mut state = vec![Complex64::new(0.0, 0.0); 1usize << circuit.num_qubits()];
        state[0] = Complex64::new(1.0, 0.0);

        for inst in circuit.instructions() {
            trace!(op = inst.name(), qubits = ?inst.qubits(), "apply");
            match inst {
                Instruction::Initialize { qubits, amplitudes } => {
                    apply_initialize(&mut state, qubits, amplitudes)
                }
                Instruction::Hadamard { qubit } => apply_single(&mut state, *qubit, &Hadamard),
                Instruction::ControlledSwap {
                    control,
                    target_a,
                    target_b,
                } => apply_cswap(&mut state, *control, *target_a, *target_b),
                // Medições são terminais e lidas no final
                Instruction::Measure { .. } => {}
            }
        }
        state
    }

    /// Distribuição exata dos resultados clássicos
    pub fn probabilities(&self, circuit: &Circuit) -> QuantumResult<BTreeMap<String, f64>> {
        self.transpile(circuit)?;
        let state = self.evolve(circuit);

        let measures: Vec<(usize, usize)> = circuit
            .instructions()
            .iter()
            .filter_map(|inst| match inst {
                Instruction::Measure { qubit, clbit } => Some((*qubit, *clbit)),
                _ => None,
            })
            .collect();

        let mut probs = BTreeMap::new();
        for (index, amp) in state.iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            let mut bits = vec![b'0'; circuit.num_clbits()];
            for &(qubit, clbit) in &measures {
                if (index >> qubit) & 1 == 1 {
                    // clbit 0 é o caractere mais à direita
                    bits[circuit.num_clbits() - 1 - clbit] = b'1';
                }
            }
            let key = String::from_utf8(bits).unwrap_or_default();
            *probs.entry(key).or_insert(0.0) += p;
        }
        Ok(probs)
    }
}

impl Backend for StatevectorSimulator {
    fn name(&self) -> &str {
        "statevector_simulator"
    }

    fn run(&self, circuit: &Circuit, shots: u64) -> QuantumResult<Counts> {
        let probs = self.probabilities(circuit)?;
        let (outcomes, weights): (Vec<String>, Vec<f64>) = probs.into_iter().unzip();
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| QuantumError::Backend(format!("invalid outcome distribution: {e}")))?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut tally = vec![0u64; outcomes.len()];
        for _ in 0..shots {
            tally[dist.sample(&mut rng)] += 1;
        }

        let counts: Counts = outcomes.into_iter().zip(tally).collect();
        debug!(backend = self.name(), shots, ?counts, "sampled measurement counts");
        Ok(counts)
    }
}

/// Backend determinístico: retorna as contagens esperadas
///
/// Usa a mesma simulação do [`StatevectorSimulator`] e arredonda
/// `p · shots` pelo maior resto, de modo que o total seja exatamente `shots`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExactBackend {
    simulator: StatevectorSimulator,
}

impl ExactBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define limite de qubits
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.simulator.max_qubits = max_qubits;
        self
    }
}

impl Backend for ExactBackend {
    fn name(&self) -> &str {
        "exact"
    }

    fn run(&self, circuit: &Circuit, shots: u64) -> QuantumResult<Counts> {
        let probs = self.simulator.probabilities(circuit)?;
        let total: f64 = probs.values().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(QuantumError::Backend(format!(
                "invalid outcome distribution: total probability {total}"
            )));
        }

        let mut rows: Vec<(String, u64, f64)> = probs
            .into_iter()
            .map(|(outcome, p)| {
                let expected = p / total * shots as f64;
                let floor = expected.floor();
                (outcome, floor as u64, expected - floor)
            })
            .collect();

        let assigned: u64 = rows.iter().map(|(_, c, _)| c).sum();
        let mut remaining = shots.saturating_sub(assigned);

        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_by(|&i, &j| rows[j].2.total_cmp(&rows[i].2));
        for i in order {
            if remaining == 0 {
                break;
            }
            rows[i].1 += 1;
            remaining -= 1;
        }

        let counts: Counts = rows.into_iter().map(|(o, c, _)| (o, c)).collect();
        debug!(backend = self.name(), shots, ?counts, "expected measurement counts");
        Ok(counts)
    }
}

/// Prepara o bloco `qubits` (todo em |0⟩) no estado `amplitudes`
fn apply_initialize(state: &mut [Complex64], qubits: &[usize], amplitudes: &[Complex64]) {
    let mask: usize = qubits.iter().map(|&q| 1usize << q).sum();
    for base in 0..state.len() {
        if base & mask != 0 {
            continue;
        }
        let coeff = state[base];
        if coeff.norm_sqr() == 0.0 {
            continue;
        }
        for (k, amp) in amplitudes.iter().enumerate() {
            let mut index = base;
            for (j, &q) in qubits.iter().enumerate() {
                if (k >> j) & 1 == 1 {
                    index |= 1 << q;
                }
            }
            state[index] = coeff * amp;
        }
    }
}

/// Aplica gate single-qubit no qubit `target`
fn apply_single<G: QuantumGate>(state: &mut [Complex64], target: usize, gate: &G) {
    trace!(gate = gate.name(), target, "single-qubit gate");
    let bit = 1usize << target;
    let matrix = gate.matrix();
    for i in 0..state.len() {
        if i & bit == 0 {
            let j = i | bit;
            let [a, b] = matrix.apply([state[i], state[j]]);
            state[i] = a;
            state[j] = b;
        }
    }
}

/// Troca amplitudes onde control = 1 e os alvos diferem
fn apply_cswap(state: &mut [Complex64], control: usize, target_a: usize, target_b: usize) {
    let c = 1usize << control;
    let a = 1usize << target_a;
    let b = 1usize << target_b;
    for i in 0..state.len() {
        if i & c != 0 && i & a != 0 && i & b == 0 {
            state.swap(i, (i & !a) | b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_counts_default_zero() {
        let mut counts = Counts::new();
        counts.record("0", 10);
        counts.record("1", 0);
        assert_eq!(counts.get("0"), 10);
        assert_eq!(counts.get("1"), 0);
        assert_eq!(counts.total(), 10);
        assert_eq!(counts.iter().count(), 1);
    }

    #[test]
    fn test_hadamard_measure_exact() {
        let mut qc = Circuit::new(1, 1);
        qc.h(0).unwrap().measure(0, 0).unwrap();

        let counts = ExactBackend::new().run(&qc, 1000).unwrap();
        assert_eq!(counts.get("0"), 500);
        assert_eq!(counts.get("1"), 500);
    }

    #[test]
    fn test_exact_backend_total_matches_shots() {
        let mut qc = Circuit::new(1, 1);
        qc.h(0).unwrap().measure(0, 0).unwrap();

        let counts = ExactBackend::new().run(&qc, 7).unwrap();
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_exact_backend_rejects_empty_distribution() {
        // Circuito desserializado, sem a validação do builder
        let qc: Circuit = serde_json::from_value(serde_json::json!({
            "num_qubits": 1,
            "num_clbits": 1,
            "instructions": [
                { "Initialize": { "qubits": [0], "amplitudes": [[0.0, 0.0], [0.0, 0.0]] } },
                { "Measure": { "qubit": 0, "clbit": 0 } }
            ]
        }))
        .unwrap();

        assert!(matches!(
            ExactBackend::new().run(&qc, 100),
            Err(QuantumError::Backend(_))
        ));
        assert!(matches!(
            StatevectorSimulator::new().run(&qc, 100),
            Err(QuantumError::Backend(_))
        ));
    }

    #[test]
    fn test_initialize_layout_little_endian() {
        // amplitude índice 1 ↔ qubits[0] = 1
        let mut qc = Circuit::new(3, 2);
        qc.initialize(&[c(0.0), c(1.0), c(0.0), c(0.0)], &[1, 2])
            .unwrap()
            .measure(1, 0)
            .unwrap()
            .measure(2, 1)
            .unwrap();

        let probs = StatevectorSimulator::new().probabilities(&qc).unwrap();
        assert_eq!(probs.len(), 1);
        assert!((probs["01"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cswap_swaps_only_when_control_set() {
        let mut qc = Circuit::new(3, 3);
        // q0 = 1, q1 = 1, q2 = 0
        qc.initialize(&[c(0.0), c(0.0), c(0.0), c(1.0)], &[0, 1]).unwrap();
        qc.cswap(0, 1, 2).unwrap();
        for q in 0..3 {
            qc.measure(q, q).unwrap();
        }

        let probs = StatevectorSimulator::new().probabilities(&qc).unwrap();
        // q0 = 1, q1 = 0, q2 = 1 → "101"
        assert!((probs["101"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let mut qc = Circuit::new(1, 1);
        qc.h(0).unwrap().measure(0, 0).unwrap();

        let sim = StatevectorSimulator::new().with_seed(42);
        assert_eq!(sim.run(&qc, 4096).unwrap(), sim.run(&qc, 4096).unwrap());
    }

    #[test]
    fn test_sampled_total_matches_shots() {
        let mut qc = Circuit::new(1, 1);
        qc.h(0).unwrap().measure(0, 0).unwrap();

        let counts = StatevectorSimulator::new().run(&qc, 333).unwrap();
        assert_eq!(counts.total(), 333);
    }

    #[test]
    fn test_too_many_qubits() {
        let qc = Circuit::new(5, 1);
        let sim = StatevectorSimulator::new().with_max_qubits(4);
        assert!(matches!(sim.run(&qc, 1), Err(QuantumError::Backend(_))));
    }

    #[test]
    fn test_gate_after_measure_rejected() {
        let mut qc = Circuit::new(1, 1);
        qc.measure(0, 0).unwrap().h(0).unwrap();
        assert!(matches!(
            StatevectorSimulator::new().run(&qc, 1),
            Err(QuantumError::Backend(_))
        ));
    }

    #[test]
    fn test_initialize_after_gate_rejected() {
        let mut qc = Circuit::new(1, 1);
        qc.h(0).unwrap().initialize(&[c(1.0), c(0.0)], &[0]).unwrap();
        assert!(matches!(
            ExactBackend::new().run(&qc, 1),
            Err(QuantumError::Backend(_))
        ));
    }
}
