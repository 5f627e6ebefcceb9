//! Statevector estimator and the estimator-backed network.
//!
//! The estimator evolves `|0...0>` through a [`FeatureCircuit`] exactly on
//! `2^n` complex amplitudes and returns the expectation value of a Pauli-Z
//! observable. Qubit `k` is bit `k` of the basis index (little-endian).

use std::collections::HashMap;
use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;

use crate::error::{QuantumError, QuantumResult};

use super::circuit::{FeatureCircuit, Gate};
use super::parameters::Parameter;

/// Largest register the dense simulator will allocate for.
pub const MAX_SIMULATED_QUBITS: usize = 20;

/// Tensor product of Z on a subset of positions, identity elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZObservable {
    qubits: Vec<usize>,
}

impl ZObservable {
    /// Z on every position (global parity).
    pub fn all(num_qubits: usize) -> Self {
        Self {
            qubits: (0..num_qubits).collect(),
        }
    }

    /// Z on the listed positions.
    pub fn on(qubits: Vec<usize>) -> Self {
        Self { qubits }
    }

    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    fn mask(&self) -> usize {
        self.qubits.iter().fold(0usize, |mask, &q| mask | (1usize << q))
    }

    /// Eigenvalue (+1 or -1) of basis state `index` under `mask`.
    fn eigenvalue(mask: usize, index: usize) -> f64 {
        if (index & mask).count_ones() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

/// Exact expectation-value estimator over a dense statevector.
#[derive(Debug, Clone, Default)]
pub struct StatevectorEstimator;

impl StatevectorEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Final statevector of `circuit` with all parameters bound.
    pub fn statevector(
        &self,
        circuit: &FeatureCircuit,
        bindings: &HashMap<Parameter, f64>,
    ) -> QuantumResult<Vec<Complex64>> {
        let n = circuit.num_qubits();
        if n > MAX_SIMULATED_QUBITS {
            return Err(QuantumError::estimator(format!(
                "{} qubits exceeds the simulator limit of {}",
                n, MAX_SIMULATED_QUBITS
            )));
        }
        circuit.validate()?;

        let mut state = vec![Complex64::new(0.0, 0.0); 1 << n];
        state[0] = Complex64::new(1.0, 0.0);

        for gate in circuit.gates() {
            match gate {
                Gate::H { qubit } => {
                    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                    apply_single(&mut state, *qubit, [[h, h], [h, -h]]);
                }
                Gate::Cx { control, target } => apply_cx(&mut state, *control, *target),
                Gate::Rx { qubit, angle } => {
                    let theta = bound_value(bindings, angle)?;
                    let c = Complex64::new((theta / 2.0).cos(), 0.0);
                    let s = Complex64::new(0.0, -(theta / 2.0).sin());
                    apply_single(&mut state, *qubit, [[c, s], [s, c]]);
                }
                Gate::Rz { qubit, angle } => {
                    let theta = bound_value(bindings, angle)?;
                    let zero = Complex64::new(0.0, 0.0);
                    let phase = Complex64::from_polar(1.0, theta / 2.0);
                    apply_single(&mut state, *qubit, [[phase.conj(), zero], [zero, phase]]);
                }
            }
        }

        Ok(state)
    }

    /// `<psi| O |psi>` for the bound circuit.
    pub fn expectation(
        &self,
        circuit: &FeatureCircuit,
        bindings: &HashMap<Parameter, f64>,
        observable: &ZObservable,
    ) -> QuantumResult<f64> {
        if let Some(&q) = observable.qubits().iter().find(|&&q| q >= circuit.num_qubits()) {
            return Err(QuantumError::QubitOutOfRange {
                index: q,
                num_qubits: circuit.num_qubits(),
            });
        }

        let state = self.statevector(circuit, bindings)?;
        let mask = observable.mask();
        Ok(state
            .iter()
            .enumerate()
            .map(|(index, amp)| ZObservable::eigenvalue(mask, index) * amp.norm_sqr())
            .sum())
    }
}

fn bound_value(bindings: &HashMap<Parameter, f64>, param: &Parameter) -> QuantumResult<f64> {
    bindings
        .get(param)
        .copied()
        .ok_or_else(|| QuantumError::UnboundParameter {
            name: param.to_string(),
        })
}

fn apply_single(state: &mut [Complex64], qubit: usize, m: [[Complex64; 2]; 2]) {
    let bit = 1 << qubit;
    for i in 0..state.len() {
        if i & bit == 0 {
            let a0 = state[i];
            let a1 = state[i | bit];
            state[i] = m[0][0] * a0 + m[0][1] * a1;
            state[i | bit] = m[1][0] * a0 + m[1][1] * a1;
        }
    }
}

fn apply_cx(state: &mut [Complex64], control: usize, target: usize) {
    let c = 1 << control;
    let t = 1 << target;
    for i in 0..state.len() {
        if i & c != 0 && i & t == 0 {
            state.swap(i, i | t);
        }
    }
}

/// Circuit bound to an input/weight split and evaluated by an estimator.
///
/// One forward evaluation yields one expectation value in `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct EstimatorQnn {
    circuit: FeatureCircuit,
    input_params: Vec<Parameter>,
    weight_params: Vec<Parameter>,
    observable: ZObservable,
    estimator: StatevectorEstimator,
}

impl EstimatorQnn {
    /// Bind `circuit` to the given parameter split, observing Z on every position.
    ///
    /// # Errors
    /// - `QuantumError::InvalidBinding` if the lists overlap, reference a
    ///   parameter outside the circuit, leave a circuit parameter unbound, or
    ///   the input list is empty
    pub fn new(
        circuit: FeatureCircuit,
        input_params: Vec<Parameter>,
        weight_params: Vec<Parameter>,
        estimator: StatevectorEstimator,
    ) -> QuantumResult<Self> {
        circuit.validate()?;

        if input_params.is_empty() {
            return Err(QuantumError::invalid_binding("no input parameters"));
        }

        let circuit_params = circuit.parameters();
        let mut seen: HashMap<&Parameter, &'static str> = HashMap::new();
        for (param, kind) in input_params
            .iter()
            .map(|p| (p, "input"))
            .chain(weight_params.iter().map(|p| (p, "weight")))
        {
            if !circuit_params.contains(param) {
                return Err(QuantumError::invalid_binding(format!(
                    "{} parameter {} is not part of the circuit",
                    kind, param
                )));
            }
            if let Some(previous) = seen.insert(param, kind) {
                return Err(QuantumError::invalid_binding(format!(
                    "{} bound as both {} and {}",
                    param, previous, kind
                )));
            }
        }

        if let Some(missing) = circuit_params.iter().find(|p| !seen.contains_key(p)) {
            return Err(QuantumError::invalid_binding(format!(
                "circuit parameter {} is neither input nor weight",
                missing
            )));
        }

        let observable = ZObservable::all(circuit.num_qubits());
        Ok(Self {
            circuit,
            input_params,
            weight_params,
            observable,
            estimator,
        })
    }

    pub fn circuit(&self) -> &FeatureCircuit {
        &self.circuit
    }

    pub fn input_params(&self) -> &[Parameter] {
        &self.input_params
    }

    pub fn weight_params(&self) -> &[Parameter] {
        &self.weight_params
    }

    pub fn num_inputs(&self) -> usize {
        self.input_params.len()
    }

    pub fn num_weights(&self) -> usize {
        self.weight_params.len()
    }

    pub fn observable(&self) -> &ZObservable {
        &self.observable
    }

    /// Evaluate one sample.
    ///
    /// # Errors
    /// - `QuantumError::BindingWidth` if `inputs` or `weights` has the wrong length
    pub fn forward(&self, inputs: &[f64], weights: &[f64]) -> QuantumResult<f64> {
        if inputs.len() != self.input_params.len() {
            return Err(QuantumError::BindingWidth {
                kind: "input",
                expected: self.input_params.len(),
                actual: inputs.len(),
            });
        }
        if weights.len() != self.weight_params.len() {
            return Err(QuantumError::BindingWidth {
                kind: "weight",
                expected: self.weight_params.len(),
                actual: weights.len(),
            });
        }

        let bindings: HashMap<Parameter, f64> = self
            .input_params
            .iter()
            .cloned()
            .zip(inputs.iter().copied())
            .chain(
                self.weight_params
                    .iter()
                    .cloned()
                    .zip(weights.iter().copied()),
            )
            .collect();

        self.estimator
            .expectation(&self.circuit, &bindings, &self.observable)
    }

    /// Evaluate a batch of samples against one weight vector.
    pub fn forward_batch(&self, inputs: &[Vec<f64>], weights: &[f64]) -> QuantumResult<Vec<f64>> {
        inputs
            .iter()
            .map(|sample| self.forward(sample, weights))
            .collect()
    }
}
