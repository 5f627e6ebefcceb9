//! Feature circuit construction.
//!
//! The circuit is a fixed topology:
//!
//! ```text
//! q0: ─H─●────────────RX(θ0)─RZ(θ5)─
//! q1: ─H─X─●──────────RX(θ1)─RZ(θ6)─
//! q2: ─H───X─●────────RX(θ2)─RZ(θ7)─
//! q3: ─H─────X─●──────RX(θ3)─RZ(θ8)─
//! q4: ─H───────X──────RX(θ4)─RZ(θ9)─
//! ```
//!
//! Uniform superposition, a linear CX chain, then one RX and one RZ per
//! position. Angles are symbolic [`Parameter`]s bound at execution time.

use std::fmt;

use crate::constants::{PARAMETER_VECTOR_NAME, PARAMS_PER_REGISTER, REGISTER_COUNT};
use crate::error::{QuantumError, QuantumResult};

use super::estimator::MAX_SIMULATED_QUBITS;
use super::parameters::{Parameter, ParameterVector};

/// A single circuit operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Hadamard.
    H { qubit: usize },
    /// Controlled-NOT.
    Cx { control: usize, target: usize },
    /// Rotation about X by a symbolic angle.
    Rx { qubit: usize, angle: Parameter },
    /// Rotation about Z by a symbolic angle.
    Rz { qubit: usize, angle: Parameter },
}

impl Gate {
    /// Symbolic angle of a rotation gate.
    pub fn parameter(&self) -> Option<&Parameter> {
        match self {
            Gate::Rx { angle, .. } | Gate::Rz { angle, .. } => Some(angle),
            Gate::H { .. } | Gate::Cx { .. } => None,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::H { qubit } => write!(f, "h q[{}]", qubit),
            Gate::Cx { control, target } => write!(f, "cx q[{}], q[{}]", control, target),
            Gate::Rx { qubit, angle } => write!(f, "rx({}) q[{}]", angle, qubit),
            Gate::Rz { qubit, angle } => write!(f, "rz({}) q[{}]", angle, qubit),
        }
    }
}

/// Parameterized feature-encoding circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCircuit {
    num_qubits: usize,
    gates: Vec<Gate>,
    parameters: ParameterVector,
}

impl FeatureCircuit {
    /// Build the standard 5-position circuit.
    pub fn build() -> (Self, ParameterVector) {
        Self::assemble(REGISTER_COUNT)
    }

    /// Build the circuit over an arbitrary register count.
    ///
    /// # Errors
    /// - `QuantumError::EmptyRegister` if `num_qubits` is 0
    /// - `QuantumError::TooManyRegisters` if `num_qubits` exceeds
    ///   [`MAX_SIMULATED_QUBITS`]
    pub fn with_registers(num_qubits: usize) -> QuantumResult<(Self, ParameterVector)> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyRegister);
        }
        if num_qubits > MAX_SIMULATED_QUBITS {
            return Err(QuantumError::TooManyRegisters {
                requested: num_qubits,
                max: MAX_SIMULATED_QUBITS,
            });
        }
        Ok(Self::assemble(num_qubits))
    }

    fn assemble(num_qubits: usize) -> (Self, ParameterVector) {
        let parameters =
            ParameterVector::new(PARAMETER_VECTOR_NAME, PARAMS_PER_REGISTER * num_qubits);
        let mut gates = Vec::with_capacity(4 * num_qubits);

        gates.extend((0..num_qubits).map(|qubit| Gate::H { qubit }));

        gates.extend((1..num_qubits).map(|target| Gate::Cx {
            control: target - 1,
            target,
        }));

        for qubit in 0..num_qubits {
            gates.push(Gate::Rx {
                qubit,
                angle: parameters[qubit].clone(),
            });
            gates.push(Gate::Rz {
                qubit,
                angle: parameters[qubit + num_qubits].clone(),
            });
        }

        let circuit = Self {
            num_qubits,
            gates,
            parameters: parameters.clone(),
        };
        (circuit, parameters)
    }

    /// Check every gate addresses valid, distinct positions.
    pub fn validate(&self) -> QuantumResult<()> {
        if self.num_qubits == 0 {
            return Err(QuantumError::EmptyRegister);
        }

        for gate in &self.gates {
            let (first, second) = match gate {
                Gate::H { qubit } | Gate::Rx { qubit, .. } | Gate::Rz { qubit, .. } => {
                    (*qubit, None)
                }
                Gate::Cx { control, target } => {
                    if control == target {
                        return Err(QuantumError::OverlappingQubits { qubit: *control });
                    }
                    (*control, Some(*target))
                }
            };

            for index in std::iter::once(first).chain(second) {
                if index >= self.num_qubits {
                    return Err(QuantumError::QubitOutOfRange {
                        index,
                        num_qubits: self.num_qubits,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Ordered parameter vector of the circuit.
    pub fn parameters(&self) -> &ParameterVector {
        &self.parameters
    }

    /// Number of gates (sequential depth, no parallel packing).
    pub fn depth(&self) -> usize {
        self.gates.len()
    }
}

impl fmt::Display for FeatureCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "qreg q[{}];", self.num_qubits)?;
        for gate in &self.gates {
            writeln!(f, "{};", gate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_circuit_shape() {
        let (circuit, params) = FeatureCircuit::build();

        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(params.len(), 10);
        // 5 H + 4 CX + 5 RX + 5 RZ
        assert_eq!(circuit.depth(), 19);
        assert_eq!(circuit.parameters(), &params);
    }

    #[test]
    fn test_superposition_then_chain() {
        let (circuit, _) = FeatureCircuit::build();
        let gates = circuit.gates();

        for (qubit, gate) in gates[..5].iter().enumerate() {
            assert_eq!(gate, &Gate::H { qubit });
        }
        for (i, gate) in gates[5..9].iter().enumerate() {
            assert_eq!(
                gate,
                &Gate::Cx {
                    control: i,
                    target: i + 1
                }
            );
        }
    }

    #[test]
    fn test_rotation_parameter_rows() {
        let (circuit, params) = FeatureCircuit::build();
        let rotations = &circuit.gates()[9..];

        for qubit in 0..5 {
            assert_eq!(
                rotations[2 * qubit],
                Gate::Rx {
                    qubit,
                    angle: params[qubit].clone()
                }
            );
            assert_eq!(
                rotations[2 * qubit + 1],
                Gate::Rz {
                    qubit,
                    angle: params[qubit + 5].clone()
                }
            );
        }
    }

    #[test]
    fn test_every_parameter_used_once() {
        let (circuit, params) = FeatureCircuit::build();
        let used: Vec<&Parameter> = circuit.gates().iter().filter_map(Gate::parameter).collect();

        assert_eq!(used.len(), params.len());
        for param in params.iter() {
            assert_eq!(used.iter().filter(|p| **p == param).count(), 1);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(FeatureCircuit::build(), FeatureCircuit::build());
    }

    #[test]
    fn test_single_register_has_no_coupling() {
        let (circuit, params) = FeatureCircuit::with_registers(1).unwrap();
        assert_eq!(params.len(), 2);
        assert!(!circuit
            .gates()
            .iter()
            .any(|g| matches!(g, Gate::Cx { .. })));
    }

    #[test]
    fn test_built_circuits_validate() {
        for registers in 1..=6 {
            let (circuit, _) = FeatureCircuit::with_registers(registers).unwrap();
            assert!(circuit.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_gate() {
        let (mut circuit, _) = FeatureCircuit::build();
        circuit.gates.push(Gate::H { qubit: 5 });
        assert_eq!(
            circuit.validate().unwrap_err(),
            QuantumError::QubitOutOfRange {
                index: 5,
                num_qubits: 5
            }
        );
    }

    #[test]
    fn test_validate_rejects_self_coupling() {
        let (mut circuit, _) = FeatureCircuit::build();
        circuit.gates.push(Gate::Cx {
            control: 2,
            target: 2,
        });
        assert_eq!(
            circuit.validate().unwrap_err(),
            QuantumError::OverlappingQubits { qubit: 2 }
        );
    }

    #[test]
    fn test_zero_registers_rejected() {
        assert_eq!(
            FeatureCircuit::with_registers(0).unwrap_err(),
            QuantumError::EmptyRegister
        );
    }

    #[test]
    fn test_register_count_capped_at_simulator_limit() {
        assert!(FeatureCircuit::with_registers(MAX_SIMULATED_QUBITS).is_ok());

        for registers in [MAX_SIMULATED_QUBITS + 1, 25, usize::MAX / 2 + 1, usize::MAX] {
            assert_eq!(
                FeatureCircuit::with_registers(registers).unwrap_err(),
                QuantumError::TooManyRegisters {
                    requested: registers,
                    max: MAX_SIMULATED_QUBITS
                }
            );
        }
    }

    #[test]
    fn test_display_lists_gates() {
        let (circuit, _) = FeatureCircuit::build();
        let text = circuit.to_string();
        assert!(text.starts_with("qreg q[5];"));
        assert!(text.contains("cx q[3], q[4];"));
        assert!(text.contains("rz(theta[9]) q[4];"));
    }
}
