//! Error types for the hybrid predictor.
//!
//! Two layers of errors exist:
//!
//! - [`QuantumError`]: circuit, partition and estimator failures. These are
//!   absorbed by the quantum layer factory and never reach predictor callers.
//! - [`PredictorError`]: everything a caller of [`crate::HybridPredictor`]
//!   can observe. On the forward path only [`PredictorError::ShapeMismatch`]
//!   is expected in practice.

use std::fmt;

use thiserror::Error;

/// Errors raised while building or executing the quantum feature encoder.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantumError {
    /// A circuit needs at least one register position.
    #[error("Quantum circuit requires at least one register position")]
    EmptyRegister,

    /// Register count exceeds what the statevector simulator can hold.
    #[error("{requested} register positions exceed the simulator limit of {max}")]
    TooManyRegisters { requested: usize, max: usize },

    /// A gate addressed a position outside the register.
    #[error("Qubit index {index} out of range for {num_qubits}-qubit circuit")]
    QubitOutOfRange { index: usize, num_qubits: usize },

    /// A two-position gate used the same position twice.
    #[error("Control and target must differ, both are {qubit}")]
    OverlappingQubits { qubit: usize },

    /// Padding the input parameters consumed more weights than exist.
    #[error("Cannot pad input parameters to {required} slots: only {available} weight parameters remain")]
    InsufficientWeights { required: usize, available: usize },

    /// Parameter lists handed to the estimator network are inconsistent.
    #[error("Invalid parameter binding: {reason}")]
    InvalidBinding { reason: String },

    /// Wrong number of values supplied for a parameter list.
    #[error("Expected {expected} {kind} values, got {actual}")]
    BindingWidth {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A gate angle was left unbound at execution time.
    #[error("Parameter {name} has no bound value")]
    UnboundParameter { name: String },

    /// Statevector simulation failed.
    #[error("Estimator failed: {message}")]
    Estimator { message: String },
}

impl QuantumError {
    /// Create an invalid binding error.
    pub fn invalid_binding(reason: impl Into<String>) -> Self {
        Self::InvalidBinding {
            reason: reason.into(),
        }
    }

    /// Create an estimator error.
    pub fn estimator(message: impl fmt::Display) -> Self {
        Self::Estimator {
            message: message.to_string(),
        }
    }
}

/// Result type for quantum operations.
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Errors surfaced by the hybrid predictor.
#[derive(Debug, Error)]
pub enum PredictorError {
    /// Feature batch width does not match the model's input size.
    #[error("Shape mismatch: expected feature width {expected}, got shape {actual:?}")]
    ShapeMismatch { expected: usize, actual: Vec<usize> },

    /// Input could not be turned into a feature batch.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A tensor operation failed.
    #[error("Tensor operation '{operation}' failed: {message}")]
    Tensor { operation: String, message: String },

    /// Weight initialization or registration failed.
    #[error("Weight initialization failed for '{name}': {message}")]
    Weights { name: String, message: String },

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl PredictorError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: usize, actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected,
            actual: actual.to_vec(),
        }
    }

    /// Wrap a failed tensor operation with the name of the step.
    pub fn tensor(operation: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::Tensor {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    /// Create a weight initialization error.
    pub fn weights(name: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::Weights {
            name: name.into(),
            message: err.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

/// Result type for predictor operations.
pub type PredictorResult<T> = Result<T, PredictorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_descriptive() {
        let err = PredictorError::shape_mismatch(10, &[4, 7]);
        assert!(err.to_string().contains("expected feature width 10"));
        assert!(err.to_string().contains("[4, 7]"));

        let err = QuantumError::InsufficientWeights {
            required: 5,
            available: 2,
        };
        assert!(err.to_string().contains("5 slots"));
        assert!(err.to_string().contains("only 2"));

        let err = PredictorError::tensor("lstm", "bad dims");
        assert!(err.to_string().contains("'lstm'"));
        assert!(err.to_string().contains("bad dims"));
    }

    #[test]
    fn test_binding_width_names_the_list() {
        let err = QuantumError::BindingWidth {
            kind: "weight",
            expected: 5,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Expected 5 weight values, got 3");
    }
}
