//! Quantum feature encoder.
//!
//! # Components
//!
//! - [`FeatureCircuit`]: fixed 5-position circuit (H layer, CX chain, RX/RZ rotations)
//! - [`ParameterPartition`]: input/weight split of the circuit's `theta` vector
//! - [`StatevectorEstimator`] / [`EstimatorQnn`]: exact expectation-value evaluation
//! - [`QuantumLayerFactory`]: builds a [`QuantumLayer`], degrading to a passthrough
//!   on any failure
//!
//! The predictor stores the layer but its forward path uses a classical
//! stand-in; see [`crate::predictor`].

mod circuit;
mod estimator;
mod layer;
mod parameters;

pub use circuit::{FeatureCircuit, Gate};
pub use estimator::{EstimatorQnn, StatevectorEstimator, ZObservable, MAX_SIMULATED_QUBITS};
pub use layer::{FunctionalLayer, Passthrough, QuantumLayer, QuantumLayerFactory};
pub use parameters::{Parameter, ParameterPartition, ParameterVector};
