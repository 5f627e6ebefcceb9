//! Quantum layer factory with degrade-to-identity fallback.
//!
//! [`QuantumLayerFactory::build`] never fails. Any error while building the
//! circuit, partitioning its parameters or binding the estimator network is
//! logged and replaced by [`QuantumLayer::Degraded`]. The choice is made once
//! per factory call and is not revisited.

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_SEED, REGISTER_COUNT};
use crate::error::QuantumResult;

use super::circuit::FeatureCircuit;
use super::estimator::{EstimatorQnn, StatevectorEstimator};
use super::parameters::ParameterPartition;

/// No-op stand-in used when the estimator network could not be built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passthrough;

impl Passthrough {
    /// Return the sample unchanged.
    pub fn forward(&self, sample: &[f64]) -> Vec<f64> {
        sample.to_vec()
    }
}

/// Estimator network together with its current weight values.
#[derive(Debug, Clone)]
pub struct FunctionalLayer {
    network: EstimatorQnn,
    weights: Vec<f64>,
}

impl FunctionalLayer {
    pub fn network(&self) -> &EstimatorQnn {
        &self.network
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Quantum feature encoder held by the predictor.
#[derive(Debug, Clone)]
pub enum QuantumLayer {
    /// Estimator-backed network bound to the feature circuit.
    Functional(FunctionalLayer),
    /// Identity passthrough after a construction failure.
    Degraded(Passthrough),
}

impl QuantumLayer {
    pub fn is_functional(&self) -> bool {
        matches!(self, QuantumLayer::Functional(_))
    }

    /// Short status label for logs and CLI output.
    pub fn status(&self) -> &'static str {
        match self {
            QuantumLayer::Functional(_) => "functional",
            QuantumLayer::Degraded(_) => "degraded (identity passthrough)",
        }
    }

    /// Estimator network, if the layer is functional.
    pub fn network(&self) -> Option<&EstimatorQnn> {
        match self {
            QuantumLayer::Functional(layer) => Some(layer.network()),
            QuantumLayer::Degraded(_) => None,
        }
    }

    /// Evaluate one sample.
    ///
    /// The functional layer returns a single expectation value and requires
    /// exactly one value per input parameter. The degraded layer echoes the
    /// sample.
    pub fn forward(&self, sample: &[f64]) -> QuantumResult<Vec<f64>> {
        match self {
            QuantumLayer::Functional(layer) => {
                let value = layer.network.forward(sample, &layer.weights)?;
                Ok(vec![value])
            }
            QuantumLayer::Degraded(passthrough) => Ok(passthrough.forward(sample)),
        }
    }
}

/// Builds the quantum layer for a model of a given feature width.
#[derive(Debug, Clone)]
pub struct QuantumLayerFactory {
    input_size: usize,
    registers: usize,
    seed: u64,
}

impl QuantumLayerFactory {
    pub fn new(input_size: usize) -> Self {
        Self {
            input_size,
            registers: REGISTER_COUNT,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the circuit's register count.
    pub fn with_registers(mut self, registers: usize) -> Self {
        self.registers = registers;
        self
    }

    /// Seed for the initial weight values.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the layer, degrading to a passthrough on any failure.
    pub fn build(&self) -> QuantumLayer {
        match self.try_build() {
            Ok(layer) => {
                debug!(
                    input_size = self.input_size,
                    registers = self.registers,
                    inputs = layer.network.num_inputs(),
                    weights = layer.network.num_weights(),
                    "Quantum layer constructed"
                );
                QuantumLayer::Functional(layer)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    input_size = self.input_size,
                    registers = self.registers,
                    "Error creating quantum layer, using identity passthrough"
                );
                QuantumLayer::Degraded(Passthrough)
            }
        }
    }

    fn try_build(&self) -> QuantumResult<FunctionalLayer> {
        let (circuit, params) = FeatureCircuit::with_registers(self.registers)?;
        let (input_params, weight_params) =
            ParameterPartition::split(self.input_size, &params, REGISTER_COUNT)?.into_parts();

        let network = EstimatorQnn::new(
            circuit,
            input_params,
            weight_params,
            StatevectorEstimator::new(),
        )?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let dist = Uniform::new_inclusive(-1.0, 1.0);
        let weights = (0..network.num_weights())
            .map(|_| dist.sample(&mut rng))
            .collect();

        Ok(FunctionalLayer { network, weights })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factory_is_functional() {
        let layer = QuantumLayerFactory::new(10).build();
        assert!(layer.is_functional());
        assert_eq!(layer.status(), "functional");

        let network = layer.network().unwrap();
        assert_eq!(network.circuit().num_qubits(), 5);
        assert_eq!(network.num_inputs(), 5);
        assert_eq!(network.num_weights(), 5);
    }

    #[test]
    fn test_every_small_input_size_is_functional() {
        for input_size in 0..=5 {
            assert!(
                QuantumLayerFactory::new(input_size).build().is_functional(),
                "input_size={}",
                input_size
            );
        }
    }

    #[test]
    fn test_zero_registers_degrade() {
        let layer = QuantumLayerFactory::new(10).with_registers(0).build();
        assert!(!layer.is_functional());
        assert!(layer.network().is_none());
    }

    #[test]
    fn test_register_mismatch_degrades() {
        // Two registers carry four parameters, too few to fill five input slots.
        let layer = QuantumLayerFactory::new(1).with_registers(2).build();
        assert!(matches!(layer, QuantumLayer::Degraded(Passthrough)));
    }

    #[test]
    fn test_unsimulatable_register_count_degrades() {
        for registers in [25, usize::MAX] {
            let layer = QuantumLayerFactory::new(10).with_registers(registers).build();
            assert!(
                matches!(layer, QuantumLayer::Degraded(Passthrough)),
                "registers={}",
                registers
            );
            assert_eq!(layer.status(), "degraded (identity passthrough)");
        }
    }

    #[test]
    fn test_non_default_register_count_runs() {
        let layer = QuantumLayerFactory::new(5).with_registers(6).build();
        assert!(layer.is_functional());
        assert_eq!(layer.forward(&[0.1; 5]).unwrap().len(), 1);
    }

    #[test]
    fn test_degraded_forward_is_identity() {
        let layer = QuantumLayerFactory::new(3).with_registers(0).build();
        let sample = [0.25, -1.5, 3.0];
        assert_eq!(layer.forward(&sample).unwrap(), sample.to_vec());
    }

    #[test]
    fn test_functional_forward_returns_expectation() {
        let layer = QuantumLayerFactory::new(5).build();
        let out = layer.forward(&[0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].abs() <= 1.0 + 1e-10);
    }

    #[test]
    fn test_functional_forward_requires_input_width() {
        let layer = QuantumLayerFactory::new(10).build();
        assert!(layer.forward(&[0.0; 10]).is_err());
    }

    #[test]
    fn test_weights_follow_seed() {
        let weights = |seed| match QuantumLayerFactory::new(10).with_seed(seed).build() {
            QuantumLayer::Functional(layer) => layer.weights().to_vec(),
            QuantumLayer::Degraded(_) => panic!("expected functional layer"),
        };

        let a = weights(7);
        assert_eq!(a, weights(7));
        assert_ne!(a, weights(8));
        assert!(a.iter().all(|w| (-1.0..=1.0).contains(w)));
    }
}
