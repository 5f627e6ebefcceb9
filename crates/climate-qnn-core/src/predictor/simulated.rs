//! Classical stand-in for quantum feature execution.
//!
//! The forward path does not run the stored quantum layer. It applies an
//! element-wise `tanh`, bounded to (-1, 1) like an expectation value. If that
//! fails the batch passes through unchanged; the decision is made per call.

use candle_core::Tensor;
use tracing::warn;

/// Which transform produced the quantum features for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FeatureStage {
    /// `tanh` was applied.
    Simulated,
    /// The transform failed and the input was used as-is.
    Identity,
}

/// Apply the simulated quantum transform.
pub(crate) fn quantum_features(batch: &Tensor) -> (Tensor, FeatureStage) {
    with_identity_fallback(batch, Tensor::tanh)
}

pub(crate) fn with_identity_fallback<F>(batch: &Tensor, transform: F) -> (Tensor, FeatureStage)
where
    F: FnOnce(&Tensor) -> candle_core::Result<Tensor>,
{
    match transform(batch) {
        Ok(features) => (features, FeatureStage::Simulated),
        Err(e) => {
            warn!(error = %e, "Error in quantum forward pass, passing features through");
            (batch.clone(), FeatureStage::Identity)
        }
    }
}
