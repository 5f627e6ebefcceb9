//! Hybrid quantum-feature / LSTM predictor.
//!
//! # Forward Path
//!
//! ```text
//! (batch, input_size)
//!   -> tanh                     simulated quantum features, identity on failure
//!   -> reshape (batch, 1, input_size)
//!   -> LSTM, hidden 128         final step's hidden state
//!   -> Linear 128 -> 64, ReLU
//!   -> Linear 64 -> 4
//! (batch, 4)
//! ```
//!
//! The quantum layer built at construction is stored but not executed on
//! this path.
//!
//! # Thread Safety
//! - [`HybridPredictor`] is `Send + Sync`
//! - [`HybridPredictor::predict`] takes `&self` and mutates nothing

mod model;
mod result;
mod simulated;
mod weights;

#[cfg(test)]
mod tests;

pub use model::HybridPredictor;
pub use result::PredictionResult;
