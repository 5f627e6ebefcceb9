//! Hybrid quantum/recurrent climate predictor.
//!
//! Maps a batch of fixed-width feature rows to four climate projection
//! values per row.
//!
//! # Architecture
//!
//! - **quantum**: parameterized 5-position feature circuit, input/weight
//!   parameter partition and a statevector-backed estimator network. The
//!   layer factory degrades to an identity passthrough on any failure.
//! - **predictor**: `HybridPredictor`, a simulated quantum stage (`tanh`)
//!   followed by an LSTM encoder and two linear projections, built on candle.
//! - **config**: TOML configuration with `CLIMATE_QNN_*` environment overrides.
//!
//! # Example
//!
//! ```rust,ignore
//! use climate_qnn_core::HybridPredictor;
//!
//! let model = HybridPredictor::new(10)?;
//! let batch = model.batch_from_rows(&rows)?;
//! let result = model.predict(&batch)?;
//! assert_eq!(result.shape(), (rows.len(), 4));
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod predictor;
pub mod quantum;

pub use config::{PredictorConfig, QuantumConfig};
pub use error::{PredictorError, PredictorResult, QuantumError, QuantumResult};
pub use predictor::{HybridPredictor, PredictionResult};
pub use quantum::{QuantumLayer, QuantumLayerFactory};
