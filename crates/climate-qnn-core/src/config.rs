//! Predictor configuration.
//!
//! # TOML Structure
//!
//! ```toml
//! input_size = 10
//! seed = 42
//! use_cuda = false
//!
//! [quantum]
//! registers = 5
//! ```
//!
//! The register count is deliberately not checked by [`PredictorConfig::validate`]:
//! an unusable register count is a quantum-layer failure, which the factory
//! absorbs by degrading to a passthrough.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INPUT_SIZE, DEFAULT_SEED, REGISTER_COUNT};
use crate::error::{PredictorError, PredictorResult};

/// Quantum encoder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumConfig {
    /// Register positions in the feature circuit.
    #[serde(default = "default_registers")]
    pub registers: usize,
}

fn default_registers() -> usize {
    REGISTER_COUNT
}

impl Default for QuantumConfig {
    fn default() -> Self {
        Self {
            registers: default_registers(),
        }
    }
}

/// Configuration for [`crate::HybridPredictor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Width of every feature row. Fixed for the lifetime of the model.
    #[serde(default = "default_input_size")]
    pub input_size: usize,

    /// Seed for weight initialization (classical and quantum).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Use CUDA device 0 when available, CPU otherwise.
    #[serde(default)]
    pub use_cuda: bool,

    #[serde(default)]
    pub quantum: QuantumConfig,
}

fn default_input_size() -> usize {
    DEFAULT_INPUT_SIZE
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            input_size: default_input_size(),
            seed: default_seed(),
            use_cuda: false,
            quantum: QuantumConfig::default(),
        }
    }
}

impl PredictorConfig {
    /// Default configuration with the given feature width.
    pub fn new(input_size: usize) -> Self {
        Self {
            input_size,
            ..Default::default()
        }
    }

    /// Replace the initialization seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the quantum register count.
    pub fn with_registers(mut self, registers: usize) -> Self {
        self.quantum.registers = registers;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `PredictorError::ConfigError` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> PredictorResult<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PredictorError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            PredictorError::config(format!(
                "Failed to parse TOML in '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> PredictorResult<Self> {
        toml::from_str(toml)
            .map_err(|e| PredictorError::config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> PredictorResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PredictorError::config(format!("Failed to serialize TOML: {}", e)))
    }

    /// Apply `CLIMATE_QNN_*` environment overrides.
    ///
    /// Unparseable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by `CLIMATE_QNN_*` variable name.
    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(n) = lookup("CLIMATE_QNN_INPUT_SIZE").and_then(|v| v.parse::<usize>().ok()) {
            self.input_size = n;
        }
        if let Some(n) = lookup("CLIMATE_QNN_SEED").and_then(|v| v.parse::<u64>().ok()) {
            self.seed = n;
        }
        if let Some(b) = lookup("CLIMATE_QNN_USE_CUDA").and_then(|v| v.parse::<bool>().ok()) {
            self.use_cuda = b;
        }
        if let Some(n) =
            lookup("CLIMATE_QNN_QUANTUM_REGISTERS").and_then(|v| v.parse::<usize>().ok())
        {
            self.quantum.registers = n;
        }

        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// - `PredictorError::ConfigError` if `input_size` is 0
    pub fn validate(&self) -> PredictorResult<()> {
        if self.input_size == 0 {
            return Err(PredictorError::config("input_size must be > 0"));
        }
        Ok(())
    }
}
