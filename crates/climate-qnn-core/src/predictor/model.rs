//! [`HybridPredictor`] construction and forward computation.

use std::collections::BTreeMap;
use std::fmt;

use candle_core::{DType, Device, Tensor};
use candle_nn::{linear, lstm, LSTMConfig, Linear, Module, VarBuilder, VarMap, LSTM, RNN};
use tracing::{debug, info, warn};

use crate::config::PredictorConfig;
use crate::constants::{ENCODER_HIDDEN_SIZE, OUTPUT_SIZE, PROJECTION_SIZE, SEQUENCE_LENGTH};
use crate::error::{PredictorError, PredictorResult};
use crate::quantum::{QuantumLayer, QuantumLayerFactory};

use super::result::PredictionResult;
use super::simulated::{self, FeatureStage};
use super::weights::{self, ENCODER_PREFIX, HIDDEN_PROJECTION_PREFIX, OUTPUT_PROJECTION_PREFIX};

/// Gradient context of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelMode {
    /// Output stays attached to the trainable variables.
    Training,
    /// Input and output are detached from the graph.
    Inference,
}

/// Hybrid quantum-feature / LSTM model producing four climate projections
/// per feature row.
///
/// The quantum layer is built once and kept for introspection. The forward
/// path uses the classical `tanh` stand-in.
pub struct HybridPredictor {
    config: PredictorConfig,
    device: Device,
    varmap: VarMap,
    quantum_layer: QuantumLayer,
    encoder: LSTM,
    hidden_projection: Linear,
    output_projection: Linear,
}

impl HybridPredictor {
    /// Create a predictor with default configuration and the given feature width.
    ///
    /// # Errors
    /// - `PredictorError::ConfigError` if `input_size` is 0
    pub fn new(input_size: usize) -> PredictorResult<Self> {
        Self::with_config(PredictorConfig::new(input_size))
    }

    /// Create a predictor from an explicit configuration.
    ///
    /// Quantum layer failures never fail construction; they degrade the
    /// layer to an identity passthrough.
    ///
    /// # Errors
    /// - `PredictorError::ConfigError` if the configuration is invalid
    /// - `PredictorError::Weights` / `PredictorError::Tensor` if the classical
    ///   layers cannot be built
    pub fn with_config(config: PredictorConfig) -> PredictorResult<Self> {
        config.validate()?;

        let device = select_device(config.use_cuda);

        let quantum_layer = QuantumLayerFactory::new(config.input_size)
            .with_registers(config.quantum.registers)
            .with_seed(config.seed)
            .build();

        let varmap = VarMap::new();
        weights::initialize(&varmap, config.input_size, config.seed, &device)?;
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);

        let encoder = lstm(
            config.input_size,
            ENCODER_HIDDEN_SIZE,
            LSTMConfig::default(),
            vb.pp(ENCODER_PREFIX),
        )
        .map_err(|e| PredictorError::tensor("build encoder", e))?;
        let hidden_projection = linear(
            ENCODER_HIDDEN_SIZE,
            PROJECTION_SIZE,
            vb.pp(HIDDEN_PROJECTION_PREFIX),
        )
        .map_err(|e| PredictorError::tensor("build hidden projection", e))?;
        let output_projection = linear(PROJECTION_SIZE, OUTPUT_SIZE, vb.pp(OUTPUT_PROJECTION_PREFIX))
            .map_err(|e| PredictorError::tensor("build output projection", e))?;

        let predictor = Self {
            config,
            device,
            varmap,
            quantum_layer,
            encoder,
            hidden_projection,
            output_projection,
        };

        info!(
            input_size = predictor.config.input_size,
            seed = predictor.config.seed,
            device = ?predictor.device,
            quantum_layer = predictor.quantum_layer.status(),
            parameters = predictor.parameter_count(),
            "HybridPredictor initialized"
        );

        Ok(predictor)
    }

    pub fn input_size(&self) -> usize {
        self.config.input_size
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// The quantum feature encoder chosen at construction.
    pub fn quantum_layer(&self) -> &QuantumLayer {
        &self.quantum_layer
    }

    /// Trainable variables, for an external optimizer.
    pub fn varmap(&self) -> &VarMap {
        &self.varmap
    }

    /// Trainable tensor names mapped to their shapes.
    pub fn named_parameters(&self) -> PredictorResult<BTreeMap<String, Vec<usize>>> {
        let data = self
            .varmap
            .data()
            .lock()
            .map_err(|e| PredictorError::weights("varmap", e))?;

        Ok(data
            .iter()
            .map(|(name, var)| (name.clone(), var.as_tensor().dims().to_vec()))
            .collect())
    }

    /// Total number of trainable scalars.
    pub fn parameter_count(&self) -> usize {
        weights::parameter_inits(self.config.input_size)
            .iter()
            .map(|init| init.shape.iter().product::<usize>())
            .sum()
    }

    /// Build a `(rows, input_size)` batch on the model's device.
    ///
    /// # Errors
    /// - `PredictorError::ShapeMismatch` if any row has the wrong width
    pub fn batch_from_rows(&self, rows: &[Vec<f32>]) -> PredictorResult<Tensor> {
        let width = self.config.input_size;

        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(PredictorError::shape_mismatch(width, &[rows.len(), row.len()]));
        }

        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Tensor::from_vec(flat, (rows.len(), width), &self.device)
            .map_err(|e| PredictorError::tensor("batch_from_rows", e))
    }

    /// Map a `(batch, input_size)` feature batch to `(batch, 4)` projections.
    ///
    /// The result stays attached to the trainable variables.
    ///
    /// # Errors
    /// - `PredictorError::ShapeMismatch` if `x` is not rank 2 with trailing
    ///   dimension `input_size`
    /// - `PredictorError::InvalidInput` if `x` has an integer dtype
    pub fn forward(&self, x: &Tensor) -> PredictorResult<Tensor> {
        self.run(x, ModelMode::Training)
    }

    /// Inference-only forward pass returning detached rows.
    ///
    /// Takes `&self`, never mutates parameters and is safe to call from
    /// several threads at once. Numerically identical to [`Self::forward`].
    pub fn predict(&self, x: &Tensor) -> PredictorResult<PredictionResult> {
        let output = self.run(x, ModelMode::Inference)?;

        let rows = output
            .to_vec2::<f32>()
            .map_err(|e| PredictorError::tensor("to_vec2", e))?
            .into_iter()
            .map(|row| {
                let width = row.len();
                <[f32; OUTPUT_SIZE]>::try_from(row).map_err(|_| {
                    PredictorError::tensor(
                        "predict",
                        format!("expected {} outputs per row, got {}", OUTPUT_SIZE, width),
                    )
                })
            })
            .collect::<PredictorResult<Vec<_>>>()?;

        Ok(PredictionResult::from_rows(rows))
    }

    fn run(&self, x: &Tensor, mode: ModelMode) -> PredictorResult<Tensor> {
        let width = self.config.input_size;
        let dims = x.dims();
        if dims.len() != 2 || dims[1] != width {
            return Err(PredictorError::shape_mismatch(width, dims));
        }
        let batch = dims[0];
        if !x.dtype().is_float() {
            return Err(PredictorError::InvalidInput(format!(
                "features must be floating point, got {:?}",
                x.dtype()
            )));
        }

        let x = match mode {
            ModelMode::Training => x.clone(),
            ModelMode::Inference => x.detach(),
        };
        let x = x
            .to_dtype(DType::F32)
            .and_then(|t| t.to_device(&self.device))
            .map_err(|e| PredictorError::tensor("prepare input", e))?;

        if batch == 0 {
            return Tensor::zeros((0, OUTPUT_SIZE), DType::F32, &self.device)
                .map_err(|e| PredictorError::tensor("empty batch", e));
        }

        let (features, stage) = simulated::quantum_features(&x);
        debug!(batch, ?mode, ?stage, "Forward pass");
        if stage == FeatureStage::Identity {
            warn!(batch, "Quantum features unavailable for this call");
        }

        let sequence = features
            .reshape((batch, SEQUENCE_LENGTH, width))
            .map_err(|e| PredictorError::tensor("reshape", e))?;
        let states = self
            .encoder
            .seq(&sequence)
            .map_err(|e| PredictorError::tensor("lstm", e))?;
        let hidden = states
            .last()
            .map(|state| state.h().clone())
            .ok_or_else(|| PredictorError::tensor("lstm", "encoder produced no states"))?;

        let projected = self
            .hidden_projection
            .forward(&hidden)
            .and_then(|t| t.relu())
            .map_err(|e| PredictorError::tensor("hidden projection", e))?;
        let output = self
            .output_projection
            .forward(&projected)
            .map_err(|e| PredictorError::tensor("output projection", e))?;

        Ok(match mode {
            ModelMode::Training => output,
            ModelMode::Inference => output.detach(),
        })
    }
}

impl fmt::Debug for HybridPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridPredictor")
            .field("config", &self.config)
            .field("device", &self.device)
            .field("quantum_layer", &self.quantum_layer.status())
            .field("parameters", &self.parameter_count())
            .finish()
    }
}

fn select_device(use_cuda: bool) -> Device {
    if !use_cuda {
        return Device::Cpu;
    }

    match Device::cuda_if_available(0) {
        Ok(dev) if dev.is_cuda() => {
            info!("CUDA device detected, using GPU");
            dev
        }
        Ok(_) => {
            warn!("CUDA requested but not available, using CPU");
            Device::Cpu
        }
        Err(e) => {
            warn!(error = %e, "Failed to initialize CUDA, using CPU");
            Device::Cpu
        }
    }
}
