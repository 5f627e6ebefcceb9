//! Seeded weight initialization.
//!
//! Candle's CPU device cannot be seeded, so every trainable tensor is drawn
//! here from a `ChaCha8Rng` and registered in the [`VarMap`] before the layers
//! are built. Bounds match PyTorch's defaults: `±1/sqrt(hidden)` for every
//! LSTM tensor and `±1/sqrt(fan_in)` for linear weights and biases.

use candle_core::{Device, Tensor, Var};
use candle_nn::VarMap;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::constants::{ENCODER_HIDDEN_SIZE, OUTPUT_SIZE, PROJECTION_SIZE};
use crate::error::{PredictorError, PredictorResult};

pub(crate) const ENCODER_PREFIX: &str = "encoder";
pub(crate) const HIDDEN_PROJECTION_PREFIX: &str = "hidden_projection";
pub(crate) const OUTPUT_PROJECTION_PREFIX: &str = "output_projection";

/// Name, shape and init bound of one trainable tensor.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParameterInit {
    pub name: String,
    pub shape: Vec<usize>,
    pub bound: f32,
}

impl ParameterInit {
    fn new(prefix: &str, name: &str, shape: Vec<usize>, bound: f32) -> Self {
        Self {
            name: format!("{}.{}", prefix, name),
            shape,
            bound,
        }
    }
}

/// Every trainable tensor of the model, in registration order.
///
/// LSTM names follow `candle_nn::lstm` for layer 0, forward direction.
pub(crate) fn parameter_inits(input_size: usize) -> Vec<ParameterInit> {
    let gates = 4 * ENCODER_HIDDEN_SIZE;
    // 1/sqrt(hidden) for the LSTM, and 1/sqrt(fan_in) for the hidden
    // projection, whose fan-in is the hidden width.
    let encoder_bound = 1.0 / (ENCODER_HIDDEN_SIZE as f32).sqrt();
    let output_bound = 1.0 / (PROJECTION_SIZE as f32).sqrt();

    vec![
        ParameterInit::new(ENCODER_PREFIX, "weight_ih_l0", vec![gates, input_size], encoder_bound),
        ParameterInit::new(
            ENCODER_PREFIX,
            "weight_hh_l0",
            vec![gates, ENCODER_HIDDEN_SIZE],
            encoder_bound,
        ),
        ParameterInit::new(ENCODER_PREFIX, "bias_ih_l0", vec![gates], encoder_bound),
        ParameterInit::new(ENCODER_PREFIX, "bias_hh_l0", vec![gates], encoder_bound),
        ParameterInit::new(
            HIDDEN_PROJECTION_PREFIX,
            "weight",
            vec![PROJECTION_SIZE, ENCODER_HIDDEN_SIZE],
            encoder_bound,
        ),
        ParameterInit::new(HIDDEN_PROJECTION_PREFIX, "bias", vec![PROJECTION_SIZE], encoder_bound),
        ParameterInit::new(
            OUTPUT_PROJECTION_PREFIX,
            "weight",
            vec![OUTPUT_SIZE, PROJECTION_SIZE],
            output_bound,
        ),
        ParameterInit::new(OUTPUT_PROJECTION_PREFIX, "bias", vec![OUTPUT_SIZE], output_bound),
    ]
}

/// Draw every trainable tensor from `seed` and register it in `varmap`.
pub(crate) fn initialize(
    varmap: &VarMap,
    input_size: usize,
    seed: u64,
    device: &Device,
) -> PredictorResult<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for init in parameter_inits(input_size) {
        let dist = Uniform::new_inclusive(-init.bound, init.bound);
        let count: usize = init.shape.iter().product();
        let values: Vec<f32> = (0..count).map(|_| dist.sample(&mut rng)).collect();

        let tensor = Tensor::from_vec(values, init.shape.clone(), device)
            .map_err(|e| PredictorError::weights(&init.name, e))?;
        let var = Var::from_tensor(&tensor).map_err(|e| PredictorError::weights(&init.name, e))?;

        let mut data = varmap
            .data()
            .lock()
            .map_err(|e| PredictorError::weights(&init.name, e))?;
        data.insert(init.name, var);
    }

    Ok(())
}
