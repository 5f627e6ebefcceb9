//! Fixed model dimensions.

/// Register positions in the feature circuit.
pub const REGISTER_COUNT: usize = 5;

/// Rotation parameters carried by each register position (RX and RZ).
pub const PARAMS_PER_REGISTER: usize = 2;

/// Name of the circuit's parameter vector.
pub const PARAMETER_VECTOR_NAME: &str = "theta";

/// LSTM encoder hidden width.
pub const ENCODER_HIDDEN_SIZE: usize = 128;

/// Hidden projection width.
pub const PROJECTION_SIZE: usize = 64;

/// Climate projection values per input row.
pub const OUTPUT_SIZE: usize = 4;

/// Time steps per sample fed to the encoder.
pub const SEQUENCE_LENGTH: usize = 1;

/// Feature width used by [`crate::PredictorConfig::default`].
pub const DEFAULT_INPUT_SIZE: usize = 10;

/// Initialization seed used by [`crate::PredictorConfig::default`].
pub const DEFAULT_SEED: u64 = 42;
