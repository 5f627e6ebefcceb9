//! Mock climate datasets and accuracy metrics.
//!
//! Used by the `climate-qnn-core` integration tests and the `climate-qnn`
//! binary's validation mode. Every generator takes an explicit seed.

pub mod error;
pub mod fixtures;
pub mod metrics;

pub use error::{FixtureError, FixtureResult};
pub use fixtures::{
    load_dataset, random_features, random_labels, ClimateDataset, CLIMATE_TEST_DATASET,
    CLIMATE_TEST_FEATURES, CLIMATE_TEST_ROWS, LABEL_WIDTH,
};
pub use metrics::mean_absolute_error;
