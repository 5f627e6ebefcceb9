use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixtureError {
    #[error("Unknown dataset: {name}")]
    UnknownDataset { name: String },

    #[error("Shape mismatch: labels have {labels} rows, predictions have {predictions}")]
    ShapeMismatch { labels: usize, predictions: usize },
}

pub type FixtureResult<T> = Result<T, FixtureError>;
