use serde::Serialize;

use crate::constants::OUTPUT_SIZE;

/// Detached prediction output: one row of climate projections per input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    rows: Vec<[f32; OUTPUT_SIZE]>,
}

impl PredictionResult {
    pub fn from_rows(rows: Vec<[f32; OUTPUT_SIZE]>) -> Self {
        Self { rows }
    }

    /// `(batch, 4)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), OUTPUT_SIZE)
    }

    pub fn rows(&self) -> &[[f32; OUTPUT_SIZE]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<[f32; OUTPUT_SIZE]> {
        self.rows
    }
}
