//! Accuracy metrics.

use crate::error::{FixtureError, FixtureResult};
use crate::fixtures::LABEL_WIDTH;

/// Mean absolute error over every value of two equally sized row sets.
///
/// Returns 0.0 for two empty sets.
///
/// # Errors
/// - `FixtureError::ShapeMismatch` if the row counts differ
pub fn mean_absolute_error(
    labels: &[[f32; LABEL_WIDTH]],
    predictions: &[[f32; LABEL_WIDTH]],
) -> FixtureResult<f32> {
    if labels.len() != predictions.len() {
        return Err(FixtureError::ShapeMismatch {
            labels: labels.len(),
            predictions: predictions.len(),
        });
    }
    if labels.is_empty() {
        return Ok(0.0);
    }

    let total: f64 = labels
        .iter()
        .zip(predictions)
        .flat_map(|(l, p)| l.iter().zip(p.iter()))
        .map(|(l, p)| f64::from((l - p).abs()))
        .sum();

    Ok((total / (labels.len() * LABEL_WIDTH) as f64) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_rows_have_zero_error() {
        let rows = [[0.1, 0.2, 0.3, 0.4], [1.0, 1.0, 1.0, 1.0]];
        assert_eq!(mean_absolute_error(&rows, &rows).unwrap(), 0.0);
    }

    #[test]
    fn test_known_error() {
        let labels = [[0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 1.0, 1.0]];
        let predictions = [[1.0, -1.0, 0.5, 0.5], [1.0, 1.0, 1.0, 3.0]];
        // (1 + 1 + 0.5 + 0.5 + 0 + 0 + 0 + 2) / 8
        let mae = mean_absolute_error(&labels, &predictions).unwrap();
        assert!((mae - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = mean_absolute_error(&[[0.0; 4]; 2], &[[0.0; 4]; 3]).unwrap_err();
        assert_eq!(
            err,
            FixtureError::ShapeMismatch {
                labels: 2,
                predictions: 3
            }
        );
    }

    #[test]
    fn test_empty_sets() {
        assert_eq!(mean_absolute_error(&[], &[]).unwrap(), 0.0);
    }
}
