//! Seeded mock datasets.

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{FixtureError, FixtureResult};

/// Name of the only dataset [`load_dataset`] knows.
pub const CLIMATE_TEST_DATASET: &str = "climate_test";

/// Rows in the `climate_test` dataset.
pub const CLIMATE_TEST_ROWS: usize = 100;

/// Feature width of the `climate_test` dataset.
pub const CLIMATE_TEST_FEATURES: usize = 10;

/// Climate projection values per label row.
pub const LABEL_WIDTH: usize = 4;

/// Feature rows with matching four-valued labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateDataset {
    pub features: Vec<Vec<f32>>,
    pub labels: Vec<[f32; LABEL_WIDTH]>,
}

impl ClimateDataset {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature_width(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }
}

/// Load a mock dataset by name.
///
/// `"climate_test"` yields 100 rows of 10 features and 100 label rows, all
/// uniform in `[0, 1)`. Features and labels are drawn from independent
/// streams of the same seed.
///
/// # Errors
/// - `FixtureError::UnknownDataset` for any other name
pub fn load_dataset(name: &str, seed: u64) -> FixtureResult<ClimateDataset> {
    match name {
        CLIMATE_TEST_DATASET => Ok(ClimateDataset {
            features: random_features(CLIMATE_TEST_ROWS, CLIMATE_TEST_FEATURES, seed),
            labels: random_labels(CLIMATE_TEST_ROWS, seed.wrapping_add(1)),
        }),
        _ => Err(FixtureError::UnknownDataset {
            name: name.to_string(),
        }),
    }
}

/// `rows` feature rows of `width` values uniform in `[0, 1)`.
pub fn random_features(rows: usize, width: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Uniform::new(0.0f32, 1.0);
    (0..rows)
        .map(|_| (0..width).map(|_| dist.sample(&mut rng)).collect())
        .collect()
}

/// `rows` label rows uniform in `[0, 1)`.
pub fn random_labels(rows: usize, seed: u64) -> Vec<[f32; LABEL_WIDTH]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Uniform::new(0.0f32, 1.0);
    (0..rows)
        .map(|_| std::array::from_fn(|_| dist.sample(&mut rng)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_climate_test_dimensions() {
        let dataset = load_dataset("climate_test", 42).unwrap();
        assert_eq!(dataset.len(), 100);
        assert_eq!(dataset.feature_width(), 10);
        assert_eq!(dataset.labels.len(), 100);
        assert!(dataset.features.iter().all(|row| row.len() == 10));
    }

    #[test]
    fn test_values_in_unit_interval() {
        let dataset = load_dataset(CLIMATE_TEST_DATASET, 3).unwrap();
        let in_range = |v: &f32| (0.0..1.0).contains(v);
        assert!(dataset.features.iter().flatten().all(in_range));
        assert!(dataset.labels.iter().flatten().all(in_range));
    }

    #[test]
    fn test_unknown_dataset() {
        let err = load_dataset("weather_prod", 42).unwrap_err();
        assert_eq!(
            err,
            FixtureError::UnknownDataset {
                name: "weather_prod".to_string()
            }
        );
        assert_eq!(err.to_string(), "Unknown dataset: weather_prod");
    }

    #[test]
    fn test_seed_is_reproducible() {
        assert_eq!(load_dataset("climate_test", 7), load_dataset("climate_test", 7));
        assert_ne!(random_features(2, 3, 7), random_features(2, 3, 8));
    }

    #[test]
    fn test_empty_generators() {
        assert!(random_features(0, 10, 1).is_empty());
        assert!(random_labels(0, 1).is_empty());
        assert_eq!(random_features(3, 0, 1), vec![Vec::<f32>::new(); 3]);
    }
}
