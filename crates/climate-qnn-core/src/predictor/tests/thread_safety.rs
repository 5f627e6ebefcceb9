//! Thread safety tests for HybridPredictor.

use std::sync::Arc;
use std::thread;

use super::random_batch;
use crate::predictor::{HybridPredictor, PredictionResult};

#[test]
fn test_predictor_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<HybridPredictor>();
    assert_send::<PredictionResult>();
}

#[test]
fn test_predictor_is_sync() {
    fn assert_sync<T: Sync>() {}
    assert_sync::<HybridPredictor>();
}

#[test]
fn test_concurrent_predict_agrees() {
    let model = Arc::new(HybridPredictor::new(10).unwrap());
    let batch = random_batch(6, 10, 21);
    let expected = model.predict(&batch).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = Arc::clone(&model);
            let batch = batch.clone();
            thread::spawn(move || model.predict(&batch).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
