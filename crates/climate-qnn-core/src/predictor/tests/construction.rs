//! Construction tests for HybridPredictor.

use crate::config::PredictorConfig;
use crate::error::PredictorError;
use crate::predictor::HybridPredictor;

#[test]
fn test_new_builds_functional_quantum_layer() {
    let model = HybridPredictor::new(10).unwrap();

    assert_eq!(model.input_size(), 10);
    assert!(model.device().is_cpu());
    assert!(model.quantum_layer().is_functional());
}

#[test]
fn test_zero_input_size_is_rejected() {
    let err = HybridPredictor::new(0).unwrap_err();
    assert!(matches!(err, PredictorError::ConfigError { .. }));
}

#[test]
fn test_every_positive_input_size_constructs() {
    for input_size in [1, 3, 5, 6, 10, 32] {
        let model = HybridPredictor::new(input_size).unwrap();
        assert!(
            model.quantum_layer().is_functional(),
            "input_size={}",
            input_size
        );
    }
}

#[test]
fn test_bad_register_count_degrades_instead_of_failing() {
    for registers in [0, 2, 25, usize::MAX] {
        let config = PredictorConfig::new(10).with_registers(registers);
        let model = HybridPredictor::with_config(config).unwrap();

        assert!(!model.quantum_layer().is_functional());
        assert_eq!(
            model.quantum_layer().status(),
            "degraded (identity passthrough)"
        );
    }
}

#[test]
fn test_named_parameters_match_layer_structure() {
    let model = HybridPredictor::new(7).unwrap();
    let params = model.named_parameters().unwrap();

    assert_eq!(params.len(), 8);
    assert_eq!(params["encoder.weight_ih_l0"], vec![512, 7]);
    assert_eq!(params["encoder.weight_hh_l0"], vec![512, 128]);
    assert_eq!(params["encoder.bias_ih_l0"], vec![512]);
    assert_eq!(params["encoder.bias_hh_l0"], vec![512]);
    assert_eq!(params["hidden_projection.weight"], vec![64, 128]);
    assert_eq!(params["hidden_projection.bias"], vec![64]);
    assert_eq!(params["output_projection.weight"], vec![4, 64]);
    assert_eq!(params["output_projection.bias"], vec![4]);
}

#[test]
fn test_parameter_count() {
    let model = HybridPredictor::new(10).unwrap();
    // LSTM: 512*10 + 512*128 + 2*512; hidden: 64*128 + 64; output: 4*64 + 4
    let expected = 5120 + 65536 + 1024 + 8192 + 64 + 256 + 4;
    assert_eq!(model.parameter_count(), expected);
    assert_eq!(model.varmap().all_vars().len(), 8);
}

#[test]
fn test_debug_output_is_compact() {
    let model = HybridPredictor::new(4).unwrap();
    let debug = format!("{:?}", model);
    assert!(debug.contains("HybridPredictor"));
    assert!(debug.contains("functional"));
}
