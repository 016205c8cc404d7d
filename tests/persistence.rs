use fnn::{
    train_until_converged, ActivationFunction, Gate, Network, NetworkConfig, NetworkError,
    TrainConfig,
};
use tempfile::NamedTempFile;

#[test]
fn trained_model_survives_save_and_load() {
    let mut network = Network::new(&NetworkConfig::default().with_seed(5)).unwrap();
    train_until_converged(&mut network, &Gate::Or.samples(), &TrainConfig::new(5_000, 0)).unwrap();

    let file = NamedTempFile::new().unwrap();
    network.save(file.path()).unwrap();
    let restored = Network::load(file.path()).unwrap();

    for input in [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0], [0.25, 0.75]] {
        assert_eq!(
            restored.feed_forward(&input).unwrap(),
            network.feed_forward(&input).unwrap()
        );
    }
    assert_eq!(restored.learning_rate(), network.learning_rate());
    assert_eq!(restored.activation(), ActivationFunction::Sigmoid);
}

#[test]
fn relu_models_persist() {
    let cfg = NetworkConfig {
        activation: Some(ActivationFunction::ReLU),
        ..NetworkConfig::default()
    }
    .with_seed(8);
    let network = Network::new(&cfg).unwrap();
    let restored = Network::from_bytes(&network.to_bytes().unwrap()).unwrap();
    assert_eq!(restored.activation(), ActivationFunction::ReLU);
    assert_eq!(restored, network);
}

#[test]
fn corrupt_file_can_fall_back_to_fresh_network() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), br#"{"format_version":1,"input_size":2}"#).unwrap();

    let cfg = NetworkConfig::default().with_seed(1);
    let network = match Network::load_or_new(file.path(), &cfg) {
        Err(e) if e.is_recoverable_decode() => Network::new(&cfg).unwrap(),
        other => panic!("expected a decode error, got {other:?}"),
    };
    assert_eq!(network.input_size(), 2);
}

#[test]
fn missing_file_is_an_io_error_for_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = Network::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, NetworkError::Io(_)));
    assert!(!err.is_recoverable_decode());
}
