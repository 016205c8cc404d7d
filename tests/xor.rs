use fnn::train::{evaluate, round_prediction};
use fnn::{train_until_converged, Gate, Network, NetworkConfig, TrainConfig};

fn xor_config(seed: u64) -> NetworkConfig {
    NetworkConfig {
        input_size: 2,
        hidden_size: 5,
        output_size: 1,
        learning_rate: 0.1,
        ..NetworkConfig::default()
    }
    .with_seed(seed)
}

#[test]
fn learns_xor() {
    let samples = Gate::Xor.samples();

    // A handful of seeds guards against the rare start that settles in a
    // local minimum.
    let network = (0..8u64)
        .find_map(|seed| {
            let mut network = Network::new(&xor_config(seed)).unwrap();
            let report = train_until_converged(&mut network, &samples, &TrainConfig::new(200_000, 0)).unwrap();
            report.converged.then_some(network)
        })
        .expect("no seed converged on XOR");

    assert_eq!(round_prediction(network.feed_forward(&[0.0, 1.0]).unwrap()[0]), 1.0);
    assert_eq!(round_prediction(network.feed_forward(&[0.0, 0.0]).unwrap()[0]), 0.0);
    assert_eq!(round_prediction(network.feed_forward(&[1.0, 0.0]).unwrap()[0]), 1.0);
    assert_eq!(round_prediction(network.feed_forward(&[1.0, 1.0]).unwrap()[0]), 0.0);
    assert_eq!(evaluate(&network, &samples).unwrap().accuracy, 1.0);
}

#[test]
fn training_lowers_loss_on_every_gate() {
    for gate in Gate::ALL {
        let samples = gate.samples();
        let mut network = Network::new(&xor_config(17)).unwrap();
        let before = evaluate(&network, &samples).unwrap().mean_loss;
        for _ in 0..2_000 {
            for sample in &samples {
                network.train(&sample.input, &sample.target).unwrap();
            }
        }
        let after = evaluate(&network, &samples).unwrap().mean_loss;
        assert!(after < before, "{gate}: {after} !< {before}");
    }
}
