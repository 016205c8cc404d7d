use fnn::{train_until_converged, Gate, Network, NetworkConfig, TrainConfig};

fn main() -> fnn::Result<()> {
    let mut network = Network::new(&NetworkConfig::default())?;
    let samples = Gate::Xor.samples();

    let report = train_until_converged(&mut network, &samples, &TrainConfig::new(500_000, 0))?;
    println!(
        "converged: {} after {} epochs (loss {:.6})",
        report.converged, report.epochs, report.final_loss
    );

    for sample in &samples {
        let output = network.feed_forward(&sample.input)?;
        println!("Input: {:?} -> Output: {:.4}", sample.input, output[0]);
    }
    Ok(())
}
