use std::time::Instant;

use tracing::{debug, info};

use crate::dataset::Sample;
use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::{EpochStats, Evaluation, TrainReport};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` one sample at a time until every sample is classified
/// correctly or `config.max_epochs` is reached.
pub fn train_until_converged(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
) -> Result<TrainReport> {
    train_with_progress(network, samples, config, |_| {})
}

/// Same as [`train_until_converged`], additionally handing every progress
/// snapshot to `on_report`.
///
/// Each epoch calls [`Network::train`] on the samples in order, then
/// evaluates the whole set. A sample counts as correct when every output,
/// rounded by [`round_prediction`], equals its target. Progress is also
/// logged at `info` level.
///
/// # Errors
/// [`NetworkError::EmptyDataset`] if `samples` is empty; size errors from the
/// network if a sample does not fit its layers.
pub fn train_with_progress<F>(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
    mut on_report: F,
) -> Result<TrainReport>
where
    F: FnMut(&EpochStats),
{
    if samples.is_empty() {
        return Err(NetworkError::EmptyDataset);
    }

    let run_start = Instant::now();
    let mut interval_start = Instant::now();
    let mut eval = evaluate(network, samples)?;

    debug!(
        samples = samples.len(),
        max_epochs = config.max_epochs,
        initial_loss = eval.mean_loss,
        "starting training"
    );

    for epoch in 1..=config.max_epochs {
        for sample in samples {
            network.train(&sample.input, &sample.target)?;
        }
        eval = evaluate(network, samples)?;

        // ── Progress ──────────────────────────────────────────────────────
        if config.report_every > 0 && epoch % config.report_every == 0 {
            let stats = EpochStats {
                epoch,
                max_epochs: config.max_epochs,
                mean_loss: eval.mean_loss,
                accuracy: eval.accuracy,
                mean_epoch_time: interval_start.elapsed().div_f64(config.report_every as f64),
            };
            info!(
                "epochs {} to {} took {:.2?} per epoch, mean loss {:.4}, accuracy {:.2}",
                epoch + 1 - config.report_every,
                epoch,
                stats.mean_epoch_time,
                stats.mean_loss,
                stats.accuracy
            );
            on_report(&stats);
            interval_start = Instant::now();
        }

        if eval.all_correct() {
            info!(epoch, mean_loss = eval.mean_loss, "network classifies every sample correctly");
            return Ok(report(epoch, true, eval, run_start));
        }
    }

    info!(
        epochs = config.max_epochs,
        mean_loss = eval.mean_loss,
        accuracy = eval.accuracy,
        "epoch limit reached without converging"
    );
    Ok(report(config.max_epochs, false, eval, run_start))
}

/// Mean loss and classification accuracy of `network` over `samples`.
///
/// An empty set evaluates to zero loss and zero accuracy.
pub fn evaluate(network: &Network, samples: &[Sample]) -> Result<Evaluation> {
    if samples.is_empty() {
        return Ok(Evaluation { mean_loss: 0.0, accuracy: 0.0 });
    }

    let mut total_loss = 0.0;
    let mut correct = 0usize;

    for sample in samples {
        let (output, loss) = network.predict_with_loss(&sample.input, &sample.target)?;
        total_loss += loss;

        let matches = output
            .iter()
            .zip(&sample.target)
            .all(|(&o, &t)| round_prediction(o) == round_prediction(t));
        if matches {
            correct += 1;
        }
    }

    let n = samples.len() as f64;
    Ok(Evaluation {
        mean_loss: total_loss / n,
        accuracy: correct as f64 / n,
    })
}

/// Binary threshold: `1.0` if `x >= 0.5`, otherwise `0.0`.
pub fn round_prediction(x: f64) -> f64 {
    if x < 0.5 { 0.0 } else { 1.0 }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn report(epochs: usize, converged: bool, eval: Evaluation, run_start: Instant) -> TrainReport {
    TrainReport {
        epochs,
        converged,
        final_loss: eval.mean_loss,
        final_accuracy: eval.accuracy,
        elapsed: run_start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Gate;
    use crate::network::config::NetworkConfig;

    fn net(seed: u64) -> Network {
        Network::new(&NetworkConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn rounding_threshold() {
        assert_eq!(round_prediction(0.5), 1.0);
        assert_eq!(round_prediction(0.4999), 0.0);
        assert_eq!(round_prediction(0.93), 1.0);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let mut network = net(1);
        let err = train_until_converged(&mut network, &[], &TrainConfig::default()).unwrap_err();
        assert!(matches!(err, NetworkError::EmptyDataset));
    }

    #[test]
    fn zero_epochs_leaves_network_untouched() {
        let mut network = net(1);
        let before = network.clone();
        let report = train_until_converged(&mut network, &Gate::And.samples(), &TrainConfig::new(0, 0)).unwrap();
        assert_eq!(report.epochs, 0);
        assert!(!report.converged);
        assert_eq!(network, before);
    }

    #[test]
    fn reports_arrive_at_the_requested_interval() {
        let mut network = net(2);
        let mut seen = Vec::new();
        // Train on a set that cannot all be satisfied so the loop runs to the cap.
        let contradictory = vec![
            Sample::new(vec![1.0, 1.0], vec![1.0]),
            Sample::new(vec![1.0, 1.0], vec![0.0]),
        ];
        let report = train_with_progress(
            &mut network,
            &contradictory,
            &TrainConfig::new(50, 10),
            |s| seen.push(s.epoch),
        )
        .unwrap();
        assert_eq!(seen, vec![10, 20, 30, 40, 50]);
        assert_eq!(report.epochs, 50);
        assert!(!report.converged);
        assert!(report.final_accuracy <= 0.5);
    }

    #[test]
    fn learns_and_gate() {
        let mut network = net(3);
        let samples = Gate::And.samples();
        let report = train_until_converged(&mut network, &samples, &TrainConfig::new(200_000, 0)).unwrap();
        assert!(report.converged);
        assert_eq!(evaluate(&network, &samples).unwrap().accuracy, 1.0);
    }

    #[test]
    fn mismatched_sample_surfaces_size_error() {
        let mut network = net(4);
        let bad = vec![Sample::new(vec![1.0, 0.0, 1.0], vec![1.0])];
        let err = train_until_converged(&mut network, &bad, &TrainConfig::new(5, 0)).unwrap_err();
        assert!(matches!(err, NetworkError::InputSize { expected: 2, actual: 3 }));
    }
}
