use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;

/// Loss and accuracy of a network over a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Mean per-sample loss.
    pub mean_loss: f64,
    /// Fraction in [0, 1] of samples whose rounded outputs all match their targets.
    pub accuracy: f64,
}

impl Evaluation {
    pub fn all_correct(&self) -> bool {
        self.accuracy >= 1.0
    }
}

/// Progress snapshot emitted by `train_with_progress` every
/// `report_every` epochs.
#[derive(Debug, Clone)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub max_epochs: usize,
    pub mean_loss: f64,
    pub accuracy: f64,
    /// Average wall-clock time of one epoch since the previous report.
    pub mean_epoch_time: Duration,
}

/// Outcome of a complete training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainReport {
    /// Number of epochs actually run.
    pub epochs: usize,
    /// True if the run stopped because every sample was classified correctly.
    pub converged: bool,
    pub final_loss: f64,
    pub final_accuracy: f64,
    pub elapsed: Duration,
}

impl TrainReport {
    /// Writes the report as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
