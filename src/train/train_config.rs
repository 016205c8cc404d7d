/// Configuration for a `train_until_converged` run.
///
/// # Fields
/// - `max_epochs`   — upper bound on full passes over the training data; the
///                    loop stops earlier once every sample is classified
///                    correctly
/// - `report_every` — emit an `EpochStats` every this many epochs; `0`
///                    disables progress reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub max_epochs: usize,
    pub report_every: usize,
}

impl TrainConfig {
    pub fn new(max_epochs: usize, report_every: usize) -> Self {
        TrainConfig { max_epochs, report_every }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            max_epochs: 1_000_000,
            report_every: 1000,
        }
    }
}
