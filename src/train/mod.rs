pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use epoch_stats::{EpochStats, Evaluation, TrainReport};
pub use train_config::TrainConfig;
pub use loop_fn::{evaluate, round_prediction, train_until_converged, train_with_progress};
