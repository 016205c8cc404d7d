pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod network;
pub mod dataset;
pub mod train;

// Convenience re-exports
pub use error::{MatrixError, NetworkError, ParseGateError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use loss::loss_type::LossType;
pub use network::{Network, NetworkConfig};
pub use dataset::{Gate, Sample};
pub use train::{TrainConfig, TrainReport, train_until_converged};
