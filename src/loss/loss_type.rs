use serde::{Serialize, Deserialize};

use crate::error::MatrixError;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;

/// Selects which loss function the network trains against.
///
/// - `Mse` — mean-squared error; pair with Sigmoid output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LossType {
    #[default]
    Mse,
}

impl LossType {
    pub fn compute(&self, targets: &Matrix, outputs: &Matrix) -> Result<f64, MatrixError> {
        match self {
            LossType::Mse => MseLoss::compute(targets, outputs),
        }
    }

    /// Gradient of the loss with respect to `outputs`.
    pub fn derivative(&self, targets: &Matrix, outputs: &Matrix) -> Result<Matrix, MatrixError> {
        match self {
            LossType::Mse => MseLoss::derivative(targets, outputs),
        }
    }
}
