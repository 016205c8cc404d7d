use crate::error::MatrixError;
use crate::math::matrix::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Sum of squared differences divided by the number of rows.
    pub fn compute(targets: &Matrix, outputs: &Matrix) -> Result<f64, MatrixError> {
        let diff = Matrix::subtract(targets, outputs)?;
        let sum: f64 = diff.row_slices().flatten().map(|d| d * d).sum();
        Ok(sum / targets.rows() as f64)
    }

    /// Per-output gradient: outputs - targets
    pub fn derivative(targets: &Matrix, outputs: &Matrix) -> Result<Matrix, MatrixError> {
        Matrix::subtract(outputs, targets)
    }
}
