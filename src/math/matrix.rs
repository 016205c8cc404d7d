use rand::prelude::*;
use rand_distr::StandardNormal;
use serde::{Serialize, Deserialize};

use crate::error::MatrixError;

type MatrixResult<T> = std::result::Result<T, MatrixError>;

/// Dense row-major matrix of `f64`.
///
/// `rows` and `cols` are fixed at construction; every row holds exactly `cols`
/// values. Operations that combine two matrices check shapes and return
/// [`MatrixError::ShapeMismatch`] instead of truncating or padding.
///
/// Deserialization goes through [`Matrix::validate`], so a payload whose
/// rows disagree with `rows`/`cols` is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

/// Unchecked wire form of [`Matrix`].
#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix) -> MatrixResult<Matrix> {
        let m = Matrix { rows: raw.rows, cols: raw.cols, data: raw.data };
        m.validate()?;
        Ok(m)
    }
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Matrix filled with uniform values in [-1, 1).
    pub fn random(rows: usize, cols: usize) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.randomize();
        res
    }

    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }
    }

    /// He initialization: every entry drawn from N(0, 1) and scaled by
    /// `sqrt(2 / fan_in)`.
    ///
    /// `fan_in` is passed explicitly because bias vectors (`rows × 1`) are
    /// scaled by the fan-in of the weight matrix they accompany, not by their
    /// own column count.
    pub fn he_with<R: Rng + ?Sized>(rows: usize, cols: usize, fan_in: usize, rng: &mut R) -> Matrix {
        let std_dev = (2.0 / fan_in as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for row in &mut res.data {
            for x in row.iter_mut() {
                *x = rng.sample::<f64, _>(StandardNormal) * std_dev;
            }
        }
        res
    }

    /// Column matrix (`len × 1`) from a slice.
    pub fn from_column(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// Builds a matrix from row vectors, rejecting ragged input.
    pub fn from_data(data: Vec<Vec<f64>>) -> MatrixResult<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        let m = Matrix { rows, cols, data };
        m.validate()?;
        Ok(m)
    }

    /// Checks the row/column invariant.
    pub fn validate(&self) -> MatrixResult<()> {
        if self.data.len() != self.rows {
            return Err(MatrixError::ShapeMismatch {
                op: "validate",
                left: self.shape(),
                right: (self.data.len(), self.cols),
            });
        }
        for (row, values) in self.data.iter().enumerate() {
            if values.len() != self.cols {
                return Err(MatrixError::Ragged {
                    row,
                    expected: self.cols,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row_slices(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Flattens the matrix in row-major order. For a column matrix this is
    /// the original vector.
    pub fn to_column_vec(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> MatrixResult<()> {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    /// In-place elementwise sum.
    pub fn add(&mut self, other: &Matrix) -> MatrixResult<()> {
        self.check_same_shape(other, "add")?;
        self.zip_apply(other, |a, b| a + b);
        Ok(())
    }

    /// Elementwise `a - b` into a new matrix.
    pub fn subtract(a: &Matrix, b: &Matrix) -> MatrixResult<Matrix> {
        a.check_same_shape(b, "subtract")?;
        let mut res = a.clone();
        res.zip_apply(b, |x, y| x - y);
        Ok(res)
    }

    /// In-place elementwise (Hadamard) product.
    pub fn hadamard(&mut self, other: &Matrix) -> MatrixResult<()> {
        self.check_same_shape(other, "hadamard")?;
        self.zip_apply(other, |a, b| a * b);
        Ok(())
    }

    pub fn scale(&mut self, k: f64) {
        self.apply(|x| x * k);
    }

    /// Standard matrix product `a × b`; requires `a.cols == b.rows`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> MatrixResult<Matrix> {
        if a.cols != b.rows {
            return Err(MatrixError::ShapeMismatch {
                op: "multiply",
                left: a.shape(),
                right: b.shape(),
            });
        }

        let mut res = Matrix::zeros(a.rows, b.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..a.cols {
                    sum += a.data[i][k] * b.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Applies `f` to every entry in place.
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x = f(*x);
            }
        }
    }

    /// Non-destructive counterpart of [`Matrix::apply`].
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        let mut res = self.clone();
        res.apply(f);
        res
    }

    // Callers have already checked shapes.
    fn zip_apply<F>(&mut self, other: &Matrix, f: F)
    where
        F: Fn(f64, f64) -> f64,
    {
        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (x, &y) in row.iter_mut().zip(other_row) {
                *x = f(*x, y);
            }
        }
    }
}
