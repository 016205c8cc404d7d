use serde::{Serialize, Deserialize};

/// Elementwise non-linearity applied after each layer's affine transform.
///
/// The serialized variant name is the tag stored in model files. Decoding an
/// unknown name is a format error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    ReLU,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
        }
    }

    /// Derivative expressed in terms of the activation's own output.
    ///
    /// `y` must be the already-activated value `function(x)`, never the
    /// pre-activation `x`: for Sigmoid this is `y * (1 - y)`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => y * (1.0 - y),
            ActivationFunction::ReLU => if y > 0.0 { 1.0 } else { 0.0 },
        }
    }
}
