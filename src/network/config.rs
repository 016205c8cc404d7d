use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::loss::loss_type::LossType;

/// Everything needed to construct a fresh [`Network`](crate::Network).
///
/// Fields:
/// - `input_size`, `hidden_size`, `output_size` — neurons per layer, all > 0
/// - `learning_rate` — step size applied to every gradient, positive
/// - `activation`    — non-linearity used by both layers
/// - `loss`          — loss whose derivative drives the output error
/// - `seed`          — fixes weight initialization; `None` draws from OS entropy
///
/// `activation` and `loss` are optional only so that a hand-written JSON
/// config that omits them is rejected at construction instead of silently
/// picking a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub activation: Option<ActivationFunction>,
    #[serde(default)]
    pub loss: Option<LossType>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    /// The two-input logic gate setup: 2-5-1, learning rate 0.1, Sigmoid, MSE.
    fn default() -> Self {
        NetworkConfig {
            input_size: 2,
            hidden_size: 5,
            output_size: 1,
            learning_rate: 0.1,
            activation: Some(ActivationFunction::Sigmoid),
            loss: Some(LossType::Mse),
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks layer sizes, learning rate and the presence of activation and
    /// loss, returning the resolved pair.
    pub fn validate(&self) -> Result<(ActivationFunction, LossType)> {
        for (name, size) in [
            ("input_size", self.input_size),
            ("hidden_size", self.hidden_size),
            ("output_size", self.output_size),
        ] {
            if size == 0 {
                return Err(NetworkError::InvalidConfig(format!(
                    "{name} must be positive"
                )));
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        let activation = self.activation.ok_or_else(|| {
            NetworkError::InvalidConfig("activation function must be provided".into())
        })?;
        let loss = self.loss.ok_or_else(|| {
            NetworkError::InvalidConfig("loss function must be provided".into())
        })?;
        Ok((activation, loss))
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkConfig` from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
