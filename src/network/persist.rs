//! Model file format.
//!
//! A model is a JSON document whose fields appear in a fixed order: format
//! version, layer sizes, the two weight matrices, the two bias vectors,
//! learning rate, then the activation and loss tags. Activation and loss are
//! closed enums, so an unrecognized tag fails to decode rather than being
//! skipped.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::loss::loss_type::LossType;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::network::Network;

/// Version written by [`Network::to_bytes`]. Other versions are rejected.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ModelFileRef<'a> {
    format_version: u32,
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    weights_input_hidden: &'a Matrix,
    weights_hidden_output: &'a Matrix,
    bias_hidden: &'a Matrix,
    bias_output: &'a Matrix,
    learning_rate: f64,
    activation: ActivationFunction,
    loss: LossType,
}

#[derive(Deserialize)]
struct ModelFile {
    format_version: u32,
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    weights_input_hidden: Matrix,
    weights_hidden_output: Matrix,
    bias_hidden: Matrix,
    bias_output: Matrix,
    learning_rate: f64,
    activation: ActivationFunction,
    #[serde(default)]
    loss: LossType,
}

#[derive(Deserialize)]
struct VersionProbe {
    format_version: u32,
}

impl Network {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let file = ModelFileRef {
            format_version: FORMAT_VERSION,
            input_size: self.input_size,
            hidden_size: self.hidden_size,
            output_size: self.output_size,
            weights_input_hidden: &self.weights_input_hidden,
            weights_hidden_output: &self.weights_hidden_output,
            bias_hidden: &self.bias_hidden,
            bias_output: &self.bias_output,
            learning_rate: self.learning_rate,
            activation: self.activation,
            loss: self.loss,
        };
        Ok(serde_json::to_vec_pretty(&file)?)
    }

    /// Decodes a model written by [`Network::to_bytes`].
    ///
    /// The version is checked before the body so that files from a newer
    /// layout report [`NetworkError::UnsupportedVersion`] instead of a field
    /// error. The decoded network must satisfy the same shape invariants as a
    /// freshly constructed one.
    pub fn from_bytes(bytes: &[u8]) -> Result<Network> {
        let probe: VersionProbe = serde_json::from_slice(bytes)?;
        if probe.format_version != FORMAT_VERSION {
            return Err(NetworkError::UnsupportedVersion(probe.format_version));
        }

        let file: ModelFile = serde_json::from_slice(bytes)?;
        debug_assert_eq!(file.format_version, FORMAT_VERSION);

        let network = Network {
            input_size: file.input_size,
            hidden_size: file.hidden_size,
            output_size: file.output_size,
            weights_input_hidden: file.weights_input_hidden,
            weights_hidden_output: file.weights_hidden_output,
            bias_hidden: file.bias_hidden,
            bias_output: file.bias_output,
            learning_rate: file.learning_rate,
            activation: file.activation,
            loss: file.loss,
        };
        network.check_invariants()?;
        Ok(network)
    }

    /// Writes the model to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes()?)?;
        debug!(path = %path.display(), "saved model");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let network = Network::from_bytes(&bytes)?;
        debug!(path = %path.display(), "loaded model");
        Ok(network)
    }

    /// Loads the model at `path`, or builds a fresh one from `config` when the
    /// file does not exist or is empty.
    ///
    /// A file that exists but cannot be decoded is an error; see
    /// [`NetworkError::is_recoverable_decode`].
    pub fn load_or_new<P: AsRef<Path>>(path: P, config: &NetworkConfig) -> Result<Network> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > 0 => Network::load(path),
            Ok(_) => {
                debug!(path = %path.display(), "model file is empty, initializing");
                Network::new(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no model file, initializing");
                Network::new(config)
            }
            Err(e) => Err(e.into()),
        }
    }
}
