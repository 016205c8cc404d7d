use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::loss::loss_type::LossType;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;

/// Fully connected network with exactly one hidden layer.
///
/// Weights are stored as `(neurons_out × neurons_in)` matrices and biases as
/// column vectors, so a layer computes `activation(W · x + b)` on a column
/// input `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub(crate) input_size: usize,
    pub(crate) hidden_size: usize,
    pub(crate) output_size: usize,
    pub(crate) weights_input_hidden: Matrix,
    pub(crate) weights_hidden_output: Matrix,
    pub(crate) bias_hidden: Matrix,
    pub(crate) bias_output: Matrix,
    pub(crate) learning_rate: f64,
    pub(crate) activation: ActivationFunction,
    pub(crate) loss: LossType,
}

impl Network {
    /// Builds a network with He-initialized weights and biases.
    pub fn new(config: &NetworkConfig) -> Result<Network> {
        let (activation, loss) = config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (input, hidden, output) = (config.input_size, config.hidden_size, config.output_size);

        let weights_input_hidden = Matrix::he_with(hidden, input, input, &mut rng);
        let bias_hidden = Matrix::he_with(hidden, 1, input, &mut rng);
        let weights_hidden_output = Matrix::he_with(output, hidden, hidden, &mut rng);
        let bias_output = Matrix::he_with(output, 1, hidden, &mut rng);

        debug!(
            input,
            hidden,
            output,
            learning_rate = config.learning_rate,
            ?activation,
            seeded = config.seed.is_some(),
            "initialized network"
        );

        Ok(Network {
            input_size: input,
            hidden_size: hidden,
            output_size: output,
            weights_input_hidden,
            weights_hidden_output,
            bias_hidden,
            bias_output,
            learning_rate: config.learning_rate,
            activation,
            loss,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn loss(&self) -> LossType {
        self.loss
    }

    pub fn weights_input_hidden(&self) -> &Matrix {
        &self.weights_input_hidden
    }

    pub fn weights_hidden_output(&self) -> &Matrix {
        &self.weights_hidden_output
    }

    pub fn bias_hidden(&self) -> &Matrix {
        &self.bias_hidden
    }

    pub fn bias_output(&self) -> &Matrix {
        &self.bias_output
    }

    /// Runs inference and returns `output_size` activated values.
    ///
    /// Does not touch the network's state; the returned vector is a copy.
    pub fn feed_forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        let (_, outputs) = self.forward(&Matrix::from_column(input))?;
        Ok(outputs.to_column_vec())
    }

    /// Loss of the current prediction for `input` against `target`.
    pub fn evaluate_loss(&self, input: &[f64], target: &[f64]) -> Result<f64> {
        self.predict_with_loss(input, target).map(|(_, loss)| loss)
    }

    /// Prediction for `input` together with its loss against `target`.
    pub fn predict_with_loss(&self, input: &[f64], target: &[f64]) -> Result<(Vec<f64>, f64)> {
        self.check_input(input)?;
        self.check_target(target)?;
        let (_, outputs) = self.forward(&Matrix::from_column(input))?;
        let loss = self.loss.compute(&Matrix::from_column(target), &outputs)?;
        Ok((outputs.to_column_vec(), loss))
    }

    /// One step of backpropagation on a single example.
    ///
    /// Every delta is computed before the first weight is written, so the
    /// hidden-layer error is propagated through the hidden→output weights as
    /// they were during the forward pass, and a failure leaves the network
    /// unchanged.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        self.check_input(input)?;
        self.check_target(target)?;

        let inputs = Matrix::from_column(input);
        let targets = Matrix::from_column(target);
        let (hidden, outputs) = self.forward(&inputs)?;

        // target - outputs
        let mut output_errors = self.loss.derivative(&targets, &outputs)?;
        output_errors.scale(-1.0);

        let activation = self.activation;
        let mut output_gradient = outputs.map(|y| activation.derivative(y));
        output_gradient.hadamard(&output_errors)?;
        output_gradient.scale(self.learning_rate);

        let hidden_errors = Matrix::multiply(&self.weights_hidden_output.transpose(), &output_errors)?;

        let mut hidden_gradient = hidden.map(|y| activation.derivative(y));
        hidden_gradient.hadamard(&hidden_errors)?;
        hidden_gradient.scale(self.learning_rate);

        let weights_ho_delta = Matrix::multiply(&output_gradient, &hidden.transpose())?;
        let weights_ih_delta = Matrix::multiply(&hidden_gradient, &inputs.transpose())?;

        self.weights_hidden_output.add(&weights_ho_delta)?;
        self.bias_output.add(&output_gradient)?;
        self.weights_input_hidden.add(&weights_ih_delta)?;
        self.bias_hidden.add(&hidden_gradient)?;

        Ok(())
    }

    /// Forward pass on a column input; returns the activated hidden and
    /// output layers.
    fn forward(&self, inputs: &Matrix) -> Result<(Matrix, Matrix)> {
        let activation = self.activation;

        let mut hidden = Matrix::multiply(&self.weights_input_hidden, inputs)?;
        hidden.add(&self.bias_hidden)?;
        hidden.apply(|x| activation.function(x));

        let mut outputs = Matrix::multiply(&self.weights_hidden_output, &hidden)?;
        outputs.add(&self.bias_output)?;
        outputs.apply(|x| activation.function(x));

        Ok((hidden, outputs))
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_size {
            return Err(NetworkError::InputSize {
                expected: self.input_size,
                actual: input.len(),
            });
        }
        Ok(())
    }

    fn check_target(&self, target: &[f64]) -> Result<()> {
        if target.len() != self.output_size {
            return Err(NetworkError::TargetSize {
                expected: self.output_size,
                actual: target.len(),
            });
        }
        Ok(())
    }

    /// Verifies that sizes, learning rate and matrix shapes agree. Used when
    /// a network is rebuilt from stored data.
    pub(crate) fn check_invariants(&self) -> Result<()> {
        if self.input_size == 0 || self.hidden_size == 0 || self.output_size == 0 {
            return Err(NetworkError::Corrupt("layer sizes must be positive".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::Corrupt(format!(
                "learning rate {} is not positive",
                self.learning_rate
            )));
        }
        let expected = [
            ("weights_input_hidden", &self.weights_input_hidden, (self.hidden_size, self.input_size)),
            ("weights_hidden_output", &self.weights_hidden_output, (self.output_size, self.hidden_size)),
            ("bias_hidden", &self.bias_hidden, (self.hidden_size, 1)),
            ("bias_output", &self.bias_output, (self.output_size, 1)),
        ];
        for (name, matrix, shape) in expected {
            matrix
                .validate()
                .map_err(|e| NetworkError::Corrupt(format!("{name}: {e}")))?;
            if matrix.shape() != shape {
                return Err(NetworkError::Corrupt(format!(
                    "{name} is {:?}, expected {:?}",
                    matrix.shape(),
                    shape
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn seeded(seed: u64) -> Network {
        Network::new(&NetworkConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn shapes_follow_config() {
        let cfg = NetworkConfig {
            input_size: 3,
            hidden_size: 4,
            output_size: 2,
            ..NetworkConfig::default()
        };
        let net = Network::new(&cfg).unwrap();
        assert_eq!(net.weights_input_hidden().shape(), (4, 3));
        assert_eq!(net.weights_hidden_output().shape(), (2, 4));
        assert_eq!(net.bias_hidden().shape(), (4, 1));
        assert_eq!(net.bias_output().shape(), (2, 1));
        assert!(net.check_invariants().is_ok());
    }

    #[test]
    fn zero_hidden_size_fails() {
        let cfg = NetworkConfig { hidden_size: 0, ..NetworkConfig::default() };
        assert!(matches!(Network::new(&cfg), Err(NetworkError::InvalidConfig(_))));
    }

    #[test]
    fn same_seed_same_weights() {
        assert_eq!(seeded(3), seeded(3));
        assert_ne!(seeded(3), seeded(4));
    }

    #[test]
    fn feed_forward_is_deterministic_and_pure() {
        let net = seeded(11);
        let before = net.clone();
        let a = net.feed_forward(&[0.3, -0.7]).unwrap();
        let b = net.feed_forward(&[0.3, -0.7]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(net, before);
    }

    #[test]
    fn feed_forward_matches_hand_computation() {
        let mut net = seeded(0);
        net.weights_input_hidden = Matrix::from_data(vec![vec![0.5, -0.5]; 5]).unwrap();
        net.bias_hidden = Matrix::zeros(5, 1);
        net.weights_hidden_output = Matrix::from_data(vec![vec![0.2; 5]]).unwrap();
        net.bias_output = Matrix::from_column(&[0.1]);

        let sig = |x: f64| 1.0 / (1.0 + (-x).exp());
        let h = sig(0.5 * 1.0 - 0.5 * 0.0);
        let expected = sig(5.0 * 0.2 * h + 0.1);

        let out = net.feed_forward(&[1.0, 0.0]).unwrap();
        assert_abs_diff_eq!(out[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn wrong_lengths_are_rejected_without_mutation() {
        let mut net = seeded(5);
        let before = net.clone();
        assert!(matches!(
            net.feed_forward(&[1.0]),
            Err(NetworkError::InputSize { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            net.train(&[1.0, 0.0], &[1.0, 0.0]),
            Err(NetworkError::TargetSize { expected: 1, actual: 2 })
        ));
        assert_eq!(net, before);
    }

    #[test]
    fn single_step_reduces_loss() {
        for seed in 0..10 {
            let cfg = NetworkConfig { learning_rate: 0.01, ..NetworkConfig::default() }.with_seed(seed);
            let mut net = Network::new(&cfg).unwrap();
            let (input, target) = ([0.4, 0.9], [1.0]);

            let before = net.evaluate_loss(&input, &target).unwrap();
            net.train(&input, &target).unwrap();
            let after = net.evaluate_loss(&input, &target).unwrap();

            assert!(after < before, "seed {seed}: {after} !< {before}");
        }
    }

    #[test]
    fn hidden_error_uses_pre_update_weights() {
        let mut net = seeded(21);
        let input = [1.0, 0.5];
        let target = [0.0];

        // Reproduce the step by hand with the weights as they were before it.
        let inputs = Matrix::from_column(&input);
        let (hidden, outputs) = net.forward(&inputs).unwrap();
        let old_who = net.weights_hidden_output.clone();
        let old_wih = net.weights_input_hidden.clone();
        let lr = net.learning_rate;

        let err = target[0] - outputs.get(0, 0).unwrap();

        net.train(&input, &target).unwrap();

        for j in 0..net.hidden_size {
            let h = hidden.get(j, 0).unwrap();
            let hidden_err = old_who.get(0, j).unwrap() * err;
            let grad = h * (1.0 - h) * hidden_err * lr;
            for (i, x) in input.iter().enumerate() {
                assert_abs_diff_eq!(
                    net.weights_input_hidden.get(j, i).unwrap(),
                    old_wih.get(j, i).unwrap() + grad * x,
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn relu_network_trains() {
        let cfg = NetworkConfig {
            activation: Some(ActivationFunction::ReLU),
            learning_rate: 0.01,
            ..NetworkConfig::default()
        }
        .with_seed(2);
        let mut net = Network::new(&cfg).unwrap();
        net.train(&[1.0, 1.0], &[0.5]).unwrap();
        assert!(net.check_invariants().is_ok());
    }
}
