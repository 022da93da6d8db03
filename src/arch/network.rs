use std::fmt;

use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::Rng;

use super::{
    activations::ActFn,
    loss::{LossFn, Mse},
};
use crate::{
    MlErr, Result,
    init::RandWeightGen,
    optimization::{GradientDescent, Optimizer},
};

/// Everything a forward pass computes, the outputs plus the intermediate values the backward
/// pass needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    /// The activations of the output layer.
    pub outputs: Array1<f64>,
    /// The activations of every layer, starting with the unmodified input.
    pub activations: Vec<Array1<f64>>,
    /// The weighted sums of every transition, before applying the activation function.
    pub weighted_sums: Vec<Array1<f64>>,
}

/// A fully connected feedforward neural network trained with online gradient descent.
///
/// The weights of transition `i` are a `layers[i] x layers[i + 1]` matrix where the entry
/// `(j, k)` connects neuron `j` of layer `i` to neuron `k` of layer `i + 1`.
///
/// Training mutates the network in place, `forward` and `predict` only read it. Sharing an
/// instance between threads requires external synchronization around `train`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<usize>,
    weights: Vec<Array2<f64>>,
    biases: Vec<Array1<f64>>,
    act_fn: ActFn,
    optimizer: GradientDescent,
    guard: bool,
}

impl Network {
    /// Creates a new `Network` with randomly initialized parameters.
    ///
    /// Weights are drawn with Xavier uniform initialization and biases uniformly from
    /// `[-0.1, 0.1]`.
    ///
    /// # Arguments
    /// * `layers` - The size of every layer, input and output included.
    /// * `act_fn` - The activation function used by every non input layer.
    /// * `learning_rate` - The step size of every training update.
    /// * `rng` - The source of randomness for the initial parameters.
    ///
    /// # Returns
    /// A new `Network` or `MlErr::InvalidConfig` if the topology has less than two layers, an
    /// empty layer or the learning rate isn't a positive finite number.
    pub fn new<R: Rng + ?Sized>(
        layers: Vec<usize>,
        act_fn: ActFn,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        validate_topology(&layers)?;
        validate_learning_rate(learning_rate)?;

        let bias_gen = RandWeightGen::bias()
            .map_err(|e| MlErr::InvalidConfig(format!("invalid bias range: {e}")))?;

        let mut weights = Vec::with_capacity(layers.len() - 1);
        let mut biases = Vec::with_capacity(layers.len() - 1);

        for (fan_in, fan_out) in layers.windows(2).map(|pair| (pair[0], pair[1])) {
            let weight_gen = RandWeightGen::xavier_uniform(fan_in, fan_out).map_err(|e| {
                MlErr::InvalidConfig(format!("invalid xavier range for {fan_in}x{fan_out}: {e}"))
            })?;

            weights.push(weight_gen.matrix(rng, (fan_in, fan_out)));
            biases.push(bias_gen.vector(rng, fan_out));
        }

        let network = Self {
            layers,
            weights,
            biases,
            act_fn,
            optimizer: GradientDescent::new(learning_rate),
            guard: false,
        };

        debug!(
            params = network.num_params(), learning_rate = learning_rate;
            "created {} network with {act_fn} activation",
            network.architecture()
        );

        Ok(network)
    }

    /// Assembles a `Network` from already existing parameters, checking that every weight
    /// matrix and bias vector fits the topology.
    pub(crate) fn from_parts(
        layers: Vec<usize>,
        weights: Vec<Array2<f64>>,
        biases: Vec<Array1<f64>>,
        act_fn: ActFn,
        learning_rate: f64,
    ) -> Result<Self> {
        validate_topology(&layers)?;
        validate_learning_rate(learning_rate)?;

        let transitions = layers.len() - 1;
        if weights.len() != transitions || biases.len() != transitions {
            return Err(MlErr::MalformedRecord(format!(
                "expected {transitions} weight matrices and bias vectors, got {} and {}",
                weights.len(),
                biases.len()
            )));
        }

        for (i, pair) in layers.windows(2).enumerate() {
            let dim = (pair[0], pair[1]);

            if weights[i].dim() != dim {
                return Err(MlErr::MalformedRecord(format!(
                    "weights of transition {i} have shape {:?}, expected {dim:?}",
                    weights[i].dim()
                )));
            }

            if biases[i].len() != dim.1 {
                return Err(MlErr::MalformedRecord(format!(
                    "biases of transition {i} have length {}, expected {}",
                    biases[i].len(),
                    dim.1
                )));
            }
        }

        Ok(Self {
            layers,
            weights,
            biases,
            act_fn,
            optimizer: GradientDescent::new(learning_rate),
            guard: false,
        })
    }

    /// Turns on (or off) the divergence guard, see `set_divergence_guard`.
    pub fn with_divergence_guard(mut self, guard: bool) -> Self {
        self.guard = guard;
        self
    }

    /// When on, `train` fails with `MlErr::NumericDivergence` as soon as an update leaves a non
    /// finite error, weight or bias behind. Off by default.
    pub fn set_divergence_guard(&mut self, guard: bool) {
        self.guard = guard;
    }

    pub fn divergence_guard(&self) -> bool {
        self.guard
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0]
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    pub fn weights(&self) -> &[Array2<f64>] {
        &self.weights
    }

    pub fn biases(&self) -> &[Array1<f64>] {
        &self.biases
    }

    pub fn act_fn(&self) -> ActFn {
        self.act_fn
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    /// Returns the amount of scalar parameters (weights and biases) in the network.
    pub fn num_params(&self) -> usize {
        self.weights.iter().map(|w| w.len()).sum::<usize>()
            + self.biases.iter().map(|b| b.len()).sum::<usize>()
    }

    /// Returns the layer sizes joined by dashes, e.g. `2-4-1`.
    pub fn architecture(&self) -> String {
        self.layers
            .iter()
            .map(|size| size.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `inputs` - One value per neuron of the input layer.
    ///
    /// # Returns
    /// The outputs together with every layer's activations and every transition's weighted
    /// sums, or `MlErr::InputSizeMismatch`.
    pub fn forward(&self, inputs: &[f64]) -> Result<ForwardPass> {
        self.check_inputs(inputs)?;

        let mut activations = Vec::with_capacity(self.layers.len());
        let mut weighted_sums = Vec::with_capacity(self.weights.len());
        let mut a = Array1::from(inputs.to_vec());

        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = a.dot(w) + b;
            let next = z.mapv(|z| self.act_fn.f(z));

            activations.push(a);
            weighted_sums.push(z);
            a = next;
        }

        activations.push(a.clone());

        Ok(ForwardPass {
            outputs: a,
            activations,
            weighted_sums,
        })
    }

    /// Computes the network's prediction for the given inputs.
    ///
    /// # Returns
    /// One value per neuron of the output layer, or `MlErr::InputSizeMismatch`.
    pub fn predict(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        Ok(self.forward(inputs)?.outputs.to_vec())
    }

    /// Trains the network on a single example through backpropagation, updating every weight
    /// and bias right away.
    ///
    /// # Arguments
    /// * `inputs` - One value per neuron of the input layer.
    /// * `targets` - The expected value of every neuron of the output layer.
    ///
    /// # Returns
    /// The mean squared error of the prediction made *before* the update. Shape errors are
    /// reported before touching any parameter.
    pub fn train(&mut self, inputs: &[f64], targets: &[f64]) -> Result<f64> {
        self.check_inputs(inputs)?;
        self.check_targets(targets)?;

        let ForwardPass {
            outputs,
            activations,
            weighted_sums,
        } = self.forward(inputs)?;

        let y = ArrayView1::from(targets);
        let loss = Mse.loss(outputs.view(), y);

        let last = weighted_sums.len() - 1;
        let mut delta = Mse.error(outputs.view(), y) * self.prime(&weighted_sums[last]);

        for i in (0..self.weights.len()).rev() {
            // The previous deltas must come from the weights as they were before this update.
            let prev_delta =
                (i > 0).then(|| self.weights[i].dot(&delta) * self.prime(&weighted_sums[i - 1]));

            let grad_w = -outer(&activations[i], &delta);
            let grad_b = -&delta;

            self.optimizer
                .update_params(self.weights[i].view_mut(), grad_w.view());
            self.optimizer
                .update_params(self.biases[i].view_mut(), grad_b.view());

            if let Some(prev_delta) = prev_delta {
                delta = prev_delta;
            }
        }

        if self.guard && !(loss.is_finite() && self.is_finite()) {
            warn!(loss = loss; "training diverged on a {} network", self.architecture());
            return Err(MlErr::NumericDivergence);
        }

        Ok(loss)
    }

    /// Returns whether every weight and bias is a finite number.
    pub fn is_finite(&self) -> bool {
        self.weights.iter().all(|w| w.iter().all(|v| v.is_finite()))
            && self.biases.iter().all(|b| b.iter().all(|v| v.is_finite()))
    }

    fn prime(&self, z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|z| self.act_fn.df(z))
    }

    fn check_inputs(&self, inputs: &[f64]) -> Result<()> {
        let expected = self.input_size();

        if inputs.len() != expected {
            return Err(MlErr::InputSizeMismatch {
                got: inputs.len(),
                expected,
            });
        }

        Ok(())
    }

    fn check_targets(&self, targets: &[f64]) -> Result<()> {
        let expected = self.output_size();

        if targets.len() != expected {
            return Err(MlErr::TargetSizeMismatch {
                got: targets.len(),
                expected,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.architecture())
    }
}

/// Computes `a ⊗ d`, a `a.len() x d.len()` matrix.
fn outer(a: &Array1<f64>, d: &Array1<f64>) -> Array2<f64> {
    a.view()
        .insert_axis(Axis(1))
        .dot(&d.view().insert_axis(Axis(0)))
}

fn validate_topology(layers: &[usize]) -> Result<()> {
    if layers.len() < 2 {
        return Err(MlErr::InvalidConfig(format!(
            "a network needs at least an input and an output layer, got {} layer(s)",
            layers.len()
        )));
    }

    if let Some(i) = layers.iter().position(|&size| size == 0) {
        return Err(MlErr::InvalidConfig(format!("layer {i} has no neurons")));
    }

    Ok(())
}

fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if !(learning_rate.is_finite() && learning_rate > 0.) {
        return Err(MlErr::InvalidConfig(format!(
            "the learning rate must be a positive finite number, got {learning_rate}"
        )));
    }

    Ok(())
}
