use std::{fs, path::Path};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{MlErr, Result, arch::Network, arch::activations::ActFn};

/// Describes the network to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub input_size: usize,
    #[serde(default)]
    pub hidden_layers: Vec<usize>,
    pub output_size: usize,
    #[serde(default = "default_activation")]
    pub activation: String,
    pub learning_rate: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub guard_divergence: bool,
}

impl NetworkConfig {
    pub fn new(
        input_size: usize,
        hidden_layers: Vec<usize>,
        output_size: usize,
        act_fn: ActFn,
        learning_rate: f64,
    ) -> Self {
        Self {
            input_size,
            hidden_layers,
            output_size,
            activation: act_fn.name().to_string(),
            learning_rate,
            seed: None,
            guard_divergence: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_divergence_guard(mut self, guard: bool) -> Self {
        self.guard_divergence = guard;
        self
    }

    /// Every layer size, input and output included.
    pub fn topology(&self) -> Vec<usize> {
        let mut layers = Vec::with_capacity(self.hidden_layers.len() + 2);
        layers.push(self.input_size);
        layers.extend_from_slice(&self.hidden_layers);
        layers.push(self.output_size);
        layers
    }

    pub fn act_fn(&self) -> Result<ActFn> {
        ActFn::from_name(&self.activation)
    }

    /// Checks every field without building anything.
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(MlErr::InvalidConfig("inputSize must be positive".into()));
        }

        if self.output_size == 0 {
            return Err(MlErr::InvalidConfig("outputSize must be positive".into()));
        }

        if let Some(i) = self.hidden_layers.iter().position(|&size| size == 0) {
            return Err(MlErr::InvalidConfig(format!(
                "hiddenLayers[{i}] must be positive"
            )));
        }

        if !(self.learning_rate.is_finite() && self.learning_rate > 0.) {
            return Err(MlErr::InvalidConfig(format!(
                "learningRate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }

        self.act_fn()?;
        Ok(())
    }

    /// Builds the network with a rng seeded from `seed`, or from the OS when there's none.
    pub fn build(&self) -> Result<Network> {
        Network::from_config(self, &mut generate_rng(self.seed))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = read_json(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// How to train a network over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainConfig {
    pub epochs: usize,
    /// `0` averages the error over the whole epoch.
    #[serde(default)]
    pub batch_size: usize,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            ..Self::default()
        }
    }

    pub fn rng(&self) -> StdRng {
        generate_rng(self.seed)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path)
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 0,
            shuffle: true,
            seed: None,
        }
    }
}

impl Network {
    /// Creates a new `Network` out of a `NetworkConfig`, ignoring its seed in favor of `rng`.
    pub fn from_config<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let network = Network::new(
            config.topology(),
            config.act_fn()?,
            config.learning_rate,
            rng,
        )?;

        Ok(network.with_divergence_guard(config.guard_divergence))
    }
}

/// Generates a random number generator given (or not) a seed.
///
/// # Arguments
/// * `seed` - An optional seed for the rng.
pub fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn default_activation() -> String {
    ActFn::default().name().to_string()
}

fn default_shuffle() -> bool {
    true
}
