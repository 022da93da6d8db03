use std::{fmt, str::FromStr};

use super::{LeakyRelu, Relu, Sigmoid, Tanh};
use crate::{MlErr, Result};

/// The registry of activation functions a network can use.
///
/// Every activation is identified by its name alone, so a persisted network only needs to store
/// the name to be rebuilt with the exact same function and derivative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Sigmoid(Sigmoid),
    Tanh(Tanh),
    Relu(Relu),
    LeakyRelu(LeakyRelu),
}

impl ActFn {
    /// Every registered name, in registration order.
    pub const NAMES: [&'static str; 4] = ["sigmoid", "tanh", "relu", "leakyRelu"];

    pub fn sigmoid() -> Self {
        Self::Sigmoid(Sigmoid)
    }

    pub fn tanh() -> Self {
        Self::Tanh(Tanh)
    }

    pub fn relu() -> Self {
        Self::Relu(Relu)
    }

    pub fn leaky_relu() -> Self {
        Self::LeakyRelu(LeakyRelu)
    }

    /// Resolves an activation function by its registered name.
    ///
    /// # Arguments
    /// * `name` - One of `sigmoid`, `tanh`, `relu` or `leakyRelu`.
    ///
    /// # Returns
    /// The activation function or `MlErr::UnknownActFn` if the name isn't registered.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "sigmoid" => Ok(Self::sigmoid()),
            "tanh" => Ok(Self::tanh()),
            "relu" => Ok(Self::relu()),
            "leakyRelu" => Ok(Self::leaky_relu()),
            other => Err(MlErr::UnknownActFn(other.to_string())),
        }
    }

    /// Returns the name this activation function is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sigmoid(_) => "sigmoid",
            Self::Tanh(_) => "tanh",
            Self::Relu(_) => "relu",
            Self::LeakyRelu(_) => "leakyRelu",
        }
    }

    pub fn f(&self, z: f64) -> f64 {
        match self {
            Self::Sigmoid(a) => a.f(z),
            Self::Tanh(a) => a.f(z),
            Self::Relu(a) => a.f(z),
            Self::LeakyRelu(a) => a.f(z),
        }
    }

    /// Evaluates the derivative at the weighted sum `z`.
    pub fn df(&self, z: f64) -> f64 {
        match self {
            Self::Sigmoid(a) => a.df(z),
            Self::Tanh(a) => a.df(z),
            Self::Relu(a) => a.df(z),
            Self::LeakyRelu(a) => a.df(z),
        }
    }
}

impl Default for ActFn {
    fn default() -> Self {
        Self::sigmoid()
    }
}

impl FromStr for ActFn {
    type Err = MlErr;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for ActFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
