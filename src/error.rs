use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum MlErr {
    /// The topology, learning rate or some other construction parameter is invalid.
    InvalidConfig(String),
    /// The given name doesn't resolve to any known activation function.
    UnknownActFn(String),
    InputSizeMismatch {
        got: usize,
        expected: usize,
    },
    TargetSizeMismatch {
        got: usize,
        expected: usize,
    },
    /// A training step produced a non finite error, weight or bias.
    NumericDivergence,
    EmptyDataset,
    /// A serialized record whose weights or biases don't fit its own topology.
    MalformedRecord(String),
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Json(serde_json::Error),
    Io(io::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            MlErr::UnknownActFn(name) => write!(f, "unknown activation function: {name}"),
            MlErr::InputSizeMismatch { got, expected } => write!(
                f,
                "input size {got} does not match network input layer size {expected}"
            ),
            MlErr::TargetSizeMismatch { got, expected } => write!(
                f,
                "target size {got} does not match network output layer size {expected}"
            ),
            MlErr::NumericDivergence => {
                f.write_str("training diverged, the network holds non finite values")
            }
            MlErr::EmptyDataset => f.write_str("the dataset has no samples"),
            MlErr::MalformedRecord(msg) => write!(f, "malformed network record: {msg}"),
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch for {what}: got {got}, expected {expected}"),
            MlErr::Json(e) => write!(f, "json error: {e}"),
            MlErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Json(e) => Some(e),
            MlErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MlErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<io::Error> for MlErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
