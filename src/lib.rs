pub mod arch;
pub mod config;
pub mod datasets;
pub mod error;
pub mod init;
pub mod optimization;
pub mod record;
pub mod report;
pub mod training;

pub use arch::{ForwardPass, Network, activations::ActFn};
pub use config::{NetworkConfig, TrainConfig, generate_rng};
pub use error::{MlErr, Result};
pub use record::NetworkRecord;
pub use training::{Dataset, Sample};
