mod batch;
mod dataset;

pub use dataset::{Dataset, Sample};
