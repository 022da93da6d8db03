use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{MlErr, Result};

/// A single labeled training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl Sample {
    pub fn new(inputs: Vec<f64>, targets: Vec<f64>) -> Self {
        Self { inputs, targets }
    }
}

impl From<(Vec<f64>, Vec<f64>)> for Sample {
    fn from((inputs, targets): (Vec<f64>, Vec<f64>)) -> Self {
        Self::new(inputs, targets)
    }
}

/// An ordered collection of samples.
///
/// Shuffling never reorders the samples themselves, it only produces a permutation of their
/// indices for a single epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `samples` - The samples, in their canonical order.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Checks that every sample fits a network with the given input and output sizes.
    ///
    /// # Returns
    /// The first mismatch found, as an `InputSizeMismatch` or `TargetSizeMismatch` error.
    pub fn validate(&self, input_size: usize, output_size: usize) -> Result<()> {
        for sample in &self.samples {
            if sample.inputs.len() != input_size {
                return Err(MlErr::InputSizeMismatch {
                    got: sample.inputs.len(),
                    expected: input_size,
                });
            }

            if sample.targets.len() != output_size {
                return Err(MlErr::TargetSizeMismatch {
                    got: sample.targets.len(),
                    expected: output_size,
                });
            }
        }

        Ok(())
    }

    /// The order in which the samples are visited during one epoch.
    ///
    /// # Arguments
    /// * `shuffle` - Whether to randomly permute the canonical order.
    /// * `rng` - A random number generator, only consumed when shuffling.
    pub fn order<R: Rng + ?Sized>(&self, shuffle: bool, rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.samples.len()).collect();

        if shuffle {
            order.shuffle(rng);
        }

        order
    }
}

impl From<Vec<Sample>> for Dataset {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl From<Vec<(Vec<f64>, Vec<f64>)>> for Dataset {
    fn from(pairs: Vec<(Vec<f64>, Vec<f64>)>) -> Self {
        pairs.into_iter().map(Sample::from).collect()
    }
}

impl FromIterator<Sample> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
