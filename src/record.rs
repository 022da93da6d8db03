use std::{fs, path::Path};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::{MlErr, Result, arch::Network, arch::activations::ActFn};

/// The persisted form of a `Network`, enough to rebuild it exactly.
///
/// `weights[t][j][k]` connects neuron `j` of layer `t` with neuron `k` of layer `t + 1` and
/// `biases[t][k]` belongs to neuron `k` of layer `t + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub layers: Vec<usize>,
    pub weights: Vec<Vec<Vec<f64>>>,
    pub biases: Vec<Vec<f64>>,
    pub activation: String,
    pub learning_rate: f64,
}

impl Network {
    /// Snapshots the network into a `NetworkRecord` owning copies of every parameter.
    pub fn to_record(&self) -> NetworkRecord {
        NetworkRecord {
            layers: self.layers().to_vec(),
            weights: self
                .weights()
                .iter()
                .map(|w| w.outer_iter().map(|row| row.to_vec()).collect())
                .collect(),
            biases: self.biases().iter().map(|b| b.to_vec()).collect(),
            activation: self.act_fn().name().to_string(),
            learning_rate: self.learning_rate(),
        }
    }

    /// Rebuilds a network out of a record, copying its values.
    ///
    /// # Returns
    /// The network or an error if the topology or learning rate are invalid
    /// (`MlErr::InvalidConfig`), the activation name is unknown (`MlErr::UnknownActFn`) or any
    /// weight matrix or bias vector doesn't fit the topology (`MlErr::MalformedRecord`).
    pub fn from_record(record: &NetworkRecord) -> Result<Self> {
        let act_fn = ActFn::from_name(&record.activation)?;

        let transitions = record.layers.len().saturating_sub(1);
        if record.weights.len() != transitions || record.biases.len() != transitions {
            // Let the topology checks speak first.
            if record.layers.len() >= 2 && record.layers.iter().all(|&size| size > 0) {
                return Err(MlErr::MalformedRecord(format!(
                    "expected {transitions} weight matrices and bias vectors, got {} and {}",
                    record.weights.len(),
                    record.biases.len()
                )));
            }
        }

        let mut weights = Vec::with_capacity(transitions);
        let mut biases = Vec::with_capacity(transitions);

        for (t, (rows, bias)) in record.weights.iter().zip(&record.biases).enumerate() {
            weights.push(matrix_from_rows(t, rows)?);
            biases.push(Array1::from_vec(bias.clone()));
        }

        Network::from_parts(
            record.layers.clone(),
            weights,
            biases,
            act_fn,
            record.learning_rate,
        )
    }

    /// Serializes the network into its JSON record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Same as `to_json`, indented for humans.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    /// Rebuilds a network from its JSON record, see `from_record`.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: NetworkRecord = serde_json::from_str(json)?;
        Self::from_record(&record)
    }

    /// Writes the network's JSON record into `path`, replacing whatever was there.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Reads a network back from a file written by `save`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

impl From<&Network> for NetworkRecord {
    fn from(network: &Network) -> Self {
        network.to_record()
    }
}

impl TryFrom<&NetworkRecord> for Network {
    type Error = MlErr;

    fn try_from(record: &NetworkRecord) -> Result<Self> {
        Network::from_record(record)
    }
}

/// Packs nested rows into a matrix, every row must have the same length.
fn matrix_from_rows(transition: usize, rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let cols = rows.first().map_or(0, Vec::len);

    if let Some(j) = rows.iter().position(|row| row.len() != cols) {
        return Err(MlErr::MalformedRecord(format!(
            "row {j} of the weights of transition {transition} has length {}, expected {cols}",
            rows[j].len()
        )));
    }

    let flat = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), cols), flat)
        .map_err(|e| MlErr::MalformedRecord(format!("transition {transition}: {e}")))
}
