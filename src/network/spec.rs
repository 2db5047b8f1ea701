use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::error::Result;
use crate::memory::budget::MemoryBudget;
use crate::network::network::Network;

/// Which buffers `Network::from_spec` randomizes after appending a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Init {
    /// Leave every buffer zeroed (typical for the input layer).
    #[default]
    None,
    /// Randomize data and weights, keep biases at zero.
    Weights,
    /// Randomize data, weights and biases.
    WeightsAndBias,
}

/// Describes one layer in a network specification.
///
/// The weight count is not stored: it follows from this layer's `count` and
/// the previous entry's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub count: usize,
    pub activation: Activation,
    #[serde(default)]
    pub init: Init,
}

impl LayerSpec {
    pub fn new(count: usize, activation: Activation, init: Init) -> LayerSpec {
        LayerSpec { count, activation, init }
    }
}

/// A serializable network architecture, head first.
///
/// Kept separate from the binary model file so an architecture can be
/// stored and edited as JSON before anything is trained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Bytes the described network will hold once built, deltas excluded.
    pub fn required_bytes(&self) -> usize {
        let mut prev = 0;
        let mut floats = 0;
        for layer in &self.layers {
            floats += 2 * layer.count + layer.count * prev;
            prev = layer.count;
        }
        crate::memory::budget::bytes_for(floats)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Network {
    /// Appends every layer of `spec` in order, randomizing as each entry asks.
    pub fn from_spec<R: Rng + ?Sized>(
        budget: &mut MemoryBudget,
        spec: &NetworkSpec,
        rng: &mut R,
    ) -> Network {
        let mut network = Network::new();
        for layer_spec in &spec.layers {
            let layer = network.append_layer(budget, layer_spec.count, layer_spec.activation);
            match layer_spec.init {
                Init::None => {}
                Init::Weights => {
                    layer.randomize(rng, false);
                }
                Init::WeightsAndBias => {
                    layer.randomize(rng, true);
                }
            }
        }
        log::debug!("built '{}' ({} layers)", spec.name, network.len());
        network
    }
}
