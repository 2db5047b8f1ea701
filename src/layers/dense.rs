use rand::Rng;

use crate::activation::activation::Activation;
use crate::memory::budget::{bytes_for, MemoryBudget};

/// One fully-connected layer of a `Network`.
///
/// `weights` is row-major by predecessor unit: the connection from unit `j`
/// of the previous layer to unit `i` of this one lives at
/// `weights[j * count + i]`. The head layer has no predecessor and an empty
/// weight buffer.
#[derive(Debug)]
pub struct Layer {
    count: usize,
    activation: Activation,
    pub(crate) data: Vec<f32>,
    pub(crate) bias: Vec<f32>,
    pub(crate) weights: Vec<f32>,
    // Only present while a backward step is running.
    pub(crate) delta: Option<Vec<f32>>,
    prev: Option<usize>,
    next: Option<usize>,
}

impl Layer {
    /// Allocates the buffers of a layer fed by `prev_count` units.
    pub(crate) fn new(
        budget: &mut MemoryBudget,
        count: usize,
        prev_count: usize,
        activation: Activation,
        prev: Option<usize>,
    ) -> Layer {
        assert!(count > 0, "layer must have at least one unit");
        Layer {
            count,
            activation,
            data: budget.allocate(count),
            bias: budget.allocate(count),
            weights: budget.allocate(count * prev_count),
            delta: None,
            prev,
            next: None,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn bias(&self) -> &[f32] {
        &self.bias
    }

    pub fn bias_mut(&mut self) -> &mut [f32] {
        &mut self.bias
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    /// Number of incoming weights (`count * predecessor count`).
    pub fn wcount(&self) -> usize {
        self.weights.len()
    }

    /// Index of the predecessor in the owning network.
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    /// Index of the successor in the owning network.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub(crate) fn link_next(&mut self, next: usize) {
        self.next = Some(next);
    }

    /// Bytes this layer currently holds against its budget.
    pub fn allocated_bytes(&self) -> usize {
        let delta = self.delta.as_ref().map_or(0, |d| d.len());
        bytes_for(self.data.len() + self.bias.len() + self.weights.len() + delta)
    }

    /// Fills `data` and `weights` (and `bias` when `include_bias` is set)
    /// with independent samples from [0, 1).
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, include_bias: bool) -> &mut Layer {
        if include_bias {
            self.bias.iter_mut().for_each(|b| *b = rng.gen::<f32>());
        }
        self.data.iter_mut().for_each(|d| *d = rng.gen::<f32>());
        self.weights.iter_mut().for_each(|w| *w = rng.gen::<f32>());
        self
    }

    /// Hands every buffer back to the budget.
    pub(crate) fn release(self, budget: &mut MemoryBudget) {
        if let Some(delta) = self.delta {
            budget.release(delta);
        }
        budget.release(self.weights);
        budget.release(self.bias);
        budget.release(self.data);
    }
}
