use crate::activation::activation::Activation;
use crate::layers::dense::Layer;
use crate::memory::budget::MemoryBudget;
use crate::optim::sgd::{Sgd, UpdateRule};

/// An ordered chain of fully-connected layers, head (input) first.
///
/// Every buffer is charged to the `MemoryBudget` passed to `append_layer`;
/// give the network back with `teardown` to return those bytes. Dropping a
/// network without tearing it down leaves its bytes charged.
#[derive(Debug, Default)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates an empty network. Nothing is allocated until the first append.
    pub fn new() -> Network {
        Network { layers: Vec::new() }
    }

    /// Appends a layer of `count` units at the tail and returns it.
    ///
    /// The weight matrix is sized from the current tail, which is fixed from
    /// now on. The first layer appended becomes the head and gets no weights.
    ///
    /// # Panics
    /// Panics if `count` is zero or the budget cannot hold the new buffers.
    pub fn append_layer(
        &mut self,
        budget: &mut MemoryBudget,
        count: usize,
        activation: Activation,
    ) -> &mut Layer {
        let index = self.layers.len();
        let prev = index.checked_sub(1);
        let prev_count = prev.map_or(0, |p| self.layers[p].count());

        let layer = Layer::new(budget, count, prev_count, activation, prev);
        if let Some(p) = prev {
            self.layers[p].link_next(index);
        }
        log::debug!(
            "appended layer {index}: {count} units, {activation:?}, {} weights",
            layer.wcount()
        );
        self.layers.push(layer);
        &mut self.layers[index]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn head(&self) -> Option<&Layer> {
        self.layers.first()
    }

    pub fn head_mut(&mut self) -> Option<&mut Layer> {
        self.layers.first_mut()
    }

    pub fn tail(&self) -> Option<&Layer> {
        self.layers.last()
    }

    pub fn tail_mut(&mut self) -> Option<&mut Layer> {
        self.layers.last_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Bytes currently held by all layers of this network.
    pub fn allocated_bytes(&self) -> usize {
        self.layers.iter().map(Layer::allocated_bytes).sum()
    }

    /// Copies `input` into the head layer's data.
    ///
    /// # Panics
    /// Panics if the network is empty or `input` does not match the head's
    /// unit count.
    pub fn set_input(&mut self, input: &[f32]) {
        let head = match self.layers.first_mut() {
            Some(head) => head,
            None => panic!("cannot set input on an empty network"),
        };
        assert_eq!(
            input.len(),
            head.count(),
            "input length must equal the head layer's unit count"
        );
        head.data.copy_from_slice(input);
    }

    /// Activations of the tail layer; empty for an empty network.
    pub fn output(&self) -> &[f32] {
        self.layers.last().map(Layer::data).unwrap_or(&[])
    }

    /// Propagates the head layer's data through every following layer.
    ///
    /// The head must already hold the input vector. Allocates nothing.
    ///
    /// # Panics
    /// Panics on a network with fewer than two layers.
    pub fn forward(&mut self) {
        assert!(
            self.layers.len() >= 2,
            "cannot complete forward pass on fewer than two layers"
        );

        for index in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(index);
            let prev = &done[index - 1];
            let curr = &mut rest[0];
            let count = curr.count();
            let activation = curr.activation();

            for i in 0..count {
                let mut sum = curr.bias[i];
                for (j, input) in prev.data.iter().enumerate() {
                    sum += input * curr.weights[j * count + i];
                }
                curr.data[i] = activation.function(sum);
            }
        }
    }

    /// One plain gradient-descent step towards `target` with rate `step`.
    pub fn backward(&mut self, budget: &mut MemoryBudget, target: &[f32], step: f32) {
        self.backward_with(budget, target, step, &Sgd);
    }

    /// One gradient step towards `target`, applying parameter changes with
    /// `rule`.
    ///
    /// Deltas are charged to `budget` for the duration of the call and
    /// released before it returns. The head layer is never written.
    ///
    /// # Panics
    /// Panics on a network with fewer than two layers, when `target` does not
    /// match the tail's unit count, or when the budget cannot hold the deltas.
    pub fn backward_with<U: UpdateRule + ?Sized>(
        &mut self,
        budget: &mut MemoryBudget,
        target: &[f32],
        step: f32,
        rule: &U,
    ) {
        let n = self.layers.len();
        assert!(n >= 2, "cannot complete backward pass on fewer than two layers");
        assert_eq!(
            target.len(),
            self.layers[n - 1].count(),
            "target length must equal the tail layer's unit count"
        );

        self.compute_deltas(budget, target);
        self.apply_deltas(step, rule);

        for layer in self.layers.iter_mut().rev() {
            if let Some(delta) = layer.delta.take() {
                budget.release(delta);
            }
        }
    }

    fn compute_deltas(&mut self, budget: &mut MemoryBudget, target: &[f32]) {
        let n = self.layers.len();

        for index in (1..n).rev() {
            let mut delta = budget.allocate(self.layers[index].count());
            let curr = &self.layers[index];
            let activation = curr.activation();

            if index == n - 1 {
                for (i, d) in delta.iter_mut().enumerate() {
                    let a = curr.data[i];
                    *d = (target[i] - a) * activation.derivative(a);
                }
            } else {
                let succ = &self.layers[index + 1];
                let succ_count = succ.count();
                let succ_delta = succ.delta.as_deref().unwrap_or(&[]);

                for (i, d) in delta.iter_mut().enumerate() {
                    let mut error = 0.0;
                    for (j, sd) in succ_delta.iter().enumerate() {
                        error += sd * succ.weights[i * succ_count + j];
                    }
                    *d = error * activation.derivative(curr.data[i]);
                }
            }

            self.layers[index].delta = Some(delta);
        }
    }

    fn apply_deltas<U: UpdateRule + ?Sized>(&mut self, step: f32, rule: &U) {
        for index in (1..self.layers.len()).rev() {
            let (done, rest) = self.layers.split_at_mut(index);
            let prev = &done[index - 1];
            let curr = &mut rest[0];
            let count = curr.count();

            let delta = match curr.delta.as_ref() {
                Some(delta) => delta,
                None => continue,
            };
            for i in 0..count {
                rule.apply(&mut curr.bias[i], delta[i], step);
                for (j, input) in prev.data.iter().enumerate() {
                    rule.apply(&mut curr.weights[j * count + i], input * delta[i], step);
                }
            }
        }
    }

    /// Sets `input`, runs a forward pass and returns the index of the
    /// strongest output unit.
    pub fn predict(&mut self, input: &[f32]) -> usize {
        self.set_input(input);
        self.forward();
        argmax(self.output())
    }

    /// Releases every layer's buffers, tail first, head last.
    pub fn teardown(mut self, budget: &mut MemoryBudget) {
        let n = self.layers.len();
        while let Some(layer) = self.layers.pop() {
            layer.release(budget);
        }
        log::debug!("tore down {n} layers ({} bytes still in use)", budget.cur_alloc());
    }
}

/// Index of the largest value; the first one wins ties.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
