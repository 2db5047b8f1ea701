use crate::loss::mse::MseLoss;
use crate::memory::budget::MemoryBudget;
use crate::network::network::Network;

/// Runs one online pass over the dataset: for each sample, set the input,
/// forward, then take one backward step of size `step`.
///
/// Returns the mean squared error measured on each sample's forward pass,
/// before its update.
///
/// # Panics
/// Panics if `inputs` is empty, lengths mismatch, or the network rejects a
/// sample (see `Network::set_input` and `Network::backward`).
pub fn train_epoch(
    network: &mut Network,
    budget: &mut MemoryBudget,
    inputs: &[Vec<f32>],
    targets: &[Vec<f32>],
    step: f32,
) -> f32 {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(inputs.len(), targets.len(), "inputs and targets must have equal length");

    let mut total_loss = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        network.set_input(input);
        network.forward();
        total_loss += MseLoss::loss(network.output(), target);
        network.backward(budget, target, step);
    }
    total_loss / inputs.len() as f32
}

/// Mean squared error over the dataset without touching any parameter.
pub fn evaluate(network: &mut Network, inputs: &[Vec<f32>], targets: &[Vec<f32>]) -> f32 {
    if inputs.is_empty() {
        return 0.0;
    }
    let total: f32 = inputs.iter().zip(targets.iter())
        .map(|(input, target)| {
            network.set_input(input);
            network.forward();
            MseLoss::loss(network.output(), target)
        })
        .sum();
    total / inputs.len() as f32
}
