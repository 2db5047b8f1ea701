use crate::memory::budget::MemoryBudget;
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

/// Trains `network` for `config.epochs` epochs and returns the mean loss of
/// the last completed epoch (0 when no epoch ran).
pub fn train_loop(
    network: &mut Network,
    budget: &mut MemoryBudget,
    inputs: &[Vec<f32>],
    targets: &[Vec<f32>],
    config: &TrainConfig,
) -> f32 {
    let mut last_loss = 0.0;
    for epoch in 1..=config.epochs {
        last_loss = train_epoch(network, budget, inputs, targets, config.learning_rate);
        if config.log_every > 0 && epoch % config.log_every == 0 {
            log::info!("epoch {epoch}/{}: loss = {last_loss:.6}", config.epochs);
        }
    }
    last_loss
}
