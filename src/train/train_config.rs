/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — full passes over the training set
/// - `learning_rate` — `step` handed to every `Network::backward` call
/// - `log_every`     — emit an `info!` line every this many epochs; 0 disables
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f32,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize, learning_rate: f32) -> Self {
        TrainConfig { epochs, learning_rate, log_every: 0 }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig { epochs: 10_000, learning_rate: 0.5, log_every: 1000 }
    }
}
