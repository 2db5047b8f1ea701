pub mod memory;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod error;

// Convenience re-exports
pub use memory::budget::MemoryBudget;
pub use activation::activation::Activation;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::spec::{Init, LayerSpec, NetworkSpec};
pub use loss::mse::MseLoss;
pub use optim::sgd::{Sgd, UpdateRule};
pub use train::{train_loop, TrainConfig};
pub use error::{ModelError, Result};
