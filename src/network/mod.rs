pub mod network;
pub mod serial;
pub mod spec;

pub use network::{argmax, Network};
pub use serial::MODEL_MAGIC;
pub use spec::{Init, LayerSpec, NetworkSpec};
