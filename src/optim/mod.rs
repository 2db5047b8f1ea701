pub mod sgd;

pub use sgd::{Sgd, UpdateRule};
