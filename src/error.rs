use thiserror::Error;

/// Result type for model persistence.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Recoverable failures while saving or loading a model.
///
/// Budget exhaustion and structural misuse are not represented here; those
/// abort with a panic.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The file could not be opened, read or written (includes truncation).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a model file: magic {found:#010x}")]
    BadMagic { found: u32 },

    #[error("unknown activation ordinal {0}")]
    UnknownActivation(i32),

    #[error("invalid layer count {0}")]
    InvalidLayerCount(i32),

    #[error("invalid unit count {0}")]
    InvalidUnitCount(i32),

    /// Loading appends after the head, so the target must start empty.
    #[error("cannot load into a network that already has {layers} layers")]
    NotEmpty { layers: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
