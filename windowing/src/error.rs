use thiserror::Error;

/// Errors surfaced by the geometry index and its configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WindowError {
    /// The index is outside `[0, count)`.
    ///
    /// Placement lookups never clamp: a silently clamped index would place the wrong item.
    #[error("index {index} is out of range for {count} items")]
    OutOfRange { index: usize, count: usize },

    /// The configuration was rejected; the previous configuration stays in effect.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("estimated size must be finite and positive, got {0}")]
    EstimatedSize(f64),
    #[error("estimated expand size must be finite and positive, got {0}")]
    EstimatedExpandSize(f64),
}
