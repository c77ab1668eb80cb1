use thiserror::Error;

/// Top-level error type used across the overlay crates.
///
/// The sampling and aggregation paths never fail; these variants cover the
/// outer surfaces (configuration, the redraw task, I/O).
#[derive(Debug, Error)]
pub enum FpsError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config: {field}: {reason}")]
    InvalidConfig {
        field:  &'static str,
        reason: String,
    },

    #[error("redraw error: {0}")]
    Redraw(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = FpsError> = std::result::Result<T, E>;
