//! Error types for pulse construction, configuration, and output.

use thiserror::Error;

pub type PulseResult<T> = Result<T, PulseError>;

#[derive(Debug, Error)]
pub enum PulseError {
    /// A pulse parameter outside of its domain, e.g. a zero duration.
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("couldn't write npz: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),
}
