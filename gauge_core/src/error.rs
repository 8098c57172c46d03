use thiserror::Error;

/// Errors raised by the gauge runtime and the nodes built on it
#[derive(Debug, Error)]
pub enum GaugeError {
    /// Invalid or missing configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Voltage bounds that cannot produce a meaningful percentage
    #[error("invalid voltage bounds: max_voltage ({max}) must be greater than min_voltage ({min})")]
    InvalidBounds { min: f32, max: f32 },

    /// Topic creation or message delivery failed
    #[error("communication error: {0}")]
    Communication(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GaugeError {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        GaugeError::Config(msg.into())
    }

    /// Shorthand for a communication error
    pub fn communication(msg: impl Into<String>) -> Self {
        GaugeError::Communication(msg.into())
    }
}

pub type GaugeResult<T> = Result<T, GaugeError>;
