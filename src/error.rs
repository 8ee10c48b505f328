use crate::monitor::MonitorState;

/// Error type for rdt-metrics operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Monitoring capability not detected")]
    CapabilityMissing,

    #[error("Resource allocation failed: {0}")]
    Resource(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Poll failed: {0}")]
    Poll(String),

    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: MonitorState,
    },
}

impl Error {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    pub(crate) fn invalid_state(operation: &'static str, state: MonitorState) -> Self {
        Error::InvalidState { operation, state }
    }

    /// Provider implementations report allocation failures with this.
    pub fn resource(msg: impl Into<String>) -> Self {
        Error::Resource(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Error::Provider(msg.into())
    }

    pub fn poll(msg: impl Into<String>) -> Self {
        Error::Poll(msg.into())
    }
}

/// Result type for rdt-metrics operations
pub type Result<T> = std::result::Result<T, Error>;
