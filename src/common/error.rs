use thiserror::Error;

/// Failures raised by a ledger backend (the host runtime's state and event primitives).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Read failed for key {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("Write failed for key {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("Range query failed: {0}")]
    Query(String),

    #[error("Invalid composite key: {0}")]
    InvalidKey(String),

    #[error("Event emission failed: {0}")]
    Event(String),
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Backend error: {0}")]
    Backend(#[source] LedgerError),

    #[error("Corrupt state: {reason}")]
    CorruptState { reason: String },

    #[error("Unknown operation: {function}")]
    UnknownOperation { function: String },

    #[error("Path committed but notification failed: {0}")]
    NotificationFailed(#[source] LedgerError),
}

impl RegistryError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        RegistryError::MalformedInput { reason: reason.into() }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        RegistryError::CorruptState { reason: reason.into() }
    }

    /// Short tag for the failure class, stable across message wording changes.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::MalformedInput { .. } => "MalformedInput",
            RegistryError::NotFound { .. } => "NotFound",
            RegistryError::Backend(_) => "BackendError",
            RegistryError::CorruptState { .. } => "CorruptState",
            RegistryError::UnknownOperation { .. } => "UnknownOperation",
            RegistryError::NotificationFailed(_) => "NotificationFailed",
        }
    }
}

impl From<LedgerError> for RegistryError {
    fn from(e: LedgerError) -> Self {
        RegistryError::Backend(e)
    }
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
pub type LedgerResult<T> = Result<T, LedgerError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
