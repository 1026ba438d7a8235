use std::fmt;

// === HistoryError ===

/// Errors related to search history operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// No history entry exists for the given name.
    NotFound(String),
    /// The history store could not be read or written.
    StoreUnavailable(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(name) => write!(f, "History entry not found: {}", name),
            HistoryError::StoreUnavailable(msg) => {
                write!(f, "History store unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

// === PositionError ===

/// Errors related to persisting the last map position.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionError {
    /// The position store could not be read or written.
    StoreUnavailable(String),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::StoreUnavailable(msg) => {
                write!(f, "Position store unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for PositionError {}

// === SearchError ===

/// Errors raised by a location search provider.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The provider call itself failed (transport, HTTP status, timeout).
    ProviderFailure(String),
    /// The provider answered, but the payload could not be understood.
    MalformedResponse(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::ProviderFailure(msg) => write!(f, "Search provider failure: {}", msg),
            SearchError::MalformedResponse(msg) => {
                write!(f, "Malformed search response: {}", msg)
            }
        }
    }
}

impl std::error::Error for SearchError {}

// === SettingsError ===

/// Errors related to settings persistence.
#[derive(Debug)]
pub enum SettingsError {
    /// File system I/O error.
    IoError(String),
    /// JSON serialization or deserialization error.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === Diagnostics ===

/// Category of a failure caught at a coordinator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StoreUnavailable,
    SearchProviderFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::StoreUnavailable => write!(f, "store_unavailable"),
            ErrorKind::SearchProviderFailure => write!(f, "search_provider_failure"),
        }
    }
}

/// A failure that was absorbed by a coordinator and handed to the
/// error-reporting channel instead of being returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    /// Short name of the operation that failed, e.g. `"save_last_position"`.
    pub context: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, context: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.context, self.message)
    }
}
