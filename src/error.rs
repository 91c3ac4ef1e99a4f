use std::fmt;

/// Failure of a write, remove or snapshot I/O against the blob store.
///
/// Reads never produce one: a value that cannot be parsed degrades to an
/// empty collection instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
    Serde(String),
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "blob store lock poisoned during {}", operation)
            }
            StoreError::Serde(message) => write!(f, "serialization error: {}", message),
            StoreError::Io(message) => write!(f, "blob store I/O error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// A required field was left empty when creating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField {
        record: &'static str,
        field: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField { record, field } => {
                write!(f, "{} requires a non-empty {}", record, field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Error returned by the feature services (commands, circuits, notes, guide).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    Validation(ValidationError),
    Store(StoreError),
    /// The record exists but may not be modified (e.g. a builtin guide entry).
    ReadOnly { key: &'static str, id: String },
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::Validation(err) => write!(f, "validation error: {}", err),
            FeatureError::Store(err) => write!(f, "store error: {}", err),
            FeatureError::ReadOnly { key, id } => {
                write!(f, "record {} in {} is read-only", id, key)
            }
        }
    }
}

impl std::error::Error for FeatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeatureError::Validation(err) => Some(err),
            FeatureError::Store(err) => Some(err),
            FeatureError::ReadOnly { .. } => None,
        }
    }
}

impl From<ValidationError> for FeatureError {
    fn from(err: ValidationError) -> Self {
        FeatureError::Validation(err)
    }
}

impl From<StoreError> for FeatureError {
    fn from(err: StoreError) -> Self {
        FeatureError::Store(err)
    }
}

/// The static default-data document could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    Io(String),
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io(message) => write!(f, "failed to read default data: {}", message),
            SourceError::Parse(message) => write!(f, "invalid default data: {}", message),
        }
    }
}

impl std::error::Error for SourceError {}
