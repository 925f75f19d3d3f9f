use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    NotFound,
    WrongType,
    Empty,
    NotEmpty,
    PermissionDenied,
    MalformedJson,
    UsercacheIncomplete,
    MissingLookupKey,
    MissingField,
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Classifies an I/O failure on `path` by its `io::ErrorKind`.
    pub fn from_io(err: &io::Error, what: &str, path: &Path) -> Self {
        let code = match err.kind() {
            io::ErrorKind::NotFound => CoreErrorCode::NotFound,
            io::ErrorKind::PermissionDenied => CoreErrorCode::PermissionDenied,
            _ => CoreErrorCode::Io,
        };
        Self::new(code, format!("{what} {}: {err}", path.display()))
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(CoreErrorCode::MalformedJson, err.to_string())
    }
}
