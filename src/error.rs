use serde::Serialize;
use thiserror::Error;

/// Unified error type for the dictdiff application.
///
/// This enum provides structured error information that can be
/// serialized to JSON for callers embedding the library in a server.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum AppError {
    #[error("Source error: {message}")]
    Source { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl AppError {
    /// Create a Source error
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    /// Create an Export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Create a Not Found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (user can retry or take action)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Retrieval and export failures may be transient
            Self::Source { .. } | Self::Export { .. } | Self::Io { .. } => true,
            // Revision genuinely doesn't exist; malformed input won't change
            Self::NotFound { .. } | Self::Parse { .. } => false,
        }
    }
}

impl From<crate::sources::file::SourceError> for AppError {
    fn from(err: crate::sources::file::SourceError) -> Self {
        use crate::sources::file::SourceError;
        match err {
            SourceError::Io(e) => AppError::io(e.to_string()),
            SourceError::Csv(e) => AppError::parse(format!("CSV: {e}")),
            SourceError::Json(e) => AppError::parse(format!("JSON: {e}")),
            SourceError::UnknownRevision { id } => AppError::not_found(format!("revision {id}")),
            SourceError::EmptySnapshot { path } => {
                AppError::parse(format!("snapshot has no header row: {path}"))
            }
        }
    }
}

impl From<crate::render::ExportError> for AppError {
    fn from(err: crate::render::ExportError) -> Self {
        use crate::render::ExportError;
        match err {
            ExportError::Io(e) => AppError::io(e.to_string()),
            ExportError::Csv(e) => AppError::export(format!("CSV: {e}")),
            ExportError::Xlsx(e) => AppError::export(format!("XLSX: {e}")),
            ExportError::NoChanges => {
                AppError::export("the data dictionaries are identical; nothing to export")
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::io(err.to_string())
    }
}

// Convert to String for callers that report errors as plain text
impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}
