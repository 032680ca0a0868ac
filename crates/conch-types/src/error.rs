//! Error types for conch.

use std::io;

/// The closed set of failure kinds recognized by the engine.
///
/// Kinds are plain values: cheap to construct, copy, and compare. Every kind
/// has a fixed rendering via [`ErrorKind::as_str`]; `Unknown` is the
/// documented fallback and is never produced by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operation completed successfully.
    Success,
    /// A required value was absent or empty.
    MissingValue,
    /// Malformed or wrong-count arguments to a command.
    InvalidArgs,
    /// The first token did not resolve in the registry.
    CommandNotFound,
    /// A resource could not be obtained.
    AllocFailure,
    /// Registration name collision.
    DuplicateCommand,
    /// Structurally invalid command definition.
    MalformedCommand,
    /// The input or output stream faulted.
    Io,
    /// Fallback for unrecognized kinds.
    Unknown,
}

impl ErrorKind {
    /// Fixed human-readable rendering of this kind. Total over the taxonomy.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Success => "success",
            ErrorKind::MissingValue => "missing required value",
            ErrorKind::InvalidArgs => "invalid arguments",
            ErrorKind::CommandNotFound => "command not found",
            ErrorKind::AllocFailure => "allocation failure",
            ErrorKind::DuplicateCommand => "command already exists",
            ErrorKind::MalformedCommand => "invalid command definition",
            ErrorKind::Io => "I/O error",
            ErrorKind::Unknown => "unknown error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the conch engine and its hosts.
#[derive(Debug, thiserror::Error)]
pub enum ConchError {
    #[error("missing required value: {0}")]
    MissingValue(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("command already exists: {0}")]
    DuplicateCommand(String),

    #[error("invalid command definition: {0}")]
    MalformedCommand(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ConchError {
    /// The taxonomy kind this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConchError::MissingValue(_) => ErrorKind::MissingValue,
            ConchError::InvalidArgs(_) => ErrorKind::InvalidArgs,
            ConchError::CommandNotFound(_) => ErrorKind::CommandNotFound,
            ConchError::DuplicateCommand(_) => ErrorKind::DuplicateCommand,
            ConchError::MalformedCommand(_) => ErrorKind::MalformedCommand,
            ConchError::Config(_) => ErrorKind::MalformedCommand,
            ConchError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_display() {
        let e = ConchError::MissingValue("prompt".into());
        assert_eq!(format!("{e}"), "missing required value: prompt");
    }

    #[test]
    fn invalid_args_display() {
        let e = ConchError::InvalidArgs("expected 2, got 0".into());
        assert_eq!(format!("{e}"), "invalid arguments: expected 2, got 0");
    }

    #[test]
    fn command_not_found_display() {
        let e = ConchError::CommandNotFound("frobnicate".into());
        assert_eq!(format!("{e}"), "command not found: frobnicate");
    }

    #[test]
    fn duplicate_command_display() {
        let e = ConchError::DuplicateCommand("echo".into());
        assert_eq!(format!("{e}"), "command already exists: echo");
    }

    #[test]
    fn config_error_display() {
        let e = ConchError::Config("accounts.toml: missing field".into());
        assert_eq!(format!("{e}"), "config error: accounts.toml: missing field");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "gone");
        let e: ConchError = io_err.into();
        assert_eq!(e.kind(), ErrorKind::Io);
        assert!(format!("{e}").starts_with("I/O error:"));
    }

    #[test]
    fn kind_projection() {
        assert_eq!(
            ConchError::MissingValue(String::new()).kind(),
            ErrorKind::MissingValue
        );
        assert_eq!(
            ConchError::CommandNotFound(String::new()).kind(),
            ErrorKind::CommandNotFound
        );
        assert_eq!(
            ConchError::DuplicateCommand(String::new()).kind(),
            ErrorKind::DuplicateCommand
        );
    }

    #[test]
    fn kind_rendering_is_total() {
        let kinds = [
            ErrorKind::Success,
            ErrorKind::MissingValue,
            ErrorKind::InvalidArgs,
            ErrorKind::CommandNotFound,
            ErrorKind::AllocFailure,
            ErrorKind::DuplicateCommand,
            ErrorKind::MalformedCommand,
            ErrorKind::Io,
            ErrorKind::Unknown,
        ];
        for kind in kinds {
            assert!(!kind.as_str().is_empty());
        }
    }

    #[test]
    fn kind_is_cheap_to_compare() {
        assert_eq!(ErrorKind::Success, ErrorKind::Success);
        assert_ne!(ErrorKind::Io, ErrorKind::Unknown);
    }
}
