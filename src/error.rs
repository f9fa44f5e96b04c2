// Error types

use std::path::PathBuf;

use thiserror::Error;

use crate::ast::Target;

/// Errors that can occur while parsing or validating a token document
#[derive(Debug, Clone, Error)]
#[error("Parse error{}: {message}", at(.location))]
pub struct ParseError {
    pub message: String,
    pub location: Option<String>,
}

fn at(location: &Option<String>) -> String {
    match location {
        Some(loc) => format!(" at {}", loc),
        None => String::new(),
    }
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Some(location.into()),
        }
    }
}

/// Errors that can occur while emitting an artifact
#[derive(Debug, Clone, Error)]
#[error("Emit error: {message}")]
pub struct EmitError {
    pub message: String,
}

impl EmitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Which side of the pipeline an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Document missing, unreadable, malformed, or not convertible
    Input,
    /// Destination could not be created or written
    Output,
}

/// Top-level generator errors
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{target}: {source}")]
    Emit { target: Target, source: EmitError },

    /// The generator's registry has no emitter for the requested target
    #[error("Unsupported target: {0}")]
    UnsupportedTarget(Target),

    #[error("Cannot create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::Read { .. }
            | GenerateError::Parse(_)
            | GenerateError::Emit { .. }
            | GenerateError::UnsupportedTarget(_) => ErrorKind::Input,
            GenerateError::CreateDir { .. } | GenerateError::Write { .. } => ErrorKind::Output,
        }
    }
}

// Convert serde_json syntax errors to our ParseError
impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        let location = format!("line {}, column {}", err.line(), err.column());
        // serde_json appends " at line L column C" to its message
        let message = err.to_string();
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        ParseError::with_location(message, location)
    }
}
