//! Load-time errors.
//!
//! Everything here is fatal: an instance that fails to load cannot be
//! scheduled. Per-candidate problems are never errors; they are reported as
//! [`Violation`](crate::evaluation::Violation)s inside a
//! [`Verdict`](crate::evaluation::Verdict).

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias for instance loading and construction.
pub type InstanceResult<T> = Result<T, InstanceError>;

/// Fatal error raised while reading or building an [`Instance`](crate::models::Instance).
#[derive(Error, Debug)]
pub enum InstanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("malformed instance: {}", summarize(.0))]
    MalformedInstance(Vec<ValidationError>),
    #[error("infeasible instance: precedence cycle through tasks {cycle:?}")]
    InfeasibleInstance { cycle: Vec<usize> },
}

impl InstanceError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Structural errors carried by a `MalformedInstance`, empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            InstanceError::MalformedInstance(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
