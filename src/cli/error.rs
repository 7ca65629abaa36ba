//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Manifest { .. } => crate::exitcode::DATAERR,
                ApplicationError::NoRoot(_) => crate::exitcode::USAGE,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
                ApplicationError::Domain(DomainError::Lookup { .. }) => {
                    crate::exitcode::UNAVAILABLE
                }
                ApplicationError::Domain(
                    DomainError::CycleDetected { .. } | DomainError::DepthExceeded { .. },
                ) => crate::exitcode::DATAERR,
                ApplicationError::Domain(DomainError::Internal(_)) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
