// ============================================================================
// reframe-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses the core error type so a failure keeps its stage tag all
// the way to the final `Error:` line.

use reframe_core::{CoreError, CoreResult};

use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Adds a description to errors raised by the CLI itself.
pub trait CliErrorContext<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{context}: {core_error}"))
        })
    }
}

impl<T> CliErrorContext<T> for Option<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.ok_or_else(|| CoreError::OperationFailed(context.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_errors_get_context() {
        let result: Result<(), io::Error> = Err(io::Error::other("closed"));
        let err = result.cli_context("Failed to read path").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation failed: Failed to read path: I/O error: closed"
        );
    }

    #[test]
    fn none_becomes_error() {
        let err = None::<u8>.cli_context("No path entered").unwrap_err();
        assert!(matches!(err, CoreError::OperationFailed(ref m) if m == "No path entered"));
    }
}
