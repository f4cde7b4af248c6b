//! Unified error handling for labra-core.
//!
//! Wraps domain and application errors behind one type, with suggestions the
//! CLI can print next to the message.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for labra-core operations.
#[derive(Debug, Error, Clone)]
pub enum LabraError {
    /// Invalid input or data (project name, manifest contents).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An external process, file, or database step failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A named pipeline step failed.
    #[error("{step} failed: {cause}")]
    Step {
        step: &'static str,
        cause: Box<LabraError>,
    },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl LabraError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Step { cause, .. } => cause.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in labractl".into(),
                "Please report this issue at: https://github.com/GoLabra/labractl/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Step { cause, .. } => cause.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The innermost error, skipping step labels.
    pub fn root_cause(&self) -> &LabraError {
        match self {
            Self::Step { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input; nothing was executed.
    Validation,
    /// An external tool or service failed.
    External,
    Internal,
}

/// Convenient result type alias.
pub type LabraResult<T> = Result<T, LabraError>;

/// Extension trait labelling a failure with the pipeline step it came from.
pub trait StepContext<T> {
    fn step(self, step: &'static str) -> LabraResult<T>;
}

impl<T, E> StepContext<T> for Result<T, E>
where
    E: Into<LabraError>,
{
    fn step(self, step: &'static str) -> LabraResult<T> {
        self.map_err(|e| LabraError::Step {
            step,
            cause: Box::new(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_label_prefixes_the_cause() {
        let result: Result<(), ApplicationError> = Err(ApplicationError::CommandFailed {
            command: "git clone x demo".into(),
            reason: "exited with status 128".into(),
        });
        let err = result.step("Git clone").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Git clone failed: `git clone x demo` exited with status 128"
        );
        assert_eq!(err.category(), ErrorCategory::External);
        assert!(matches!(err.root_cause(), LabraError::Application(_)));
    }

    #[test]
    fn validation_errors_keep_their_category() {
        let err: LabraError = DomainError::InvalidProjectName {
            name: "1x".into(),
            reason: "name must start with a letter".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
