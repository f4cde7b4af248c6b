//! Error handling for the labractl CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use labra_core::error::{ErrorCategory as CoreCategory, LabraError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration file or variable could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `labra-core`.
    #[error(transparent)]
    Core(#[from] LabraError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Environment overrides use LABRA_<SECTION>__<KEY>, e.g. LABRA_DATABASE__PORT"
                    .into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check that the current directory still exists and is readable".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::External => ErrorCategory::External,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Configuration |  4   |
    /// | External      |  1   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Configuration => 4,
            ErrorCategory::External | ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool, error_glyph: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            error_glyph.red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "->".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{}\n",
                "Use --debug or -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse --debug or -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::External => tracing::error!("Step failed: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    Configuration,
    /// A required external step (git, file write, package install) failed.
    External,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use labra_core::{application::ApplicationError, domain::ProjectName, error::StepContext};

    use super::*;

    fn invalid_name() -> CliError {
        let err = ProjectName::parse("9lives").unwrap_err();
        CliError::Core(err.into())
    }

    #[test]
    fn invalid_name_is_a_user_error() {
        let err = invalid_name();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("Invalid project name '9lives'"));
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn project_exists_fails_the_clone_step() {
        let err = CliError::Core(
            ApplicationError::ProjectExists {
                path: PathBuf::from("/tmp/demo"),
            }
            .into(),
        );
        assert_eq!(err.category(), ErrorCategory::External);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn failed_required_step_exits_with_one() {
        let failed: Result<(), ApplicationError> = Err(ApplicationError::CommandFailed {
            command: "git clone x demo".into(),
            reason: "exited with status 128".into(),
        });
        let err = CliError::Core(failed.step("Git clone").unwrap_err());
        assert_eq!(err.category(), ErrorCategory::External);
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().starts_with("Git clone failed"));
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::from(io::Error::other("e")).exit_code(),
            1
        );
    }

    #[test]
    fn format_plain_contains_error_header() {
        let s = invalid_name().format_plain(false);
        assert!(s.contains("Error: Invalid project name"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let s = invalid_name().format_plain(true);
        assert!(!s.contains("--verbose"));
    }
}
