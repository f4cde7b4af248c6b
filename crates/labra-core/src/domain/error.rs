use thiserror::Error;

use crate::domain::project::MAX_NAME_LEN;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be carried inside step reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid task manifest: {reason}")]
    InvalidManifest { reason: String },

    #[error("Unknown package manager '{0}'")]
    UnknownPackageManager(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "The name is used as a directory name and as a PostgreSQL database name".into(),
                "Start with a letter; use letters, digits, '-' and '_' only".into(),
                format!("Keep it at most {MAX_NAME_LEN} characters"),
                "Examples: blog, my-shop, crm_2024".into(),
            ],
            Self::InvalidManifest { .. } => vec![
                "package.json must be a JSON object".into(),
                "Every entry under \"scripts\" must be a string".into(),
                "Fix the file by hand or remove it to let labractl recreate it".into(),
            ],
            Self::UnknownPackageManager(_) => vec!["Supported package managers: npm, yarn".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::UnknownPackageManager(_) => {
                ErrorCategory::Validation
            }
            Self::InvalidManifest { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
