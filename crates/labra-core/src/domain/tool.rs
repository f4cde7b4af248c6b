//! The fixed set of external tools a LabraGo project needs.

use std::fmt;
use std::path::PathBuf;

use crate::domain::command::CommandSpec;

/// A required external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Source-control client.
    Git,
    /// Go toolchain; the backend's language runtime.
    Go,
    /// JavaScript runtime for the admin frontend.
    Node,
    /// PostgreSQL client.
    Psql,
}

impl Tool {
    /// Checked in this order on every `create`.
    pub const REQUIRED: [Tool; 4] = [Tool::Git, Tool::Go, Tool::Node, Tool::Psql];

    pub const fn requirement(self) -> ToolRequirement {
        match self {
            Self::Git => ToolRequirement {
                tool: self,
                program: "git",
                version_args: &["--version"],
                package: "git",
            },
            Self::Go => ToolRequirement {
                tool: self,
                program: "go",
                version_args: &["version"],
                package: "golang",
            },
            Self::Node => ToolRequirement {
                tool: self,
                program: "node",
                version_args: &["--version"],
                package: "node",
            },
            Self::Psql => ToolRequirement {
                tool: self,
                program: "psql",
                version_args: &["--version"],
                package: "postgresql",
            },
        }
    }

    /// The language runtime gets the stricter detection path.
    pub const fn is_runtime(self) -> bool {
        matches!(self, Self::Go)
    }

    /// Substring the runtime's version report must contain.
    pub const fn version_marker(self) -> Option<&'static str> {
        match self {
            Self::Go => Some("go version"),
            _ => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.requirement().program)
    }
}

/// How to detect a tool and what to install when it is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolRequirement {
    pub tool: Tool,
    pub program: &'static str,
    pub version_args: &'static [&'static str],
    /// Package name handed to the platform package manager.
    pub package: &'static str,
}

impl ToolRequirement {
    pub fn version_command(&self) -> CommandSpec {
        CommandSpec::new(self.program).args(self.version_args.iter().copied())
    }
}

/// Outcome of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Detected,
    Missing(MissingReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    NotOnPath,
    NotExecutable(PathBuf),
    VersionCheckFailed,
    UnexpectedVersionOutput(String),
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOnPath => f.write_str("not found on PATH"),
            Self::NotExecutable(path) => write!(f, "{} is not executable", path.display()),
            Self::VersionCheckFailed => f.write_str("version check failed"),
            Self::UnexpectedVersionOutput(out) => {
                write!(f, "unexpected version output: {}", out.trim())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_go_is_the_runtime() {
        let runtimes: Vec<_> = Tool::REQUIRED.iter().filter(|t| t.is_runtime()).collect();
        assert_eq!(runtimes, vec![&Tool::Go]);
    }

    #[test]
    fn go_uses_its_version_subcommand() {
        let cmd = Tool::Go.requirement().version_command();
        assert_eq!(cmd.command_line(), "go version");
        assert_eq!(Tool::Go.version_marker(), Some("go version"));
    }

    #[test]
    fn install_packages_match_platform_names() {
        assert_eq!(Tool::Go.requirement().package, "golang");
        assert_eq!(Tool::Psql.requirement().package, "postgresql");
    }
}
