//! Description of an external process invocation.
//!
//! Pure data: the application layer builds these, a `ProcessRunner` adapter
//! executes them.

use std::fmt;
use std::path::{Path, PathBuf};

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stdio {
    /// stdout/stderr go straight to the user's terminal.
    #[default]
    Inherit,
    /// stdin is connected too; used for long-running, user-terminated children.
    Interactive,
}

/// A program, its arguments, and where to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    stdio: Stdio,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: None,
            env: Vec::new(),
            stdio: Stdio::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Working directory; `None` (the default) means the current directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Extra environment variable, added on top of the inherited environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn interactive(mut self) -> Self {
        self.stdio = Stdio::Interactive;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn envs(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn stdio(&self) -> Stdio {
        self.stdio
    }

    /// The command line as a user would type it. Environment values are not
    /// shown since they may carry credentials.
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Result of a captured invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// stdout followed by stderr.
    pub output: String,
}

impl CommandOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            output: output.into(),
        }
    }

    pub fn failure(code: i32, output: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            output: output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_quotes_arguments_with_spaces() {
        let cmd = CommandSpec::new("psql").args(["-tAc", "SELECT 1"]);
        assert_eq!(cmd.command_line(), "psql -tAc \"SELECT 1\"");
    }

    #[test]
    fn env_is_not_part_of_the_command_line() {
        let cmd = CommandSpec::new("createdb")
            .arg("demo")
            .env("PGPASSWORD", "postgres");
        assert_eq!(cmd.command_line(), "createdb demo");
        assert_eq!(cmd.envs(), &[("PGPASSWORD".into(), "postgres".into())]);
    }

    #[test]
    fn defaults_to_current_dir_and_inherited_stdio() {
        let cmd = CommandSpec::new("git");
        assert!(cmd.dir().is_none());
        assert_eq!(cmd.stdio(), Stdio::Inherit);
        assert_eq!(cmd.interactive().stdio(), Stdio::Interactive);
    }
}
