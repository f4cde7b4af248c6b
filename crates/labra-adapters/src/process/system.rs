//! Runs commands as real child processes.

use std::process::{Command, Stdio as ChildStdio};

use tracing::{debug, instrument};

use labra_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::{CommandOutput, CommandSpec, Stdio},
    error::LabraResult,
};

/// Production runner backed by `std::process`.
///
/// On Windows every command goes through `cmd /C` so that `.cmd` shims such
/// as `yarn` and `npm` resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(&self, spec: &CommandSpec) -> Command {
        let mut command = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(spec.program());
            c
        } else {
            Command::new(spec.program())
        };
        command.args(spec.arguments());
        if let Some(dir) = spec.dir() {
            command.current_dir(dir);
        }
        for (key, value) in spec.envs() {
            command.env(key, value);
        }
        command
    }
}

fn spawn_failed(spec: &CommandSpec, e: std::io::Error) -> ApplicationError {
    ApplicationError::CommandFailed {
        command: spec.command_line(),
        reason: format!("could not be started: {e}"),
    }
}

impl ProcessRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %spec))]
    fn run(&self, spec: &CommandSpec) -> LabraResult<()> {
        let mut command = self.command(spec);
        command
            .stdout(ChildStdio::inherit())
            .stderr(ChildStdio::inherit());
        match spec.stdio() {
            Stdio::Interactive => command.stdin(ChildStdio::inherit()),
            Stdio::Inherit => command.stdin(ChildStdio::null()),
        };

        let status = command.status().map_err(|e| spawn_failed(spec, e))?;
        debug!(%status, "command finished");
        if status.success() {
            return Ok(());
        }
        let reason = match status.code() {
            Some(code) => format!("exited with status {code}"),
            None => "was terminated by a signal".to_owned(),
        };
        Err(ApplicationError::CommandFailed {
            command: spec.command_line(),
            reason,
        }
        .into())
    }

    #[instrument(skip_all, fields(command = %spec))]
    fn output(&self, spec: &CommandSpec) -> LabraResult<CommandOutput> {
        let out = self
            .command(spec)
            .stdin(ChildStdio::null())
            .output()
            .map_err(|e| spawn_failed(spec, e))?;

        let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&out.stderr));
        debug!(status = %out.status, bytes = text.len(), "output captured");

        Ok(if out.status.success() {
            CommandOutput::success(text)
        } else {
            CommandOutput::failure(out.status.code().unwrap_or(-1), text)
        })
    }

    fn probe(&self, spec: &CommandSpec) -> bool {
        self.command(spec)
            .stdin(ChildStdio::null())
            .stdout(ChildStdio::null())
            .stderr(ChildStdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }
}
