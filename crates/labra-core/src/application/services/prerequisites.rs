//! Prerequisite Checker - detect required tools and offer to install them.
//!
//! Never fails: every outcome is recorded and the caller carries on.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{Location, ProcessRunner, Prompt, Reporter, ToolLocator},
        services::installer::ToolInstaller,
    },
    domain::{Detection, MissingReason, Platform, Tool},
};

/// What happened to one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Present,
    /// Missing, and the user said no to installing it.
    Declined(MissingReason),
    Installed,
    InstallFailed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrerequisiteReport {
    pub outcomes: Vec<(Tool, ToolOutcome)>,
}

impl PrerequisiteReport {
    pub fn outcome(&self, tool: Tool) -> Option<&ToolOutcome> {
        self.outcomes
            .iter()
            .find(|(t, _)| *t == tool)
            .map(|(_, outcome)| outcome)
    }

    pub fn all_present(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, o)| matches!(o, ToolOutcome::Present | ToolOutcome::Installed))
    }
}

pub struct PrerequisiteChecker<'a> {
    runner: &'a dyn ProcessRunner,
    locator: &'a dyn ToolLocator,
    prompt: &'a dyn Prompt,
    reporter: &'a dyn Reporter,
    installer: ToolInstaller<'a>,
    auto_confirm: bool,
}

impl<'a> PrerequisiteChecker<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        locator: &'a dyn ToolLocator,
        prompt: &'a dyn Prompt,
        reporter: &'a dyn Reporter,
        platform: Platform,
        auto_confirm: bool,
    ) -> Self {
        Self {
            runner,
            locator,
            prompt,
            reporter,
            installer: ToolInstaller::new(runner, reporter, platform),
            auto_confirm,
        }
    }

    /// Probe a single tool.
    ///
    /// The runtime must be on `PATH`, be executable, and report a version
    /// containing its marker. Other tools only need a working version report.
    pub fn detect(&self, tool: Tool) -> Detection {
        let requirement = tool.requirement();

        if !tool.is_runtime() {
            return if self.runner.probe(&requirement.version_command()) {
                Detection::Detected
            } else {
                Detection::Missing(MissingReason::VersionCheckFailed)
            };
        }

        match self.locator.locate(requirement.program) {
            Location::NotFound => return Detection::Missing(MissingReason::NotOnPath),
            Location::NotExecutable(path) => {
                return Detection::Missing(MissingReason::NotExecutable(path));
            }
            Location::Found(path) => debug!(%tool, path = %path.display(), "located"),
        }

        match self.runner.output(&requirement.version_command()) {
            Ok(out) if !out.success => Detection::Missing(MissingReason::VersionCheckFailed),
            Ok(out) => match tool.version_marker() {
                Some(marker) if !out.output.contains(marker) => {
                    Detection::Missing(MissingReason::UnexpectedVersionOutput(out.output))
                }
                _ => Detection::Detected,
            },
            Err(e) => {
                debug!(%tool, error = %e, "version check could not run");
                Detection::Missing(MissingReason::VersionCheckFailed)
            }
        }
    }

    /// Check every tool in order, offering to install the missing ones.
    #[instrument(skip_all, fields(auto_confirm = self.auto_confirm))]
    pub fn run(&self, tools: &[Tool]) -> PrerequisiteReport {
        let mut report = PrerequisiteReport::default();

        for &tool in tools {
            let outcome = match self.detect(tool) {
                Detection::Detected => {
                    debug!(%tool, "detected");
                    ToolOutcome::Present
                }
                Detection::Missing(reason) => self.handle_missing(tool, reason),
            };
            report.outcomes.push((tool, outcome));
        }

        report
    }

    fn handle_missing(&self, tool: Tool, reason: MissingReason) -> ToolOutcome {
        warn!(%tool, %reason, "tool missing");
        self.reporter.warning(&format!(
            "{tool} is not detected ({reason}). You may encounter issues if it's not available at runtime."
        ));

        if !self.auto_confirm && !self.confirm_install(tool) {
            info!(%tool, "install declined");
            return ToolOutcome::Declined(reason);
        }

        match self.installer.install(tool) {
            Ok(()) => {
                self.reporter
                    .success(&format!("{tool} installed successfully"));
                ToolOutcome::Installed
            }
            Err(e) => {
                self.reporter
                    .warning(&format!("Failed to install {tool}: {e}"));
                ToolOutcome::InstallFailed(e.to_string())
            }
        }
    }

    fn confirm_install(&self, tool: Tool) -> bool {
        let answer = self
            .prompt
            .read_line(&format!("Do you want to attempt installing {tool} now? (y/N): "));
        matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
