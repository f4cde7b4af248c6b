//! Tool Installer - platform package manager dispatch.

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ProcessRunner, Reporter},
    },
    domain::{InstallPlan, Platform, Tool},
    error::LabraResult,
};

/// Installs a required tool through the platform's package manager.
pub struct ToolInstaller<'a> {
    runner: &'a dyn ProcessRunner,
    reporter: &'a dyn Reporter,
    platform: Platform,
}

impl<'a> ToolInstaller<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, reporter: &'a dyn Reporter, platform: Platform) -> Self {
        Self {
            runner,
            reporter,
            platform,
        }
    }

    /// Resolve the concrete install invocation for `tool`.
    ///
    /// Package managers that do not ship with the OS are only used when they
    /// answer a version check.
    pub fn plan(&self, tool: Tool) -> InstallPlan {
        let Some(manager) = self.platform.package_manager() else {
            return InstallPlan::Unsupported;
        };
        if manager.must_be_present() && !self.runner.probe(&manager.presence_check()) {
            debug!(?manager, "package manager not present");
            return InstallPlan::Unsupported;
        }
        InstallPlan::Command(manager.install_command(tool.requirement().package))
    }

    #[instrument(skip(self), fields(platform = %self.platform))]
    pub fn install(&self, tool: Tool) -> LabraResult<()> {
        self.reporter
            .step(&format!("Installing {tool} on {}...", self.platform));

        match self.plan(tool) {
            InstallPlan::Command(command) => self.runner.run(&command),
            InstallPlan::Unsupported => Err(ApplicationError::InstallUnsupported {
                tool: tool.to_string(),
                platform: self.platform.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockProcessRunner, MockReporter};
    use crate::error::LabraError;

    fn quiet_reporter() -> MockReporter {
        let mut reporter = MockReporter::new();
        reporter.expect_step().return_const(());
        reporter
    }

    #[test]
    fn linux_installs_with_sudo_apt() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|cmd| cmd.command_line() == "sudo apt install -y golang")
            .times(1)
            .returning(|_| Ok(()));
        let reporter = quiet_reporter();

        let installer = ToolInstaller::new(&runner, &reporter, Platform::Linux);
        assert!(installer.install(Tool::Go).is_ok());
    }

    #[test]
    fn macos_installs_with_brew() {
        let runner = MockProcessRunner::new();
        let reporter = quiet_reporter();
        let installer = ToolInstaller::new(&runner, &reporter, Platform::MacOs);

        let InstallPlan::Command(cmd) = installer.plan(Tool::Psql) else {
            panic!("expected a command");
        };
        assert_eq!(cmd.command_line(), "brew install postgresql");
    }

    #[test]
    fn windows_without_chocolatey_is_unsupported() {
        let mut runner = MockProcessRunner::new();
        runner.expect_probe().return_const(false);
        runner.expect_run().never();
        let reporter = quiet_reporter();

        let installer = ToolInstaller::new(&runner, &reporter, Platform::Windows);
        let err = installer.install(Tool::Git).unwrap_err();
        assert!(matches!(
            err,
            LabraError::Application(ApplicationError::InstallUnsupported { .. })
        ));
    }

    #[test]
    fn windows_with_chocolatey_installs() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_probe()
            .withf(|cmd| cmd.command_line() == "choco --version")
            .return_const(true);
        let reporter = quiet_reporter();

        let installer = ToolInstaller::new(&runner, &reporter, Platform::Windows);
        assert_eq!(
            installer.plan(Tool::Git),
            InstallPlan::Command(crate::domain::CommandSpec::new("choco").args([
                "install", "git", "-y"
            ]))
        );
    }

    #[test]
    fn unknown_platform_is_unsupported() {
        let runner = MockProcessRunner::new();
        let reporter = quiet_reporter();
        let installer = ToolInstaller::new(&runner, &reporter, Platform::from_os("haiku"));
        assert_eq!(installer.plan(Tool::Node), InstallPlan::Unsupported);
    }

    #[test]
    fn failed_install_propagates() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|cmd| {
            Err(ApplicationError::CommandFailed {
                command: cmd.command_line(),
                reason: "exited with status 100".into(),
            }
            .into())
        });
        let reporter = quiet_reporter();

        let installer = ToolInstaller::new(&runner, &reporter, Platform::Linux);
        assert!(installer.install(Tool::Node).is_err());
    }
}
