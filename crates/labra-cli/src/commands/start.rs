//! Implementation of the `labractl start` command.

use tracing::instrument;

use labra_adapters::{LocalFilesystem, SystemRunner};
use labra_core::application::{LaunchOptions, ServiceLauncher};

use crate::{cli::StartArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Run in a project root. Blocks until the services exit.
#[instrument(skip_all)]
pub fn execute(args: StartArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = std::env::current_dir()?;
    let options = LaunchOptions {
        package_manager: args
            .package_manager
            .map(Into::into)
            .unwrap_or(config.launcher.package_manager),
    };

    let runner = SystemRunner::new();
    let filesystem = LocalFilesystem::new();
    ServiceLauncher::new(&runner, &filesystem, &output, root).launch(&options)?;
    Ok(())
}
