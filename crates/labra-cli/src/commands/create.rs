//! Implementation of the `labractl create` command.
//!
//! Responsibility: validate the name, wire the production adapters into the
//! project initializer and run it in the current directory.

use tracing::{debug, instrument};

use labra_adapters::{LocalFilesystem, PathLocator, PsqlClient, StdinPrompt, SystemRunner};
use labra_core::{
    application::{CreateOptions, ProjectInitializer},
    domain::{Platform, ProjectContext, ProjectName},
    error::LabraError,
};

use crate::{cli::CreateArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let name = ProjectName::parse(&args.name).map_err(LabraError::from)?;
    let workspace = std::env::current_dir()?;
    let ctx = ProjectContext::new(name, config.template.repository_url, workspace);

    let runner = SystemRunner::new();
    let locator = PathLocator::new();
    let prompt = StdinPrompt::new();
    let filesystem = LocalFilesystem::new();
    let database = PsqlClient::new(&runner, config.database.clone());

    let options = CreateOptions {
        auto_confirm: args.yes,
        package_manager: args.package_manager.map(Into::into),
        database: config.database,
    };

    let report = ProjectInitializer::new(
        &runner,
        &locator,
        &prompt,
        &filesystem,
        &database,
        &output,
        Platform::current(),
    )
    .create(&ctx, &options)?;

    debug!(?report, "create finished");
    Ok(())
}
