//! # labractl
//!
//! Bootstraps and runs LabraGo projects.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` from the current directory, if any.
//! 2. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 3. Initialise the tracing subscriber (logging).
//! 4. Load configuration (defaults + file + env).
//! 5. Build the [`OutputManager`].
//! 6. Dispatch to the appropriate command handler.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | Required step failed / internal error    |
//! |  2   | User / input error                       |
//! |  4   | Configuration error                      |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::{Glyph, OutputManager},
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is the normal case.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, with a zero exit code.
            let code = e.exit_code();
            let _ = e.print();
            return ExitCode::from(u8::try_from(code).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        debug = cli.global.debug,
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.debug || cli.global.verbose > 0;
    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: Some(e.into()),
                },
                verbose,
                None,
            );
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let error_glyph = output.glyph(Glyph::Error);
    let colored = output.supports_color();

    match run(cli, config, output) {
        Ok(()) => {
            info!("labractl completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, colored.then_some(error_glyph)),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Create(args) => commands::create::execute(args, config, output),
        Commands::Start(args) => commands::start::execute(args, config, output),
        Commands::Version => commands::version::execute(&output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// `error_glyph` is `Some` when colour is allowed.
fn handle_error(err: CliError, verbose: bool, error_glyph: Option<&str>) -> ExitCode {
    err.log();

    let msg = match error_glyph {
        Some(glyph) if std::io::IsTerminal::is_terminal(&std::io::stderr()) => {
            err.format_colored(verbose, glyph)
        }
        _ => err.format_plain(verbose),
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}
