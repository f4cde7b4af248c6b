//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use labra_core::domain::PackageManager;

pub mod global;
pub use global::GlobalArgs;

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "labractl",
    bin_name = "labractl",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "CLI for bootstrapping LabraGo projects",
    long_about = "labractl clones the LabraGo template, prepares its backend and \
                  frontend, provisions a local PostgreSQL database and starts \
                  both services for development.",
    after_help = "EXAMPLES:\n\
        \x20 labractl create my-app\n\
        \x20 labractl create my-app --yes --package-manager npm\n\
        \x20 cd my-app && labractl start",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new LabraGo project.
    #[command(
        about = "Create a new LabraGo project",
        after_help = "EXAMPLES:\n\
            \x20 labractl create my-app\n\
            \x20 labractl create my-app -y\n\
            \x20 labractl create my-app --package-manager npm"
    )]
    Create(CreateArgs),

    /// Start backend and frontend together.
    #[command(
        about = "Start the LabraGo project in the current directory",
        after_help = "EXAMPLES:\n\
            \x20 labractl start\n\
            \x20 labractl start --package-manager npm"
    )]
    Start(StartArgs),

    /// Print the labractl version.
    #[command(about = "Print labractl version")]
    Version,
}

/// Arguments for `labractl create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Directory and database name for the new project.
    #[arg(value_name = "PROJECT_NAME", help = "Name of the project to create")]
    pub name: String,

    /// Answer yes to every install prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Install missing tools without asking and use the default package manager"
    )]
    pub yes: bool,

    #[arg(
        long = "package-manager",
        value_name = "PM",
        value_enum,
        help = "Frontend package manager (skips the prompt)"
    )]
    pub package_manager: Option<PackageManagerArg>,
}

/// Arguments for `labractl start`.
#[derive(Debug, Args)]
pub struct StartArgs {
    #[arg(
        long = "package-manager",
        value_name = "PM",
        value_enum,
        help = "Package manager used to run the scripts [default: yarn]"
    )]
    pub package_manager: Option<PackageManagerArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManagerArg {
    Npm,
    Yarn,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => Self::Npm,
            PackageManagerArg::Yarn => Self::Yarn,
        }
    }
}
