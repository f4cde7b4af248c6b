//! Operating-system families and how to install packages on them.

use std::fmt;

use crate::domain::command::CommandSpec;

/// Operating system the CLI is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other(String),
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Accepts Rust's `std::env::consts::OS` values plus `darwin`.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" | "darwin" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Primary system package manager, if labractl knows one.
    pub fn package_manager(&self) -> Option<SystemPackageManager> {
        match self {
            Self::MacOs => Some(SystemPackageManager::Homebrew),
            Self::Linux => Some(SystemPackageManager::Apt),
            Self::Windows => Some(SystemPackageManager::Chocolatey),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => f.write_str("macos"),
            Self::Linux => f.write_str("linux"),
            Self::Windows => f.write_str("windows"),
            Self::Other(os) => f.write_str(os),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPackageManager {
    Homebrew,
    /// Needs root, so runs under `sudo`.
    Apt,
    /// Not shipped with Windows; only used when already installed.
    Chocolatey,
}

impl SystemPackageManager {
    pub fn install_command(self, package: &str) -> CommandSpec {
        match self {
            Self::Homebrew => CommandSpec::new("brew").args(["install", package]),
            Self::Apt => CommandSpec::new("sudo").args(["apt", "install", "-y", package]),
            Self::Chocolatey => CommandSpec::new("choco").args(["install", package, "-y"]),
        }
    }

    pub fn must_be_present(self) -> bool {
        matches!(self, Self::Chocolatey)
    }

    pub fn presence_check(self) -> CommandSpec {
        match self {
            Self::Homebrew => CommandSpec::new("brew").arg("--version"),
            Self::Apt => CommandSpec::new("apt").arg("--version"),
            Self::Chocolatey => CommandSpec::new("choco").arg("--version"),
        }
    }
}

/// Resolved install invocation for one tool on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPlan {
    Command(CommandSpec),
    Unsupported,
}
