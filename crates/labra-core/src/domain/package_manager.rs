//! JavaScript package managers labractl can drive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::command::CommandSpec;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    #[default]
    Yarn,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    /// Interpret a free-form prompt answer. Only `npm` (any case, surrounding
    /// whitespace ignored) selects npm; everything else falls back to yarn.
    pub fn from_choice(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case("npm") {
            Self::Npm
        } else {
            Self::Yarn
        }
    }

    pub fn install(self) -> CommandSpec {
        CommandSpec::new(self.as_str()).arg("install")
    }

    pub fn init(self) -> CommandSpec {
        CommandSpec::new(self.as_str()).args(["init", "-y"])
    }

    pub fn add_dev_dependency(self, dependency: &str) -> CommandSpec {
        match self {
            Self::Npm => CommandSpec::new("npm").args(["install", dependency, "--save-dev"]),
            Self::Yarn => CommandSpec::new("yarn").args(["add", dependency, "--dev"]),
        }
    }

    /// Exits successfully when `dependency` is installed.
    pub fn dependency_query(self, dependency: &str) -> CommandSpec {
        match self {
            Self::Npm => CommandSpec::new("npm").args(["ls", dependency]),
            Self::Yarn => CommandSpec::new("yarn").args(["list", "--pattern", dependency]),
        }
    }

    pub fn run_script(self, script: &str) -> CommandSpec {
        match self {
            Self::Npm => CommandSpec::new("npm").args(["run", script]),
            Self::Yarn => CommandSpec::new("yarn").arg(script),
        }
    }

    /// `run_script` as a shell string, for embedding in manifest scripts.
    pub fn script_invocation(self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            Self::Yarn => format!("yarn {script}"),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            other => Err(DomainError::UnknownPackageManager(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npm_answers_select_npm() {
        for answer in ["npm", "NPM", " npm ", "Npm\n"] {
            assert_eq!(PackageManager::from_choice(answer), PackageManager::Npm);
        }
    }

    #[test]
    fn anything_else_selects_yarn() {
        for answer in ["", "yarn", "pnpm", "n", "npm please"] {
            assert_eq!(PackageManager::from_choice(answer), PackageManager::Yarn);
        }
    }

    #[test]
    fn strict_parse_rejects_unknown_names() {
        assert_eq!("Yarn".parse::<PackageManager>(), Ok(PackageManager::Yarn));
        assert!("pnpm".parse::<PackageManager>().is_err());
    }

    #[test]
    fn dev_dependency_flags_differ_per_manager() {
        assert_eq!(
            PackageManager::Yarn
                .add_dev_dependency("concurrently")
                .command_line(),
            "yarn add concurrently --dev"
        );
        assert_eq!(
            PackageManager::Npm
                .add_dev_dependency("concurrently")
                .command_line(),
            "npm install concurrently --save-dev"
        );
    }

    #[test]
    fn scripts_run_through_the_manager() {
        assert_eq!(PackageManager::Yarn.run_script("start").command_line(), "yarn start");
        assert_eq!(PackageManager::Npm.run_script("start").command_line(), "npm run start");
        assert_eq!(PackageManager::Npm.script_invocation("dev"), "npm run dev");
    }
}
