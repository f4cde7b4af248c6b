//! Project identity and the paths derived from it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Upstream skeleton every new project is cloned from.
pub const TEMPLATE_REPOSITORY: &str = "https://github.com/GoLabra/labra";

/// PostgreSQL truncates identifiers longer than this.
pub const MAX_NAME_LEN: usize = 63;

/// A project name that is safe to use as a directory name, a Go module
/// fragment and a PostgreSQL database identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: raw.into(),
            reason: reason.into(),
        };

        let mut chars = raw.chars();
        let Some(first) = chars.next() else {
            return Err(invalid("name cannot be empty"));
        };
        if raw.len() > MAX_NAME_LEN {
            return Err(invalid(&format!(
                "name is longer than {MAX_NAME_LEN} characters"
            )));
        }
        if !first.is_ascii_alphabetic() {
            return Err(invalid("name must start with a letter"));
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_')) {
            return Err(invalid(&format!("character '{bad}' is not allowed")));
        }

        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Everything the bootstrap pipeline needs to know about one project.
///
/// Immutable once built. `workspace` is the directory the project is cloned
/// into; it should be absolute so `ENT_SCHEMA_PATH` comes out absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    name: ProjectName,
    repository_url: String,
    workspace: PathBuf,
    root: PathBuf,
}

impl ProjectContext {
    pub fn new(
        name: ProjectName,
        repository_url: impl Into<String>,
        workspace: impl AsRef<Path>,
    ) -> Self {
        let workspace = workspace.as_ref().to_path_buf();
        let root = workspace.join(name.as_str());
        Self {
            name,
            repository_url: repository_url.into(),
            workspace,
            root,
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Go backend (`src/app`).
    pub fn backend_dir(&self) -> PathBuf {
        self.root.join("src").join("app")
    }

    /// Next.js admin frontend (`src/admin`).
    pub fn frontend_dir(&self) -> PathBuf {
        self.root.join("src").join("admin")
    }

    pub fn module_file(&self) -> PathBuf {
        self.backend_dir().join("go.mod")
    }

    pub fn schema_dir(&self) -> PathBuf {
        self.backend_dir().join("ent").join("schema")
    }

    pub fn backend_env_file(&self) -> PathBuf {
        self.backend_dir().join(".env")
    }

    pub fn frontend_env_file(&self) -> PathBuf {
        self.frontend_dir().join(".env")
    }

    pub fn frontend_manifest(&self) -> PathBuf {
        self.frontend_dir().join("package.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_pass() {
        for name in ["demo", "my-shop", "crm_2024", "A"] {
            assert!(ProjectName::parse(name).is_ok(), "failed for: {name}");
        }
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            ProjectName::parse(""),
            Err(DomainError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn name_must_start_with_letter() {
        assert!(ProjectName::parse("1demo").is_err());
        assert!(ProjectName::parse("-demo").is_err());
        assert!(ProjectName::parse(".hidden").is_err());
    }

    #[test]
    fn separators_and_quotes_are_rejected() {
        for name in ["a/b", "a\\b", "a b", "a'b", "a;drop"] {
            assert!(ProjectName::parse(name).is_err(), "accepted: {name}");
        }
    }

    #[test]
    fn overlong_name_is_rejected() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(ProjectName::parse(&name).is_err());
        assert!(ProjectName::parse(&"a".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn context_paths_hang_off_the_project_root() {
        let ctx = ProjectContext::new(
            ProjectName::parse("demo").unwrap(),
            TEMPLATE_REPOSITORY,
            "/work",
        );
        assert_eq!(ctx.root(), Path::new("/work/demo"));
        assert_eq!(ctx.module_file(), PathBuf::from("/work/demo/src/app/go.mod"));
        assert_eq!(
            ctx.schema_dir(),
            PathBuf::from("/work/demo/src/app/ent/schema")
        );
        assert_eq!(
            ctx.frontend_manifest(),
            PathBuf::from("/work/demo/src/admin/package.json")
        );
    }
}
