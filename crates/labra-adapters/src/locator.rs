//! Executable lookup on the search path.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use tracing::debug;

use labra_core::application::ports::{Location, ToolLocator};

/// Finds programs with `which`, then looks again for a non-executable file of
/// the same name so the user gets a precise reason.
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    /// Overrides `PATH` when set.
    search_path: Option<OsString>,
}

impl PathLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    fn search_path(&self) -> Option<OsString> {
        self.search_path.clone().or_else(|| env::var_os("PATH"))
    }

    fn find_non_executable(&self, program: &str) -> Option<PathBuf> {
        let paths = self.search_path()?;
        env::split_paths(&paths)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
    }
}

impl ToolLocator for PathLocator {
    fn locate(&self, program: &str) -> Location {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
                which::which_in(program, Some(paths), cwd)
            }
            None => which::which(program),
        };

        match found {
            Ok(path) => Location::Found(path),
            Err(e) => {
                debug!(program, error = %e, "not resolvable on PATH");
                match self.find_non_executable(program) {
                    Some(path) => Location::NotExecutable(path),
                    None => Location::NotFound,
                }
            }
        }
    }
}
