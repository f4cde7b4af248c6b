//! In-memory database server for testing.

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};

use labra_core::{
    application::{ApplicationError, ports::DatabaseClient},
    domain::ProjectName,
    error::LabraResult,
};

#[derive(Debug, Clone)]
pub struct MemoryDatabase {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    installed: bool,
    roles: BTreeSet<String>,
    databases: BTreeSet<String>,
    creates: usize,
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                installed: true,
                roles: BTreeSet::new(),
                databases: BTreeSet::new(),
                creates: 0,
            })),
        }
    }
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// A machine without PostgreSQL client tools.
    pub fn not_installed() -> Self {
        let db = Self::default();
        db.update(|inner| inner.installed = false);
        db
    }

    pub fn with_database(self, name: &str) -> Self {
        self.update(|inner| {
            inner.databases.insert(name.to_owned());
        });
        self
    }

    pub fn with_role(self, role: &str) -> Self {
        self.update(|inner| {
            inner.roles.insert(role.to_owned());
        });
        self
    }

    pub fn databases(&self) -> Vec<String> {
        self.read(|inner| inner.databases.iter().cloned().collect())
    }

    /// Number of successful `create_database` calls.
    pub fn creates(&self) -> usize {
        self.read(|inner| inner.creates)
    }

    fn update(&self, f: impl FnOnce(&mut Inner)) {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }

    fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> T {
        let guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    fn check_installed(&self) -> LabraResult<()> {
        if self.read(|inner| inner.installed) {
            Ok(())
        } else {
            Err(ApplicationError::CommandFailed {
                command: "psql --version".into(),
                reason: "could not be started: program not found".into(),
            }
            .into())
        }
    }
}

impl DatabaseClient for MemoryDatabase {
    fn client_version(&self) -> LabraResult<String> {
        self.check_installed()?;
        Ok("psql (PostgreSQL) 16.0".into())
    }

    fn create_superuser(&self, role: &str) -> LabraResult<()> {
        self.check_installed()?;
        let inserted = self.read(|inner| !inner.roles.contains(role));
        if !inserted {
            return Err(ApplicationError::CommandFailed {
                command: format!("createuser -s {role}"),
                reason: format!("role \"{role}\" already exists"),
            }
            .into());
        }
        self.update(|inner| {
            inner.roles.insert(role.to_owned());
        });
        Ok(())
    }

    fn database_exists(&self, name: &ProjectName) -> LabraResult<bool> {
        self.check_installed()?;
        Ok(self.read(|inner| inner.databases.contains(name.as_str())))
    }

    fn create_database(&self, name: &ProjectName) -> LabraResult<()> {
        self.check_installed()?;
        if self.read(|inner| inner.databases.contains(name.as_str())) {
            return Err(ApplicationError::DatabaseCreateFailed {
                database: name.to_string(),
                reason: format!("database \"{name}\" already exists"),
            }
            .into());
        }
        self.update(|inner| {
            inner.databases.insert(name.to_string());
            inner.creates += 1;
        });
        Ok(())
    }
}
