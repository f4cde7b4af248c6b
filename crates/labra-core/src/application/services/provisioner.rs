//! Database Provisioner - idempotently establish the role and database.
//!
//! Order: client reachable, then best-effort superuser role, then existence
//! check, then create only if missing. Running it again after a success is a
//! no-op.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{DatabaseClient, Reporter},
    },
    domain::{DatabaseSettings, ProjectName},
    error::LabraResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

pub struct DatabaseProvisioner<'a> {
    client: &'a dyn DatabaseClient,
    reporter: &'a dyn Reporter,
    settings: &'a DatabaseSettings,
}

impl<'a> DatabaseProvisioner<'a> {
    pub fn new(
        client: &'a dyn DatabaseClient,
        reporter: &'a dyn Reporter,
        settings: &'a DatabaseSettings,
    ) -> Self {
        Self {
            client,
            reporter,
            settings,
        }
    }

    #[instrument(skip(self), fields(database = %name))]
    pub fn provision(&self, name: &ProjectName) -> LabraResult<Provisioned> {
        self.reporter.step("Checking PostgreSQL...");

        let version = self
            .client
            .client_version()
            .map_err(|e| ApplicationError::DatabaseClientMissing {
                reason: e.to_string(),
            })?;
        debug!(%version, "database client reachable");

        // The role usually exists already; any failure here is expected.
        if let Err(e) = self.client.create_superuser(&self.settings.superuser_role) {
            debug!(role = %self.settings.superuser_role, error = %e, "create role skipped");
        }

        if self.client.database_exists(name)? {
            info!("database already exists");
            self.reporter
                .success(&format!("PostgreSQL DB exists: {name}"));
            return Ok(Provisioned::AlreadyExists);
        }

        self.client.create_database(name)?;
        info!("database created");
        self.reporter
            .success(&format!("PostgreSQL database created: {name}"));
        Ok(Provisioned::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockDatabaseClient, MockReporter};
    use crate::error::LabraError;

    fn reporter() -> MockReporter {
        let mut reporter = MockReporter::new();
        reporter.expect_step().return_const(());
        reporter.expect_success().return_const(());
        reporter
    }

    fn demo() -> ProjectName {
        ProjectName::parse("demo").unwrap()
    }

    fn reachable() -> MockDatabaseClient {
        let mut client = MockDatabaseClient::new();
        client
            .expect_client_version()
            .returning(|| Ok("psql (PostgreSQL) 16.3".into()));
        client
    }

    #[test]
    fn missing_client_fails_with_install_hints() {
        let mut client = MockDatabaseClient::new();
        client.expect_client_version().returning(|| {
            Err(ApplicationError::CommandFailed {
                command: "psql --version".into(),
                reason: "failed to start".into(),
            }
            .into())
        });
        client.expect_database_exists().never();
        let reporter = reporter();
        let settings = DatabaseSettings::default();

        let err = DatabaseProvisioner::new(&client, &reporter, &settings)
            .provision(&demo())
            .unwrap_err();
        assert!(matches!(
            err,
            LabraError::Application(ApplicationError::DatabaseClientMissing { .. })
        ));
        assert!(err.suggestions().iter().any(|s| s.contains("brew install postgresql")));
    }

    #[test]
    fn role_failure_is_ignored() {
        let mut client = reachable();
        client.expect_create_superuser().returning(|_| {
            Err(ApplicationError::CommandFailed {
                command: "createuser -s postgres".into(),
                reason: "exited with status 1".into(),
            }
            .into())
        });
        client.expect_database_exists().returning(|_| Ok(false));
        client.expect_create_database().times(1).returning(|_| Ok(()));
        let reporter = reporter();
        let settings = DatabaseSettings::default();

        let result = DatabaseProvisioner::new(&client, &reporter, &settings).provision(&demo());
        assert_eq!(result.unwrap(), Provisioned::Created);
    }

    #[test]
    fn existing_database_is_left_alone() {
        let mut client = reachable();
        client.expect_create_superuser().returning(|_| Ok(()));
        client.expect_database_exists().returning(|_| Ok(true));
        client.expect_create_database().never();
        let reporter = reporter();
        let settings = DatabaseSettings::default();

        let result = DatabaseProvisioner::new(&client, &reporter, &settings).provision(&demo());
        assert_eq!(result.unwrap(), Provisioned::AlreadyExists);
    }

    #[test]
    fn query_failure_aborts_before_create() {
        let mut client = reachable();
        client.expect_create_superuser().returning(|_| Ok(()));
        client.expect_database_exists().returning(|name| {
            Err(ApplicationError::DatabaseQueryFailed {
                database: name.to_string(),
                output: "password authentication failed".into(),
            }
            .into())
        });
        client.expect_create_database().never();
        let reporter = reporter();
        let settings = DatabaseSettings::default();

        let err = DatabaseProvisioner::new(&client, &reporter, &settings)
            .provision(&demo())
            .unwrap_err();
        assert!(err.to_string().contains("password authentication failed"));
    }

    #[test]
    fn create_failure_propagates() {
        let mut client = reachable();
        client.expect_create_superuser().returning(|_| Ok(()));
        client.expect_database_exists().returning(|_| Ok(false));
        client.expect_create_database().returning(|name| {
            Err(ApplicationError::DatabaseCreateFailed {
                database: name.to_string(),
                reason: "permission denied".into(),
            }
            .into())
        });
        let reporter = reporter();
        let settings = DatabaseSettings::default();

        assert!(DatabaseProvisioner::new(&client, &reporter, &settings)
            .provision(&demo())
            .is_err());
    }
}
