//! PostgreSQL through its command-line clients.
//!
//! `psql` and `createdb` are run with `-U <user>` and the password in
//! `PGPASSWORD`. `createuser` connects as the OS user, since it runs on
//! servers where the configured role does not exist yet. All of them use the
//! server's default host and port.

use tracing::{debug, instrument};

use labra_core::{
    application::{
        ApplicationError,
        ports::{DatabaseClient, ProcessRunner},
    },
    domain::{CommandSpec, DatabaseSettings, PASSWORD_ENV, ProjectName},
    error::LabraResult,
};

pub struct PsqlClient<'a> {
    runner: &'a dyn ProcessRunner,
    settings: DatabaseSettings,
}

impl<'a> PsqlClient<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, settings: DatabaseSettings) -> Self {
        Self { runner, settings }
    }

    fn client(&self, program: &str) -> CommandSpec {
        CommandSpec::new(program)
            .args(["-U", self.settings.user.as_str()])
            .env(PASSWORD_ENV, self.settings.password.as_str())
    }
}

/// `psql -tA` prints one `1` per matching row and nothing otherwise.
fn has_row(output: &str) -> bool {
    output.lines().any(|line| line.trim() == "1")
}

impl DatabaseClient for PsqlClient<'_> {
    fn client_version(&self) -> LabraResult<String> {
        let out = self.runner.output(&CommandSpec::new("psql").arg("--version"))?;
        if !out.success {
            return Err(ApplicationError::CommandFailed {
                command: "psql --version".into(),
                reason: out.output.trim().to_owned(),
            }
            .into());
        }
        Ok(out.output.trim().to_owned())
    }

    fn create_superuser(&self, role: &str) -> LabraResult<()> {
        let command = CommandSpec::new("createuser").args(["-s", role]);
        let out = self.runner.output(&command)?;
        if out.success {
            Ok(())
        } else {
            Err(ApplicationError::CommandFailed {
                command: command.command_line(),
                reason: out.output.trim().to_owned(),
            }
            .into())
        }
    }

    #[instrument(skip(self), fields(database = %name))]
    fn database_exists(&self, name: &ProjectName) -> LabraResult<bool> {
        // Names are validated to [A-Za-z0-9_-], so quoting is safe here.
        let query = format!("SELECT 1 FROM pg_database WHERE datname = '{name}'");
        let out = self.runner.output(&self.client("psql").args(["-tAc", query.as_str()]))?;
        if !out.success {
            return Err(ApplicationError::DatabaseQueryFailed {
                database: name.to_string(),
                output: out.output.trim().to_owned(),
            }
            .into());
        }
        let exists = has_row(&out.output);
        debug!(exists, "existence query answered");
        Ok(exists)
    }

    fn create_database(&self, name: &ProjectName) -> LabraResult<()> {
        let out = self
            .runner
            .output(&self.client("createdb").arg(name.as_str()))?;
        if out.success {
            Ok(())
        } else {
            Err(ApplicationError::DatabaseCreateFailed {
                database: name.to_string(),
                reason: out.output.trim().to_owned(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RecordingRunner;

    fn demo() -> ProjectName {
        ProjectName::parse("demo").unwrap()
    }

    #[test]
    fn existence_is_read_from_query_rows() {
        assert!(has_row(" 1\n"));
        assert!(has_row("1"));
        assert!(!has_row(""));
        assert!(!has_row("\n\n"));
        assert!(!has_row("10\n"));
    }

    #[test]
    fn commands_carry_user_and_password() {
        let runner = RecordingRunner::new().respond("psql -U postgres -tAc", "1\n");
        let client = PsqlClient::new(&runner, DatabaseSettings::default());

        assert!(client.database_exists(&demo()).unwrap());
        let call = &runner.calls()[0];
        assert_eq!(
            call.arguments().last().map(String::as_str),
            Some("SELECT 1 FROM pg_database WHERE datname = 'demo'")
        );
        assert!(
            call.envs()
                .iter()
                .any(|(k, v)| k == PASSWORD_ENV && v == "postgres")
        );
    }

    #[test]
    fn createuser_connects_as_the_os_user() {
        let runner = RecordingRunner::new();
        let client = PsqlClient::new(&runner, DatabaseSettings::default());

        client.create_superuser("postgres").unwrap();
        assert_eq!(runner.command_lines(), vec!["createuser -s postgres"]);
        assert!(runner.calls()[0].envs().is_empty());
    }

    #[test]
    fn failed_query_is_not_read_as_missing() {
        let runner = RecordingRunner::new().fail("psql -U", 2, "connection refused");
        let client = PsqlClient::new(&runner, DatabaseSettings::default());

        let err = client.database_exists(&demo()).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn createdb_failure_carries_its_output() {
        let runner = RecordingRunner::new().fail("createdb", 1, "permission denied");
        let client = PsqlClient::new(&runner, DatabaseSettings::default());

        let err = client.create_database(&demo()).unwrap_err();
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(runner.command_lines(), vec!["createdb -U postgres demo"]);
    }
}
