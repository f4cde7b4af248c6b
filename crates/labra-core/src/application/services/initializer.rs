//! Project Initializer - the `create` pipeline.
//!
//! Steps run strictly in order:
//! 1. Check prerequisites (never fails)
//! 2. Choose the frontend package manager
//! 3. Clone the template (REQUIRED)
//! 4. Patch the backend `go.mod` (REQUIRED)
//! 5. Write the backend `.env` (REQUIRED)
//! 6. Write the frontend `.env` (REQUIRED)
//! 7. `go mod tidy` + `go generate`, retried once (best-effort)
//! 8. Install frontend dependencies (best-effort)
//! 9. Provision the database (best-effort at this level)
//! 10. Print next steps

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DatabaseClient, Filesystem, ProcessRunner, Prompt, Reporter, ToolLocator},
        services::{
            prerequisites::{PrerequisiteChecker, PrerequisiteReport},
            provisioner::{DatabaseProvisioner, Provisioned},
        },
    },
    domain::{
        CommandSpec, DatabaseSettings, EnvFile, ModulePatch, PackageManager, Platform,
        ProjectContext, Tool, patch_module_file,
    },
    error::{LabraResult, StepContext},
};

/// Per-run switches, passed in explicitly by the caller.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Answer yes to install prompts and take the default package manager.
    pub auto_confirm: bool,
    /// Skip the package manager prompt.
    pub package_manager: Option<PackageManager>,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    /// The directory already held a template checkout.
    Reused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseOutcome {
    Provisioned(Provisioned),
    Failed(String),
}

/// What the pipeline did, step by step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReport {
    pub prerequisites: PrerequisiteReport,
    pub package_manager: PackageManager,
    pub clone: CloneOutcome,
    pub module_patched: bool,
    pub backend_env: WriteOutcome,
    pub frontend_env: WriteOutcome,
    pub code_generated: bool,
    /// `None` when the frontend has no `package.json`.
    pub frontend_installed: Option<bool>,
    pub database: DatabaseOutcome,
}

pub struct ProjectInitializer<'a> {
    runner: &'a dyn ProcessRunner,
    locator: &'a dyn ToolLocator,
    prompt: &'a dyn Prompt,
    filesystem: &'a dyn Filesystem,
    database: &'a dyn DatabaseClient,
    reporter: &'a dyn Reporter,
    platform: Platform,
}

impl<'a> ProjectInitializer<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        locator: &'a dyn ToolLocator,
        prompt: &'a dyn Prompt,
        filesystem: &'a dyn Filesystem,
        database: &'a dyn DatabaseClient,
        reporter: &'a dyn Reporter,
        platform: Platform,
    ) -> Self {
        Self {
            runner,
            locator,
            prompt,
            filesystem,
            database,
            reporter,
            platform,
        }
    }

    #[instrument(skip_all, fields(project = %ctx.name()))]
    pub fn create(&self, ctx: &ProjectContext, options: &CreateOptions) -> LabraResult<CreateReport> {
        self.reporter
            .step(&format!("Creating LabraGo project: {}", ctx.name()));

        let prerequisites = PrerequisiteChecker::new(
            self.runner,
            self.locator,
            self.prompt,
            self.reporter,
            self.platform.clone(),
            options.auto_confirm,
        )
        .run(&Tool::REQUIRED);

        let package_manager = self.choose_package_manager(options);
        info!(%package_manager, "package manager chosen");

        let clone = self.clone_template(ctx).step("Git clone")?;
        let module_patched = self.patch_module(ctx).step("go.mod patch")?;

        let backend_env = self
            .write_env(&EnvFile::backend(ctx, &options.database))
            .step("Backend .env")?;
        let frontend_env = self
            .write_env(&EnvFile::frontend(ctx))
            .step("Frontend .env")?;

        let code_generated = self.generate_code(ctx);
        let frontend_installed = self.install_frontend(ctx, package_manager);

        let database =
            match DatabaseProvisioner::new(self.database, self.reporter, &options.database)
                .provision(ctx.name())
            {
                Ok(done) => DatabaseOutcome::Provisioned(done),
                Err(e) => {
                    warn!(error = %e, "database provisioning failed");
                    self.reporter
                        .warning(&format!("PostgreSQL setup failed: {e}"));
                    for hint in e.suggestions() {
                        self.reporter.info(&hint);
                    }
                    DatabaseOutcome::Failed(e.to_string())
                }
            };

        self.reporter
            .success(&format!("Project created at {}", ctx.name()));
        self.reporter
            .info(&format!("cd {}\nlabractl start", ctx.name()));

        Ok(CreateReport {
            prerequisites,
            package_manager,
            clone,
            module_patched,
            backend_env,
            frontend_env,
            code_generated,
            frontend_installed,
            database,
        })
    }

    fn choose_package_manager(&self, options: &CreateOptions) -> PackageManager {
        if let Some(pm) = options.package_manager {
            return pm;
        }
        if options.auto_confirm {
            return PackageManager::default();
        }
        let answer = self
            .prompt
            .read_line("Choose package manager (npm/yarn) [default: yarn]: ");
        PackageManager::from_choice(&answer)
    }

    fn clone_template(&self, ctx: &ProjectContext) -> LabraResult<CloneOutcome> {
        if self.filesystem.exists(ctx.root()) {
            if self.filesystem.exists(&ctx.module_file()) {
                self.reporter.info(&format!(
                    "{} already contains a LabraGo checkout, reusing it",
                    ctx.root().display()
                ));
                return Ok(CloneOutcome::Reused);
            }
            return Err(ApplicationError::ProjectExists {
                path: ctx.root().to_path_buf(),
            }
            .into());
        }

        self.reporter
            .step(&format!("Cloning {}...", ctx.repository_url()));
        let clone = CommandSpec::new("git")
            .args(["clone", ctx.repository_url(), ctx.name().as_str()])
            .current_dir(ctx.workspace());
        self.runner.run(&clone)?;
        Ok(CloneOutcome::Cloned)
    }

    fn patch_module(&self, ctx: &ProjectContext) -> LabraResult<bool> {
        let path = ctx.module_file();
        let content = self.filesystem.read_to_string(&path)?;
        match patch_module_file(&content) {
            ModulePatch::Applied(patched) => {
                self.filesystem.write_file(&path, &patched)?;
                debug!(path = %path.display(), "module file patched");
                Ok(true)
            }
            ModulePatch::AlreadyPatched => {
                debug!(path = %path.display(), "placeholder absent, module file unchanged");
                Ok(false)
            }
        }
    }

    fn write_env(&self, env: &EnvFile) -> LabraResult<WriteOutcome> {
        let rendered = env.render();
        if self.unchanged(env.path(), &rendered) {
            self.reporter
                .info(&format!("{} is up to date", env.path().display()));
            return Ok(WriteOutcome::Unchanged);
        }
        self.filesystem.write_file(env.path(), &rendered)?;
        debug!(path = %env.path().display(), "env file written");
        Ok(WriteOutcome::Written)
    }

    fn unchanged(&self, path: &Path, content: &str) -> bool {
        self.filesystem.exists(path)
            && self
                .filesystem
                .read_to_string(path)
                .is_ok_and(|current| current == content)
    }

    /// `go mod tidy` then `go generate ./...`; the pair is retried once if
    /// generation fails. Never fails the pipeline.
    fn generate_code(&self, ctx: &ProjectContext) -> bool {
        let backend = ctx.backend_dir();
        let attempt = || {
            let tidy = CommandSpec::new("go")
                .args(["mod", "tidy"])
                .current_dir(&backend);
            if let Err(e) = self.runner.run(&tidy) {
                debug!(error = %e, "go mod tidy failed");
            }
            let generate = CommandSpec::new("go")
                .args(["generate", "./..."])
                .current_dir(&backend);
            self.runner.run(&generate)
        };

        if attempt().is_ok() {
            return true;
        }
        self.reporter.warning("go generate failed, retrying...");
        match attempt() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "code generation failed twice");
                self.reporter
                    .warning(&format!("go generate failed again, continuing: {e}"));
                false
            }
        }
    }

    fn install_frontend(&self, ctx: &ProjectContext, pm: PackageManager) -> Option<bool> {
        if !self.filesystem.exists(&ctx.frontend_manifest()) {
            debug!("frontend has no package.json, skipping install");
            return None;
        }
        self.reporter
            .step(&format!("Installing frontend dependencies with {pm}..."));
        match self.runner.run(&pm.install().current_dir(ctx.frontend_dir())) {
            Ok(()) => Some(true),
            Err(e) => {
                self.reporter
                    .warning(&format!("Frontend dependency install failed: {e}"));
                Some(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::{
        Location, MockDatabaseClient, MockFilesystem, MockProcessRunner, MockPrompt,
        MockReporter, MockToolLocator,
    };
    use crate::domain::{ProjectName, TEMPLATE_REPOSITORY};
    use crate::error::LabraError;

    fn ctx() -> ProjectContext {
        ProjectContext::new(
            ProjectName::parse("demo").unwrap(),
            TEMPLATE_REPOSITORY,
            "/work",
        )
    }

    fn reporter() -> MockReporter {
        let mut reporter = MockReporter::new();
        reporter.expect_step().return_const(());
        reporter.expect_info().return_const(());
        reporter.expect_success().return_const(());
        reporter.expect_warning().return_const(());
        reporter
    }

    fn locator() -> MockToolLocator {
        let mut locator = MockToolLocator::new();
        locator
            .expect_locate()
            .return_const(Location::Found(PathBuf::from("/usr/bin/go")));
        locator
    }

    #[test]
    fn existing_non_checkout_directory_fails_before_git() {
        let mut runner = MockProcessRunner::new();
        runner.expect_probe().return_const(true);
        runner
            .expect_output()
            .returning(|_| Ok(crate::domain::CommandOutput::success("go version go1.22")));
        runner.expect_run().never();
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("/work/demo"));
        let mut prompt = MockPrompt::new();
        prompt.expect_read_line().return_const(String::new());
        let db = MockDatabaseClient::new();
        let reporter = reporter();
        let locator = locator();

        let initializer = ProjectInitializer::new(
            &runner,
            &locator,
            &prompt,
            &fs,
            &db,
            &reporter,
            Platform::Linux,
        );
        let err = initializer
            .create(&ctx(), &CreateOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            LabraError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn explicit_package_manager_skips_the_prompt() {
        let runner = MockProcessRunner::new();
        let locator = MockToolLocator::new();
        let mut prompt = MockPrompt::new();
        prompt.expect_read_line().never();
        let fs = MockFilesystem::new();
        let db = MockDatabaseClient::new();
        let reporter = reporter();

        let initializer = ProjectInitializer::new(
            &runner,
            &locator,
            &prompt,
            &fs,
            &db,
            &reporter,
            Platform::Linux,
        );
        let options = CreateOptions {
            package_manager: Some(PackageManager::Npm),
            ..CreateOptions::default()
        };
        assert_eq!(initializer.choose_package_manager(&options), PackageManager::Npm);
        let auto = CreateOptions {
            auto_confirm: true,
            ..CreateOptions::default()
        };
        assert_eq!(initializer.choose_package_manager(&auto), PackageManager::Yarn);
    }

    #[test]
    fn prompt_answer_selects_package_manager() {
        let runner = MockProcessRunner::new();
        let locator = MockToolLocator::new();
        let mut prompt = MockPrompt::new();
        prompt.expect_read_line().return_const(String::from("NPM"));
        let fs = MockFilesystem::new();
        let db = MockDatabaseClient::new();
        let reporter = reporter();

        let initializer = ProjectInitializer::new(
            &runner,
            &locator,
            &prompt,
            &fs,
            &db,
            &reporter,
            Platform::Linux,
        );
        assert_eq!(
            initializer.choose_package_manager(&CreateOptions::default()),
            PackageManager::Npm
        );
    }

    #[test]
    fn env_file_is_not_rewritten_when_identical() {
        let env = EnvFile::frontend(&ctx());
        let rendered = env.render();
        let runner = MockProcessRunner::new();
        let locator = MockToolLocator::new();
        let prompt = MockPrompt::new();
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string()
            .returning(move |_| Ok(rendered.clone()));
        fs.expect_write_file().never();
        let db = MockDatabaseClient::new();
        let reporter = reporter();

        let initializer = ProjectInitializer::new(
            &runner,
            &locator,
            &prompt,
            &fs,
            &db,
            &reporter,
            Platform::Linux,
        );
        assert_eq!(initializer.write_env(&env).unwrap(), WriteOutcome::Unchanged);
    }

    #[test]
    fn generation_is_attempted_twice_at_most() {
        let mut runner = MockProcessRunner::new();
        let mut generate_calls = 0;
        runner.expect_run().returning(move |cmd| {
            if cmd.arguments().first().map(String::as_str) == Some("generate") {
                generate_calls += 1;
                assert!(generate_calls <= 2, "generate ran more than twice");
                return Err(ApplicationError::CommandFailed {
                    command: cmd.command_line(),
                    reason: "exited with status 1".into(),
                }
                .into());
            }
            Ok(())
        });
        let locator = MockToolLocator::new();
        let prompt = MockPrompt::new();
        let fs = MockFilesystem::new();
        let db = MockDatabaseClient::new();
        let reporter = reporter();

        let initializer = ProjectInitializer::new(
            &runner,
            &locator,
            &prompt,
            &fs,
            &db,
            &reporter,
            Platform::Linux,
        );
        assert!(!initializer.generate_code(&ctx()));
    }
}
