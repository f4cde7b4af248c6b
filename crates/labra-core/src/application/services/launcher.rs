//! Service Launcher - the `start` pipeline.
//!
//! Makes sure the root `package.json` exists and carries the launch scripts,
//! makes sure the concurrency helper is installed, then hands the terminal to
//! the `start` script until it exits.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, ProcessRunner, Reporter},
    domain::{
        CONCURRENCY_HELPER, MANIFEST_FILE, PackageManager, TaskManifest, launch_scripts,
        manifest::START_SCRIPT,
    },
    error::{LabraResult, StepContext},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub package_manager: PackageManager,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperStatus {
    Declared,
    /// Not in the manifest but the package manager reports it installed.
    Resolved,
    Installed,
}

pub struct ServiceLauncher<'a> {
    runner: &'a dyn ProcessRunner,
    filesystem: &'a dyn Filesystem,
    reporter: &'a dyn Reporter,
    root: PathBuf,
}

impl<'a> ServiceLauncher<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        filesystem: &'a dyn Filesystem,
        reporter: &'a dyn Reporter,
        root: impl AsRef<Path>,
    ) -> Self {
        Self {
            runner,
            filesystem,
            reporter,
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Prepare the project, then run `start` in the foreground.
    #[instrument(skip_all, fields(root = %self.root.display(), pm = %options.package_manager))]
    pub fn launch(&self, options: &LaunchOptions) -> LabraResult<()> {
        let pm = options.package_manager;
        let manifest = self.ensure_manifest(pm)?;
        self.ensure_concurrency_helper(pm, &manifest)?;
        self.start(pm)
    }

    /// Create the manifest if needed and add any missing launch scripts.
    /// Existing scripts are left as they are.
    pub fn ensure_manifest(&self, pm: PackageManager) -> LabraResult<TaskManifest> {
        let path = self.manifest_path();

        if !self.filesystem.exists(&path) {
            self.reporter
                .step(&format!("No {MANIFEST_FILE} found, initializing one..."));
            self.runner
                .run(&pm.init().current_dir(&self.root))
                .step("Manifest init")?;
        }

        let text = self
            .filesystem
            .read_to_string(&path)
            .step("Manifest read")?;
        let mut manifest = TaskManifest::parse(&text).step("Manifest parse")?;

        let inserted = manifest.ensure_scripts(launch_scripts(pm));
        if inserted.is_empty() {
            debug!("launch scripts already present");
            return Ok(manifest);
        }

        let rendered = manifest.to_json_pretty().step("Manifest write")?;
        self.filesystem
            .write_file(&path, &rendered)
            .step("Manifest write")?;
        info!(scripts = ?inserted, "launch scripts added");
        self.reporter.info(&format!(
            "Added scripts to {MANIFEST_FILE}: {}",
            inserted.join(", ")
        ));
        Ok(manifest)
    }

    pub fn ensure_concurrency_helper(
        &self,
        pm: PackageManager,
        manifest: &TaskManifest,
    ) -> LabraResult<HelperStatus> {
        if manifest.has_dependency(CONCURRENCY_HELPER) {
            return Ok(HelperStatus::Declared);
        }
        if self
            .runner
            .probe(&pm.dependency_query(CONCURRENCY_HELPER).current_dir(&self.root))
        {
            return Ok(HelperStatus::Resolved);
        }

        self.reporter
            .step(&format!("Installing {CONCURRENCY_HELPER}..."));
        self.runner
            .run(&pm.add_dev_dependency(CONCURRENCY_HELPER).current_dir(&self.root))
            .step("Concurrency helper install")?;
        Ok(HelperStatus::Installed)
    }

    /// Blocks until the user stops the services.
    pub fn start(&self, pm: PackageManager) -> LabraResult<()> {
        self.reporter.step("Starting backend and frontend...");
        self.runner
            .run(&pm.run_script(START_SCRIPT).current_dir(&self.root).interactive())
            .step("Start")
    }
}
