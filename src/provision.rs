//! Provisioning orchestration.
//!
//! Four stages, fixed order, no feedback loops: prerequisite check, package
//! installation, asset retrieval, privileged placement. Later stages consume
//! what earlier ones produce, so any failure in the first three stages aborts
//! the run with `?` and nothing after it executes. Placement is the one stage
//! whose failure is absorbed: the run still succeeds and the operator gets
//! remediation instructions instead.
//!
//! Nothing is retried and nothing is rolled back; a re-run repeats every
//! stage idempotently.

use std::path::PathBuf;

use crate::env::HostEnv;
use crate::error::{Result, SetupError};
use crate::fetch::AssetSource;
use crate::manifest::{
    self, LAUNCHER_SCRIPT, PREREQUISITE_HINT, PREREQUISITE_TOOL, WEB_INTERFACE_FILE,
};
use crate::place::{self, PlacementOutcome};
use crate::shell::CommandRunner;
use crate::ui::Reporter;

/// Per-run settings.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Base URL the manifest's relative paths are resolved against.
    pub base_url: String,

    /// Directory assets are installed into.
    pub install_dir: PathBuf,
}

impl ProvisionConfig {
    /// Default configuration: the embedded base URL, installing into the
    /// current working directory.
    pub fn from_env(env: &dyn HostEnv) -> Self {
        Self {
            base_url: manifest::BASE_URL.to_string(),
            install_dir: env.current_dir(),
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// Outcome of the privileged placement stage.
    pub placement: PlacementOutcome,
}

/// Drives the provisioning stages against injectable host capabilities.
pub struct Provisioner<'a> {
    env: &'a dyn HostEnv,
    runner: &'a dyn CommandRunner,
    assets: &'a dyn AssetSource,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner over the given host capabilities.
    pub fn new(
        env: &'a dyn HostEnv,
        runner: &'a dyn CommandRunner,
        assets: &'a dyn AssetSource,
    ) -> Self {
        Self {
            env,
            runner,
            assets,
        }
    }

    /// Run all stages in order.
    ///
    /// Errors from the first three stages propagate unmodified to the
    /// caller; the placement outcome (degraded or not) is part of the
    /// report, and the final success line prints either way.
    pub fn run(&self, config: &ProvisionConfig, ui: &mut dyn Reporter) -> Result<ProvisionReport> {
        self.check_prerequisite()?;
        self.install_system_packages(ui)?;
        self.install_server_package(ui)?;
        self.fetch_assets(config, ui)?;
        let placement = self.place_web_interface(config, ui);

        ui.info(&format!(
            "Installation complete! You can execute 'py {LAUNCHER_SCRIPT}'"
        ));

        Ok(ProvisionReport { placement })
    }

    /// Stage 1: the package manager must resolve before anything else runs.
    fn check_prerequisite(&self) -> Result<()> {
        tracing::debug!(tool = PREREQUISITE_TOOL, "checking prerequisite");
        match self.env.find_executable(PREREQUISITE_TOOL) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "prerequisite resolved");
                Ok(())
            }
            None => Err(SetupError::MissingPrerequisite {
                tool: PREREQUISITE_TOOL.to_string(),
                hint: PREREQUISITE_HINT.to_string(),
            }),
        }
    }

    /// Stage 2a: system packages, one non-interactive invocation.
    fn install_system_packages(&self, ui: &mut dyn Reporter) -> Result<()> {
        ui.info("Installing dependencies with Chocolatey...");
        self.run_logged(ui, &manifest::system_install_command())
    }

    /// Stage 2b: the server's application-level package.
    ///
    /// npm is resolved fresh rather than trusted to exist: the Node.js
    /// install in stage 2a may not have reached this shell's PATH yet, and
    /// that condition gets its own error, distinct from "package manager
    /// missing".
    fn install_server_package(&self, ui: &mut dyn Reporter) -> Result<()> {
        ui.info("Installing Express (npm)...");
        let npm = self
            .env
            .find_executable("npm")
            .or_else(|| self.env.find_executable("npm.cmd"))
            .ok_or_else(|| SetupError::ToolUnavailable {
                tool: "npm".to_string(),
                message: "not found after Node.js installation. Make sure your shell has a \
                          refreshed PATH or restart the terminal."
                    .to_string(),
            })?;
        self.run_logged(ui, &manifest::server_install_command(&npm))
    }

    /// Stage 3: fetch every manifest entry, sequentially, in manifest order.
    fn fetch_assets(&self, config: &ProvisionConfig, ui: &mut dyn Reporter) -> Result<()> {
        ui.info(&format!(
            "Downloading scripts into {}...",
            config.install_dir.display()
        ));
        for asset in manifest::manifest(&config.base_url, &config.install_dir) {
            ui.info(&format!(
                "Downloading {} -> {}",
                asset.source_url,
                asset.destination.display()
            ));
            self.assets.download(&asset.source_url, &asset.destination)?;
        }
        Ok(())
    }

    /// Stage 4: attempt the privileged copy; absorb failure into the outcome.
    fn place_web_interface(
        &self,
        config: &ProvisionConfig,
        ui: &mut dyn Reporter,
    ) -> PlacementOutcome {
        ui.info("Placing mobile.html into VLC HTTP directory...");
        let local_copy = config.install_dir.join(WEB_INTERFACE_FILE);
        let outcome = place::place_web_interface(self.env, &local_copy);

        match &outcome {
            PlacementOutcome::Placed { target } => {
                ui.info(&format!(
                    "Copied mobile.html to VLC HTTP dir: {}",
                    target.display()
                ));
            }
            PlacementOutcome::DegradedPermission { .. } => {
                ui.info("Permission denied copying to VLC directory (need Administrator).");
            }
            PlacementOutcome::DegradedOther { cause, .. } => {
                ui.info(&format!(
                    "Could not copy mobile.html to VLC HTTP dir: {cause}"
                ));
            }
        }
        if let Some(remediation) = outcome.remediation() {
            ui.info(&remediation);
        }

        outcome
    }

    fn run_logged(&self, ui: &mut dyn Reporter, command: &str) -> Result<()> {
        ui.info(&format!("Running: {command}"));
        self.runner.run(command)
    }
}
