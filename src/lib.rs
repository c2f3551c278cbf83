//! rpitube-setup - One-shot machine provisioning for the RPiTube media server.
//!
//! Provisions a host in four ordered stages: verify the package manager is
//! present, install the system and application packages, download the server
//! scripts and VLC web interface, and attempt to copy that interface into
//! VLC's privileged HTTP directory — degrading to printed operator
//! instructions when the copy is not permitted.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`env`] - Host environment probe (executable search, variables, cwd)
//! - [`error`] - Error types and result alias
//! - [`fetch`] - Remote asset downloads
//! - [`manifest`] - Embedded provisioning manifest
//! - [`place`] - Privileged placement of the VLC web interface
//! - [`provision`] - Stage orchestration
//! - [`shell`] - External command execution
//! - [`ui`] - Operator-facing output
//!
//! # Example
//!
//! ```no_run
//! use rpitube_setup::env::SystemEnv;
//! use rpitube_setup::fetch::AssetFetcher;
//! use rpitube_setup::provision::{ProvisionConfig, Provisioner};
//! use rpitube_setup::shell::ShellRunner;
//! use rpitube_setup::ui::ConsoleReporter;
//!
//! let env = SystemEnv;
//! let fetcher = AssetFetcher::new();
//! let provisioner = Provisioner::new(&env, &ShellRunner, &fetcher);
//! let mut ui = ConsoleReporter::new(false);
//! let _report = provisioner.run(&ProvisionConfig::from_env(&env), &mut ui)?;
//! # Ok::<(), rpitube_setup::SetupError>(())
//! ```
//!
//! Downloads are written as received; there is no checksum or integrity
//! verification on fetched assets.

pub mod cli;
pub mod env;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod place;
pub mod provision;
pub mod shell;
pub mod ui;

pub use error::{Result, SetupError};
