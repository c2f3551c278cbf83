//! Privileged placement of the VLC web interface.
//!
//! The final stage copies the downloaded `mobile.html` into VLC's HTTP
//! directory. That directory usually needs elevated rights, so failure here
//! is expected in the common case and is absorbed rather than escalated: the
//! run stays successful and the operator gets instructions for finishing the
//! copy by hand.

use std::io;
use std::path::{Path, PathBuf};

use crate::env::HostEnv;
use crate::manifest::WEB_INTERFACE_FILE;

/// Environment variable the placement base directory is derived from.
pub const PROGRAM_FILES_VAR: &str = "ProgramFiles";

/// Fallback used when [`PROGRAM_FILES_VAR`] is absent. This is VLC's default
/// install base on Windows.
pub const PROGRAM_FILES_DEFAULT: &str = "C:\\Program Files";

/// Outcome of the placement attempt. Never an error: both degraded variants
/// leave the run successful and carry the data the remediation message is
/// composed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// File copied into the privileged directory.
    Placed {
        /// Full path of the placed file.
        target: PathBuf,
    },

    /// The process lacked rights to create the directory or write the file.
    DegradedPermission {
        /// Where the asset remains on disk.
        fallback: PathBuf,
        /// Full path the file should end up at.
        target: PathBuf,
    },

    /// Any other failure (disk full, path invalid, missing source).
    DegradedOther {
        /// Where the asset remains on disk.
        fallback: PathBuf,
        /// Full path the file should end up at.
        target: PathBuf,
        /// Underlying cause, for the log line.
        cause: String,
    },
}

impl PlacementOutcome {
    /// Whether the file reached the privileged directory.
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed { .. })
    }

    /// Operator instructions for completing a degraded placement by hand.
    ///
    /// The text is the same regardless of why placement degraded; only the
    /// structured variant distinguishes causes.
    pub fn remediation(&self) -> Option<String> {
        match self {
            PlacementOutcome::Placed { .. } => None,
            PlacementOutcome::DegradedPermission { fallback, target }
            | PlacementOutcome::DegradedOther {
                fallback, target, ..
            } => Some(format!(
                "Could not write to VLC directory automatically.\n\
                 A copy is saved here: {}\n\
                 To complete setup, copy it manually with admin rights to:\n  {}",
                fallback.display(),
                target.display()
            )),
        }
    }
}

/// VLC's HTTP interface directory, derived from the environment.
///
/// Derived once per run and never cached across runs.
pub fn vlc_http_dir(env: &dyn HostEnv) -> PathBuf {
    let base = PathBuf::from(env.var_or(PROGRAM_FILES_VAR, PROGRAM_FILES_DEFAULT));
    base.join("VideoLAN").join("VLC").join("lua").join("http")
}

/// Copy the downloaded web interface into VLC's HTTP directory.
///
/// `source` is the already-fetched local copy. The attempt happens exactly
/// once per run and always produces an outcome, never an error.
pub fn place_web_interface(env: &dyn HostEnv, source: &Path) -> PlacementOutcome {
    let dir = vlc_http_dir(env);
    let target = dir.join(WEB_INTERFACE_FILE);

    if let Err(e) = std::fs::create_dir_all(&dir) {
        return degrade(source, target, &e);
    }
    if let Err(e) = std::fs::copy(source, &target) {
        return degrade(source, target, &e);
    }

    PlacementOutcome::Placed { target }
}

/// Classify a placement failure into its outcome variant.
fn degrade(source: &Path, target: PathBuf, err: &io::Error) -> PlacementOutcome {
    let fallback = source.to_path_buf();
    if err.kind() == io::ErrorKind::PermissionDenied {
        tracing::debug!(target = %target.display(), "placement denied");
        PlacementOutcome::DegradedPermission { fallback, target }
    } else {
        tracing::debug!(target = %target.display(), error = %err, "placement failed");
        PlacementOutcome::DegradedOther {
            fallback,
            target,
            cause: err.to_string(),
        }
    }
}
