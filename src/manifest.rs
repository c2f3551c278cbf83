//! Embedded provisioning manifest.
//!
//! The manifest is the tool's entire external contract surface: which
//! packages get installed, which files get downloaded and where they land,
//! and which file the placement stage installs for VLC. It is embedded
//! rather than loaded from disk, and should be treated as versioned
//! configuration: changing an entry changes what every run produces.

use std::path::{Path, PathBuf};

/// Base URL all remote assets are fetched from.
pub const BASE_URL: &str = "https://raw.githubusercontent.com/Shadorc/RPiTube/master";

/// Tool the whole run depends on; checked before anything else happens.
pub const PREREQUISITE_TOOL: &str = "choco";

/// Installation hint printed when [`PREREQUISITE_TOOL`] is missing.
pub const PREREQUISITE_HINT: &str =
    "Install Chocolatey: https://chocolatey.org/install and re-run as Administrator.";

/// System packages installed in a single package-manager invocation.
pub const SYSTEM_PACKAGES: &[&str] = &["vlc", "nodejs", "ffmpeg", "yt-dlp"];

/// Application-level package the server requires.
pub const SERVER_PACKAGE: &str = "express";

/// Server scripts fetched into the `src/` subdirectory of the install dir.
const SERVER_SCRIPTS: &[&str] = &[
    "rpitube-server.js",
    "video-manager.js",
    "detect-chromecast.js",
    "chromcast-data.js",
    "play-error.js",
];

/// Launcher script fetched into the install dir itself. The operator runs it
/// after setup; it only works once the fetch stage has written it here.
pub const LAUNCHER_SCRIPT: &str = "start-server.py";

/// VLC web interface file; fetched into the install dir, then placed into
/// VLC's HTTP directory by the final stage.
pub const WEB_INTERFACE_FILE: &str = "mobile.html";

/// Remote path of [`WEB_INTERFACE_FILE`] relative to the base URL.
const WEB_INTERFACE_REMOTE_PATH: &str = "vlc_html/mobile.html";

/// One remote file to retrieve. Identity is the destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAsset {
    /// Full source URL.
    pub source_url: String,

    /// Local path the content is written to.
    pub destination: PathBuf,
}

impl RemoteAsset {
    fn new(base_url: &str, remote_path: &str, destination: PathBuf) -> Self {
        Self {
            source_url: format!("{}/{}", base_url.trim_end_matches('/'), remote_path),
            destination,
        }
    }
}

/// Build the ordered asset list for a run.
///
/// Order is fixed: server scripts, then the launcher, then the web
/// interface. Assets are independent, so order is irrelevant to
/// correctness, but it must be deterministic for reproducible logs.
pub fn manifest(base_url: &str, install_dir: &Path) -> Vec<RemoteAsset> {
    let mut assets: Vec<RemoteAsset> = SERVER_SCRIPTS
        .iter()
        .map(|script| {
            RemoteAsset::new(base_url, script, install_dir.join("src").join(script))
        })
        .collect();

    assets.push(RemoteAsset::new(
        base_url,
        LAUNCHER_SCRIPT,
        install_dir.join(LAUNCHER_SCRIPT),
    ));
    assets.push(RemoteAsset::new(
        base_url,
        WEB_INTERFACE_REMOTE_PATH,
        install_dir.join(WEB_INTERFACE_FILE),
    ));

    assets
}

/// The package-manager invocation for the system packages.
///
/// `-y` answers all prompts, `--limit-output` keeps console noise down; the
/// run is non-interactive by design.
pub fn system_install_command() -> String {
    format!(
        "choco install -y --limit-output {}",
        SYSTEM_PACKAGES.join(" ")
    )
}

/// The application-package invocation, quoted so resolved paths with spaces
/// (`C:\Program Files\nodejs\npm.cmd`) survive the shell.
pub fn server_install_command(npm_path: &Path) -> String {
    format!("\"{}\" install {}", npm_path.display(), SERVER_PACKAGE)
}
