//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// One-shot machine provisioning for the RPiTube media server.
///
/// Installs the required system packages, downloads the server scripts, and
/// installs the VLC web interface. Run it from (or point it at) the directory
/// the server should live in.
#[derive(Debug, Parser)]
#[command(name = "rpitube-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to install into (defaults to the current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Fetch assets from a mirror instead of the upstream repository
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Minimal output (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
