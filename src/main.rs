//! rpitube-setup CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use rpitube_setup::cli::Cli;
use rpitube_setup::env::{HostEnv, SystemEnv};
use rpitube_setup::fetch::AssetFetcher;
use rpitube_setup::manifest;
use rpitube_setup::provision::{ProvisionConfig, Provisioner};
use rpitube_setup::shell::{install_interrupt_handler, ShellRunner};
use rpitube_setup::ui::{should_use_colors, ConsoleReporter, Reporter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("rpitube_setup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rpitube_setup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("rpitube-setup starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Convert ctrl-c into the dedicated interrupt message and exit 130.
    install_interrupt_handler(should_use_colors());

    let env = SystemEnv;
    let mut ui = ConsoleReporter::new(cli.quiet);

    let config = ProvisionConfig {
        base_url: cli
            .base_url
            .unwrap_or_else(|| manifest::BASE_URL.to_string()),
        install_dir: cli.dir.unwrap_or_else(|| env.current_dir()),
    };

    let fetcher = AssetFetcher::new();
    let provisioner = Provisioner::new(&env, &ShellRunner, &fetcher);

    match provisioner.run(&config, &mut ui) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            ui.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
