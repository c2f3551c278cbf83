//! External command execution.
//!
//! Commands run under the ambient shell so platform shims (`choco`, `npm.cmd`)
//! resolve the way they do in the operator's own terminal. Execution is
//! synchronous and stdio is inherited: package-manager output belongs on the
//! operator's console, not in a buffer.

use std::process::{Command, ExitStatus};

use crate::error::{Result, SetupError};

/// Runs external commands on behalf of the provisioner.
///
/// The seam exists so tests can substitute a scripted runner; production code
/// uses [`ShellRunner`].
pub trait CommandRunner {
    /// Execute a command, blocking until completion.
    ///
    /// Non-zero exit is fatal by default: the provisioner has no compensating
    /// action for a half-finished install, so failures propagate as
    /// [`SetupError::CommandFailed`]. A child terminated by the interrupt
    /// signal maps to [`SetupError::Interrupted`] instead.
    fn run(&self, command: &str) -> Result<()>;
}

/// [`CommandRunner`] that executes under the ambient shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<()> {
        let result = execute(command)?;
        if result.interrupted {
            return Err(SetupError::Interrupted);
        }
        if !result.success {
            return Err(SetupError::CommandFailed {
                command: command.to_string(),
                code: result.exit_code,
            });
        }
        Ok(())
    }
}

/// Result of executing a shell command.
#[derive(Debug, Clone, Copy)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was terminated by the interrupt signal.
    pub interrupted: bool,
}

/// Execute a command string under the ambient shell with inherited stdio.
pub fn execute(command: &str) -> Result<CommandResult> {
    let shell = detect_shell();
    let flag = shell_flag();

    tracing::debug!(%command, %shell, "running external command");

    let status = Command::new(&shell)
        .arg(flag)
        .arg(command)
        .status()
        .map_err(|_| SetupError::CommandFailed {
            command: command.to_string(),
            code: None,
        })?;

    Ok(CommandResult {
        exit_code: status.code(),
        success: status.success(),
        interrupted: was_interrupted(&status),
    })
}

/// Install the top-level interrupt handler.
///
/// A terminal ctrl-c delivers SIGINT to the whole foreground process group,
/// which would otherwise kill this process with the default disposition
/// mid-stage. The handler converts that into the dedicated interrupt line on
/// stderr and a clean exit 130. A SIGINT delivered only to a child process
/// never reaches the handler; that case is classified from the child's exit
/// status by [`ShellRunner`] instead.
///
/// No-op on platforms without POSIX signals, where ctrl-c ends the whole
/// console process group directly.
pub fn install_interrupt_handler(use_colors: bool) {
    #[cfg(unix)]
    interrupt::install(use_colors);
    #[cfg(not(unix))]
    let _ = use_colors;
}

#[cfg(unix)]
mod interrupt {
    use std::sync::atomic::{AtomicBool, Ordering};

    static COLORED: AtomicBool = AtomicBool::new(false);

    const PLAIN_MESSAGE: &[u8] = b"\n[ERROR] Interrupted by user.\n";
    const COLORED_MESSAGE: &[u8] = b"\n\x1b[1;31m[ERROR]\x1b[0m Interrupted by user.\n";

    /// Runs in signal context: only async-signal-safe calls (write, _exit).
    extern "C" fn on_sigint(_signal: libc::c_int) {
        let message = if COLORED.load(Ordering::Relaxed) {
            COLORED_MESSAGE
        } else {
            PLAIN_MESSAGE
        };
        unsafe {
            libc::write(
                libc::STDERR_FILENO,
                message.as_ptr() as *const libc::c_void,
                message.len(),
            );
            libc::_exit(130);
        }
    }

    pub(super) fn install(use_colors: bool) {
        COLORED.store(use_colors, Ordering::Relaxed);
        let handler = on_sigint as extern "C" fn(libc::c_int);
        // SAFETY: the handler touches nothing but an atomic and two statics,
        // and calls only async-signal-safe functions.
        unsafe {
            libc::signal(libc::SIGINT, handler as libc::sighandler_t);
        }
    }
}

/// Whether the child was terminated by SIGINT.
#[cfg(unix)]
fn was_interrupted(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(libc::SIGINT)
}

/// Windows has no signal-termination concept to inspect; ctrl-c reaches the
/// whole console process group and ends the run directly.
#[cfg(not(unix))]
fn was_interrupted(_status: &ExitStatus) -> bool {
    false
}

/// Detect the current shell.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

/// Get the flag to pass commands to the shell.
///
/// Uses `-lic` (interactive login shell) on Unix so tools activated in the
/// operator's profile scripts are visible to the install commands; a fresh
/// Node.js install tends to land on PATH exactly there. In CI environments
/// uses `-lc` instead: `-i` without a TTY fails trying to set up job
/// control. Windows `cmd.exe` takes `/C`.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else if is_ci() {
        "-lc"
    } else {
        "-lic"
    }
}

/// Check if running in a CI environment.
///
/// Used when picking the shell flag: CI gets a non-interactive shell.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let result = execute("exit 0").unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(!result.interrupted);
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 3").unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn runner_propagates_failure_with_command_text() {
        let err = ShellRunner.run("exit 7").unwrap_err();
        match err {
            SetupError::CommandFailed { command, code } => {
                assert_eq!(command, "exit 7");
                assert_eq!(code, Some(7));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn runner_accepts_success() {
        assert!(ShellRunner.run("exit 0").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn sigint_terminated_child_is_interrupted() {
        use std::process::Command;

        let status = Command::new("/bin/sh")
            .arg("-c")
            .arg("kill -INT $$")
            .status()
            .unwrap();
        assert!(was_interrupted(&status));
        assert!(status.code().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn normal_exit_is_not_interrupted() {
        use std::process::Command;

        let status = Command::new("/bin/sh").arg("-c").arg("exit 1").status().unwrap();
        assert!(!was_interrupted(&status));
    }

    #[test]
    fn is_ci_detects_environment() {
        // Just ensure function doesn't panic
        let _ = is_ci();
    }

    #[test]
    fn shell_flag_uses_non_interactive_in_ci() {
        std::env::set_var("CI", "true");
        let flag = shell_flag();
        std::env::remove_var("CI");
        assert_eq!(flag, "-lc");
    }

    #[test]
    fn shell_flag_uses_interactive_outside_ci() {
        let ci_vars = [
            "CI",
            "GITHUB_ACTIONS",
            "GITLAB_CI",
            "CIRCLECI",
            "TRAVIS",
            "JENKINS_URL",
        ];
        let saved: Vec<_> = ci_vars
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();
        for k in &ci_vars {
            std::env::remove_var(k);
        }

        let flag = shell_flag();

        for (k, v) in &saved {
            if let Some(val) = v {
                std::env::set_var(k, val);
            }
        }
        assert_eq!(flag, "-lic");
    }
}
