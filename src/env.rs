//! Host environment probe.
//!
//! Every ambient lookup the tool performs (executable search, environment
//! variables, working directory) goes through the [`HostEnv`] trait so tests
//! can substitute a deterministic [`StaticEnv`] instead of depending on the
//! real host.
//!
//! Executable resolution iterates over PATH entries directly rather than
//! shelling out to `which` — `which` behavior varies across systems and is
//! sometimes a shell builtin with inconsistent error handling.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Ambient host lookups needed by the provisioner.
pub trait HostEnv {
    /// Resolve a tool name on the executable search path.
    fn find_executable(&self, name: &str) -> Option<PathBuf>;

    /// Read an environment variable, falling back to a default when absent.
    fn var_or(&self, key: &str, default: &str) -> String;

    /// Current working directory.
    fn current_dir(&self) -> PathBuf;
}

/// [`HostEnv`] backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl HostEnv for SystemEnv {
    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        resolve_tool_path(name, &parse_system_path())
    }

    fn var_or(&self, key: &str, default: &str) -> String {
        std::env::var(key).unwrap_or_else(|_| default.to_string())
    }

    fn current_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_default()
    }
}

/// Deterministic [`HostEnv`] for tests and examples.
///
/// Executables and variables are looked up in fixed maps; nothing touches
/// the real process environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    executables: HashMap<String, PathBuf>,
    vars: HashMap<String, String>,
    cwd: PathBuf,
}

impl StaticEnv {
    /// Create an empty environment rooted at the given working directory.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            executables: HashMap::new(),
            vars: HashMap::new(),
            cwd: cwd.into(),
        }
    }

    /// Register an executable name as resolvable at the given path.
    pub fn with_executable(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.executables.insert(name.to_string(), path.into());
        self
    }

    /// Register an environment variable.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl HostEnv for StaticEnv {
    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        self.executables.get(name).cloned()
    }

    fn var_or(&self, key: &str, default: &str) -> String {
        self.vars
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn current_dir(&self) -> PathBuf {
        self.cwd.clone()
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. On Windows the
/// bare name is tried alongside the common shim extensions, so `choco`
/// resolves to `choco.exe` and `npm` to `npm.cmd`.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        for name in candidate_names(tool) {
            let candidate = dir.join(&name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Names to try for a tool on the current platform.
fn candidate_names(tool: &str) -> Vec<String> {
    if cfg!(target_os = "windows") && Path::new(tool).extension().is_none() {
        vec![
            tool.to_string(),
            format!("{tool}.exe"),
            format!("{tool}.cmd"),
            format!("{tool}.bat"),
        ]
    } else {
        vec![tool.to_string()]
    }
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Create a fake binary at a path (creates parent dirs as needed).
    fn create_fake_binary(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[test]
    fn resolve_tool_path_finds_first_match() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        fs::create_dir_all(&dir_a).unwrap();
        fs::create_dir_all(&dir_b).unwrap();

        create_fake_binary(&dir_a.join("node"));
        create_fake_binary(&dir_b.join("node"));

        let result = resolve_tool_path("node", &[dir_a.clone(), dir_b.clone()]);
        assert_eq!(result, Some(dir_a.join("node")));
    }

    #[test]
    fn resolve_tool_path_returns_none_when_not_found() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        fs::create_dir_all(&dir).unwrap();

        let result = resolve_tool_path("node", &[dir]);
        assert!(result.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_skips_non_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");

        fs::create_dir_all(&dir_a).unwrap();
        fs::write(dir_a.join("node"), "not executable").unwrap();
        fs::set_permissions(dir_a.join("node"), fs::Permissions::from_mode(0o644)).unwrap();
        create_fake_binary(&dir_b.join("node"));

        let result = resolve_tool_path("node", &[dir_a.clone(), dir_b.clone()]);
        assert_eq!(result, Some(dir_b.join("node")));
    }

    #[test]
    fn is_executable_returns_false_for_nonexistent_file() {
        assert!(!is_executable(Path::new("/nonexistent/path/to/file")));
    }

    #[test]
    fn system_env_var_or_falls_back() {
        let env = SystemEnv;
        let value = env.var_or("RPITUBE_SETUP_NO_SUCH_VAR", "fallback");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn system_env_finds_common_tool() {
        // `sh` is present on every unix host this test runs on.
        #[cfg(unix)]
        assert!(SystemEnv.find_executable("sh").is_some());
    }

    #[test]
    fn static_env_resolves_registered_executable() {
        let env = StaticEnv::new("/work").with_executable("choco", "/fake/bin/choco");
        assert_eq!(
            env.find_executable("choco"),
            Some(PathBuf::from("/fake/bin/choco"))
        );
        assert_eq!(env.find_executable("npm"), None);
    }

    #[test]
    fn static_env_var_lookup_with_default() {
        let env = StaticEnv::new("/work").with_var("ProgramFiles", "D:\\Programs");
        assert_eq!(env.var_or("ProgramFiles", "C:\\Program Files"), "D:\\Programs");
        assert_eq!(env.var_or("OTHER", "default"), "default");
    }

    #[test]
    fn static_env_current_dir_is_fixed() {
        let env = StaticEnv::new("/work/here");
        assert_eq!(env.current_dir(), PathBuf::from("/work/here"));
    }
}
