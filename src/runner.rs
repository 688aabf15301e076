use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Seam between the dispatcher and the external CLIs. The real
/// implementation shells out; tests substitute a scripted fake.
pub trait CommandRunner {
    /// Resolve an executable on PATH. `None` means the tool is not installed.
    fn resolve_tool(&self, tool: &str) -> Option<PathBuf>;

    /// Run an identity/auth probe, discarding its output. `Ok(true)` means
    /// the probe exited zero.
    fn run_quiet(&self, args: &[&str]) -> io::Result<bool>;

    /// Run the delegated provisioning command in `workdir`, inheriting
    /// stdio so the user sees the vendor tool's own output.
    fn run(&self, args: &[String], workdir: &Path) -> io::Result<ExitStatus>;
}

/// `CommandRunner` backed by `std::process::Command`. Every call blocks
/// until the child exits; a hung vendor CLI hangs the run.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn resolve_tool(&self, tool: &str) -> Option<PathBuf> {
        let path_var = std::env::var_os("PATH")?;
        for dir in std::env::split_paths(&path_var) {
            let candidate = dir.join(tool);
            if candidate.is_file() {
                debug!("resolved '{}' to {}", tool, candidate.display());
                return Some(candidate);
            }
        }
        None
    }

    fn run_quiet(&self, args: &[&str]) -> io::Result<bool> {
        debug!("probing: {}", args.join(" "));
        let status = Command::new(args[0])
            .args(&args[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.success())
    }

    fn run(&self, args: &[String], workdir: &Path) -> io::Result<ExitStatus> {
        debug!("invoking: {}", args.join(" "));
        Command::new(&args[0])
            .args(&args[1..])
            .current_dir(workdir)
            .status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tool_finds_executables_on_path() {
        let runner = ProcessRunner;
        // `sh` exists on any unix box this runs on
        assert!(runner.resolve_tool("sh").is_some());
        assert!(runner.resolve_tool("definitely-not-a-real-tool-xyz").is_none());
    }

    #[test]
    fn run_quiet_reports_probe_outcome() {
        let runner = ProcessRunner;
        assert!(runner.run_quiet(&["true"]).unwrap());
        assert!(!runner.run_quiet(&["false"]).unwrap());
    }

    #[test]
    fn run_quiet_spawn_failure_surfaces_as_io_error() {
        let runner = ProcessRunner;
        let err = runner
            .run_quiet(&["definitely-not-a-real-tool-xyz"])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
