//! Post-generation hooks.
//!
//! A hook is an external command gated on a trigger file inside the generated
//! tree. Hooks run one at a time in declared order with the generated root as
//! working directory. The first failure stops the sequence; files already
//! generated and hooks already run are left as they are.
//!
//! Hook commands have no timeout. A command that never exits blocks the run.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::HookError;

/// One post-generation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    /// Name used in logs and errors.
    pub name: String,
    /// Path relative to the generated root whose existence enables the hook.
    pub trigger: String,
    /// Shell command, run with `bash -c`.
    pub command: String,
}

impl HookSpec {
    pub fn new(
        name: impl Into<String>,
        trigger: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            trigger: trigger.into(),
            command: command.into(),
        }
    }
}

/// Which hooks ran and which were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookReport {
    pub executed: Vec<String>,
    pub skipped: Vec<String>,
}

/// Runs an ordered list of hooks against a generated tree.
#[derive(Debug, Clone)]
pub struct HookRunner {
    hooks: Vec<HookSpec>,
}

impl HookRunner {
    pub fn new(hooks: Vec<HookSpec>) -> Self {
        Self { hooks }
    }

    /// The hooks every generated project gets: API docs, module tidy, then
    /// dependency injection wiring.
    pub fn standard() -> Self {
        Self::new(vec![
            HookSpec::new(
                "swagger",
                "bin/swagger.sh",
                "chmod +x bin/* && ./bin/swagger.sh",
            ),
            HookSpec::new("go-mod-tidy", "go.mod", "go mod tidy"),
            HookSpec::new("wire", "bin/wire.sh", "./bin/wire.sh"),
        ])
    }

    pub fn hooks(&self) -> &[HookSpec] {
        &self.hooks
    }

    /// Run every hook whose trigger exists under `root`.
    ///
    /// The process working directory is switched to `root` for the duration of
    /// the sequence and restored afterwards on every path, including errors.
    pub fn run(&self, root: &Path) -> Result<HookReport, HookError> {
        let root = std::fs::canonicalize(root).map_err(|e| HookError::WorkingDirectory {
            path: root.to_path_buf(),
            source: e,
        })?;
        let _guard = WorkingDirGuard::enter(&root)?;

        let mut report = HookReport::default();
        for hook in &self.hooks {
            if !root.join(&hook.trigger).exists() {
                tracing::debug!(hook = %hook.name, trigger = %hook.trigger, "Trigger absent, skipping hook");
                report.skipped.push(hook.name.clone());
                continue;
            }

            tracing::info!(hook = %hook.name, command = %hook.command, "Running hook");
            let status = Command::new("bash")
                .arg("-c")
                .arg(&hook.command)
                .current_dir(&root)
                .status()
                .map_err(|e| HookError::Spawn {
                    hook: hook.name.clone(),
                    source: e,
                })?;

            if !status.success() {
                return Err(HookError::Failed {
                    hook: hook.name.clone(),
                    status,
                });
            }
            report.executed.push(hook.name.clone());
        }

        Ok(report)
    }
}

impl Default for HookRunner {
    fn default() -> Self {
        Self::standard()
    }
}

/// Switches the process working directory and switches it back on drop.
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    pub fn enter(dir: &Path) -> Result<Self, HookError> {
        let previous = std::env::current_dir().map_err(|e| HookError::WorkingDirectory {
            path: dir.to_path_buf(),
            source: e,
        })?;
        std::env::set_current_dir(dir).map_err(|e| HookError::WorkingDirectory {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            tracing::error!(
                path = %self.previous.display(),
                error = %e,
                "Failed to restore working directory"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_standard_hook_order() {
        let runner = HookRunner::standard();
        let names: Vec<_> = runner.hooks().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["swagger", "go-mod-tidy", "wire"]);
    }

    #[test]
    #[serial]
    fn test_no_triggers_skips_everything() {
        let dir = tempfile::tempdir().unwrap();
        let before = std::env::current_dir().unwrap();

        let report = HookRunner::standard().run(dir.path()).unwrap();
        assert!(report.executed.is_empty());
        assert_eq!(report.skipped, vec!["swagger", "go-mod-tidy", "wire"]);
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_hook_runs_in_generated_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("trigger"), "").unwrap();

        let runner = HookRunner::new(vec![HookSpec::new("pwd", "trigger", "pwd > where.txt")]);
        runner.run(dir.path()).unwrap();

        let recorded = fs::read_to_string(dir.path().join("where.txt")).unwrap();
        let expected = fs::canonicalize(dir.path()).unwrap();
        assert_eq!(PathBuf::from(recorded.trim()), expected);
    }

    #[test]
    #[serial]
    fn test_guard_restores_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let before = std::env::current_dir().unwrap();
        {
            let _guard = WorkingDirGuard::enter(dir.path()).unwrap();
            assert_eq!(
                std::env::current_dir().unwrap(),
                fs::canonicalize(dir.path()).unwrap()
            );
        }
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = HookRunner::standard()
            .run(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, HookError::WorkingDirectory { .. }));
    }
}
