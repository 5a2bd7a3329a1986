//! Post-scaffold steps that shell out to external tools
//!
//! Each step reports its own failure and returns whether it succeeded;
//! nothing here aborts the run.

use super::pkg_man::ExternalCommand;
use crate::options::ProjectOptions;
use crate::report::Reporter;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Check whether a tool is on PATH by asking for its version
pub fn tool_version(program: &str) -> Option<String> {
    std::process::Command::new(program)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

/// Run a command with the terminal attached (for tools that prompt or print progress)
pub async fn run_inherited(command: &ExternalCommand, cwd: &Path) -> Result<()> {
    tracing::debug!(%command, cwd = %cwd.display(), "running");
    let status = TokioCommand::new(&command.program)
        .args(&command.args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("Failed to start `{}`", command))?;

    if !status.success() {
        anyhow::bail!(
            "`{}` failed with exit code: {}",
            command,
            status.code().unwrap_or(-1)
        );
    }
    Ok(())
}

/// Run a command with captured output, surfacing stderr on failure
pub async fn run_captured(command: &ExternalCommand, cwd: &Path) -> Result<String> {
    tracing::debug!(%command, cwd = %cwd.display(), "running");
    let output = TokioCommand::new(&command.program)
        .args(&command.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .await
        .with_context(|| format!("Failed to start `{}`", command))?;

    if !output.status.success() {
        anyhow::bail!(
            "`{}` failed with exit code {}: {}",
            command,
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run npm-check-updates in the project, if enabled
pub async fn check_updates(options: &ProjectOptions, reporter: &mut dyn Reporter) -> bool {
    let Some(flags) = options.check_updates else {
        return true;
    };

    let command = options
        .package_manager
        .runner()
        .npm_check_updates(&flags.to_args());
    reporter.info(&format!("Checking for updates with {}...", command));

    match run_inherited(&command, &options.target_dir).await {
        Ok(()) => {
            reporter.succeed("Dependency update check finished");
            true
        }
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "npm-check-updates failed");
            reporter.fail(&format!("Could not check for dependency updates: {e:#}"));
            false
        }
    }
}

/// Install dependencies with the selected package manager, if enabled
pub async fn install_dependencies(options: &ProjectOptions, reporter: &mut dyn Reporter) -> bool {
    if !options.install_deps {
        return true;
    }

    let command = options.package_manager.install_command();
    reporter.info(&format!("Running {} for you.", command));

    match run_inherited(&command, &options.target_dir).await {
        Ok(()) => {
            reporter.succeed("Dependencies installed");
            true
        }
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "dependency install failed");
            reporter.fail(&format!(
                "An unexpected error occurred while installing dependencies. \
                 You may need to run `{}` yourself. ({e:#})",
                command
            ));
            false
        }
    }
}

/// Initialize a git repository and stage all files, if enabled
pub async fn init_git(options: &ProjectOptions, reporter: &mut dyn Reporter) -> bool {
    if !options.init_git {
        return true;
    }

    if tool_version("git").is_none() {
        reporter.fail("Could not initialize git repository: git is not installed");
        return false;
    }

    reporter.start("Initializing git repository");
    let result = async {
        run_captured(&ExternalCommand::new("git", ["init"]), &options.target_dir).await?;
        run_captured(&ExternalCommand::new("git", ["add", "."]), &options.target_dir).await?;
        Ok::<_, anyhow::Error>(())
    }
    .await;

    match result {
        Ok(()) => {
            reporter.succeed("Git repository initialized and files staged");
            true
        }
        Err(e) => {
            reporter.fail(&format!("Could not initialize git repository: {e:#}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Event, RecordingReporter};
    use tempfile::TempDir;

    #[test]
    fn test_tool_version_missing_tool() {
        assert!(tool_version("definitely-not-a-real-tool-xyz").is_none());
    }

    #[tokio::test]
    async fn test_run_captured_missing_program() {
        let temp = TempDir::new().expect("create temp dir");
        let command = ExternalCommand::new("definitely-not-a-real-tool-xyz", ["x"]);
        let err = run_captured(&command, temp.path()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to start"));
    }

    #[tokio::test]
    async fn test_disabled_steps_are_noops() {
        let temp = TempDir::new().expect("create temp dir");
        let options = ProjectOptions::new("my-app", temp.path()).unwrap();
        let mut reporter = RecordingReporter::new();

        assert!(check_updates(&options, &mut reporter).await);
        assert!(install_dependencies(&options, &mut reporter).await);
        assert!(init_git(&options, &mut reporter).await);
        assert!(reporter.events.is_empty());
    }

    #[tokio::test]
    async fn test_install_failure_is_reported() {
        let temp = TempDir::new().expect("create temp dir");
        let mut options = ProjectOptions::new("my-app", temp.path()).unwrap();
        // the project directory does not exist, so the command cannot start
        options.install_deps = true;
        let mut reporter = RecordingReporter::new();

        assert!(!install_dependencies(&options, &mut reporter).await);
        assert!(matches!(reporter.events.last(), Some(Event::Fail(_))));
    }
}
