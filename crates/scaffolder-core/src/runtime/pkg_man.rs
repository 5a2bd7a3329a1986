//! Package manager detection and command construction

use clap::ValueEnum;
use std::fmt;

/// Environment variable set by npm, yarn and pnpm when they launch a binary
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Detect the package manager that launched this process (npm if unknown)
    pub fn detect() -> Self {
        Self::from_user_agent(std::env::var(USER_AGENT_ENV).ok().as_deref())
    }

    pub fn from_user_agent(agent: Option<&str>) -> Self {
        match agent {
            Some(a) if a.starts_with("pnpm") => PackageManager::Pnpm,
            Some(a) if a.starts_with("yarn") => PackageManager::Yarn,
            _ => PackageManager::Npm,
        }
    }

    /// Binary name
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// One-off package runner for this package manager
    pub fn runner(&self) -> PackageRunner {
        match self {
            PackageManager::Pnpm => PackageRunner {
                program: "pnpx",
                ncu_suffix: &["-p", "pnpm"],
            },
            // yarn v1 has no `dlx`, so yarn projects go through npx
            PackageManager::Yarn => PackageRunner {
                program: "npx",
                ncu_suffix: &["-p", "yarn"],
            },
            PackageManager::Npm => PackageRunner {
                program: "npx",
                ncu_suffix: &[],
            },
        }
    }

    pub fn install_command(&self) -> ExternalCommand {
        ExternalCommand::new(self.command(), ["install"])
    }

    /// Command line for running a package script, e.g. `npm run dev`
    pub fn run_script(&self, script: &str) -> String {
        format!("{} run {}", self.command(), script)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Runner used for one-off packages such as npm-check-updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageRunner {
    pub program: &'static str,
    /// Arguments npm-check-updates needs to target this package manager
    pub ncu_suffix: &'static [&'static str],
}

impl PackageRunner {
    /// `<runner> npm-check-updates <flags> <suffix>`
    pub fn npm_check_updates(&self, flags: &[String]) -> ExternalCommand {
        let mut args = vec!["npm-check-updates".to_string()];
        args.extend(flags.iter().cloned());
        args.extend(self.ncu_suffix.iter().map(|s| s.to_string()));
        ExternalCommand {
            program: self.program.to_string(),
            args,
        }
    }
}

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
