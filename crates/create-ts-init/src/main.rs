//! create-ts-init - Project scaffolding for TypeScript apps

use anyhow::Result;
use clap::Parser;
use scaffolder_core::options::ProjectOptions;
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{PackageManager, ProductConfig, UpdateTarget};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// create-ts-init product configuration
#[derive(Clone)]
pub struct TsInitConfig;

impl ProductConfig for TsInitConfig {
    fn name(&self) -> &'static str {
        "create-ts-init"
    }

    fn display_name(&self) -> &'static str {
        "create-ts-init"
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_TS_INIT_TEMPLATE_DIR"
    }

    fn bundled_template_dir(&self) -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates"))
    }

    fn default_project_name(&self) -> &'static str {
        "my-ts-app"
    }

    fn issues_url(&self) -> &'static str {
        "https://github.com/nomnivore/create-ts-init/issues"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install create-ts-init --force"
    }

    fn next_steps(&self, options: &ProjectOptions) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to the project, relative when possible
        let dir = current
            .as_deref()
            .and_then(|cwd| options.target_dir.strip_prefix(cwd).ok())
            .unwrap_or(&options.target_dir);
        steps.push(format!("cd {}", dir.display()));

        // Step 2: Install dependencies if we didn't
        if !options.install_deps {
            steps.push(options.package_manager.install_command().to_string());
        }

        // Step 3: Start dev server
        steps.push(options.package_manager.run_script("dev"));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-ts-init")]
#[command(about = "CLI for scaffolding TypeScript projects")]
#[command(version)]
pub struct Args {
    /// Project name (prompted for if omitted)
    pub name: Option<String>,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Code-style module to apply, or "none"
    #[arg(short, long)]
    pub style: Option<String>,

    /// Extra modules to add (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub extras: Option<Vec<String>>,

    /// Skip checking for dependency updates with npm-check-updates
    #[arg(long = "no-update-check")]
    pub no_update_check: bool,

    /// Versions targeted by npm-check-updates
    #[arg(long = "ncu-target", value_enum)]
    pub ncu_target: Option<UpdateTarget>,

    /// Select dependency updates interactively
    #[arg(long = "ncu-interactive")]
    pub ncu_interactive: bool,

    /// Report dependency updates without writing them to package.json
    #[arg(long = "no-ncu-upgrade")]
    pub no_ncu_upgrade: bool,

    /// Skip installing dependencies
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Skip initializing a git repository
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Package manager to use (detected from the launching tool by default)
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Skip checking for a newer create-ts-init release
    #[arg(long = "skip-self-update")]
    pub skip_self_update: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            name: args.name,
            style: args.style,
            extras: args.extras,
            no_update_check: args.no_update_check,
            ncu_target: args.ncu_target,
            ncu_interactive: args.ncu_interactive,
            no_ncu_upgrade: args.no_ncu_upgrade,
            no_install: args.no_install,
            no_git: args.no_git,
            package_manager: args.package_manager,
            skip_self_update: args.skip_self_update,
            yes: args.yes,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let config = TsInitConfig;
    let result = scaffolder_core::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
