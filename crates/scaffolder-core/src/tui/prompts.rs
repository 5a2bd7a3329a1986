//! Charm-style CLI prompts using cliclack

use crate::options::{
    module_selection, validate_project_name, ProjectOptions, UpdateFlags, UpdateTarget, NO_STYLE,
};
use crate::product::ProductConfig;
use crate::report::{ConsoleReporter, Reporter};
use crate::runtime::{self, PackageManager};
use crate::templates::{self, TemplateCatalog, TemplateLayout};
use crate::update;
use anyhow::Result;
use cliclack::ProgressBar;
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Project name
    pub name: Option<String>,

    /// Code-style module (or "none")
    pub style: Option<String>,

    /// Extra modules to apply after the style module
    pub extras: Option<Vec<String>>,

    /// Skip npm-check-updates
    pub no_update_check: bool,

    /// npm-check-updates target version range
    pub ncu_target: Option<UpdateTarget>,

    /// Pick updates interactively
    pub ncu_interactive: bool,

    /// Only report updates, do not write them to package.json
    pub no_ncu_upgrade: bool,

    /// Skip dependency installation
    pub no_install: bool,

    /// Skip git initialization
    pub no_git: bool,

    /// Package manager override (detected from the launching tool otherwise)
    pub package_manager: Option<PackageManager>,

    /// Skip the registry lookup for a newer CLI release
    pub skip_self_update: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl CreateArgs {
    fn has_ncu_flags(&self) -> bool {
        self.ncu_target.is_some() || self.ncu_interactive || self.no_ncu_upgrade
    }

    fn ncu_flags(&self) -> UpdateFlags {
        UpdateFlags {
            upgrade: !self.no_ncu_upgrade,
            interactive: self.ncu_interactive,
            target: self.ncu_target.unwrap_or_default(),
        }
    }
}

/// Reporter backed by cliclack spinners and log lines
#[derive(Default)]
pub struct SpinnerReporter {
    spinner: Option<ProgressBar>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for SpinnerReporter {
    fn start(&mut self, message: &str) {
        if let Some(previous) = self.spinner.take() {
            previous.stop("");
        }
        let spinner = cliclack::spinner();
        spinner.start(message);
        self.spinner = Some(spinner);
    }

    fn succeed(&mut self, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.stop(message),
            None => {
                let _ = cliclack::log::success(message);
            }
        }
    }

    fn fail(&mut self, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.error(message),
            None => {
                let _ = cliclack::log::error(message);
            }
        }
    }

    fn info(&mut self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn warn(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(format!("Welcome to {}!", config.display_name()))?;

    // Step 1: Self-update check
    if !args.skip_self_update {
        check_self_update(config, cli_version).await?;
    }

    cliclack::log::warning(format!(
        "This version is an early release and you may run into issues during use.\n\
         Feel free to submit any feedback to the issue tracker: {}",
        config.issues_url()
    ))?;

    // Step 2: Locate templates
    let layout = TemplateLayout::locate(config, args.template_dir.as_deref())?;
    if args.template_dir.is_some() {
        cliclack::log::info(format!("Using local templates from {}", layout.root.display()))?;
    }
    let catalog = TemplateCatalog::load(&layout)?;

    // Step 3: Collect options
    let options = prompt_options(config, &args, &catalog)?;

    // Step 4: Make room for the project
    check_existing_dir(&options, &args).await?;

    // Step 5: Scaffold
    let mut reporter: Box<dyn Reporter> = if console::Term::stdout().is_term() {
        Box::new(SpinnerReporter::new())
    } else {
        Box::new(ConsoleReporter)
    };
    if let Err(e) = templates::scaffold_project(&options, &layout, reporter.as_mut()).await {
        cliclack::log::error(format!(
            "An unexpected error occurred while scaffolding your new project.\n{}",
            e
        ))?;
        anyhow::bail!("Setup cancelled.");
    }

    // Step 6: Post-scaffold steps (failures are reported, never fatal)
    runtime::check_updates(&options, reporter.as_mut()).await;
    runtime::install_dependencies(&options, reporter.as_mut()).await;
    runtime::init_git(&options, reporter.as_mut()).await;

    // Step 7: Show next steps
    print_next_steps(config, &options)?;

    Ok(())
}

async fn check_self_update<C: ProductConfig>(config: &C, cli_version: &str) -> Result<()> {
    let status = update::check_cli_version(config, cli_version).await;
    match status.latest.as_deref() {
        Some(latest) if !status.up_to_date => {
            cliclack::log::warning(format!(
                "v{} - Updates available: v{}\nRun the following command for the latest updates:\n\n  {}",
                status.current,
                latest,
                config.upgrade_command()
            ))?;
        }
        _ => cliclack::log::info(format!("v{}", status.current))?,
    }
    Ok(())
}

fn prompt_options<C: ProductConfig>(
    config: &C,
    args: &CreateArgs,
    catalog: &TemplateCatalog,
) -> Result<ProjectOptions> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let project_name = select_name(config, args)?;
    let mut options = ProjectOptions::new(&project_name, &cwd)?;

    let style = select_style(args, catalog)?;
    let extras = select_extras(args, catalog)?;
    options.modules = module_selection(style.as_deref(), &extras);

    options.init_git =
        !args.no_git && confirm(args, "Do you want to initialize a new git repository?", true)?;
    options.check_updates = select_update_flags(args)?;
    options.package_manager = args.package_manager.unwrap_or_else(PackageManager::detect);
    options.install_deps = !args.no_install
        && confirm(
            args,
            &format!(
                "Do you want to install dependencies with {}?",
                options.package_manager.install_command()
            ),
            true,
        )?;

    tracing::debug!(?options, "project options resolved");
    Ok(options)
}

fn confirm(args: &CreateArgs, prompt: &str, default: bool) -> Result<bool> {
    if args.yes {
        return Ok(default);
    }
    Ok(cliclack::confirm(prompt).initial_value(default).interact()?)
}

fn select_name<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        validate_project_name(name)?;
        cliclack::log::info(format!("Project name: {}", name))?;
        return Ok(name.clone());
    }

    if args.yes {
        return Ok(config.default_project_name().to_string());
    }

    let name: String = cliclack::input("What will your project be named?")
        .placeholder(config.default_project_name())
        .default_input(config.default_project_name())
        .validate(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
        .interact()?;
    Ok(name)
}

fn select_style(args: &CreateArgs, catalog: &TemplateCatalog) -> Result<Option<String>> {
    if let Some(style) = &args.style {
        if style != NO_STYLE && catalog.style(style).is_none() {
            cliclack::log::warning(format!("Unknown code style: {}", style))?;
        }
        return Ok(Some(style.clone()));
    }

    let Some(first) = catalog.styles.first() else {
        return Ok(None);
    };

    if args.yes {
        return Ok(Some(first.name.clone()));
    }

    let mut select = cliclack::select("How do you want to enforce code style?");
    for style in &catalog.styles {
        select = select.item(style.name.clone(), style.label(), style.hint());
    }
    let selected: String = select
        .item(NO_STYLE.to_string(), "None", "")
        .initial_value(first.name.clone())
        .interact()?;
    Ok(Some(selected))
}

fn select_extras(args: &CreateArgs, catalog: &TemplateCatalog) -> Result<Vec<String>> {
    if let Some(extras) = &args.extras {
        for extra in extras {
            if catalog.extra(extra).is_none() {
                cliclack::log::warning(format!("Unknown extra: {}", extra))?;
            }
        }
        return Ok(extras.clone());
    }

    if args.yes || catalog.extras.is_empty() {
        return Ok(Vec::new());
    }

    let mut multi = cliclack::multiselect("Select any extras you'd like to add");
    for extra in &catalog.extras {
        multi = multi.item(extra.name.clone(), extra.label(), extra.hint());
    }
    let selected: Vec<String> = multi.required(false).interact()?;

    // Catalog order, not selection order, decides merge precedence
    Ok(catalog
        .extras
        .iter()
        .filter(|e| selected.contains(&e.name))
        .map(|e| e.name.clone())
        .collect())
}

fn select_update_flags(args: &CreateArgs) -> Result<Option<UpdateFlags>> {
    if args.no_update_check {
        return Ok(None);
    }

    if !confirm(
        args,
        "Do you want to check for dependency updates with npm-check-updates?",
        true,
    )? {
        return Ok(None);
    }

    if args.yes || args.has_ncu_flags() {
        return Ok(Some(args.ncu_flags()));
    }

    let options: Vec<&str> =
        cliclack::multiselect("Select the options you'd like for upgrading dependencies")
            .item("upgrade", "Upgrade versions in package.json", "-u")
            .item("interactive", "Let me select updates (interactive)", "-i")
            .initial_values(vec!["upgrade"])
            .required(false)
            .interact()?;

    let target: UpdateTarget = cliclack::select("Which versions should be targeted?")
        .item(UpdateTarget::Latest, "Latest", "default")
        .item(UpdateTarget::Minor, "Minor only", "")
        .item(UpdateTarget::Patch, "Patch only", "")
        .initial_value(UpdateTarget::Latest)
        .interact()?;

    Ok(Some(UpdateFlags {
        upgrade: options.contains(&"upgrade"),
        interactive: options.contains(&"interactive"),
        target,
    }))
}

async fn check_existing_dir(options: &ProjectOptions, args: &CreateArgs) -> Result<()> {
    let target_dir = &options.target_dir;
    if !templates::is_non_empty_dir(target_dir) {
        return Ok(());
    }

    cliclack::log::warning(format!(
        "The directory {} already exists and is not empty.",
        target_dir.display()
    ))?;

    // Auto-confirm with --yes flag
    let overwrite = if args.yes {
        true
    } else {
        cliclack::confirm("Do you want to overwrite all files and folders in this directory?")
            .initial_value(false)
            .interact()?
    };

    if !overwrite {
        anyhow::bail!("Setup cancelled.");
    }

    let spinner = cliclack::spinner();
    spinner.start(format!("Deleting contents of {}", target_dir.display()));
    match templates::clear_dir(target_dir).await {
        Ok(()) => {
            spinner.stop(format!("Deleted contents of {}", target_dir.display()));
            Ok(())
        }
        Err(e) => {
            spinner.error(format!("Could not delete contents of {}", target_dir.display()));
            Err(e)
        }
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, options: &ProjectOptions) -> Result<()> {
    let steps = config.next_steps(options);

    cliclack::log::success(format!(
        "Your project {} has been successfully created!",
        options.project_name
    ))?;

    println!();
    println!("  You can run the following commands to get started:");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ncu_flags_from_args() {
        let args = CreateArgs {
            ncu_target: Some(UpdateTarget::Patch),
            no_ncu_upgrade: true,
            ..Default::default()
        };
        assert!(args.has_ncu_flags());
        assert_eq!(args.ncu_flags().to_args(), ["-t", "patch"]);

        let defaults = CreateArgs::default();
        assert!(!defaults.has_ncu_flags());
        assert_eq!(defaults.ncu_flags(), UpdateFlags::default());
    }
}
