//! GWT Boot CLI - scaffolding and dev loop for Spring Boot + GWT projects

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use gwtboot_core::commands::{self, default_locations};
use gwtboot_core::error::io_err;
use gwtboot_core::generator::{self, Activity, Component, Entity, Model, Service, UnitGenerator};
use gwtboot_core::tui::ClackPrompter;
use gwtboot_core::{
    Archetype, BootError, BuildSettings, DevSettings, ProductConfig, Toolchain, DEFAULT_MEMORY_MB,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter
const LOG_ENV: &str = "GWT_BOOT_LOG";

/// GWT Boot product configuration
#[derive(Clone)]
pub struct GwtBootConfig;

impl ProductConfig for GwtBootConfig {
    fn name(&self) -> &'static str {
        "gwt-boot"
    }

    fn display_name(&self) -> &'static str {
        "GWT Boot"
    }

    fn cli_description(&self) -> &'static str {
        "GWT Boot CLI - Unified command-line tool for GWT Boot projects"
    }

    fn archetype(&self) -> Archetype {
        Archetype {
            group_id: "com.edusoftwerks",
            artifact_id: "gwt-boot-archetype",
            version: "1.0.0",
        }
    }

    fn build_tool_env(&self) -> &'static str {
        "GWT_BOOT_MVN"
    }

    fn java_env(&self) -> &'static str {
        "GWT_BOOT_JAVA"
    }

    fn maven_repo_env(&self) -> &'static str {
        "GWT_BOOT_M2_REPO"
    }

    fn jar_name(&self) -> &'static str {
        "gwt-boot-cli.jar"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/edusoftwerks/gwt-boot"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }
        steps.push(format!("{} dev", self.name()));
        steps
    }
}

const EXAMPLES: &str = "Examples:
  gwt-boot app MyApp
  gwt-boot activity dashboard
  gwt-boot service UserAuth
  gwt-boot component button
  gwt-boot entity User
  gwt-boot model User
  gwt-boot dev
  gwt-boot dev -m 4096
  gwt-boot jar";

#[derive(Parser, Debug)]
#[command(name = "gwt-boot")]
#[command(version, after_help = EXAMPLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new GWT Boot project from archetype
    #[command(visible_aliases = ["new", "new-project"])]
    App {
        /// The artifact ID for the project
        name: Option<String>,
    },
    /// Create a new activity in the current project
    #[command(visible_alias = "feature")]
    Activity { name: Option<String> },
    /// Create a new UI component in the current project
    Component { name: Option<String> },
    /// Create a JPA entity and repository (synced from the model if present)
    Entity { name: Option<String> },
    /// Create a new GWT RPC service in the current project
    Service { name: Option<String> },
    /// Create a shared model (synced from the entity if present)
    Model { name: Option<String> },
    /// Launch GWT CodeServer and Spring Boot for development
    Dev(MemoryArgs),
    /// Build production JAR with compiled GWT code
    #[command(visible_alias = "production-build")]
    Jar(MemoryArgs),
    /// Uninstall GWT Boot CLI from your system
    Uninstall {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct MemoryArgs {
    /// Maximum JVM heap for the GWT tools, in MB
    #[arg(short, long, default_value_t = DEFAULT_MEMORY_MB)]
    pub memory: u32,
}

/// The clap command, described by the product
fn cli<P: ProductConfig>(product: &P) -> clap::Command {
    Args::command().about(product.cli_description())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Restore the cursor if a prompt is interrupted
fn install_terminal_guards() {
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
}

fn working_dir() -> gwtboot_core::Result<PathBuf> {
    std::env::current_dir().map_err(io_err(Path::new(".")))
}

fn run_generator(unit: &dyn UnitGenerator, name: Option<String>) -> gwtboot_core::Result<i32> {
    let root = working_dir()?;
    generator::generate(unit, name.as_deref(), &root, &mut ClackPrompter)?;
    Ok(0)
}

async fn run(config: &GwtBootConfig, command: Command) -> gwtboot_core::Result<i32> {
    let toolchain = Toolchain::from_env(config);
    match command {
        Command::App { name } => {
            let parent = working_dir()?;
            commands::new_project(config, &toolchain, name.as_deref(), &parent, &mut ClackPrompter)
                .await?;
            Ok(0)
        }
        Command::Activity { name } => run_generator(&Activity, name),
        Command::Component { name } => run_generator(&Component, name),
        Command::Entity { name } => run_generator(&Entity, name),
        Command::Service { name } => run_generator(&Service, name),
        Command::Model { name } => run_generator(&Model, name),
        Command::Dev(args) => {
            let settings = DevSettings {
                memory_mb: args.memory,
                toolchain,
            };
            commands::dev(&working_dir()?, &settings).await
        }
        Command::Jar(args) => {
            let settings = BuildSettings {
                memory_mb: args.memory,
                toolchain,
            };
            commands::production_build(&working_dir()?, &settings).await?;
            Ok(0)
        }
        Command::Uninstall { yes } => {
            let locations = default_locations(config);
            commands::uninstall(config, &locations, yes, &mut ClackPrompter)?;
            Ok(0)
        }
    }
}

/// Print a failed command's error and pick the exit code
fn report(result: gwtboot_core::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            match &err {
                BootError::Validation { message, usage } => {
                    gwtboot_core::console::error(message);
                    for line in usage {
                        eprintln!("{}", line);
                    }
                }
                BootError::ConflictDeclined(_) => gwtboot_core::console::warning(err.to_string()),
                _ => gwtboot_core::console::error(err.to_string()),
            }
            err.exit_code()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = GwtBootConfig;
    let args = Args::from_arg_matches(&cli(&config).get_matches()).unwrap_or_else(|e| e.exit());

    let code = match args.command {
        None => {
            // No subcommand: show usage and succeed
            println!("{} CLI v{}", config.display_name(), CLI_VERSION);
            cli(&config).print_help()?;
            println!();
            println!("Documentation: {}", config.docs_url());
            0
        }
        Some(command @ Command::Dev(_)) => report(run(&config, command).await),
        Some(command) => {
            install_terminal_guards();
            let result = run(&config, command).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            report(result)
        }
    };

    std::process::exit(code);
}
