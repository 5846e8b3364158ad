//! Command workflows behind the CLI subcommands
//!
//! Each workflow takes its project root (or parent directory) and a
//! [`Prompter`](crate::tui::Prompter) explicitly, so it can be driven from
//! tests without touching the working directory or stdin.

pub mod dev;
pub mod new_project;
pub mod production_build;
pub mod uninstall;

pub use dev::dev;
pub use new_project::{new_project, NewProjectOutcome};
pub use production_build::production_build;
pub use uninstall::{default_locations, uninstall, Platform, UninstallOutcome};
