//! GWT Boot Core - scaffolding, code generation and the dev loop
//!
//! This library backs the `gwt-boot` CLI for Spring Boot + GWT projects.
//! The binary supplies a [`ProductConfig`]; everything else lives here.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - project inspection, template rendering,
//!   field extraction, descriptor patching, process execution
//! - **Layer 2: Workflows** - the unit [`generator`]s and the [`commands`]
//!   (`app`, `dev`, `jar`, `uninstall`), each taking its root directory and
//!   a [`Prompter`](tui::Prompter) explicitly
//! - **Layer 3: CLI/TUI Interface** - cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables [`tui::ClackPrompter`]
//!
//! # Example Usage
//!
//! ```ignore
//! use gwtboot_core::generator::{self, Service};
//! use gwtboot_core::tui::ScriptedPrompter;
//!
//! let mut prompter = ScriptedPrompter::new(["y"]);
//! let report = generator::generate(&Service, Some("billing"), root, &mut prompter)?;
//! println!("{} files", report.created.len());
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod descriptor;
pub mod dev;
pub mod error;
pub mod fields;
pub mod generator;
pub mod maven;
pub mod naming;
pub mod process;
pub mod product;
pub mod project;
pub mod templates;
pub mod tui;

// Re-export main types for convenience
pub use config::{BuildSettings, DevSettings, Toolchain, DEFAULT_MEMORY_MB};
pub use error::{BootError, Result, SubprocessFailure};
pub use generator::{generate, GenerationReport, UnitGenerator, UnitKind};
pub use product::{Archetype, ProductConfig};
pub use project::{ProjectDescriptor, ProjectLayout};
