//! Feature-unit generators
//!
//! Every generator follows the same workflow ([`generate`]):
//!
//! 1. validate the unit name
//! 2. require a recognised project root
//! 3. plan the files to write (the target path set)
//! 4. if any target exists, list them and ask for confirmation (default: no)
//! 5. create directories, render and write every file
//! 6. run the unit's post-write step and print a summary
//!
//! Declining the confirmation leaves the tree untouched.

mod activity;
mod component;
mod entity;
mod model;
mod service;

pub use activity::Activity;
pub use component::Component;
pub use entity::Entity;
pub use model::Model;
pub use service::Service;

use crate::console;
use crate::descriptor::{self, PatchOutcome};
use crate::error::{io_err, BootError, Result};
use crate::naming::UnitName;
use crate::project::{ProjectDescriptor, ProjectLayout};
use crate::tui::Prompter;
use std::path::{Path, PathBuf};

/// The generator variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Activity,
    Component,
    Entity,
    Service,
    Model,
}

impl UnitKind {
    /// Human-readable kind, as used in messages
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Activity => "Activity",
            UnitKind::Component => "Component",
            UnitKind::Entity => "Entity",
            UnitKind::Service => "Service",
            UnitKind::Model => "Model",
        }
    }

    /// CLI subcommand name
    pub fn command(self) -> &'static str {
        match self {
            UnitKind::Activity => "activity",
            UnitKind::Component => "component",
            UnitKind::Entity => "entity",
            UnitKind::Service => "service",
            UnitKind::Model => "model",
        }
    }

    fn example(self) -> &'static str {
        match self {
            UnitKind::Activity => "dashboard",
            UnitKind::Component => "button",
            UnitKind::Entity | UnitKind::Model => "User",
            UnitKind::Service => "UserAuth",
        }
    }

    fn title(self) -> &'static str {
        match self {
            UnitKind::Activity => "GWT Boot Activity Generator",
            UnitKind::Component => "GWT Boot Component Generator",
            UnitKind::Entity => "Entity Generator",
            UnitKind::Service => "GWT RPC Service Generator",
            UnitKind::Model => "Model Generator",
        }
    }

    pub fn usage(self) -> Vec<String> {
        vec![
            format!("Usage: gwt-boot {} <{}-name>", self.command(), self.command()),
            format!("Example: gwt-boot {} {}", self.command(), self.example()),
        ]
    }
}

/// One file a generator will write
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
    /// Annotation shown next to the path in the summary
    pub label: Option<&'static str>,
}

impl RenderedFile {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self {
            path,
            content,
            label: None,
        }
    }

    pub fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

/// Everything a unit intends to create
#[derive(Debug, Clone, Default)]
pub struct UnitPlan {
    pub files: Vec<RenderedFile>,
    /// Directories to create even when no file lands in them
    pub directories: Vec<PathBuf>,
}

impl UnitPlan {
    /// The ordered target path set
    pub fn targets(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }
}

/// A single generator variant
pub trait UnitGenerator {
    fn kind(&self) -> UnitKind;

    /// Lines printed under the banner before anything else happens
    fn describe(&self, name: &UnitName, project: &ProjectDescriptor) -> Vec<String> {
        vec![
            format!("{} name: {}", self.kind().label(), name.class_name()),
            format!("Package: {}", project.root_package),
        ]
    }

    fn plan(
        &self,
        name: &UnitName,
        project: &ProjectDescriptor,
        layout: &ProjectLayout,
    ) -> Result<UnitPlan>;

    /// Step run after all files were written
    fn finish(&self, _layout: &ProjectLayout) -> Result<Option<PatchOutcome>> {
        Ok(None)
    }

    fn next_steps(&self, name: &UnitName, project: &ProjectDescriptor) -> Vec<String>;
}

/// What a successful run created
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub created: Vec<PathBuf>,
    pub descriptor: Option<PatchOutcome>,
}

/// Run the common workflow for `generator` in the project rooted at `root`
pub fn generate(
    generator: &dyn UnitGenerator,
    raw_name: Option<&str>,
    root: &Path,
    prompter: &mut dyn Prompter,
) -> Result<GenerationReport> {
    let kind = generator.kind();
    let name = UnitName::parse(raw_name, kind.label(), kind.usage())?;
    let project = ProjectDescriptor::load(root)?;
    let layout = project.layout();

    console::banner(kind.title());
    for line in generator.describe(&name, &project) {
        console::plain(line);
    }
    console::blank();

    let plan = generator.plan(&name, &project, &layout)?;

    let existing: Vec<&Path> = plan.targets().filter(|p| p.exists()).collect();
    if !existing.is_empty() {
        console::warning("WARNING: The following files will be overwritten:");
        for path in &existing {
            console::item(layout.display(path));
        }
        console::blank();

        if !prompter.confirm("Continue with generation?", false)? {
            return Err(BootError::ConflictDeclined(kind.label().to_string()));
        }
        console::blank();
    }

    console::info("Creating package structure...");
    let parents = plan.files.iter().filter_map(|f| f.path.parent());
    for dir in plan.directories.iter().map(PathBuf::as_path).chain(parents) {
        std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    }

    for file in &plan.files {
        let file_name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        console::info(format!("Creating {}...", file_name));
        std::fs::write(&file.path, &file.content).map_err(io_err(&file.path))?;
    }

    let descriptor = generator.finish(&layout)?;

    console::success_banner(&format!("{} created successfully!", kind.label()));
    console::plain("Created:");
    for file in &plan.files {
        match file.label {
            Some(label) => console::item(format!("{} ({})", layout.display(&file.path), label)),
            None => console::item(layout.display(&file.path)),
        }
    }
    console::blank();
    for line in generator.next_steps(&name, &project) {
        console::plain(line);
    }
    console::blank();

    Ok(GenerationReport {
        created: plan.files.into_iter().map(|f| f.path).collect(),
        descriptor,
    })
}

/// Ensure the main module declares `source_path`, reporting what happened
fn patch_main_module(layout: &ProjectLayout, source_path: &str) -> Result<Option<PatchOutcome>> {
    let Some(main) = crate::project::find_main_module(&layout.java_base)? else {
        console::warning(format!(
            "No main GWT module found in {}; skipping <source path=\"{}\" />",
            layout.display(&layout.java_base),
            source_path
        ));
        return Ok(None);
    };

    let descriptor_path = layout
        .java_base
        .join(format!("{}{}", main, crate::project::MODULE_SUFFIX));
    let outcome = descriptor::ensure_source_path(&descriptor_path, source_path)?;
    match outcome {
        PatchOutcome::Inserted => console::info(format!(
            "Added <source path=\"{}\" /> to {}{}",
            source_path,
            main,
            crate::project::MODULE_SUFFIX
        )),
        PatchOutcome::MissingClosingTag => console::warning(format!(
            "Could not find </module> tag in {}",
            layout.display(&descriptor_path)
        )),
        PatchOutcome::Unchanged => {}
    }
    Ok(Some(outcome))
}

/// Getter and setter for one field, indented for a class body
fn accessor_pair(ty: &str, name: &str) -> String {
    let cap = crate::naming::capitalize(name);
    format!(
        "    public {ty} get{cap}() {{\n        return {name};\n    }}\n\n    public void set{cap}({ty} {name}) {{\n        this.{name} = {name};\n    }}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lines() {
        assert_eq!(
            UnitKind::Activity.usage(),
            vec![
                "Usage: gwt-boot activity <activity-name>".to_string(),
                "Example: gwt-boot activity dashboard".to_string(),
            ]
        );
        assert_eq!(UnitKind::Service.usage()[1], "Example: gwt-boot service UserAuth");
    }

    #[test]
    fn test_accessor_pair() {
        assert_eq!(
            accessor_pair("String", "name"),
            "    public String getName() {\n        return name;\n    }\n\n    public void setName(String name) {\n        this.name = name;\n    }\n"
        );
    }
}
