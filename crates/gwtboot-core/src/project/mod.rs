//! Project inspection
//!
//! Everything here is recomputed on each invocation from the project's
//! `pom.xml` and source tree; nothing is cached between runs.

pub mod classpath;
pub mod modules;
pub mod version;

use crate::error::{io_err, BootError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub use classpath::{default_maven_repository, gwt_classpath};
pub use modules::{find_entry_modules, find_main_module, find_module_descriptors, MODULE_SUFFIX};
pub use version::{check_compatibility, MINIMUM_GWT_VERSION};

/// File whose presence marks a project root
pub const PROJECT_MARKER: &str = "pom.xml";

static START_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<start-class>([a-zA-Z0-9_.]+)\.Application</start-class>").expect("valid regex")
});

static GWT_VERSION_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<gwt\.version>\s*([^<\s]+)\s*</gwt\.version>").expect("valid regex")
});

static GWT_ARTIFACT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<artifactId>gwt-(?:user|dev|servlet|codeserver)</artifactId>\s*<version>\s*([^<\s]+)\s*</version>",
    )
    .expect("valid regex")
});

/// Package prefix of the `<start-class>…Application</start-class>` declaration
pub fn find_root_package(pom: &str) -> Option<String> {
    START_CLASS.captures(pom).map(|caps| caps[1].to_string())
}

/// GWT version from the `gwt.version` property, else from a GWT artifact dependency
pub fn find_framework_version(pom: &str) -> Option<String> {
    if let Some(caps) = GWT_VERSION_PROPERTY.captures(pom) {
        return Some(caps[1].to_string());
    }
    GWT_ARTIFACT_VERSION
        .captures_iter(pom)
        .map(|caps| caps[1].to_string())
        .find(|v| !v.starts_with("${"))
}

/// Read-only view of a recognised project
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    pub root: PathBuf,
    pub root_package: String,
    pub framework_version: Option<String>,
}

impl ProjectDescriptor {
    /// Inspect `root`, failing with `ProjectNotRecognized` if it is not a GWT Boot project
    pub fn load(root: &Path) -> Result<Self> {
        let pom_path = root.join(PROJECT_MARKER);
        if !pom_path.exists() {
            return Err(BootError::ProjectNotRecognized(
                "pom.xml not found. Make sure you're in the root of a GWT Boot project.".into(),
            ));
        }

        let pom = std::fs::read_to_string(&pom_path).map_err(io_err(&pom_path))?;
        let root_package = find_root_package(&pom).ok_or_else(|| {
            BootError::ProjectNotRecognized("Could not determine package from pom.xml".into())
        })?;

        tracing::debug!(package = %root_package, "recognised project at {}", root.display());

        Ok(Self {
            root: root.to_path_buf(),
            root_package,
            framework_version: find_framework_version(&pom),
        })
    }

    /// Like [`load`](Self::load), but the GWT version is mandatory
    pub fn load_with_version(root: &Path) -> Result<(Self, String)> {
        let project = Self::load(root)?;
        let version = project.framework_version.clone().ok_or_else(|| {
            BootError::ProjectNotRecognized("Could not determine GWT version from pom.xml".into())
        })?;
        Ok((project, version))
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(&self.root, &self.root_package)
    }
}

/// Well-known directories of a project
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub source_root: PathBuf,
    pub java_base: PathBuf,
    pub resources_base: PathBuf,
    pub build_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: &Path, root_package: &str) -> Self {
        let source_root = root.join("src/main/java");
        let java_base = root_package
            .split('.')
            .fold(source_root.clone(), |path, segment| path.join(segment));
        Self {
            root: root.to_path_buf(),
            java_base,
            source_root,
            resources_base: root.join("src/main/resources"),
            build_dir: root.join("target"),
        }
    }

    /// `path` relative to the project root, for display
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
