//! Product configuration trait for the CLI binary
//!
//! The binary implements this once (`GwtBootConfig`); the library only
//! talks to the trait, so archetype coordinates, install locations and
//! environment variable names live in one place.

use std::path::Path;

/// Maven coordinates of the project archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Archetype {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
    pub version: &'static str,
}

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (CLI command, install directory)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Archetype used by `app`
    fn archetype(&self) -> Archetype;

    /// Environment variable overriding the build tool executable
    fn build_tool_env(&self) -> &'static str;

    /// Environment variable overriding the Java launcher
    fn java_env(&self) -> &'static str;

    /// Environment variable overriding the local Maven repository
    fn maven_repo_env(&self) -> &'static str;

    /// Build tool executable when no override is set
    fn default_build_tool(&self) -> &'static str {
        if cfg!(windows) {
            "mvn.cmd"
        } else {
            "mvn"
        }
    }

    /// File name of the installed CLI jar
    fn jar_name(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Instructions printed after a project was created
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}

/// Minimal product used by unit tests
#[cfg(test)]
#[derive(Clone)]
pub(crate) struct TestProduct;

#[cfg(test)]
impl ProductConfig for TestProduct {
    fn name(&self) -> &'static str {
        "gwt-boot"
    }

    fn display_name(&self) -> &'static str {
        "GWT Boot"
    }

    fn cli_description(&self) -> &'static str {
        "test product"
    }

    fn archetype(&self) -> Archetype {
        Archetype {
            group_id: "com.edusoftwerks",
            artifact_id: "gwt-boot-archetype",
            version: "1.0.0",
        }
    }

    fn build_tool_env(&self) -> &'static str {
        "T_MVN"
    }

    fn java_env(&self) -> &'static str {
        "T_JAVA"
    }

    fn maven_repo_env(&self) -> &'static str {
        "T_REPO"
    }

    fn jar_name(&self) -> &'static str {
        "gwt-boot-cli.jar"
    }

    fn docs_url(&self) -> &'static str {
        "https://example.invalid/docs"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        vec![format!("cd {}", dir.display())]
    }
}
