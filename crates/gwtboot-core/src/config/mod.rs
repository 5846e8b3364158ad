//! Toolchain and command settings
//!
//! Settings are assembled from CLI flags plus environment overrides. The
//! lookup is injected so tests never touch the process environment.

use crate::product::ProductConfig;
use crate::project::default_maven_repository;
use std::path::PathBuf;

/// Default JVM heap for the GWT compiler and CodeServer, in MB
pub const DEFAULT_MEMORY_MB: u32 = 2048;

/// External executables and the local repository they resolve against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub build_tool: String,
    pub java: String,
    pub maven_repo: Option<PathBuf>,
}

impl Toolchain {
    /// Read overrides from the process environment
    pub fn from_env<P: ProductConfig>(product: &P) -> Self {
        Self::from_lookup(product, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<P, F>(product: &P, lookup: F) -> Self
    where
        P: ProductConfig,
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            build_tool: get(product.build_tool_env())
                .unwrap_or_else(|| product.default_build_tool().to_string()),
            java: get(product.java_env()).unwrap_or_else(|| "java".to_string()),
            maven_repo: get(product.maven_repo_env())
                .map(PathBuf::from)
                .or_else(default_maven_repository),
        }
    }
}

/// Settings for `dev`
#[derive(Debug, Clone)]
pub struct DevSettings {
    pub memory_mb: u32,
    pub toolchain: Toolchain,
}

/// Settings for `jar`
#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub memory_mb: u32,
    pub toolchain: Toolchain,
}
