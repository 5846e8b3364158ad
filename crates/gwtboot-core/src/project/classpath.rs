//! GWT jar lookup in the local Maven repository

use std::path::{Path, PathBuf};

/// Group directories searched, newest coordinates first
const GWT_GROUPS: &[&str] = &["org/gwtproject", "com/google/gwt"];

const GWT_ARTIFACTS: &[&str] = &["gwt-user", "gwt-dev", "gwt-codeserver"];

/// Default local repository (`~/.m2/repository`)
pub fn default_maven_repository() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".m2").join("repository"))
}

fn locate_jar(repo: &Path, artifact: &str, version: &str) -> Option<PathBuf> {
    GWT_GROUPS
        .iter()
        .map(|group| {
            repo.join(group)
                .join(artifact)
                .join(version)
                .join(format!("{}-{}.jar", artifact, version))
        })
        .find(|jar| jar.is_file())
}

/// Classpath for the CodeServer and compiler, or `None` when the CodeServer jar is missing
pub fn gwt_classpath(repo: &Path, version: &str, project_root: &Path) -> Option<String> {
    locate_jar(repo, "gwt-codeserver", version)?;

    let mut entries = vec![
        project_root.join("src/main/java"),
        project_root.join("target/classes"),
    ];
    entries.extend(
        GWT_ARTIFACTS
            .iter()
            .filter_map(|artifact| locate_jar(repo, artifact, version)),
    );

    tracing::debug!(jars = entries.len() - 2, "built GWT classpath for {}", version);

    std::env::join_paths(entries)
        .ok()
        .map(|joined| joined.to_string_lossy().into_owned())
}
