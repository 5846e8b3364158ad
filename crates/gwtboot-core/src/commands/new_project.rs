use crate::config::Toolchain;
use crate::console;
use crate::error::{BootError, Result};
use crate::maven::{archetype_generate, ProjectCoordinates};
use crate::process::{self, ensure_success};
use crate::product::ProductConfig;
use crate::tui::Prompter;
use std::path::{Path, PathBuf};

pub const DEFAULT_VERSION: &str = "0.0.1-SNAPSHOT";

/// Maven wrapper scripts that must be executable after generation
const WRAPPER_SCRIPTS: &[&str] = &["mvnw", "mvnw.cmd"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewProjectOutcome {
    Created(PathBuf),
    Cancelled,
}

/// Ask for the project coordinates; `artifact_id` skips that prompt when given
pub fn collect_coordinates(
    artifact_id: Option<&str>,
    prompter: &mut dyn Prompter,
) -> Result<ProjectCoordinates> {
    let group_id = required(prompter.input("Enter groupId (e.g., com.mycompany)", None)?, "groupId")?;

    let artifact_id = match artifact_id.map(str::trim).filter(|a| !a.is_empty()) {
        Some(given) => given.to_lowercase(),
        None => required(prompter.input("Enter artifactId (e.g., myapp)", None)?, "artifactId")?,
    };

    let version = typed_or_default(prompter.input("Enter version", Some(DEFAULT_VERSION))?, DEFAULT_VERSION);

    let default_package = format!("{}.{}", group_id, artifact_id);
    let package = prompter
        .input("Enter package name", Some(&default_package))?
        .trim()
        .to_lowercase();

    Ok(ProjectCoordinates {
        group_id,
        artifact_id,
        version,
        package,
    })
}

/// Typed answers are lowercased; the untouched default is kept as is
fn typed_or_default(answer: String, default: &str) -> String {
    let answer = answer.trim();
    if answer.is_empty() || answer == default {
        default.to_string()
    } else {
        answer.to_lowercase()
    }
}

fn required(value: String, field: &str) -> Result<String> {
    let value = value.trim().to_lowercase();
    if value.is_empty() {
        return Err(BootError::validation(format!("{} cannot be empty", field), Vec::new()));
    }
    Ok(value)
}

/// Generate a project under `parent` from the product's archetype
pub async fn new_project<P: ProductConfig>(
    product: &P,
    toolchain: &Toolchain,
    artifact_id: Option<&str>,
    parent: &Path,
    prompter: &mut dyn Prompter,
) -> Result<NewProjectOutcome> {
    console::banner(&format!("{} Project Generator", product.display_name()));

    let coords = collect_coordinates(artifact_id, prompter)?;
    let project_dir = parent.join(&coords.artifact_id);
    if project_dir.exists() {
        return Err(BootError::validation(
            format!("Directory '{}' already exists", coords.artifact_id),
            Vec::new(),
        ));
    }

    console::blank();
    console::info("Summary:");
    console::plain("--------");
    console::plain(format!("groupId:    {}", coords.group_id));
    console::plain(format!("artifactId: {}", coords.artifact_id));
    console::plain(format!("version:    {}", coords.version));
    console::plain(format!("package:    {}", coords.package));
    console::blank();

    if !prompter.confirm("Generate project with these settings?", true)? {
        console::warning("Project generation cancelled.");
        return Ok(NewProjectOutcome::Cancelled);
    }

    console::blank();
    console::info("Generating project...");
    console::blank();

    let spec = archetype_generate(toolchain, &product.archetype(), &coords, parent);
    ensure_success("Project generation", process::run(&spec).await?)?;

    mark_wrappers_executable(&project_dir)?;

    console::success_banner("Project generated successfully!");
    for line in completion_lines(product, &project_dir) {
        console::plain(line);
    }
    console::blank();

    Ok(NewProjectOutcome::Created(project_dir))
}

/// Next steps and the documentation link shown after generation
pub fn completion_lines<P: ProductConfig>(product: &P, project_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Next steps:".to_string()];
    lines.extend(product.next_steps(project_dir).into_iter().map(|s| format!("  {}", s)));
    lines.push(String::new());
    lines.push(format!("Documentation: {}", product.docs_url()));
    lines
}

/// Set the executable bits on the Maven wrapper scripts that exist
pub fn mark_wrappers_executable(project_dir: &Path) -> Result<()> {
    for script in WRAPPER_SCRIPTS {
        let path = project_dir.join(script);
        if path.is_file() {
            make_executable(&path)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use crate::error::io_err;
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path).map_err(io_err(path))?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms).map_err(io_err(path))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ScriptedPrompter;

    #[test]
    fn test_coordinates_use_defaults_and_lowercase() {
        let mut prompter = ScriptedPrompter::new(["Com.Acme", "", ""]);
        let coords = collect_coordinates(Some("Shop"), &mut prompter).unwrap();
        assert_eq!(
            coords,
            ProjectCoordinates {
                group_id: "com.acme".into(),
                artifact_id: "shop".into(),
                version: DEFAULT_VERSION.into(),
                package: "com.acme.shop".into(),
            }
        );
        assert_eq!(prompter.asked().len(), 3);
    }

    #[test]
    fn test_coordinates_prompt_for_artifact() {
        let mut prompter = ScriptedPrompter::new(["com.acme", "Billing", "1.2.0", "com.acme.pay"]);
        let coords = collect_coordinates(None, &mut prompter).unwrap();
        assert_eq!(coords.artifact_id, "billing");
        assert_eq!(coords.version, "1.2.0");
        assert_eq!(coords.package, "com.acme.pay");
    }

    #[test]
    fn test_typed_version_is_lowercased() {
        let mut prompter = ScriptedPrompter::new(["com.acme", "1.0-SNAPSHOT", ""]);
        let coords = collect_coordinates(Some("shop"), &mut prompter).unwrap();
        assert_eq!(coords.version, "1.0-snapshot");

        let mut prompter = ScriptedPrompter::new(["com.acme", DEFAULT_VERSION, ""]);
        let coords = collect_coordinates(Some("shop"), &mut prompter).unwrap();
        assert_eq!(coords.version, DEFAULT_VERSION);
    }

    #[test]
    fn test_completion_lines_end_with_docs_link() {
        use crate::product::TestProduct;

        let lines = completion_lines(&TestProduct, Path::new("/work/shop"));
        assert_eq!(lines[0], "Next steps:");
        assert_eq!(lines[1], "  cd /work/shop");
        assert_eq!(lines.last().unwrap(), "Documentation: https://example.invalid/docs");
    }

    #[test]
    fn test_blank_group_id_is_rejected() {
        let mut prompter = ScriptedPrompter::new(["   "]);
        let err = collect_coordinates(Some("shop"), &mut prompter).unwrap_err();
        assert_eq!(err.to_string(), "groupId cannot be empty");
    }

    #[cfg(unix)]
    #[test]
    fn test_wrappers_become_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mvnw = dir.path().join("mvnw");
        std::fs::write(&mvnw, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&mvnw, std::fs::Permissions::from_mode(0o644)).unwrap();

        mark_wrappers_executable(dir.path()).unwrap();
        let mode = std::fs::metadata(&mvnw).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
