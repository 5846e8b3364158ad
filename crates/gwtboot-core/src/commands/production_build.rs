use crate::config::BuildSettings;
use crate::console;
use crate::error::{BootError, Result};
use crate::maven::Maven;
use crate::process::{self, ensure_success, CommandSpec};
use crate::project::{
    check_compatibility, find_entry_modules, gwt_classpath, ProjectDescriptor, MINIMUM_GWT_VERSION,
};
use std::path::{Path, PathBuf};

/// Everything the GWT compile step needs, resolved before any step runs
#[derive(Debug, Clone)]
pub struct GwtInputs {
    pub version: String,
    pub modules: Vec<String>,
    pub classpath: String,
}

/// Resolve version, entry modules and classpath, or explain what is missing
pub fn resolve_gwt_inputs(
    project: &ProjectDescriptor,
    version: String,
    maven_repo: Option<&Path>,
) -> Result<GwtInputs> {
    let layout = project.layout();
    let modules = find_entry_modules(&layout.source_root);
    if modules.is_empty() {
        return Err(BootError::ProjectNotRecognized(
            "Could not find any GWT modules with an entry point in src/main/java".into(),
        ));
    }

    let repo = maven_repo.ok_or_else(|| {
        BootError::ProjectNotRecognized("Could not locate the local Maven repository".into())
    })?;
    let classpath = gwt_classpath(repo, &version, &project.root).ok_or_else(|| {
        BootError::ProjectNotRecognized(format!(
            "GWT {} CodeServer jar not found in {}. Run 'mvn compile' once to download it.",
            version,
            repo.display()
        ))
    })?;

    Ok(GwtInputs {
        version,
        modules,
        classpath,
    })
}

/// Four-step production build: clean, compile, GWT compile, package
pub async fn production_build(root: &Path, settings: &BuildSettings) -> Result<()> {
    console::banner("Building Production JAR");

    let (project, version) = ProjectDescriptor::load_with_version(root)?;
    if let Some(warning) = check_compatibility(&version, MINIMUM_GWT_VERSION) {
        console::warning(warning);
    }
    let inputs = resolve_gwt_inputs(&project, version, settings.toolchain.maven_repo.as_deref())?;

    let mvn = Maven::new(&settings.toolchain, root);
    let steps: [(&str, &str, CommandSpec); 4] = [
        ("Cleaning previous builds...", "Clean", mvn.clean()),
        ("Compiling Java sources...", "Java compilation", mvn.compile()),
        (
            "Compiling GWT code to optimized JavaScript...",
            "GWT compilation",
            mvn.gwt_compile(settings.memory_mb, &inputs.classpath, &inputs.modules),
        ),
        ("Creating Spring Boot fat JAR...", "Maven package", mvn.package()),
    ];

    for (index, (heading, step, spec)) in steps.iter().enumerate() {
        console::info(format!("Step {}: {}", index + 1, heading));
        if index == 2 {
            console::info(format!("Using GWT version: {}", inputs.version));
            console::info(format!("Found {} GWT module(s):", inputs.modules.len()));
            for module in &inputs.modules {
                console::item(module);
            }
        }
        console::blank();
        ensure_success(step, process::run(spec).await?)?;
        console::blank();
    }

    console::success_banner("Production JAR built successfully!");
    let jar = find_built_jar(&project.layout().build_dir)
        .map(|jar| project.layout().display(&jar))
        .unwrap_or_else(|| "target/*.jar".to_string());
    console::info(format!("JAR location: {}", jar));
    console::blank();
    console::info("To run the application:");
    console::info(format!("  java -jar {}", jar));
    console::blank();
    Ok(())
}

/// The packaged jar in `build_dir`, ignoring repackaging leftovers
pub fn find_built_jar(build_dir: &Path) -> Option<PathBuf> {
    let mut jars: Vec<PathBuf> = std::fs::read_dir(build_dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "jar"))
        .filter(|p| {
            let name = p.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            !name.ends_with("-sources.jar") && !name.ends_with("-javadoc.jar")
        })
        .collect();
    jars.sort();
    jars.into_iter().next()
}
