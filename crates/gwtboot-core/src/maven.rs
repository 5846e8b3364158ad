//! Command lines for Maven and the GWT tools

use crate::config::Toolchain;
use crate::process::CommandSpec;
use crate::product::Archetype;
use std::path::Path;

/// Java release the GWT compiler and CodeServer translate
pub const SOURCE_LEVEL: &str = "17";

/// Where compiled GWT output is served from
pub const WAR_DIR: &str = "target/classes/static";

const GWT_COMPILER: &str = "com.google.gwt.dev.Compiler";
const GWT_CODESERVER: &str = "com.google.gwt.dev.codeserver.CodeServer";

/// Coordinates of a project to create from the archetype
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub package: String,
}

/// Builds command lines against one project root
#[derive(Debug, Clone)]
pub struct Maven<'a> {
    toolchain: &'a Toolchain,
    root: &'a Path,
}

impl<'a> Maven<'a> {
    pub fn new(toolchain: &'a Toolchain, root: &'a Path) -> Self {
        Self { toolchain, root }
    }

    fn mvn<I>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = &'static str>,
    {
        CommandSpec::new(&self.toolchain.build_tool)
            .args(args)
            .current_dir(self.root)
    }

    fn java(&self, memory_mb: u32, classpath: &str, main_class: &str) -> CommandSpec {
        CommandSpec::new(&self.toolchain.java)
            .arg(format!("-Xmx{}m", memory_mb))
            .args(["-cp", classpath, main_class])
            .current_dir(self.root)
    }

    pub fn clean(&self) -> CommandSpec {
        self.mvn(["clean"])
    }

    pub fn compile(&self) -> CommandSpec {
        self.mvn(["compile"])
    }

    /// Incremental compile used by the dev loop
    pub fn quiet_compile(&self) -> CommandSpec {
        self.mvn(["compile", "-q"])
    }

    pub fn package(&self) -> CommandSpec {
        self.mvn(["package", "-DskipTests"])
    }

    pub fn spring_boot_run(&self) -> CommandSpec {
        self.mvn(["spring-boot:run"])
    }

    /// Optimised production compile of `modules` into the static resources
    pub fn gwt_compile(&self, memory_mb: u32, classpath: &str, modules: &[String]) -> CommandSpec {
        self.java(memory_mb, classpath, GWT_COMPILER)
            .args([
                "-war",
                WAR_DIR,
                "-sourceLevel",
                SOURCE_LEVEL,
                "-logLevel",
                "INFO",
                "-style",
                "OBFUSCATED",
                "-optimize",
                "9",
                "-extra",
                "target/extra",
                "-compileReport",
                "-XcompilerMetrics",
            ])
            .args(modules.iter().cloned())
    }

    /// Super Dev Mode CodeServer for `modules`
    pub fn code_server(&self, memory_mb: u32, classpath: &str, modules: &[String]) -> CommandSpec {
        self.java(memory_mb, classpath, GWT_CODESERVER)
            .args([
                "-src",
                "src/main/java",
                "-launcherDir",
                WAR_DIR,
                "-sourceLevel",
                SOURCE_LEVEL,
                "-logLevel",
                "INFO",
            ])
            .args(modules.iter().cloned())
    }
}

/// `mvn archetype:generate` for a new project, run in `parent`
pub fn archetype_generate(
    toolchain: &Toolchain,
    archetype: &Archetype,
    coords: &ProjectCoordinates,
    parent: &Path,
) -> CommandSpec {
    CommandSpec::new(&toolchain.build_tool)
        .args([
            "archetype:generate".to_string(),
            format!("-DarchetypeGroupId={}", archetype.group_id),
            format!("-DarchetypeArtifactId={}", archetype.artifact_id),
            format!("-DarchetypeVersion={}", archetype.version),
            format!("-DgroupId={}", coords.group_id),
            format!("-DartifactId={}", coords.artifact_id),
            format!("-Dversion={}", coords.version),
            format!("-Dpackage={}", coords.package),
            "-DinteractiveMode=false".to_string(),
        ])
        .current_dir(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolchain() -> Toolchain {
        Toolchain {
            build_tool: "mvn".into(),
            java: "java".into(),
            maven_repo: None,
        }
    }

    #[test]
    fn test_maven_steps() {
        let tc = toolchain();
        let mvn = Maven::new(&tc, Path::new("/work/shop"));
        assert_eq!(mvn.quiet_compile().to_string(), "mvn compile -q");
        assert_eq!(mvn.package().to_string(), "mvn package -DskipTests");
        assert_eq!(
            mvn.spring_boot_run().current_dir.as_deref(),
            Some(Path::new("/work/shop"))
        );
    }

    #[test]
    fn test_gwt_compiler_command() {
        let tc = toolchain();
        let mvn = Maven::new(&tc, Path::new("."));
        let modules = vec!["com.acme.App".to_string(), "com.acme.admin.Admin".to_string()];
        assert_eq!(
            mvn.gwt_compile(4096, "cp", &modules).to_string(),
            "java -Xmx4096m -cp cp com.google.gwt.dev.Compiler -war target/classes/static \
             -sourceLevel 17 -logLevel INFO -style OBFUSCATED -optimize 9 -extra target/extra \
             -compileReport -XcompilerMetrics com.acme.App com.acme.admin.Admin"
        );
    }

    #[test]
    fn test_code_server_command() {
        let tc = toolchain();
        let mvn = Maven::new(&tc, Path::new("."));
        assert_eq!(
            mvn.code_server(2048, "cp", &["com.acme.App".to_string()]).to_string(),
            "java -Xmx2048m -cp cp com.google.gwt.dev.codeserver.CodeServer -src src/main/java \
             -launcherDir target/classes/static -sourceLevel 17 -logLevel INFO com.acme.App"
        );
    }

    #[test]
    fn test_archetype_generate() {
        let archetype = Archetype {
            group_id: "com.edusoftwerks",
            artifact_id: "gwt-boot-archetype",
            version: "1.0.0",
        };
        let coords = ProjectCoordinates {
            group_id: "com.acme".into(),
            artifact_id: "shop".into(),
            version: "0.0.1-SNAPSHOT".into(),
            package: "com.acme.shop".into(),
        };
        let spec = archetype_generate(&toolchain(), &archetype, &coords, Path::new("/work"));
        assert_eq!(spec.args[0], "archetype:generate");
        assert!(spec.args.contains(&"-DarchetypeArtifactId=gwt-boot-archetype".to_string()));
        assert!(spec.args.contains(&"-Dpackage=com.acme.shop".to_string()));
        assert_eq!(spec.args.last().map(String::as_str), Some("-DinteractiveMode=false"));
    }
}
