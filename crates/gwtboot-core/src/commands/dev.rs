use super::production_build::resolve_gwt_inputs;
use crate::config::DevSettings;
use crate::console;
use crate::dev::{
    print_server_line, register_directories, run_loop, start_watcher, Coordinator, LoopContext,
    LoopExit, WatchSession, COMPILE_LOG, WATCH_EXCLUSION,
};
use crate::error::{BootError, Result, SubprocessFailure};
use crate::maven::Maven;
use crate::process::{spawn_streaming, PidFile, PidStatus};
use crate::project::{check_compatibility, ProjectDescriptor, MINIMUM_GWT_VERSION};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// PID file of the background CodeServer, relative to the project root
pub const PID_FILE: &str = "target/gwt-codeserver.pid";

/// How long the CodeServer must survive before it counts as started
pub const CODESERVER_START_CHECK: Duration = Duration::from_secs(2);

/// Exit code reported after Ctrl-C
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Refuse to start over a live CodeServer; clear a stale PID file
pub fn check_pid_file(pidfile: &PidFile) -> Result<()> {
    match pidfile.status()? {
        PidStatus::Absent => Ok(()),
        PidStatus::Running(pid) => Err(BootError::AlreadyRunning(pid)),
        PidStatus::Stale(pid) => {
            tracing::debug!(?pid, "removing stale pid file");
            pidfile.remove()
        }
    }
}

/// Run the CodeServer, app server and recompile-on-save loop
///
/// Returns the process exit code: the app server's own code, or 130 after Ctrl-C.
pub async fn dev(root: &Path, settings: &DevSettings) -> Result<i32> {
    let (project, version) = ProjectDescriptor::load_with_version(root)?;
    if let Some(warning) = check_compatibility(&version, MINIMUM_GWT_VERSION) {
        console::warning(warning);
    }
    let inputs = resolve_gwt_inputs(&project, version, settings.toolchain.maven_repo.as_deref())?;
    let layout = project.layout();

    let pidfile = PidFile::new(root.join(PID_FILE));
    check_pid_file(&pidfile)?;

    console::banner("GWT Boot Dev Mode");
    console::info(format!("GWT version: {}", inputs.version));
    console::info(format!("Modules: {}", inputs.modules.join(", ")));
    console::blank();

    let mvn = Maven::new(&settings.toolchain, root);

    console::info("Starting GWT CodeServer...");
    let mut codeserver = spawn_streaming(
        &mvn.code_server(settings.memory_mb, &inputs.classpath, &inputs.modules),
        "codeserver",
    )?;
    if let Some(mut output) = codeserver.take_output() {
        tokio::spawn(async move {
            while let Some(line) = output.recv().await {
                print_server_line(&line);
            }
        });
    }

    tokio::time::sleep(CODESERVER_START_CHECK).await;
    if !codeserver.is_alive() {
        let code = codeserver.wait().await?;
        return Err(SubprocessFailure::ExitStatus {
            step: "GWT CodeServer startup".into(),
            code,
        }
        .into());
    }
    if let Some(pid) = codeserver.pid() {
        pidfile.write(pid)?;
    }
    console::success("CodeServer started");

    let outcome = serve(root, &layout.source_root, &mvn).await;

    codeserver.kill().await;
    if let Err(e) = pidfile.remove() {
        console::warning(format!("Could not remove {}: {}", PID_FILE, e));
    }
    outcome
}

async fn serve(root: &Path, source_root: &Path, mvn: &Maven<'_>) -> Result<i32> {
    console::info("Starting Spring Boot...");
    let mut server = spawn_streaming(&mvn.spring_boot_run(), "app")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let dirs = register_directories(source_root, WATCH_EXCLUSION);
    let _watcher = match start_watcher(&dirs, tx.clone()) {
        Ok(watcher) => {
            console::info(format!("Watching {} for changes", source_root.display()));
            Some(watcher)
        }
        Err(e) => {
            console::warning(format!("{}; server-side changes will not be recompiled", e));
            None
        }
    };
    console::blank();

    let ctx = LoopContext {
        root: root.to_path_buf(),
        build: mvn.quiet_compile(),
        log: root.join(COMPILE_LOG),
    };
    let mut coordinator = Coordinator::new(WatchSession::new(Instant::now()));
    let exit = run_loop(ctx, &mut server, &mut coordinator, tx, rx).await;

    console::blank();
    console::info("Shutting down...");
    server.kill().await;

    match exit? {
        LoopExit::Interrupted => Ok(INTERRUPTED_EXIT_CODE),
        LoopExit::ServerExited(code) => Ok(code),
    }
}
