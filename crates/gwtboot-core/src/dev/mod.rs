//! The dev loop
//!
//! Independent producers (the notify callback, output forwarders, build
//! tasks) send [`DevEvent`]s over one channel. A single [`Coordinator`]
//! owns the debounce and reload timing state; [`run_loop`] selects over
//! that channel, the app server's output and exit, and Ctrl-C.
//!
//! A build does not hold back the next trigger: if one outlives the
//! debounce window, two builds can overlap.

mod reload;
mod watcher;

pub use reload::{ReloadTracker, RESTART_MARKER};
pub use watcher::{
    register_directories, start_watcher, WatchSession, DEBOUNCE_WINDOW, GRACE_PERIOD,
    WATCHED_EXTENSION, WATCH_EXCLUSION,
};

use crate::console;
use crate::process::{self, CommandSpec, OutputLine, Stream, SupervisedProcess};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Build log, relative to the project root
pub const COMPILE_LOG: &str = "target/gwt-boot-compile.log";

/// Messages consumed by the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevEvent {
    SourceChanged(PathBuf),
    WatchFailed(String),
    WatchClosed,
    BuildFinished(i32),
}

/// What the loop should do in response to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Ignore,
    Compile(PathBuf),
    Compiled,
    CompileFailed(i32),
    WatchError(String),
    WatchStopped,
}

/// Sole owner of the dev loop's timing state
#[derive(Debug)]
pub struct Coordinator {
    session: WatchSession,
    reload: ReloadTracker,
}

impl Coordinator {
    pub fn new(session: WatchSession) -> Self {
        Self {
            session,
            reload: ReloadTracker::default(),
        }
    }

    pub fn on_event(&mut self, event: DevEvent, now: Instant) -> Step {
        match event {
            DevEvent::SourceChanged(path) => {
                if self.session.on_change(&path, now) {
                    Step::Compile(path)
                } else {
                    Step::Ignore
                }
            }
            DevEvent::BuildFinished(0) => {
                self.reload.build_succeeded(now);
                Step::Compiled
            }
            DevEvent::BuildFinished(code) => Step::CompileFailed(code),
            DevEvent::WatchFailed(message) => {
                tracing::warn!("watcher error: {}", message);
                Step::WatchError(message)
            }
            DevEvent::WatchClosed => Step::WatchStopped,
        }
    }

    /// Whether a successful build is still waiting for the server restart
    pub fn awaiting_restart(&self) -> bool {
        self.reload.awaiting_restart()
    }

    /// Reload time, if `line` is the restart marker following a build
    pub fn on_server_line(&mut self, line: &str, now: Instant) -> Option<Duration> {
        self.reload.observe(line, now)
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    ServerExited(i32),
    Interrupted,
}

/// Fixed inputs of the loop
#[derive(Debug, Clone)]
pub struct LoopContext {
    pub root: PathBuf,
    pub build: CommandSpec,
    pub log: PathBuf,
}

/// Drive the dev loop until the app server exits or Ctrl-C arrives
///
/// When interrupted the app server is still running; the caller kills it.
pub async fn run_loop(
    ctx: LoopContext,
    server: &mut SupervisedProcess,
    coordinator: &mut Coordinator,
    tx: mpsc::UnboundedSender<DevEvent>,
    mut events: mpsc::UnboundedReceiver<DevEvent>,
) -> crate::error::Result<LoopExit> {
    let mut output = server.take_output();
    let mut output_open = output.is_some();
    let mut watching = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let event = tokio::select! {
            line = recv_line(&mut output), if output_open => {
                match line {
                    Some(line) => {
                        print_server_line(&line);
                        if let Some(elapsed) = coordinator.on_server_line(&line.text, Instant::now()) {
                            console::success(format!("Reloaded in {:.1}s", elapsed.as_secs_f64()));
                        }
                    }
                    None => output_open = false,
                }
                continue;
            }
            event = events.recv(), if watching => event.unwrap_or(DevEvent::WatchClosed),
            status = server.wait() => {
                let code = status?;
                if coordinator.awaiting_restart() {
                    console::warning("App server exited before restarting after the last compile");
                }
                return Ok(LoopExit::ServerExited(code));
            }
            _ = &mut ctrl_c => return Ok(LoopExit::Interrupted),
        };

        match coordinator.on_event(event, Instant::now()) {
            Step::Ignore => {}
            Step::Compile(path) => {
                console::info(format!("Change detected: {}", relative(&ctx.root, &path)));
                console::info("Compiling...");
                spawn_build(&ctx, tx.clone());
            }
            Step::Compiled => console::success("Compilation successful, waiting for restart..."),
            Step::CompileFailed(code) => console::error(format!(
                "Compilation failed (exit code {}), see {}",
                code, COMPILE_LOG
            )),
            Step::WatchError(message) => console::warning(format!("File watcher error: {}", message)),
            Step::WatchStopped => {
                console::warning("File watcher stopped; changes will no longer be compiled");
                watching = false;
            }
        }
    }
}

async fn recv_line(output: &mut Option<mpsc::Receiver<OutputLine>>) -> Option<OutputLine> {
    match output {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn spawn_build(ctx: &LoopContext, tx: mpsc::UnboundedSender<DevEvent>) {
    let build = ctx.build.clone();
    let log = ctx.log.clone();
    tokio::spawn(async move {
        let code = match process::run_logged(&build, &log).await {
            Ok(code) => code,
            Err(e) => {
                console::error(e.to_string());
                -1
            }
        };
        let _ = tx.send(DevEvent::BuildFinished(code));
    });
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Echo one tagged output line
pub fn print_server_line(line: &OutputLine) {
    let prefix = format!("[{}]", line.tag).dimmed();
    match line.stream {
        Stream::Stdout => println!("{} {}", prefix, line.text),
        Stream::Stderr => eprintln!("{} {}", prefix, line.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator(start: Instant) -> Coordinator {
        Coordinator::new(WatchSession::new(start))
    }

    #[test]
    fn test_change_burst_compiles_twice() {
        let start = Instant::now();
        let mut coord = coordinator(start);
        let base = start + GRACE_PERIOD;

        let compiles: Vec<Step> = [0u64, 1, 2, 8]
            .into_iter()
            .map(|s| {
                coord.on_event(
                    DevEvent::SourceChanged(PathBuf::from("src/main/java/com/acme/Foo.java")),
                    base + Duration::from_secs(s),
                )
            })
            .filter(|step| matches!(step, Step::Compile(_)))
            .collect();
        assert_eq!(compiles.len(), 2);
    }

    #[test]
    fn test_successful_build_arms_reload_timer() {
        let start = Instant::now();
        let mut coord = coordinator(start);

        assert_eq!(coord.on_event(DevEvent::BuildFinished(0), start), Step::Compiled);
        let elapsed = coord.on_server_line("Started Application in 1.2 seconds", start + Duration::from_secs(2));
        assert_eq!(elapsed, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_failed_build_does_not_arm_reload_timer() {
        let start = Instant::now();
        let mut coord = coordinator(start);

        assert_eq!(coord.on_event(DevEvent::BuildFinished(1), start), Step::CompileFailed(1));
        assert_eq!(coord.on_server_line("Started Application in 1.2 seconds", start), None);
    }

    #[test]
    fn test_watch_events() {
        let mut coord = coordinator(Instant::now());
        assert_eq!(
            coord.on_event(DevEvent::WatchFailed("inotify limit".into()), Instant::now()),
            Step::WatchError("inotify limit".into())
        );
        assert_eq!(coord.on_event(DevEvent::WatchClosed, Instant::now()), Step::WatchStopped);
    }

    #[cfg(unix)]
    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh").args(["-c", script])
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_loop_compiles_once_and_returns_server_exit() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let ctx = LoopContext {
            root: root.clone(),
            build: sh("echo built"),
            log: root.join(COMPILE_LOG),
        };
        let mut server = process::spawn_streaming(
            &sh("sleep 2; echo 'Started Application in 1.0 seconds'; sleep 1; exit 7"),
            "app",
        )
        .unwrap();
        let mut coord = Coordinator::new(WatchSession::with_timing(
            Instant::now(),
            Duration::ZERO,
            DEBOUNCE_WINDOW,
        ));

        let (tx, rx) = mpsc::unbounded_channel();
        for _ in 0..2 {
            tx.send(DevEvent::SourceChanged(root.join("src/main/java/A.java"))).unwrap();
        }

        let exit = run_loop(ctx, &mut server, &mut coord, tx, rx).await.unwrap();
        assert_eq!(exit, LoopExit::ServerExited(7));
        assert!(!coord.awaiting_restart());

        let log = std::fs::read_to_string(root.join(COMPILE_LOG)).unwrap();
        assert_eq!(log.matches("built").count(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_server_exit_before_restart_leaves_reload_pending() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let ctx = LoopContext {
            root: root.clone(),
            build: sh("true"),
            log: root.join(COMPILE_LOG),
        };
        let mut server = process::spawn_streaming(&sh("sleep 2; exit 0"), "app").unwrap();
        let mut coord = Coordinator::new(WatchSession::with_timing(
            Instant::now(),
            Duration::ZERO,
            DEBOUNCE_WINDOW,
        ));

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(DevEvent::SourceChanged(root.join("A.java"))).unwrap();

        let exit = run_loop(ctx, &mut server, &mut coord, tx, rx).await.unwrap();
        assert_eq!(exit, LoopExit::ServerExited(0));
        assert!(coord.awaiting_restart());
    }
}
