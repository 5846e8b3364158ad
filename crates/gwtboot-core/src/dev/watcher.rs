//! Source watching and the debounce policy

use super::DevEvent;
use crate::error::Result;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use walkdir::WalkDir;

/// Substring of a root-relative path whose subtree is left to the CodeServer
pub const WATCH_EXCLUSION: &str = "client";

pub const WATCHED_EXTENSION: &str = "java";

/// Changes right after startup are ignored while the server boots
pub const GRACE_PERIOD: Duration = Duration::from_secs(3);

pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(5);

/// Every directory under `root` outside an excluded subtree, `root` first
pub fn register_directories(root: &Path, exclusion: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded(root, entry.path(), exclusion))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect()
}

fn is_excluded(root: &Path, path: &Path, exclusion: &str) -> bool {
    path.strip_prefix(root)
        .map(|rel| rel.to_string_lossy().contains(exclusion))
        .unwrap_or(false)
}

/// Decides which change events trigger a compile
#[derive(Debug, Clone)]
pub struct WatchSession {
    started: Instant,
    grace: Duration,
    debounce: Duration,
    last_compile: Option<Instant>,
}

impl WatchSession {
    pub fn new(started: Instant) -> Self {
        Self::with_timing(started, GRACE_PERIOD, DEBOUNCE_WINDOW)
    }

    pub fn with_timing(started: Instant, grace: Duration, debounce: Duration) -> Self {
        Self {
            started,
            grace,
            debounce,
            last_compile: None,
        }
    }

    /// Whether a change to `path` at `now` should start a compile
    pub fn on_change(&mut self, path: &Path, now: Instant) -> bool {
        if path.extension().and_then(|e| e.to_str()) != Some(WATCHED_EXTENSION) {
            return false;
        }
        if now.saturating_duration_since(self.started) < self.grace {
            tracing::debug!(path = %path.display(), "ignored during startup grace period");
            return false;
        }
        if let Some(last) = self.last_compile {
            if now.saturating_duration_since(last) < self.debounce {
                tracing::debug!(path = %path.display(), "debounced");
                return false;
            }
        }
        self.last_compile = Some(now);
        true
    }
}

/// Watch each of `dirs` (non-recursively), forwarding changes to `tx`
///
/// The returned watcher stops when dropped.
pub fn start_watcher(dirs: &[PathBuf], tx: UnboundedSender<DevEvent>) -> Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let events = match res {
            Ok(event) => match event.kind {
                EventKind::Create(_) | EventKind::Modify(_) => event
                    .paths
                    .into_iter()
                    .map(DevEvent::SourceChanged)
                    .collect(),
                _ => Vec::new(),
            },
            Err(e) => vec![DevEvent::WatchFailed(e.to_string())],
        };
        for event in events {
            // the receiver is gone once the loop has exited
            let _ = tx.send(event);
        }
    })?;

    for dir in dirs {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
    }
    tracing::debug!(directories = dirs.len(), "watching sources");
    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_register_skips_client_subtrees() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in [
            "com/acme/server",
            "com/acme/client/widgets",
            "com/acme/activities/home/client",
            "com/acme/clientapi",
            "com/acme/gwtclient",
        ] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }

        let dirs = register_directories(root, WATCH_EXCLUSION);
        assert_eq!(dirs[0], root);
        assert!(dirs.contains(&root.join("com/acme/server")));
        assert!(dirs.contains(&root.join("com/acme/activities/home")));
        assert!(!dirs.iter().any(|d| d.ends_with("client")));
        assert!(!dirs.contains(&root.join("com/acme/client/widgets")));
        assert!(!dirs.contains(&root.join("com/acme/clientapi")));
        assert!(!dirs.contains(&root.join("com/acme/gwtclient")));
    }

    #[test]
    fn test_exclusion_applies_below_root_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("myclient-app");
        fs::create_dir_all(root.join("com/acme/server")).unwrap();

        let dirs = register_directories(&root, WATCH_EXCLUSION);
        assert_eq!(dirs, vec![root.clone(), root.join("com"), root.join("com/acme"), root.join("com/acme/server")]);
    }

    #[tokio::test]
    async fn test_watcher_reports_new_sources() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _watcher = start_watcher(&[dir.path().to_path_buf()], tx).unwrap();

        fs::write(dir.path().join("Service.java"), "class Service {}").unwrap();

        let seen = tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(event) = rx.recv().await {
                if let DevEvent::SourceChanged(path) = event {
                    if path.ends_with("Service.java") {
                        return true;
                    }
                }
            }
            false
        })
        .await
        .unwrap_or(false);
        assert!(seen);
    }

    #[test]
    fn test_only_java_files_trigger() {
        let start = Instant::now();
        let mut session = WatchSession::new(start);
        let later = start + GRACE_PERIOD;
        assert!(!session.on_change(Path::new("a/App.gwt.xml"), later));
        assert!(!session.on_change(Path::new("a/notes"), later));
        assert!(session.on_change(Path::new("a/Service.java"), later));
    }

    #[test]
    fn test_grace_period_suppresses_early_changes() {
        let start = Instant::now();
        let mut session = WatchSession::new(start);
        assert!(!session.on_change(Path::new("A.java"), start + Duration::from_secs(2)));
        assert!(session.on_change(Path::new("A.java"), start + Duration::from_secs(3)));
    }

    #[test]
    fn test_burst_yields_two_compiles() {
        let start = Instant::now();
        let mut session = WatchSession::new(start);
        let base = start + GRACE_PERIOD;

        let triggers = [0, 1, 2, 8]
            .into_iter()
            .filter(|secs| session.on_change(Path::new("Foo.java"), base + Duration::from_secs(*secs)))
            .count();
        assert_eq!(triggers, 2);
    }
}
