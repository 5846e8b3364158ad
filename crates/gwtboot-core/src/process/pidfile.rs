use crate::error::{io_err, Result};
use std::path::{Path, PathBuf};
use sysinfo::{Pid, ProcessesToUpdate, System};

/// State of a PID file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidStatus {
    Absent,
    Running(u32),
    /// The recorded process is gone, or the file holds no valid PID
    Stale(Option<u32>),
}

/// Records the PID of a background process
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, pid: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        std::fs::write(&self.path, format!("{pid}\n")).map_err(io_err(&self.path))
    }

    /// `Ok(None)` if the file is missing or unparsable
    pub fn read(&self) -> Result<Option<u32>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.trim().parse().ok()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(&self.path)(e)),
        }
    }

    pub fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(&self.path)(e)),
        }
    }

    pub fn status(&self) -> Result<PidStatus> {
        if !self.path.exists() {
            return Ok(PidStatus::Absent);
        }
        Ok(match self.read()? {
            Some(pid) if is_running(pid) => PidStatus::Running(pid),
            pid => PidStatus::Stale(pid),
        })
    }
}

/// Whether a process with this PID currently exists
pub fn is_running(pid: u32) -> bool {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    // above the largest configurable pid_max
    const DEAD_PID: u32 = 4_194_400;

    #[test]
    fn test_absent_then_running() {
        let dir = tempfile::tempdir().unwrap();
        let pidfile = PidFile::new(dir.path().join("target/gwt-codeserver.pid"));
        assert_eq!(pidfile.status().unwrap(), PidStatus::Absent);

        pidfile.write(std::process::id()).unwrap();
        assert_eq!(pidfile.read().unwrap(), Some(std::process::id()));
        assert_eq!(
            pidfile.status().unwrap(),
            PidStatus::Running(std::process::id())
        );

        pidfile.remove().unwrap();
        assert_eq!(pidfile.status().unwrap(), PidStatus::Absent);
        pidfile.remove().unwrap();
    }

    #[test]
    fn test_stale_entries() {
        let dir = tempfile::tempdir().unwrap();
        let pidfile = PidFile::new(dir.path().join("cs.pid"));

        pidfile.write(DEAD_PID).unwrap();
        assert_eq!(pidfile.status().unwrap(), PidStatus::Stale(Some(DEAD_PID)));

        std::fs::write(pidfile.path(), "not a pid").unwrap();
        assert_eq!(pidfile.status().unwrap(), PidStatus::Stale(None));
    }
}
