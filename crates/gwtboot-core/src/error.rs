//! Error taxonomy shared by every command

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T, E = BootError> = std::result::Result<T, E>;

/// Failure while launching or running an external tool
#[derive(Debug, Error)]
pub enum SubprocessFailure {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Lost track of '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed (exit code {code})")]
    ExitStatus { step: String, code: i32 },
}

#[derive(Debug, Error)]
pub enum BootError {
    /// Blank or malformed user argument; `usage` holds hint lines
    #[error("{message}")]
    Validation { message: String, usage: Vec<String> },

    #[error("{0}")]
    ProjectNotRecognized(String),

    /// The user declined an overwrite confirmation for the named unit kind
    #[error("{0} generation cancelled.")]
    ConflictDeclined(String),

    #[error(transparent)]
    Subprocess(#[from] SubprocessFailure),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File watcher failed: {0}")]
    Watch(#[from] notify::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("CodeServer already running (PID {0})")]
    AlreadyRunning(u32),

    /// No install location exists; carries the product display name
    #[error("No {0} CLI installation detected.")]
    NotInstalled(String),

    #[error("{failed} file(s) could not be removed")]
    Uninstall { failed: usize },
}

impl BootError {
    pub fn validation(message: impl Into<String>, usage: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            usage,
        }
    }

    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Build a `map_err` adapter that attaches `path` to an I/O error
pub fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> BootError + '_ {
    move |source| BootError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_exits_one() {
        let errors = [
            BootError::validation("Model name is required", vec![]),
            BootError::ProjectNotRecognized("pom.xml not found".into()),
            BootError::ConflictDeclined("Model".into()),
            BootError::Uninstall { failed: 2 },
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = io_err(Path::new("src/Foo.java"))(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(err.to_string().starts_with("src/Foo.java"));
    }

    #[test]
    fn test_conflict_message() {
        let err = BootError::ConflictDeclined("Activity".into());
        assert_eq!(err.to_string(), "Activity generation cancelled.");
    }
}
