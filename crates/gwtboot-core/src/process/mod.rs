//! External tool execution
//!
//! Three flavours are needed: foreground steps with inherited stdio (`run`),
//! quiet steps whose output goes to a log file (`run_logged`), and
//! supervised background processes whose output is merged into one line
//! stream (`spawn_streaming`).

mod pidfile;

pub use pidfile::{is_running, PidFile, PidStatus};

use crate::error::{io_err, Result, SubprocessFailure};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

const OUTPUT_BUFFER: usize = 256;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> SubprocessFailure {
        SubprocessFailure::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(word: &str) -> std::borrow::Cow<'_, str> {
    if word.is_empty() || word.contains(char::is_whitespace) {
        format!("\"{}\"", word).into()
    } else {
        word.into()
    }
}

fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Turn a nonzero exit code into an error naming `step`
pub fn ensure_success(step: &str, code: i32) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(SubprocessFailure::ExitStatus {
            step: step.to_string(),
            code,
        }
        .into())
    }
}

/// Run in the foreground with inherited stdio; returns the exit code
pub async fn run(spec: &CommandSpec) -> Result<i32> {
    tracing::debug!(command = %spec, "running");
    let status = spec
        .command()
        .status()
        .await
        .map_err(|e| spec.spawn_error(e))?;
    Ok(exit_code(status))
}

/// Run with stdout and stderr appended to `log`
pub async fn run_logged(spec: &CommandSpec, log: &Path) -> Result<i32> {
    if let Some(parent) = log.parent() {
        std::fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let out = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log)
        .map_err(io_err(log))?;
    let err = out.try_clone().map_err(io_err(log))?;

    tracing::debug!(command = %spec, log = %log.display(), "running (logged)");
    let status = spec
        .command()
        .stdin(Stdio::null())
        .stdout(Stdio::from(out))
        .stderr(Stdio::from(err))
        .status()
        .await
        .map_err(|e| spec.spawn_error(e))?;
    Ok(exit_code(status))
}

/// Which pipe a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// One line of output from a supervised process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub tag: &'static str,
    pub stream: Stream,
    pub text: String,
}

/// A background process with its output forwarded line by line
#[derive(Debug)]
pub struct SupervisedProcess {
    program: String,
    child: Child,
    pid: Option<u32>,
    output: Option<mpsc::Receiver<OutputLine>>,
}

/// Spawn with piped output tagged `tag`; the child is killed if dropped
pub fn spawn_streaming(spec: &CommandSpec, tag: &'static str) -> Result<SupervisedProcess> {
    tracing::debug!(command = %spec, tag, "spawning");
    let mut child = spec
        .command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| spec.spawn_error(e))?;

    let (tx, rx) = mpsc::channel(OUTPUT_BUFFER);
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward(BufReader::new(stdout), tag, Stream::Stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward(BufReader::new(stderr), tag, Stream::Stderr, tx));
    }

    Ok(SupervisedProcess {
        program: spec.program.clone(),
        pid: child.id(),
        child,
        output: Some(rx),
    })
}

async fn forward<R>(reader: R, tag: &'static str, stream: Stream, tx: mpsc::Sender<OutputLine>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(text)) => {
                let line = OutputLine { tag, stream, text };
                if tx.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(tag, "error reading output: {}", e);
                break;
            }
        }
    }
}

impl SupervisedProcess {
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// The merged output stream; the channel closes once both pipes hit EOF
    pub fn take_output(&mut self) -> Option<mpsc::Receiver<OutputLine>> {
        self.output.take()
    }

    pub fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Kill and reap; a process that already exited is not an error
    pub async fn kill(&mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::debug!(program = %self.program, "kill: {}", e);
        }
    }

    pub async fn wait(&mut self) -> Result<i32> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|source| SubprocessFailure::Wait {
                program: self.program.clone(),
                source,
            })?;
        Ok(exit_code(status))
    }
}
