/// Process executor
///
/// Runs the external program to completion on the calling thread and
/// captures stdout, stderr and the exit status.
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

use super::error::ExecutionError;
use super::invocation::Invocation;

/// How long captured output is awaited once the child has exited or been killed
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// What happened when the program was run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Exited {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    FailedToLaunch {
        reason: String,
    },
    TimedOut {
        limit: Duration,
        stdout: String,
        stderr: String,
    },
}

/// Captured output of a run that exited with status 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionOutcome {
    fn from_output(output: Output) -> Self {
        Self::Exited {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Split a clean exit from the failure kinds
    pub fn into_result(self, program: &Path) -> Result<ProcessOutput, ExecutionError> {
        match self {
            Self::Exited {
                exit_code: 0,
                stdout,
                stderr,
            } => Ok(ProcessOutput { stdout, stderr }),
            Self::Exited {
                exit_code, stderr, ..
            } => Err(ExecutionError::NonZeroExit { exit_code, stderr }),
            Self::FailedToLaunch { reason } => Err(ExecutionError::Launch {
                program: program.to_path_buf(),
                reason,
            }),
            Self::TimedOut { limit, stderr, .. } => Err(ExecutionError::TimedOut { limit, stderr }),
        }
    }
}

/// Something that can run an invocation
pub trait ProcessRunner: Send + Sync + 'static {
    fn run(&self, invocation: &Invocation) -> ExecutionOutcome;
}

/// Runs invocations as real child processes
#[derive(Debug, Clone)]
pub struct StdProcessRunner {
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl StdProcessRunner {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.args())
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl ProcessRunner for StdProcessRunner {
    fn run(&self, invocation: &Invocation) -> ExecutionOutcome {
        let mut command = self.command(invocation);

        let Some(limit) = self.timeout else {
            return match command.output() {
                Ok(output) => ExecutionOutcome::from_output(output),
                Err(e) => ExecutionOutcome::FailedToLaunch {
                    reason: e.to_string(),
                },
            };
        };

        match command.spawn() {
            Ok(child) => wait_with_limit(child, limit),
            Err(e) => ExecutionOutcome::FailedToLaunch {
                reason: e.to_string(),
            },
        }
    }
}

/// Wait for `child`, killing it once `limit` has elapsed.
///
/// The pipes are drained on their own threads so a chatty child cannot block.
/// Grandchildren may keep the pipes open after the child is gone, so the
/// drain threads are only waited on for `DRAIN_GRACE` and then left behind.
fn wait_with_limit(mut child: Child, limit: Duration) -> ExecutionOutcome {
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match child.wait_timeout(limit) {
        Ok(Some(status)) => Some(status),
        Ok(None) => {
            tracing::warn!(?limit, pid = child.id(), "killing filter program after time limit");
            let _ = child.kill();
            let _ = child.wait();
            None
        }
        Err(e) => {
            let _ = child.kill();
            let _ = child.wait();
            return ExecutionOutcome::FailedToLaunch {
                reason: e.to_string(),
            };
        }
    };

    let stdout = collect(stdout);
    let stderr = collect(stderr);

    match status {
        Some(status) => ExecutionOutcome::Exited {
            exit_code: status.code().unwrap_or(-1),
            stdout,
            stderr,
        },
        None => ExecutionOutcome::TimedOut {
            limit,
            stdout,
            stderr,
        },
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = pipe.read_to_end(&mut buffer);
        let _ = sender.send(String::from_utf8_lossy(&buffer).into_owned());
    });
    receiver
}

fn collect(reader: Option<Receiver<String>>) -> String {
    reader
        .and_then(|receiver| receiver.recv_timeout(DRAIN_GRACE).ok())
        .unwrap_or_default()
}
