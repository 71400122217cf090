//! Subprocess execution with a hard deadline.
//!
//! Every provider invocation goes through [`run_with_timeout`]. One deadline
//! covers both the child's exit and the draining of its pipes: a provider that
//! exits but leaves a background child holding stdout open still times out.
//! On the timeout path the whole process group is killed and the child reaped,
//! so no zombie or orphaned provider outlives a call.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::ProcessError;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on the sleep between `try_wait` polls.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Output of a process that ran to completion.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Everything one reader thread got out of its pipe.
struct Drained {
    stream: Stream,
    bytes: Vec<u8>,
    error: Option<String>,
}

/// Run `command` with piped stdout/stderr, killing it once `timeout` elapses.
///
/// The timeout also bounds reading the pipes to EOF after the child exits.
pub fn run_with_timeout(
    command: &mut Command,
    timeout: Duration,
    sink: &dyn DiagnosticSink,
) -> Result<CapturedOutput, ProcessError> {
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // Own process group, so a timeout can take down anything the provider forked.
        command.process_group(0);
    }

    let mut child = command.spawn().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ProcessError::NotFound(Path::new(&program).to_path_buf()),
        _ => ProcessError::Spawn {
            program: program.clone(),
            source: e,
        },
    })?;

    let (tx, rx) = mpsc::channel();
    let mut pending = 0;
    if spawn_reader(child.stdout.take(), Stream::Stdout, &tx) {
        pending += 1;
    }
    if spawn_reader(child.stderr.take(), Stream::Stderr, &tx) {
        pending += 1;
    }
    drop(tx);

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) => {}
            Err(e) => {
                kill_and_reap(&mut child, &program, sink);
                return Err(ProcessError::Io(e));
            }
        }

        let now = Instant::now();
        if now >= deadline {
            break None;
        }
        thread::sleep(MAX_POLL_INTERVAL.min(deadline - now));
    };

    // Readers are left behind on this path; killing the group closes their pipes.
    let Some(status) = status else {
        kill_and_reap(&mut child, &program, sink);
        return Err(ProcessError::TimedOut { program, timeout });
    };

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    while pending > 0 {
        match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(drained) => {
                pending -= 1;
                if let Some(reason) = drained.error {
                    sink.emit(Diagnostic::PipeReadFailed {
                        program: program.clone(),
                        reason,
                    });
                }
                match drained.stream {
                    Stream::Stdout => stdout = drained.bytes,
                    Stream::Stderr => stderr = drained.bytes,
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                // The child is reaped, but something it forked still holds a pipe.
                kill_group(&child);
                return Err(ProcessError::TimedOut { program, timeout });
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(CapturedOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

/// Drain `pipe` on its own thread. Returns false when there is no pipe.
fn spawn_reader<R>(pipe: Option<R>, stream: Stream, tx: &Sender<Drained>) -> bool
where
    R: Read + Send + 'static,
{
    let Some(mut pipe) = pipe else {
        return false;
    };
    let tx = tx.clone();
    thread::spawn(move || {
        let mut bytes = Vec::new();
        let error = pipe.read_to_end(&mut bytes).err().map(|e| e.to_string());
        // The receiver is gone once the call has timed out.
        let _ = tx.send(Drained {
            stream,
            bytes,
            error,
        });
    });
    true
}

/// SIGKILL the process group created at spawn.
#[cfg(unix)]
fn kill_group(child: &Child) {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    if let Ok(pid) = i32::try_from(child.id()) {
        // ESRCH just means the group is already gone.
        let _ = signal::kill(Pid::from_raw(-pid), Signal::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}

fn kill_and_reap(child: &mut Child, program: &str, sink: &dyn DiagnosticSink) {
    kill_group(child);
    let _ = child.kill();
    if let Err(e) = child.wait() {
        sink.emit(Diagnostic::ReapFailed {
            program: program.to_string(),
            reason: format!("pid {}: {}", child.id(), e),
        });
    }
}
