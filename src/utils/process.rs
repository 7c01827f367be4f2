// Wed Feb 11 2026 - Alex

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} did not finish within {seconds}s")]
    TimedOut { program: String, seconds: u64 },
}

#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Run a subprocess to completion with captured output, killing it if it
/// exceeds `timeout`. Cross-compiler invocations against malformed
/// historical headers can hang arbitrarily long; expiry is an error, never
/// a silent partial result.
pub fn run_with_timeout(
    command: &mut Command,
    timeout: Duration,
) -> Result<CommandOutput, ProcessError> {
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
        program: program.clone(),
        source,
    })?;

    // Drain both pipes off-thread so a chatty child can't fill a pipe
    // buffer and deadlock against our wait loop.
    let stdout_handle = spawn_reader(child.stdout.take());
    let stderr_handle = spawn_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    kill_quietly(&mut child);
                    let _ = stdout_handle.join();
                    let _ = stderr_handle.join();
                    return Err(ProcessError::TimedOut {
                        program,
                        seconds: timeout.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                kill_quietly(&mut child);
                return Err(ProcessError::Wait { program, source });
            }
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    Ok(CommandOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut reader) = source {
            let _ = reader.read_to_end(&mut buffer);
        }
        buffer
    })
}

fn kill_quietly(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_and_status() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("echo out; echo err >&2");

        let output = run_with_timeout(&mut command, Duration::from_secs(5)).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("exit 3");

        let output = run_with_timeout(&mut command, Duration::from_secs(5)).unwrap();
        assert!(!output.success());
    }

    #[test]
    fn test_hanging_process_times_out() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("sleep 30");

        let result = run_with_timeout(&mut command, Duration::from_millis(100));
        assert!(matches!(result, Err(ProcessError::TimedOut { .. })));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let mut command = Command::new("/nonexistent/compiler");
        let result = run_with_timeout(&mut command, Duration::from_secs(1));
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }
}
