//! JDK-backed runner: `javac *.java` then `java -cp . <Entry>`

use crate::nova::codegen::SourceUnit;
use crate::nova::config::BuildConfig;
use crate::nova::runner::{BuildOutcome, BuildRunner, OutputLine, RunnerError, RunningProgram};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};

/// Compiles with `javac` and launches with `java`
#[derive(Debug, Clone)]
pub struct JavacRunner {
    compiler: String,
    runtime: String,
}

impl Default for JavacRunner {
    fn default() -> Self {
        Self {
            compiler: "javac".to_string(),
            runtime: "java".to_string(),
        }
    }
}

impl JavacRunner {
    pub fn new(compiler: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            runtime: runtime.into(),
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.compiler.clone(), config.runtime.clone())
    }

    fn io_error(path: &Path, err: std::io::Error) -> RunnerError {
        RunnerError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    fn spawn_error(program: &str, err: std::io::Error) -> RunnerError {
        RunnerError::Spawn {
            program: program.to_string(),
            message: err.to_string(),
        }
    }
}

/// Write every unit into `work_dir`, creating it if needed
pub async fn write_units(
    work_dir: &Path,
    units: &[SourceUnit],
) -> Result<Vec<PathBuf>, RunnerError> {
    tokio::fs::create_dir_all(work_dir)
        .await
        .map_err(|e| JavacRunner::io_error(work_dir, e))?;

    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = work_dir.join(&unit.file_name);
        tokio::fs::write(&path, &unit.source)
            .await
            .map_err(|e| JavacRunner::io_error(&path, e))?;
        written.push(path);
    }
    Ok(written)
}

/// One raw output line without its `\n` or `\r\n`; invalid UTF-8 is replaced
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

fn forward_lines<R>(
    reader: R,
    tx: mpsc::UnboundedSender<OutputLine>,
    wrap: fn(String) -> OutputLine,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    if tx.send(wrap(decode_line(&buf))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "reading program output failed");
                    break;
                }
            }
        }
    });
}

impl BuildRunner for JavacRunner {
    async fn build(
        &self,
        work_dir: &Path,
        units: &[SourceUnit],
    ) -> Result<BuildOutcome, RunnerError> {
        let written = write_units(work_dir, units).await?;
        let files: Vec<&str> = units.iter().map(|u| u.file_name.as_str()).collect();
        tracing::debug!(compiler = %self.compiler, files = written.len(), "compiling");

        let output = Command::new(&self.compiler)
            .args(&files)
            .current_dir(work_dir)
            .output()
            .await
            .map_err(|e| Self::spawn_error(&self.compiler, e))?;

        if output.status.success() {
            return Ok(BuildOutcome::Succeeded);
        }

        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));
        Ok(BuildOutcome::Failed { diagnostics })
    }

    async fn run(&self, work_dir: &Path, entry_class: &str) -> Result<RunningProgram, RunnerError> {
        tracing::debug!(runtime = %self.runtime, entry = entry_class, "launching");
        let mut child = Command::new(&self.runtime)
            .args(["-cp", ".", entry_class])
            .current_dir(work_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Self::spawn_error(&self.runtime, e))?;

        let stdout = child.stdout.take().ok_or(RunnerError::MissingPipe("stdout"))?;
        let stderr = child.stderr.take().ok_or(RunnerError::MissingPipe("stderr"))?;
        let mut stdin = child.stdin.take().ok_or(RunnerError::MissingPipe("stdin"))?;

        let (out_tx, out_rx) = mpsc::unbounded_channel();
        forward_lines(stdout, out_tx.clone(), OutputLine::Stdout);
        forward_lines(stderr, out_tx, OutputLine::Stderr);

        let (in_tx, mut in_rx) = mpsc::unbounded_channel::<String>();
        tokio::spawn(async move {
            while let Some(mut line) = in_rx.recv().await {
                line.push('\n');
                if stdin.write_all(line.as_bytes()).await.is_err() || stdin.flush().await.is_err()
                {
                    break;
                }
            }
        });

        let (exit_tx, exit_rx) = oneshot::channel();
        tokio::spawn(async move {
            let code = match child.wait().await {
                Ok(status) => status.code(),
                Err(err) => {
                    tracing::warn!(%err, "waiting for program failed");
                    None
                }
            };
            let _ = exit_tx.send(code);
        });

        Ok(RunningProgram::new(out_rx, in_tx, exit_rx))
    }
}
