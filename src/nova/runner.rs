//! Build and run
//!
//! The conversion pipeline stops at source units. Compiling and launching
//! them is the job of a [`BuildRunner`]: it reports pass/fail with verbatim
//! compiler diagnostics, and on success gives access to the running
//! program's output stream and stdin.
//!
//! [`javac::JavacRunner`] is the implementation backed by the JDK tools.

pub mod javac;

pub use javac::JavacRunner;

use crate::nova::codegen::{GeneratedProgram, SourceUnit};
use std::fmt;
use std::path::Path;
use tokio::sync::{mpsc, oneshot};

/// Errors from the runner itself (not from the compiled program)
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerError {
    Io { path: String, message: String },
    Spawn { program: String, message: String },
    MissingPipe(&'static str),
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerError::Io { path, message } => write!(f, "{}: {}", path, message),
            RunnerError::Spawn { program, message } => {
                write!(f, "Cannot start '{}': {}", program, message)
            }
            RunnerError::MissingPipe(name) => write!(f, "Child process has no {} pipe", name),
        }
    }
}

impl std::error::Error for RunnerError {}

/// Result of compiling the units
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    Failed { diagnostics: String },
}

/// One line written by the running program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Handle on a launched program
#[derive(Debug)]
pub struct RunningProgram {
    output: mpsc::UnboundedReceiver<OutputLine>,
    input: mpsc::UnboundedSender<String>,
    exit: oneshot::Receiver<Option<i32>>,
}

impl RunningProgram {
    pub fn new(
        output: mpsc::UnboundedReceiver<OutputLine>,
        input: mpsc::UnboundedSender<String>,
        exit: oneshot::Receiver<Option<i32>>,
    ) -> Self {
        Self {
            output,
            input,
            exit,
        }
    }

    /// Next output line; `None` once both streams are closed
    pub async fn next_output(&mut self) -> Option<OutputLine> {
        self.output.recv().await
    }

    /// Sender for lines fed to the program's stdin
    pub fn input(&self) -> mpsc::UnboundedSender<String> {
        self.input.clone()
    }

    /// Feed one line to the program's stdin.
    ///
    /// Returns `false` once the program no longer accepts input.
    pub fn send_line(&self, line: impl Into<String>) -> bool {
        self.input.send(line.into()).is_ok()
    }

    /// Close stdin and wait for the program to exit.
    ///
    /// `None` if it was killed by a signal or the runner went away.
    pub async fn wait(self) -> Option<i32> {
        let RunningProgram { exit, input, .. } = self;
        drop(input);
        exit.await.ok().flatten()
    }
}

/// Compiles source units and launches the entry class
#[allow(async_fn_in_trait)]
pub trait BuildRunner {
    /// Compile all units inside `work_dir`
    async fn build(&self, work_dir: &Path, units: &[SourceUnit])
        -> Result<BuildOutcome, RunnerError>;

    /// Launch `entry_class` from `work_dir`
    async fn run(&self, work_dir: &Path, entry_class: &str) -> Result<RunningProgram, RunnerError>;
}

/// What happened when a program was handed to a runner
#[derive(Debug)]
pub enum LaunchOutcome {
    BuildFailed { diagnostics: String },
    Running(RunningProgram),
}

/// Build `program` and, if that succeeds, launch its entry class
pub async fn launch<R: BuildRunner>(
    runner: &R,
    work_dir: &Path,
    program: &GeneratedProgram,
) -> Result<LaunchOutcome, RunnerError> {
    tracing::info!(
        units = program.units.len(),
        entry = %program.entry_class,
        "building"
    );
    match runner.build(work_dir, &program.units).await? {
        BuildOutcome::Failed { diagnostics } => {
            tracing::info!("build failed");
            Ok(LaunchOutcome::BuildFailed { diagnostics })
        }
        BuildOutcome::Succeeded => {
            let running = runner.run(work_dir, &program.entry_class).await?;
            Ok(LaunchOutcome::Running(running))
        }
    }
}
