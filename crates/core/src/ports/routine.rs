use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("Routine failed: {details}")]
    RoutineFailure { details: String },
}

impl RoutineError {
    pub fn routine_failure<S: Into<String>>(details: S) -> Self {
        RoutineError::RoutineFailure {
            details: details.into(),
        }
    }
}

/// Cooperative stop request shared between the caller and a running
/// routine. Routines poll it between worksheets only.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Inputs of one routine run.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub stop: StopFlag,
    /// Candidate table chosen by the user, if any.
    pub input_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutineReport {
    pub worksheets_processed: usize,
    pub rows_affected: usize,
    pub stopped: bool,
}

impl std::fmt::Display for RoutineReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} worksheet(s) processed, {} row(s) affected",
            self.worksheets_processed, self.rows_affected
        )?;
        if self.stopped {
            write!(f, " (stopped early)")?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
pub trait Routine: Send + Sync {
    /// Stable identifier used on the command line.
    fn name(&self) -> &'static str;

    /// Human readable label.
    fn title(&self) -> &'static str;

    async fn run(&self, ctx: &RunContext) -> error_stack::Result<RoutineReport, RoutineError>;
}
