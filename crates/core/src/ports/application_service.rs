use thiserror::Error;

use super::routine::{RoutineReport, RunContext};

#[derive(Error, Debug)]
pub enum ApplicationServiceError {
    #[error("Routine '{name}' not found")]
    RoutineNotFound { name: String },
    #[error("Another routine is already running")]
    AlreadyRunning,
    #[error("Routine execution failed: {details}")]
    RoutineExecutionFailed { details: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineDescriptor {
    pub name: &'static str,
    pub title: &'static str,
}

#[async_trait::async_trait]
pub trait ApplicationService: Send + Sync {
    /// Runs one routine; at most one run is active at a time.
    async fn run_routine_by_name(
        &self,
        name: &str,
        ctx: RunContext,
    ) -> error_stack::Result<RoutineReport, ApplicationServiceError>;

    fn list_available_routines(&self) -> Vec<RoutineDescriptor>;
}
