use crate::ports::application_service::{
    ApplicationService, ApplicationServiceError, RoutineDescriptor,
};
use crate::ports::routine::{Routine, RoutineReport, RunContext};
use error_stack::{report, ResultExt};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, Instrument};

/// Fixed registry of routines. At most one of them runs at a time.
pub struct CatalogApplicationService {
    routines: Vec<Box<dyn Routine>>,
    running: Mutex<()>,
}

impl CatalogApplicationService {
    pub fn new(routines: Vec<Box<dyn Routine>>) -> Self {
        Self {
            routines,
            running: Mutex::new(()),
        }
    }
}

#[async_trait::async_trait]
impl ApplicationService for CatalogApplicationService {
    #[instrument(skip(self, ctx))]
    async fn run_routine_by_name(
        &self,
        name: &str,
        ctx: RunContext,
    ) -> error_stack::Result<RoutineReport, ApplicationServiceError> {
        let routine = self
            .routines
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| {
                report!(ApplicationServiceError::RoutineNotFound {
                    name: name.to_string(),
                })
            })?;

        let _running = self
            .running
            .try_lock()
            .map_err(|_| report!(ApplicationServiceError::AlreadyRunning))?;

        info!("Starting {}", routine.title());
        let result = routine
            .run(&ctx)
            .instrument(tracing::span!(
                tracing::Level::INFO,
                "routine",
                routine = routine.name()
            ))
            .await;

        match result {
            Ok(report) => {
                info!("✅ {}: {}", routine.name(), report);
                Ok(report)
            }
            Err(report) => {
                error!("❌ {}: {:?}", routine.name(), report);
                Err(report).change_context(ApplicationServiceError::RoutineExecutionFailed {
                    details: format!("Routine '{}' failed", name),
                })
            }
        }
    }

    fn list_available_routines(&self) -> Vec<RoutineDescriptor> {
        self.routines
            .iter()
            .map(|r| RoutineDescriptor {
                name: r.name(),
                title: r.title(),
            })
            .collect()
    }
}
