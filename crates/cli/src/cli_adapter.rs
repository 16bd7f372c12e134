use catalog_sheets_core::ports::application_service::ApplicationService;
use catalog_sheets_core::ports::command_handler::{Command, CommandError, CommandHandler};
use catalog_sheets_core::ports::routine::{RunContext, StopFlag};
use clap::{Parser, Subcommand};
use error_stack::ResultExt;
use std::{path::PathBuf, sync::Arc};
use tracing::instrument;

/// Maintenance routines for the catalog spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "catalog-sheets", version)]
pub struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List the available routines
    List,
    /// Run one routine; Ctrl-C stops it after the current worksheet
    Run {
        /// Routine name, as printed by `list`
        name: String,
        /// Table of rows to delete (xlsx, xls, ods or csv)
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    pub fn into_command(self) -> Command {
        match self.command {
            CliCommand::List => Command::ListRoutines,
            CliCommand::Run { name, file } => Command::RunRoutine {
                name,
                input_file: file,
            },
        }
    }
}

pub struct CliAdapter {
    application_service: Arc<dyn ApplicationService>,
    stop: StopFlag,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("application_service", &"<ApplicationService>")
            .finish()
    }
}

impl CliAdapter {
    pub fn new(application_service: Arc<dyn ApplicationService>, stop: StopFlag) -> Self {
        Self {
            application_service,
            stop,
        }
    }
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        match command {
            Command::RunRoutine { name, input_file } => {
                let ctx = RunContext {
                    stop: self.stop.clone(),
                    input_file,
                };
                let report = self
                    .application_service
                    .run_routine_by_name(&name, ctx)
                    .await
                    .change_context(CommandError::ExecutionFailed {
                        details: format!("Failed to run routine {}", name),
                    })?;

                Ok(format!("✅ Routine '{}' completed: {}", name, report))
            }
            Command::ListRoutines => {
                let routines = self
                    .application_service
                    .list_available_routines()
                    .into_iter()
                    .map(|routine| format!("{:<20} {}", routine.name, routine.title))
                    .collect::<Vec<_>>();
                Ok(format!("Available routines:\n{}", routines.join("\n")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_sheets_core::ports::application_service::{
        ApplicationServiceError, RoutineDescriptor,
    };
    use catalog_sheets_core::ports::routine::RoutineReport;
    use error_stack::report;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingService {
        runs: Mutex<Vec<(String, Option<PathBuf>, bool)>>,
    }

    #[async_trait::async_trait]
    impl ApplicationService for RecordingService {
        async fn run_routine_by_name(
            &self,
            name: &str,
            ctx: RunContext,
        ) -> error_stack::Result<RoutineReport, ApplicationServiceError> {
            self.runs.lock().unwrap().push((
                name.to_string(),
                ctx.input_file.clone(),
                ctx.stop.is_stop_requested(),
            ));
            if name == "delete-procurement" {
                Ok(RoutineReport {
                    worksheets_processed: 2,
                    rows_affected: 5,
                    stopped: false,
                })
            } else {
                Err(report!(ApplicationServiceError::RoutineNotFound {
                    name: name.to_string(),
                }))
            }
        }

        fn list_available_routines(&self) -> Vec<RoutineDescriptor> {
            vec![RoutineDescriptor {
                name: "delete-procurement",
                title: "Hapus Pengadaan",
            }]
        }
    }

    #[test]
    fn test_parse_run_with_file() {
        let cli = Cli::try_parse_from([
            "catalog-sheets",
            "run",
            "delete-procurement",
            "--file",
            "hapus.xlsx",
        ])
        .unwrap();
        assert_eq!(
            cli.into_command(),
            Command::RunRoutine {
                name: "delete-procurement".into(),
                input_file: Some(PathBuf::from("hapus.xlsx")),
            }
        );
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["catalog-sheets", "list"]).unwrap();
        assert_eq!(cli.into_command(), Command::ListRoutines);
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["catalog-sheets"]).is_err());
    }

    #[tokio::test]
    async fn test_run_passes_file_and_stop_flag() {
        let service = Arc::new(RecordingService::default());
        let stop = StopFlag::new();
        let adapter = CliAdapter::new(service.clone(), stop.clone());
        stop.request_stop();

        let output = adapter
            .handle(Command::RunRoutine {
                name: "delete-procurement".into(),
                input_file: Some(PathBuf::from("hapus.csv")),
            })
            .await
            .unwrap();

        assert!(output.contains("5 row(s) affected"));
        assert_eq!(
            service.runs.lock().unwrap().clone(),
            vec![(
                "delete-procurement".to_string(),
                Some(PathBuf::from("hapus.csv")),
                true
            )]
        );
    }

    #[tokio::test]
    async fn test_failed_run_is_an_error() {
        let adapter = CliAdapter::new(Arc::new(RecordingService::default()), StopFlag::new());
        let err = adapter
            .handle(Command::RunRoutine {
                name: "nope".into(),
                input_file: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            CommandError::ExecutionFailed { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_output() {
        let adapter = CliAdapter::new(Arc::new(RecordingService::default()), StopFlag::new());
        let output = adapter.handle(Command::ListRoutines).await.unwrap();
        assert!(output.contains("delete-procurement"));
        assert!(output.contains("Hapus Pengadaan"));
    }
}
