use std::{sync::Arc, time::Duration};

use error_stack::ResultExt;
use tracing::{error, info, info_span, instrument, warn, Instrument};

use super::batch_delete;
use crate::adapters::config::app_config::CatalogConfig;
use crate::adapters::input::candidate_file::read_candidates;
use crate::domain::catalog::{
    candidate::CandidateRecord,
    delete_plan::DeletePlan,
    layout::MATCH_READ_RANGE,
    matcher::{match_candidates, remote_rows},
};
use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::routine::{Routine, RoutineError, RoutineReport, RunContext};
use crate::ports::spreadsheet_gateway::{SpreadsheetGateway, WorksheetInfo};

/// Deletes every catalog row that matches a row of the user's table, one
/// batch per worksheet.
pub struct DeleteProcurementRoutine {
    gateway: Arc<dyn SpreadsheetGateway>,
    catalog: CatalogConfig,
    pause: Duration,
}

impl std::fmt::Debug for DeleteProcurementRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteProcurementRoutine")
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl DeleteProcurementRoutine {
    pub const NAME: &'static str = "delete-procurement";

    pub fn new(gateway: Arc<dyn SpreadsheetGateway>, catalog: CatalogConfig) -> Self {
        Self {
            gateway,
            catalog,
            pause: Duration::from_secs(1),
        }
    }

    /// Delay after each worksheet, to stay under the API rate limit.
    pub fn with_pause(self, pause: Duration) -> Self {
        Self { pause, ..self }
    }

    /// Reads, matches and deletes on one worksheet. Never fails: remote
    /// errors and skipped worksheets count as zero deletions.
    async fn process_worksheet(
        &self,
        worksheet: &WorksheetInfo,
        candidates: &[CandidateRecord],
    ) -> usize {
        let range = A1Notation::on_sheet(Some(&worksheet.title), MATCH_READ_RANGE);
        let values = match self.gateway.read_range(&range).await {
            Ok(values) => values,
            Err(report) => {
                error!("Failed to read '{}': {:?}", worksheet.title, report);
                return 0;
            }
        };

        let rows = match remote_rows(&values) {
            Ok(rows) => rows,
            Err(skip) => {
                warn!("Skipping '{}': {}", worksheet.title, skip);
                return 0;
            }
        };

        let matches = match_candidates(candidates, &rows);
        if matches.is_empty() {
            info!("No matching rows in '{}'", worksheet.title);
            return 0;
        }
        for found in &matches {
            let candidate = &candidates[found.candidate];
            info!(
                "Match in '{}' row {}: {} (input row {})",
                worksheet.title, found.row_number, candidate.keys, candidate.source_row
            );
        }

        let plan = DeletePlan::new(matches.iter().map(|found| found.row_number));
        batch_delete::delete_rows(self.gateway.as_ref(), worksheet, &plan).await
    }
}

#[async_trait::async_trait]
impl Routine for DeleteProcurementRoutine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn title(&self) -> &'static str {
        "Hapus Pengadaan"
    }

    #[instrument(skip(self, ctx), name = "DeleteProcurementRoutine::run")]
    async fn run(&self, ctx: &RunContext) -> error_stack::Result<RoutineReport, RoutineError> {
        let Some(path) = ctx.input_file.as_deref() else {
            info!("No file selected; nothing to delete");
            return Ok(RoutineReport::default());
        };

        let candidates = read_candidates(path)
            .change_context(RoutineError::routine_failure("Failed to load the candidate file"))?;
        if candidates.is_empty() {
            info!("'{}' has no rows with a UUID or ISBN", path.display());
            return Ok(RoutineReport::default());
        }
        info!("Loaded {} candidate row(s) from '{}'", candidates.len(), path.display());

        let metadata = self
            .gateway
            .metadata()
            .await
            .change_context(RoutineError::routine_failure("Failed to open the spreadsheet"))?;
        info!("Spreadsheet: {}", metadata.title);

        let mut report = RoutineReport::default();
        for worksheet in &metadata.worksheets {
            if ctx.stop.is_stop_requested() {
                warn!("Stopped by user");
                report.stopped = true;
                break;
            }
            if self.catalog.is_excluded(&worksheet.title) {
                info!("Skipping excluded worksheet '{}'", worksheet.title);
                continue;
            }

            report.rows_affected += self
                .process_worksheet(worksheet, &candidates)
                .instrument(info_span!("worksheet", title = %worksheet.title))
                .await;
            report.worksheets_processed += 1;

            tokio::time::sleep(self.pause).await;
        }

        info!("Total rows deleted: {}", report.rows_affected);
        Ok(report)
    }
}
