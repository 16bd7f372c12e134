//! Renumbers and decorates the catalog worksheets: sequence titles,
//! autofilled columns, filter and frozen panes, recap formulas, borders and
//! a per-worksheet named range over the price reference column.

use std::{sync::Arc, time::Duration};

use error_stack::ResultExt;
use google_sheets4::api::{Request, ValueRange};
use indicatif::ProgressStyle;
use tracing::{error, info, info_span, instrument, warn, Instrument, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use super::retry::FixedBackoff;
use crate::adapters::config::app_config::CatalogConfig;
use crate::adapters::sheets::value_range_factory::ValueRangeFactory;
use crate::domain::catalog::{
    autofill::{Autofill, AutofillMode},
    delete_plan::trailing_rows,
    layout::{
        columns, CATALOG_LINK_FORMULA, FIRST_DATA_ROW, HEADER_ROW, LEADING_SHEETS,
        SUBTOTAL_FORMULA,
    },
    recap::recap_formulas,
    styling::{
        border_and_format_requests, freeze_request, header_filter_request, named_range_requests,
        rename_request,
    },
    title::{named_range_name, sequenced_title},
};
use crate::domain::sheets::{
    a1_notation::{A1Notation, ToA1Notation},
    cell_range::CellRange,
    column::Column,
    row::Row,
};
use crate::ports::routine::{Routine, RoutineError, RoutineReport, RunContext};
use crate::ports::spreadsheet_gateway::{SpreadsheetGateway, WorksheetInfo};

const RECAP_RETRY: FixedBackoff = FixedBackoff::new(3, Duration::from_secs(5));

pub struct CatalogLayoutRoutine {
    gateway: Arc<dyn SpreadsheetGateway>,
    catalog: CatalogConfig,
    recap_retry: FixedBackoff,
    throttle: bool,
}

impl std::fmt::Debug for CatalogLayoutRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLayoutRoutine")
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl CatalogLayoutRoutine {
    pub const NAME: &'static str = "catalog-layout";

    pub fn new(gateway: Arc<dyn SpreadsheetGateway>, catalog: CatalogConfig) -> Self {
        Self {
            gateway,
            catalog,
            recap_retry: RECAP_RETRY,
            throttle: true,
        }
    }

    /// No pauses between writes and no backoff between recap attempts.
    pub fn without_delays(self) -> Self {
        Self {
            recap_retry: FixedBackoff::new(RECAP_RETRY.attempts, Duration::ZERO),
            throttle: false,
            ..self
        }
    }

    /// Number of non-empty leading cells of `column`, as the service
    /// reports them (trailing blanks trimmed).
    async fn column_length(&self, sheet_title: &str, column: Column) -> Option<u32> {
        let range = A1Notation::on_sheet(Some(sheet_title), &format!("{column}:{column}"));
        match self.gateway.read_range(&range).await {
            Ok(values) => Some(values.len() as u32),
            Err(report) => {
                error!("Failed to read {}: {:?}", range, report);
                None
            }
        }
    }

    async fn apply(&self, step: &str, requests: Vec<Request>) -> bool {
        match self.gateway.batch_update(requests).await {
            Ok(()) => true,
            Err(report) => {
                warn!("{} failed: {:?}", step, report);
                false
            }
        }
    }

    /// Renames the worksheet to its sequence title. Returns the title the
    /// worksheet carries afterwards.
    async fn rename(&self, worksheet: &WorksheetInfo, number: u32) -> String {
        let new_title = sequenced_title(&worksheet.title, number);
        if new_title == worksheet.title {
            return new_title;
        }
        if self
            .apply("Rename", vec![rename_request(worksheet.sheet_id, &new_title)])
            .await
        {
            info!("Renamed '{}' -> '{}'", worksheet.title, new_title);
            new_title
        } else {
            worksheet.title.clone()
        }
    }

    async fn remove_trailing_rows(&self, worksheet: &WorksheetInfo, last_row: Row) {
        let Some(range) = trailing_rows(last_row, worksheet.row_count) else {
            return;
        };
        if self
            .apply(
                "Trailing row cleanup",
                vec![range.to_delete_request(worksheet.sheet_id)],
            )
            .await
        {
            info!("Removed {} empty row(s) below row {}", range.len(), last_row);
        }
    }

    async fn autofill(&self, sheet_title: &str, column: Column, last_row: Row, mode: AutofillMode) {
        let fill = Autofill::new(column, FIRST_DATA_ROW, last_row, &mode);
        let target = fill.range.to_a1_notation(Some(sheet_title));
        let value_range = ValueRange::from_single_column(target.clone(), &fill.values);

        match self.gateway.write_values(vec![value_range]).await {
            Ok(()) => info!("Filled {}", target),
            Err(report) => warn!("Failed to fill column {}: {:?}", column, report),
        }
        if self.throttle {
            tokio::time::sleep(fill.pause()).await;
        }
    }

    async fn filter_and_freeze(&self, sheet_title: &str, sheet_id: i32) {
        let header_range = A1Notation::on_sheet(Some(sheet_title), &format!("{HEADER_ROW}:{HEADER_ROW}"));
        let header_width = match self.gateway.read_range(&header_range).await {
            Ok(values) => values.first().map_or(0, Vec::len) as u32,
            Err(report) => {
                warn!("Failed to read the header row: {:?}", report);
                return;
            }
        };

        let Some((filter_range, filter)) = header_filter_request(sheet_id, header_width) else {
            warn!("No header in row {}; filter skipped", HEADER_ROW);
            return;
        };
        if self
            .apply("Filter/freeze", vec![filter, freeze_request(sheet_id)])
            .await
        {
            info!("Filter on {}, frozen through row {} and column J", filter_range.to_a1_notation(None), HEADER_ROW);
        }
    }

    async fn write_recap(&self, sheet_title: &str, last_row: Row) {
        let data: Vec<ValueRange> = recap_formulas(sheet_title, last_row.number())
            .into_iter()
            .map(|(target, formula)| ValueRange::from_single_cell(target, formula))
            .collect();

        let result = self
            .recap_retry
            .run("Recap formulas", || self.gateway.write_values(data.clone()))
            .await;
        match result {
            Ok(()) => info!("Recap formulas written"),
            Err(report) => error!("Failed to write recap formulas: {:?}", report),
        }
    }

    async fn named_range(&self, sheet_title: &str, sheet_id: i32) {
        let Some(name) = named_range_name(sheet_title) else {
            warn!("'{}' has no letters to name a range after; skipped", sheet_title);
            return;
        };

        let Some(length) = self.column_length(sheet_title, columns::PRICE_REFERENCE).await else {
            return;
        };
        if length < FIRST_DATA_ROW.number() {
            warn!("'{}' has no data below the header; named range skipped", sheet_title);
            return;
        }

        let metadata = match self.gateway.metadata().await {
            Ok(metadata) => metadata,
            Err(report) => {
                warn!("Failed to look up existing named ranges: {:?}", report);
                return;
            }
        };

        let range = CellRange::column_span(
            columns::PRICE_REFERENCE,
            FIRST_DATA_ROW,
            Row::from_number(length),
        )
        .with_sheet_title(sheet_title);
        let existing_id = metadata.named_range_id(&name).map(str::to_string);
        let requests = named_range_requests(sheet_id, &name, existing_id, &range);

        if self.apply("Named range", requests).await {
            info!("Named range '{}' -> {}", name, range.to_a1_notation(None));
        }
    }

    /// Runs every layout step on one worksheet and returns the number of
    /// data rows laid out. Step failures are logged and do not stop the
    /// remaining steps.
    async fn decorate_worksheet(&self, worksheet: &WorksheetInfo, number: u32) -> usize {
        let sheet_title = self.rename(worksheet, number).await;
        info!("Processing '{}'", sheet_title);

        let Some(length) = self.column_length(&sheet_title, columns::TITLE).await else {
            return 0;
        };
        let last_row = Row::from_number(length.max(FIRST_DATA_ROW.number()));

        self.remove_trailing_rows(worksheet, last_row).await;

        self.autofill(&sheet_title, columns::SEQUENCE, last_row, AutofillMode::Sequence { start: 1 })
            .await;
        self.autofill(&sheet_title, columns::LINK, last_row, AutofillMode::PerRow(CATALOG_LINK_FORMULA))
            .await;
        self.autofill(&sheet_title, columns::SUBTOTAL, last_row, AutofillMode::PerRow(SUBTOTAL_FORMULA))
            .await;

        self.filter_and_freeze(&sheet_title, worksheet.sheet_id).await;
        self.write_recap(&sheet_title, last_row).await;

        if self
            .apply(
                "Borders/format",
                border_and_format_requests(worksheet.sheet_id, last_row.number()),
            )
            .await
        {
            info!("Borders and alignment applied");
        }

        self.named_range(&sheet_title, worksheet.sheet_id).await;

        info!("Done with '{}'", sheet_title);
        (last_row.number() - FIRST_DATA_ROW.number() + 1) as usize
    }
}

#[async_trait::async_trait]
impl Routine for CatalogLayoutRoutine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn title(&self) -> &'static str {
        "Tampilan Sheet"
    }

    #[instrument(skip(self, ctx), name = "CatalogLayoutRoutine::run")]
    async fn run(&self, ctx: &RunContext) -> error_stack::Result<RoutineReport, RoutineError> {
        let metadata = self
            .gateway
            .metadata()
            .await
            .change_context(RoutineError::routine_failure("Failed to open the spreadsheet"))?;
        info!("Spreadsheet: {}", metadata.title);

        let first_index = self.catalog.sheet_start as usize + LEADING_SHEETS;
        let worksheets = metadata.worksheets.get(first_index..).unwrap_or_default();

        let span = Span::current();
        if let Ok(style) = ProgressStyle::with_template("{span_child_prefix}{bar:30} {pos}/{len} {msg}") {
            span.pb_set_style(&style);
        }
        span.pb_set_length(worksheets.len() as u64);

        let mut report = RoutineReport::default();
        let mut number = self.catalog.sheet_start.max(1);
        for worksheet in worksheets {
            if ctx.stop.is_stop_requested() {
                warn!("Stopped by user");
                report.stopped = true;
                break;
            }
            span.pb_inc(1);
            if self.catalog.is_excluded(&worksheet.title) {
                info!("Skipping excluded worksheet '{}'", worksheet.title);
                continue;
            }

            report.rows_affected += self
                .decorate_worksheet(worksheet, number)
                .instrument(info_span!("worksheet", title = %worksheet.title, number))
                .await;
            report.worksheets_processed += 1;
            number += 1;
        }

        info!("All worksheets processed");
        Ok(report)
    }
}
