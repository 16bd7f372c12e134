//! In-memory `SpreadsheetGateway` for routine tests.

use std::{collections::HashMap, sync::Mutex};

use error_stack::report;
use google_sheets4::api::{Request, ValueRange};

use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::spreadsheet_gateway::{
    NamedRangeInfo, SpreadsheetGateway, SpreadsheetGatewayError, SpreadsheetMetadata,
    WorksheetInfo,
};

#[derive(Default)]
struct FakeState {
    metadata: SpreadsheetMetadata,
    ranges: HashMap<String, Vec<Vec<String>>>,
    reads: Vec<String>,
    writes: Vec<Vec<ValueRange>>,
    batch_updates: Vec<Vec<Request>>,
    failing_reads: Vec<String>,
    failing_writes: usize,
    failing_batch_updates: usize,
    failing_metadata: bool,
}

/// Serves canned ranges keyed by their exact A1 text; unknown ranges read
/// as empty, like a blank region of a real sheet. Records every call.
#[derive(Default)]
pub(crate) struct FakeSpreadsheet {
    state: Mutex<FakeState>,
}

impl FakeSpreadsheet {
    pub fn new(title: &str) -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().metadata.title = title.to_string();
        fake
    }

    pub fn with_worksheet(self, sheet_id: i32, title: &str, row_count: u32) -> Self {
        self.state.lock().unwrap().metadata.worksheets.push(WorksheetInfo {
            sheet_id,
            title: title.to_string(),
            row_count,
        });
        self
    }

    pub fn with_named_range(self, id: &str, name: &str) -> Self {
        self.state.lock().unwrap().metadata.named_ranges.push(NamedRangeInfo {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_range<S: AsRef<str>>(self, a1: &str, rows: Vec<Vec<S>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.as_ref().to_string()).collect())
            .collect();
        self.state.lock().unwrap().ranges.insert(a1.to_string(), rows);
        self
    }

    pub fn failing_read(self, a1: &str) -> Self {
        self.state.lock().unwrap().failing_reads.push(a1.to_string());
        self
    }

    /// The next `count` value writes fail.
    pub fn failing_writes(self, count: usize) -> Self {
        self.state.lock().unwrap().failing_writes = count;
        self
    }

    /// The next `count` batch updates fail.
    pub fn failing_batch_updates(self, count: usize) -> Self {
        self.state.lock().unwrap().failing_batch_updates = count;
        self
    }

    pub fn failing_metadata(self) -> Self {
        self.state.lock().unwrap().failing_metadata = true;
        self
    }

    pub fn reads(&self) -> Vec<String> {
        self.state.lock().unwrap().reads.clone()
    }

    pub fn writes(&self) -> Vec<Vec<ValueRange>> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn batch_updates(&self) -> Vec<Vec<Request>> {
        self.state.lock().unwrap().batch_updates.clone()
    }
}

#[async_trait::async_trait]
impl SpreadsheetGateway for FakeSpreadsheet {
    async fn metadata(&self) -> error_stack::Result<SpreadsheetMetadata, SpreadsheetGatewayError> {
        let state = self.state.lock().unwrap();
        if state.failing_metadata {
            return Err(report!(SpreadsheetGatewayError::FailedToFetchMetadata));
        }
        Ok(state.metadata.clone())
    }

    async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetGatewayError> {
        let mut state = self.state.lock().unwrap();
        state.reads.push(range.to_string());
        if state.failing_reads.iter().any(|a1| a1 == range.as_ref()) {
            return Err(report!(SpreadsheetGatewayError::FailedToFetchRange));
        }
        Ok(state.ranges.get(range.as_ref()).cloned().unwrap_or_default())
    }

    async fn write_values(
        &self,
        data: Vec<ValueRange>,
    ) -> error_stack::Result<(), SpreadsheetGatewayError> {
        let mut state = self.state.lock().unwrap();
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            return Err(report!(SpreadsheetGatewayError::FailedToWriteValues));
        }
        state.writes.push(data);
        Ok(())
    }

    async fn batch_update(
        &self,
        requests: Vec<Request>,
    ) -> error_stack::Result<(), SpreadsheetGatewayError> {
        let mut state = self.state.lock().unwrap();
        if state.failing_batch_updates > 0 {
            state.failing_batch_updates -= 1;
            return Err(report!(SpreadsheetGatewayError::FailedToApplyBatchUpdate));
        }
        state.batch_updates.push(requests);
        Ok(())
    }
}
