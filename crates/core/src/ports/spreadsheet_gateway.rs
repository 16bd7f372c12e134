use google_sheets4::api::{Request, ValueRange};
use thiserror::Error;

use crate::domain::sheets::a1_notation::A1Notation;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetGatewayError {
    #[error("Failed to authenticate with the spreadsheet service: {0}")]
    Authentication(&'static str),
    #[error("Failed to fetch spreadsheet metadata")]
    FailedToFetchMetadata,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write values")]
    FailedToWriteValues,
    #[error("Failed to apply batch update")]
    FailedToApplyBatchUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInfo {
    pub sheet_id: i32,
    pub title: String,
    /// Size of the worksheet grid, including empty rows.
    pub row_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRangeInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetMetadata {
    pub title: String,
    /// In tab order.
    pub worksheets: Vec<WorksheetInfo>,
    pub named_ranges: Vec<NamedRangeInfo>,
}

impl SpreadsheetMetadata {
    pub fn named_range_id(&self, name: &str) -> Option<&str> {
        self.named_ranges
            .iter()
            .find(|range| range.name == name)
            .map(|range| range.id.as_str())
    }
}

/// The remote spreadsheet the routines operate on. One implementation talks
/// to the Sheets v4 API; tests use an in-memory one.
#[async_trait::async_trait]
pub trait SpreadsheetGateway: Send + Sync {
    async fn metadata(&self) -> error_stack::Result<SpreadsheetMetadata, SpreadsheetGatewayError>;

    /// Formatted cell text, row-major. The service omits trailing empty
    /// rows and trailing empty cells of each row.
    async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetGatewayError>;

    /// Writes every value range in one call, parsed as if typed by a user.
    async fn write_values(
        &self,
        data: Vec<ValueRange>,
    ) -> error_stack::Result<(), SpreadsheetGatewayError>;

    /// Applies all requests atomically, in order.
    async fn batch_update(
        &self,
        requests: Vec<Request>,
    ) -> error_stack::Result<(), SpreadsheetGatewayError>;
}
