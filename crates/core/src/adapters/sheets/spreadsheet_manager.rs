use std::fmt::Debug;

use error_stack::ResultExt;
use google_sheets4::{
    api::{BatchUpdateSpreadsheetRequest, BatchUpdateValuesRequest, Request, ValueRange},
    Sheets,
};
use serde_json::Value;
use tracing::instrument;

use super::{
    auth,
    http_client::{self, HttpsConnector},
};
use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::spreadsheet_gateway::{
    NamedRangeInfo, SpreadsheetGateway, SpreadsheetGatewayError, SpreadsheetMetadata,
    WorksheetInfo,
};

const USER_ENTERED: &str = "USER_ENTERED";

/// `SpreadsheetGateway` over the Google Sheets v4 API, authenticated as a
/// service account.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetGatewayError> {
        let client = http_client::http_client();
        let auth = auth::auth(&config, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }
}

/// Text of a cell as the sheet displays it. Non-string JSON values are
/// rendered with their JSON text.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait::async_trait]
impl SpreadsheetGateway for SpreadsheetManager {
    #[instrument]
    async fn metadata(&self) -> error_stack::Result<SpreadsheetMetadata, SpreadsheetGatewayError> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .doit()
            .await
            .change_context(SpreadsheetGatewayError::FailedToFetchMetadata)
            .attach_printable_lazy(|| {
                format!("Spreadsheet id: {}", self.config.spreadsheet_id)
            })?;

        let title = spreadsheet
            .properties
            .and_then(|properties| properties.title)
            .unwrap_or_default();

        let worksheets = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| {
                let properties = sheet.properties?;
                let row_count = properties
                    .grid_properties
                    .and_then(|grid| grid.row_count)
                    .unwrap_or(0);
                Some(WorksheetInfo {
                    sheet_id: properties.sheet_id?,
                    title: properties.title?,
                    row_count: row_count.max(0) as u32,
                })
            })
            .collect();

        let named_ranges = spreadsheet
            .named_ranges
            .unwrap_or_default()
            .into_iter()
            .filter_map(|named_range| {
                Some(NamedRangeInfo {
                    id: named_range.named_range_id?,
                    name: named_range.name?,
                })
            })
            .collect();

        Ok(SpreadsheetMetadata {
            title,
            worksheets,
            named_ranges,
        })
    }

    #[instrument]
    async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetGatewayError> {
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range.as_ref())
            .doit()
            .await
            .change_context(SpreadsheetGatewayError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to read range {}", range))?;

        Ok(value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    #[instrument(skip(data), fields(ranges = data.len()))]
    async fn write_values(
        &self,
        data: Vec<ValueRange>,
    ) -> error_stack::Result<(), SpreadsheetGatewayError> {
        let request = BatchUpdateValuesRequest {
            data: Some(data),
            value_input_option: Some(USER_ENTERED.to_string()),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .values_batch_update(request, &self.config.spreadsheet_id)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetGatewayError::FailedToWriteValues)
    }

    #[instrument(skip(requests), fields(requests = requests.len()))]
    async fn batch_update(
        &self,
        requests: Vec<Request>,
    ) -> error_stack::Result<(), SpreadsheetGatewayError> {
        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(requests),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(request, &self.config.spreadsheet_id)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetGatewayError::FailedToApplyBatchUpdate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(Value::String("abc".into())), "abc");
        assert_eq!(cell_text(Value::Null), "");
        assert_eq!(cell_text(serde_json::json!(9786021234567u64)), "9786021234567");
        assert_eq!(cell_text(Value::Bool(true)), "true");
    }
}
