#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetConfig {
    /// Path to the service-account JSON key.
    pub priv_key: String,
    pub spreadsheet_id: String,
    /// Display name, only used in log lines.
    pub spreadsheet_name: Option<String>,
}
