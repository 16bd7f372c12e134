use config::Config;
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;
use tracing::{debug, instrument};

use super::sheets_config::SpreadsheetConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Could not read configuration sources")]
    Load,
    #[error("Invalid configuration value at '{path}'")]
    InvalidField { path: String },
    #[error("Missing required configuration key {0}")]
    MissingKey(&'static str),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings of the catalog routines that are not about the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Worksheet titles no routine touches.
    pub excluded_sheets: Vec<String>,
    /// Sequence number of the first numbered catalog worksheet. Layout
    /// starts at worksheet index `sheet_start + 2`; a zero only numbers
    /// from 1.
    pub sheet_start: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            excluded_sheets: Vec::new(),
            sheet_start: 1,
        }
    }
}

impl CatalogConfig {
    pub fn is_excluded(&self, sheet_title: &str) -> bool {
        self.excluded_sheets.iter().any(|title| title == sheet_title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    pub catalog: CatalogConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(i64),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum SheetList {
    Joined(String),
    Titles(Vec<String>),
}

impl SheetList {
    fn into_titles(self) -> Vec<String> {
        let titles = match self {
            SheetList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            SheetList::Titles(titles) => titles,
        };
        titles
            .into_iter()
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .collect()
    }
}

/// Keys as they arrive from the environment or a config file. Environment
/// names are lower-cased by the `config` crate.
#[derive(Deserialize, Debug, Default)]
struct RawConfig {
    #[serde(default, alias = "GOOGLE_CREDS_PATH")]
    google_creds_path: Option<String>,
    #[serde(default, alias = "SPREADSHEET_ID")]
    spreadsheet_id: Option<String>,
    #[serde(default, alias = "SPREADSHEET_NAME")]
    spreadsheet_name: Option<String>,
    #[serde(default, alias = "EXCLUDED_SHEETS")]
    excluded_sheets: Option<SheetList>,
    #[serde(default, alias = "SHEET_MULAI")]
    sheet_mulai: Option<Scalar>,
    #[serde(default, alias = "SHEET_START")]
    sheet_start: Option<Scalar>,
}

fn required(value: Option<String>, key: &'static str) -> error_stack::Result<String, ConfigError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| report!(ConfigError::MissingKey(key)))
}

impl TryFrom<RawConfig> for AppConfig {
    type Error = error_stack::Report<ConfigError>;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let sheets = SpreadsheetConfig {
            priv_key: required(raw.google_creds_path, "GOOGLE_CREDS_PATH")?,
            spreadsheet_id: required(raw.spreadsheet_id, "SPREADSHEET_ID")?,
            spreadsheet_name: raw
                .spreadsheet_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        };

        let sheet_start = match raw.sheet_mulai.or(raw.sheet_start).map(Scalar::into_text) {
            None => 1,
            Some(text) if text.trim().is_empty() => 1,
            Some(text) => text
                .trim()
                .parse::<u32>()
                .map_err(|_| {
                    report!(ConfigError::InvalidValue {
                        key: "SHEET_MULAI",
                        value: text.clone(),
                    })
                })?,
        };

        Ok(AppConfig {
            sheets,
            catalog: CatalogConfig {
                excluded_sheets: raw
                    .excluded_sheets
                    .map(SheetList::into_titles)
                    .unwrap_or_default(),
                sheet_start,
            },
        })
    }
}

impl AppConfig {
    /// Loads `.env`, then the optional file named by `CONFIG_PATH`
    /// (default `Config`), then the process environment.
    #[instrument(name = "AppConfig::load")]
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", err);
        }

        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "Config".to_string());
        let config = Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(config::Environment::default())
            .build()
            .change_context(ConfigError::Load)
            .attach_printable_lazy(|| format!("Config file: {config_path}"))?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> error_stack::Result<Self, ConfigError> {
        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(ConfigError::Load)?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        let raw = RawConfig::deserialize(path_de).map_err(|err| {
            let path = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            report!(ConfigError::InvalidField {
                path: path.trim_start_matches('.').to_string(),
            })
            .attach_printable(err.to_string())
        })?;

        AppConfig::try_from(raw)
    }
}
