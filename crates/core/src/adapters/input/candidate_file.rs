//! Reader for the user-supplied deletion table: the first worksheet of a
//! workbook, or a CSV file. Row 1 holds the captions.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::catalog::{
    candidate::{CandidateRecord, CatalogKeys},
    layout::headers,
    matcher::HeaderIndex,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CandidateFileError {
    #[error("Failed to open candidate file")]
    Open,
    #[error("Unsupported candidate file type '{0}'")]
    UnsupportedExtension(String),
    #[error("Candidate file has no worksheet")]
    NoWorksheet,
    #[error("Failed to read candidate file contents")]
    Read,
    #[error("Candidate file has none of the columns UUID, ISBN Cetak, ISBN Elektronik*")]
    NoKeyColumns,
}

/// Reads every candidate row of `path` into memory.
#[instrument]
pub fn read_candidates(path: &Path) -> error_stack::Result<Vec<CandidateRecord>, CandidateFileError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => read_csv_rows(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_rows(path)?,
        _ => return Err(report!(CandidateFileError::UnsupportedExtension(extension))),
    };

    let candidates = candidates_from_rows(&rows)?;
    debug!(count = candidates.len(), "Candidate rows loaded");
    Ok(candidates)
}

fn read_csv_rows(path: &Path) -> error_stack::Result<Vec<Vec<String>>, CandidateFileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .change_context(CandidateFileError::Open)
        .attach_printable_lazy(|| format!("Path: {}", path.display()))?;

    reader
        .records()
        .map(|record| {
            record
                .map(|record| record.iter().map(str::to_string).collect())
                .change_context(CandidateFileError::Read)
        })
        .collect()
}

fn read_workbook_rows(path: &Path) -> error_stack::Result<Vec<Vec<String>>, CandidateFileError> {
    let mut workbook = open_workbook_auto(path)
        .change_context(CandidateFileError::Open)
        .attach_printable_lazy(|| format!("Path: {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| report!(CandidateFileError::NoWorksheet))?
        .change_context(CandidateFileError::Read)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Integral numbers lose their `.0` so a numeric ISBN compares equal to the
/// same ISBN typed as text.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e16 => {
            format!("{}", *value as i64)
        }
        other => other.to_string(),
    }
}

/// Turns raw rows (captions first) into candidate records. Rows whose three
/// keys are all empty are dropped, since they can never match.
pub fn candidates_from_rows<S: AsRef<str>>(
    rows: &[Vec<S>],
) -> error_stack::Result<Vec<CandidateRecord>, CandidateFileError> {
    let Some((header, data)) = rows.split_first() else {
        return Err(report!(CandidateFileError::NoKeyColumns)).attach_printable("File is empty");
    };

    let captions: Vec<String> = header
        .iter()
        .map(|caption| caption.as_ref().trim_start_matches('\u{feff}').to_string())
        .collect();
    let index = HeaderIndex::from_header_cells(&captions);
    let uuid = index.get(headers::UUID);
    let isbn_print = index.get(headers::ISBN_PRINT);
    let isbn_electronic = index.get(headers::ISBN_ELECTRONIC);

    if uuid.is_none() && isbn_print.is_none() && isbn_electronic.is_none() {
        return Err(report!(CandidateFileError::NoKeyColumns))
            .attach_printable_lazy(|| format!("Captions found: {:?}", captions));
    }
    for (caption, column) in [
        (headers::UUID, uuid),
        (headers::ISBN_PRINT, isbn_print),
        (headers::ISBN_ELECTRONIC, isbn_electronic),
    ] {
        if column.is_none() {
            warn!("Candidate file has no '{}' column; treating it as empty", caption);
        }
    }

    Ok(data
        .iter()
        .enumerate()
        .filter_map(|(offset, cells)| {
            let cell = |column: Option<usize>| {
                column
                    .and_then(|index| cells.get(index))
                    .map_or("", AsRef::as_ref)
            };
            let keys = CatalogKeys::new(cell(uuid), cell(isbn_print), cell(isbn_electronic));
            (!keys.is_empty()).then_some(CandidateRecord {
                source_row: offset + 2,
                keys,
            })
        })
        .collect())
}
