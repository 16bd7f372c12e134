use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use super::{
    candidate::{CandidateRecord, CatalogKeys},
    layout::{headers, FIRST_DATA_ROW, HEADER_ROW, MIN_ROWS_WITH_DATA},
};

/// Header caption -> zero-based column index, built once per worksheet.
/// Captions are compared trimmed and case-insensitively; when a caption
/// repeats, the rightmost column wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex(HashMap<String, usize>);

impl HeaderIndex {
    pub fn from_header_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        HeaderIndex(
            cells
                .iter()
                .enumerate()
                .map(|(index, caption)| (caption.as_ref().trim().to_lowercase(), index))
                .collect(),
        )
    }

    pub fn get(&self, caption: &str) -> Option<usize> {
        self.0.get(&caption.trim().to_lowercase()).copied()
    }

    pub fn key_columns(&self) -> Result<KeyColumns, WorksheetSkip> {
        let lookup = [headers::UUID, headers::ISBN_PRINT, headers::ISBN_ELECTRONIC]
            .map(|caption| (caption, self.get(caption)));

        let missing: Vec<&'static str> = lookup
            .iter()
            .filter(|(_, index)| index.is_none())
            .map(|(caption, _)| *caption)
            .collect();

        match lookup {
            [(_, Some(uuid)), (_, Some(isbn_print)), (_, Some(isbn_electronic))] => Ok(KeyColumns {
                uuid,
                isbn_print,
                isbn_electronic,
            }),
            _ => Err(WorksheetSkip::MissingColumns(missing)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumns {
    pub uuid: usize,
    pub isbn_print: usize,
    pub isbn_electronic: usize,
}

/// Why a worksheet contributes nothing to a deletion run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorksheetSkip {
    #[error("only {0} rows present, at least {MIN_ROWS_WITH_DATA} required")]
    TooFewRows(usize),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

/// A data row of a worksheet, addressed by its 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRow {
    pub row_number: u32,
    pub keys: CatalogKeys,
}

impl RemoteRow {
    /// Cells past the end of a short row read as empty.
    pub fn from_cells<S: AsRef<str>>(row_number: u32, cells: &[S], columns: &KeyColumns) -> Self {
        let cell = |index: usize| cells.get(index).map_or("", AsRef::as_ref);
        RemoteRow {
            row_number,
            keys: CatalogKeys::new(
                cell(columns.uuid),
                cell(columns.isbn_print),
                cell(columns.isbn_electronic),
            ),
        }
    }
}

/// Splits the values of a worksheet read from `A1` into keyed data rows.
pub fn remote_rows<S: AsRef<str>>(values: &[Vec<S>]) -> Result<Vec<RemoteRow>, WorksheetSkip> {
    if values.len() < MIN_ROWS_WITH_DATA {
        return Err(WorksheetSkip::TooFewRows(values.len()));
    }

    let header_cells = &values[HEADER_ROW.index() as usize];
    let columns = HeaderIndex::from_header_cells(header_cells).key_columns()?;

    Ok(values
        .iter()
        .enumerate()
        .skip(FIRST_DATA_ROW.index() as usize)
        .map(|(index, cells)| RemoteRow::from_cells(index as u32 + 1, cells, &columns))
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Position of the candidate in the input slice.
    pub candidate: usize,
    pub row_number: u32,
}

/// First row number per normalized key value, per field.
struct KeyIndex<'a> {
    uuid: HashMap<&'a str, u32>,
    isbn_print: HashMap<&'a str, u32>,
    isbn_electronic: HashMap<&'a str, u32>,
}

impl<'a> KeyIndex<'a> {
    fn build(rows: &'a [RemoteRow]) -> Self {
        let mut index = KeyIndex {
            uuid: HashMap::new(),
            isbn_print: HashMap::new(),
            isbn_electronic: HashMap::new(),
        };
        for row in rows {
            let keys = &row.keys;
            for (map, key) in [
                (&mut index.uuid, keys.uuid()),
                (&mut index.isbn_print, keys.isbn_print()),
                (&mut index.isbn_electronic, keys.isbn_electronic()),
            ] {
                if let Some(key) = key {
                    let first = map.entry(key).or_insert(row.row_number);
                    *first = (*first).min(row.row_number);
                }
            }
        }
        index
    }

    fn first_match(&self, keys: &CatalogKeys) -> Option<u32> {
        [
            keys.uuid().and_then(|k| self.uuid.get(k)),
            keys.isbn_print().and_then(|k| self.isbn_print.get(k)),
            keys.isbn_electronic().and_then(|k| self.isbn_electronic.get(k)),
        ]
        .into_iter()
        .flatten()
        .min()
        .copied()
    }
}

/// Pairs each candidate with the first remote row (lowest row number) that
/// shares a non-empty key with it. Candidates without a match are omitted.
pub fn match_candidates(candidates: &[CandidateRecord], rows: &[RemoteRow]) -> Vec<Match> {
    let index = KeyIndex::build(rows);
    candidates
        .iter()
        .enumerate()
        .filter_map(|(candidate, record)| {
            index.first_match(&record.keys).map(|row_number| Match {
                candidate,
                row_number,
            })
        })
        .collect()
}

/// Row numbers to delete from one worksheet, duplicates collapsed.
pub fn find_matches(candidates: &[CandidateRecord], rows: &[RemoteRow]) -> BTreeSet<u32> {
    match_candidates(candidates, rows)
        .into_iter()
        .map(|m| m.row_number)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidate(uuid: &str, isbn_print: &str, isbn_electronic: &str) -> CandidateRecord {
        CandidateRecord {
            source_row: 2,
            keys: CatalogKeys::new(uuid, isbn_print, isbn_electronic),
        }
    }

    fn row(row_number: u32, uuid: &str, isbn_print: &str, isbn_electronic: &str) -> RemoteRow {
        RemoteRow {
            row_number,
            keys: CatalogKeys::new(uuid, isbn_print, isbn_electronic),
        }
    }

    /// Naive scan kept as the reference behaviour for the indexed lookup.
    fn scan(candidates: &[CandidateRecord], rows: &[RemoteRow]) -> BTreeSet<u32> {
        candidates
            .iter()
            .filter_map(|c| rows.iter().find(|r| c.keys.matches(&r.keys)))
            .map(|r| r.row_number)
            .collect()
    }

    fn sheet(header: &[&str], data: &[&[&str]]) -> Vec<Vec<String>> {
        let mut values = vec![vec!["meta".to_string()]; 8];
        values.push(header.iter().map(|s| s.to_string()).collect());
        values.extend(data.iter().map(|r| r.iter().map(|s| s.to_string()).collect()));
        values
    }

    #[test]
    fn test_uuid_matches_after_normalization() {
        let rows = vec![row(14, "zzz", "", ""), row(15, "abc123", "", "")];
        let found = find_matches(&[candidate("ABC-123", "", "")], &rows);
        assert_eq!(found, BTreeSet::from([15]));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let rows = vec![
            row(12, "", "9780000000000", ""),
            row(20, "", "9780000000000", ""),
        ];
        let found = find_matches(&[candidate("", "9780000000000", "")], &rows);
        assert_eq!(found, BTreeSet::from([12]));
    }

    #[test]
    fn test_earliest_row_across_fields() {
        let rows = vec![
            row(10, "", "", "e-1"),
            row(11, "u-1", "", ""),
        ];
        let matches = match_candidates(&[candidate("u1", "", "e1")], &rows);
        assert_eq!(
            matches,
            vec![Match {
                candidate: 0,
                row_number: 10
            }]
        );
    }

    #[test]
    fn test_empty_candidates_never_match() {
        let rows = vec![row(10, "", "", ""), row(11, "x", "", "")];
        let found = find_matches(&[candidate("", "", ""), candidate(" ", "-", "")], &rows);
        assert!(found.is_empty());
    }

    #[test]
    fn test_two_candidates_same_row_collapse() {
        let rows = vec![row(30, "a", "b", "c")];
        let found = find_matches(&[candidate("a", "", ""), candidate("", "b", "")], &rows);
        assert_eq!(found, BTreeSet::from([30]));
    }

    #[test]
    fn test_no_match_is_empty() {
        let rows = vec![row(10, "a", "b", "c")];
        assert!(find_matches(&[candidate("z", "y", "x")], &rows).is_empty());
    }

    #[test]
    fn test_index_agrees_with_scan() {
        let rows = vec![
            row(10, "a", "1", ""),
            row(11, "b", "1", "e"),
            row(12, "a", "2", "e"),
            row(13, "", "3", "f"),
            row(14, "c", "", "f"),
        ];
        let candidates = vec![
            candidate("a", "", ""),
            candidate("", "3", "e"),
            candidate("c", "", "f"),
            candidate("", "", ""),
            candidate("q", "2", ""),
        ];
        assert_eq!(find_matches(&candidates, &rows), scan(&candidates, &rows));
    }

    #[test]
    fn test_header_index_case_insensitive() {
        let index = HeaderIndex::from_header_cells(&[" No ", "UUID", "ISBN Cetak ", "ISBN Elektronik*"]);
        assert_eq!(
            index.key_columns(),
            Ok(KeyColumns {
                uuid: 1,
                isbn_print: 2,
                isbn_electronic: 3
            })
        );
    }

    #[test]
    fn test_header_index_reports_missing() {
        let index = HeaderIndex::from_header_cells(&["UUID"]);
        assert_eq!(
            index.key_columns(),
            Err(WorksheetSkip::MissingColumns(vec![
                headers::ISBN_PRINT,
                headers::ISBN_ELECTRONIC
            ]))
        );
    }

    #[test]
    fn test_remote_rows_numbered_from_row_ten() {
        let values = sheet(
            &["UUID", "ISBN Cetak", "ISBN Elektronik*"],
            &[&["a", "1", "e1"], &["b"]],
        );
        let rows = remote_rows(&values).unwrap();
        assert_eq!(rows, vec![row(10, "a", "1", "e1"), row(11, "b", "", "")]);
    }

    #[test]
    fn test_sheet_with_eight_rows_is_skipped() {
        let values = vec![vec!["x".to_string()]; 8];
        assert_eq!(remote_rows(&values), Err(WorksheetSkip::TooFewRows(8)));
    }

    #[test]
    fn test_sheet_without_required_headers_is_skipped() {
        let values = sheet(&["UUID", "Judul*"], &[&["abc", "Buku"]]);
        assert!(matches!(
            remote_rows(&values),
            Err(WorksheetSkip::MissingColumns(_))
        ));
    }
}
