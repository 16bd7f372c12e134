//! Fixed geometry of a catalog worksheet: eight metadata rows, the header on
//! row 9, data from row 10 onwards, columns A through AB.

use crate::domain::sheets::{column::Column, row::Row};

pub const HEADER_ROW: Row = Row::from_number(9);
pub const FIRST_DATA_ROW: Row = Row::from_number(10);

/// Header rows plus at least one data row.
pub const MIN_ROWS_WITH_DATA: usize = 10;

/// Region fetched per worksheet when matching candidates.
pub const MATCH_READ_RANGE: &str = "A1:AB9000";

/// Header captions (already trimmed and lower-cased) the matcher needs.
pub mod headers {
    pub const UUID: &str = "uuid";
    pub const ISBN_PRINT: &str = "isbn cetak";
    pub const ISBN_ELECTRONIC: &str = "isbn elektronik*";
}

pub mod columns {
    use super::Column;

    pub const SEQUENCE: Column = Column::from_index(0); // A
    pub const LINK: Column = Column::from_index(1); // B
    pub const TITLE: Column = Column::from_index(2); // C
    pub const PRICE_REFERENCE: Column = Column::from_index(9); // J
    pub const SUBTOTAL: Column = Column::from_index(26); // AA
    pub const LAST: Column = Column::from_index(27); // AB
}

/// Frozen panes: everything down to the header row, columns A..J.
pub const FROZEN_ROWS: i32 = 9;
pub const FROZEN_COLUMNS: i32 = 10;

/// Worksheets preceding the numbered catalog tabs.
pub const LEADING_SHEETS: usize = 2;

pub const SEQUENCE_ZERO_PAD: usize = 3;

pub const CATALOG_LINK_FORMULA: &str =
    "=HYPERLINK(\"https://mocostore.moco.co.id/catalog/\"&AB{row};\"Klik Disini\")";
pub const SUBTOTAL_FORMULA: &str = "=Y{row}*Z{row}";
