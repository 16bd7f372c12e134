use google_sheets4::api::GridRange;

use super::{
    a1_notation::{A1Notation, ToA1Notation},
    cell_position::CellPosition,
    column::Column,
    row::Row,
};

/// Inclusive rectangle of cells, optionally bound to a sheet title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
    pub sheet_title: Option<String>,
}

impl CellRange {
    pub fn new(start: CellPosition, end: CellPosition) -> Self {
        CellRange {
            start,
            end,
            sheet_title: None,
        }
    }

    /// Single column from `first` to `last` (both inclusive).
    pub fn column_span(col: Column, first: Row, last: Row) -> Self {
        CellRange::new(CellPosition::new(col, first), CellPosition::new(col, last))
    }

    pub fn with_sheet_title(self, sheet_title: impl Into<String>) -> Self {
        Self {
            sheet_title: Some(sheet_title.into()),
            ..self
        }
    }

    /// Converts to the API's 0-based, end-exclusive grid coordinates.
    ///
    /// ```
    /// use catalog_sheets_core::domain::sheets::{cell_range::CellRange, column::Column, row::Row};
    /// let range = CellRange::column_span(Column::from_index(9), Row::from_number(10), Row::from_number(42));
    /// let grid = range.to_grid_range(7);
    /// assert_eq!(grid.start_row_index, Some(9));
    /// assert_eq!(grid.end_row_index, Some(42));
    /// assert_eq!(grid.start_column_index, Some(9));
    /// assert_eq!(grid.end_column_index, Some(10));
    /// ```
    pub fn to_grid_range(&self, sheet_id: i32) -> GridRange {
        GridRange {
            sheet_id: Some(sheet_id),
            start_row_index: Some(self.start.row.index() as i32),
            end_row_index: Some(self.end.row.index() as i32 + 1),
            start_column_index: Some(self.start.col.index() as i32),
            end_column_index: Some(self.end.col.index() as i32 + 1),
        }
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let sheet_name = sheet_name.or(self.sheet_title.as_deref());
        let local = format!(
            "{}{}:{}{}",
            self.start.col, self.start.row, self.end.col, self.end.row
        );
        A1Notation::on_sheet(sheet_name, &local)
    }
}
