use super::{
    a1_notation::{A1Notation, ToA1Notation},
    column::Column,
    row::Row,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl CellPosition {
    pub const fn new(col: Column, row: Row) -> Self {
        CellPosition { col, row }
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        A1Notation::on_sheet(sheet_name, &format!("{}{}", self.col, self.row))
    }
}
