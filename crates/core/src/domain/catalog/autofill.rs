use std::time::Duration;

use crate::domain::sheets::{cell_range::CellRange, column::Column, row::Row};

/// What gets written into each row of an autofilled column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutofillMode {
    /// Consecutive integers starting at the given value.
    Sequence { start: u64 },
    /// A template whose `{row}` placeholder is replaced by the row number.
    PerRow(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autofill {
    pub range: CellRange,
    pub values: Vec<String>,
}

impl Autofill {
    /// Fills `col` from `first_row` to `last_row`. A `last_row` above
    /// `first_row` still fills the single first row.
    pub fn new(col: Column, first_row: Row, last_row: Row, mode: &AutofillMode) -> Self {
        let last_row = last_row.max(first_row);
        let values = (first_row.number()..=last_row.number())
            .enumerate()
            .map(|(offset, row)| match mode {
                AutofillMode::Sequence { start } => (start + offset as u64).to_string(),
                AutofillMode::PerRow(template) => template.replace("{row}", &row.to_string()),
            })
            .collect();

        Autofill {
            range: CellRange::column_span(col, first_row, last_row),
            values,
        }
    }

    /// Throttle after a column write: 20ms per row, at most 2s.
    pub fn pause(&self) -> Duration {
        Duration::from_millis(20 * self.values.len() as u64).min(Duration::from_secs(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::layout::{columns, CATALOG_LINK_FORMULA, SUBTOTAL_FORMULA};
    use crate::domain::sheets::a1_notation::ToA1Notation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sequence_numbers() {
        let fill = Autofill::new(
            columns::SEQUENCE,
            Row::from_number(10),
            Row::from_number(13),
            &AutofillMode::Sequence { start: 1 },
        );
        assert_eq!(fill.values, vec!["1", "2", "3", "4"]);
        assert_eq!(fill.range.to_a1_notation(None).as_ref(), "A10:A13");
    }

    #[test]
    fn test_per_row_formula() {
        let fill = Autofill::new(
            columns::SUBTOTAL,
            Row::from_number(10),
            Row::from_number(11),
            &AutofillMode::PerRow(SUBTOTAL_FORMULA),
        );
        assert_eq!(fill.values, vec!["=Y10*Z10", "=Y11*Z11"]);
    }

    #[test]
    fn test_link_formula() {
        let fill = Autofill::new(
            columns::LINK,
            Row::from_number(10),
            Row::from_number(10),
            &AutofillMode::PerRow(CATALOG_LINK_FORMULA),
        );
        assert_eq!(
            fill.values,
            vec!["=HYPERLINK(\"https://mocostore.moco.co.id/catalog/\"&AB10;\"Klik Disini\")"]
        );
    }

    #[test]
    fn test_last_row_before_first_fills_one_row() {
        let fill = Autofill::new(
            columns::SEQUENCE,
            Row::from_number(10),
            Row::from_number(4),
            &AutofillMode::Sequence { start: 1 },
        );
        assert_eq!(fill.values, vec!["1"]);
        assert_eq!(fill.range.to_a1_notation(None).as_ref(), "A10:A10");
    }

    #[test]
    fn test_pause_is_capped() {
        let fill = Autofill::new(
            columns::SEQUENCE,
            Row::from_number(10),
            Row::from_number(509),
            &AutofillMode::Sequence { start: 1 },
        );
        assert_eq!(fill.pause(), Duration::from_secs(2));

        let small = Autofill::new(
            columns::SEQUENCE,
            Row::from_number(10),
            Row::from_number(14),
            &AutofillMode::Sequence { start: 1 },
        );
        assert_eq!(small.pause(), Duration::from_millis(100));
    }
}
