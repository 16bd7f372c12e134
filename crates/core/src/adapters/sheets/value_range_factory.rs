use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

use crate::domain::sheets::a1_notation::A1Notation;

/// Builders for the value ranges of a values batch update. Each range
/// carries its own A1 target.
pub trait ValueRangeFactory {
    fn from_single_cell<'a, T: Into<Cow<'a, str>>>(range: A1Notation, cell_value: T) -> Self;
    fn from_single_column<'a, T: Into<Cow<'a, str>> + Clone>(
        range: A1Notation,
        column_values: &[T],
    ) -> Self;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_single_cell<'a, T: Into<Cow<'a, str>>>(range: A1Notation, cell_value: T) -> Self {
        ValueRange {
            major_dimension: None,
            range: Some(range.into()),
            values: Some(vec![vec![wrap_value(cell_value)]]),
        }
    }

    fn from_single_column<'a, T: Into<Cow<'a, str>> + Clone>(
        range: A1Notation,
        column_values: &[T],
    ) -> Self {
        let values = column_values
            .iter()
            .map(|col_item| vec![wrap_value(col_item.clone())])
            .collect::<Vec<_>>();

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.into()),
            values: Some(values),
        }
    }
}
