use std::collections::BTreeSet;

use google_sheets4::api::{DeleteDimensionRequest, DimensionRange, Request};
use strum::Display;

use crate::domain::sheets::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
}

/// Half-open, zero-based row interval `[start, end)` in the API's index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: u32,
    pub end: u32,
}

impl RowRange {
    pub fn single(row: Row) -> Self {
        RowRange {
            start: row.index(),
            end: row.index() + 1,
        }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_delete_request(self, sheet_id: i32) -> Request {
        Request {
            delete_dimension: Some(DeleteDimensionRequest {
                range: Some(DimensionRange {
                    sheet_id: Some(sheet_id),
                    dimension: Some(Dimension::Rows.to_string()),
                    start_index: Some(self.start as i32),
                    end_index: Some(self.end as i32),
                }),
            }),
            ..Default::default()
        }
    }
}

/// Rows (1-based numbers) to remove from one worksheet in a single batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletePlan {
    rows: BTreeSet<u32>,
}

impl DeletePlan {
    pub fn new(rows: impl IntoIterator<Item = u32>) -> Self {
        DeletePlan {
            rows: rows.into_iter().filter(|row| *row > 0).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One single-row range per planned row, highest first, so applying
    /// them in order never shifts a range that is still pending.
    ///
    /// ```
    /// use catalog_sheets_core::domain::catalog::delete_plan::{DeletePlan, RowRange};
    /// let plan = DeletePlan::new([12, 20, 15]);
    /// let starts: Vec<u32> = plan.ranges().iter().map(|r| r.start).collect();
    /// assert_eq!(starts, vec![19, 14, 11]);
    /// ```
    pub fn ranges(&self) -> Vec<RowRange> {
        self.rows
            .iter()
            .rev()
            .map(|number| RowRange::single(Row::from_number(*number)))
            .collect()
    }

    pub fn to_requests(&self, sheet_id: i32) -> Vec<Request> {
        self.ranges()
            .into_iter()
            .map(|range| range.to_delete_request(sheet_id))
            .collect()
    }
}

/// Range covering every grid row below `last_row`, if the grid has any.
pub fn trailing_rows(last_row: Row, grid_row_count: u32) -> Option<RowRange> {
    let range = RowRange {
        start: last_row.index() + 1,
        end: grid_row_count,
    };
    (!range.is_empty()).then_some(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ranges_sorted_descending() {
        let plan = DeletePlan::new([12, 20, 15]);
        assert_eq!(
            plan.ranges(),
            vec![
                RowRange { start: 19, end: 20 },
                RowRange { start: 14, end: 15 },
                RowRange { start: 11, end: 12 },
            ]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let plan = DeletePlan::new([12, 12, 13]);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_applying_ranges_in_order_removes_planned_rows() {
        let plan = DeletePlan::new([3, 7, 5, 10]);
        let mut sheet: Vec<u32> = (1..=12).collect();
        for range in plan.ranges() {
            sheet.drain(range.start as usize..range.end as usize);
        }
        assert_eq!(sheet, vec![1, 2, 4, 6, 8, 9, 11, 12]);
    }

    #[test]
    fn test_delete_request_shape() {
        let request = RowRange { start: 19, end: 20 }.to_delete_request(42);
        let range = request.delete_dimension.unwrap().range.unwrap();
        assert_eq!(range.sheet_id, Some(42));
        assert_eq!(range.dimension.as_deref(), Some("ROWS"));
        assert_eq!(range.start_index, Some(19));
        assert_eq!(range.end_index, Some(20));
    }

    #[test]
    fn test_empty_plan_has_no_requests() {
        assert!(DeletePlan::new([]).to_requests(1).is_empty());
    }

    #[test]
    fn test_trailing_rows() {
        assert_eq!(
            trailing_rows(Row::from_number(120), 1000),
            Some(RowRange {
                start: 120,
                end: 1000
            })
        );
        assert_eq!(trailing_rows(Row::from_number(1000), 1000), None);
        assert_eq!(trailing_rows(Row::from_number(1200), 1000), None);
    }
}
