//! Structural and formatting requests applied to a catalog worksheet. Each
//! function only builds `Request`s; submitting them is the caller's job.

use std::ops::Range;

use google_sheets4::{
    api::{
        AddNamedRangeRequest, BasicFilter, Border, CellData, CellFormat, Color,
        DeleteNamedRangeRequest, GridProperties, GridRange, NamedRange, NumberFormat,
        RepeatCellRequest, Request, SetBasicFilterRequest, SheetProperties, TextFormat,
        UpdateBordersRequest, UpdateSheetPropertiesRequest,
    },
    FieldMask,
};
use strum::Display;

use super::layout::{columns, FROZEN_COLUMNS, FROZEN_ROWS, HEADER_ROW};
use crate::domain::sheets::{
    cell_position::CellPosition, cell_range::CellRange, column::Column,
};

const CURRENCY_PATTERN: &str = "[$Rp-421] #,##0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalAlignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalAlignment {
    Middle,
}

fn field_mask(paths: &[&str]) -> FieldMask {
    FieldMask::new(paths)
}

/// Zero-based, end-exclusive rectangle.
fn grid(sheet_id: i32, rows: Range<u32>, cols: Range<u32>) -> GridRange {
    GridRange {
        sheet_id: Some(sheet_id),
        start_row_index: Some(rows.start as i32),
        end_row_index: Some(rows.end as i32),
        start_column_index: Some(cols.start as i32),
        end_column_index: Some(cols.end as i32),
    }
}

fn solid_black() -> Option<Border> {
    Some(Border {
        style: Some("SOLID".to_string()),
        color: Some(Color {
            red: Some(0.0),
            green: Some(0.0),
            blue: Some(0.0),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn full_border(range: GridRange) -> Request {
    Request {
        update_borders: Some(UpdateBordersRequest {
            range: Some(range),
            top: solid_black(),
            bottom: solid_black(),
            left: solid_black(),
            right: solid_black(),
            inner_horizontal: solid_black(),
            inner_vertical: solid_black(),
        }),
        ..Default::default()
    }
}

fn alignment(range: GridRange, horizontal: HorizontalAlignment) -> Request {
    Request {
        repeat_cell: Some(RepeatCellRequest {
            range: Some(range),
            cell: Some(CellData {
                user_entered_format: Some(CellFormat {
                    horizontal_alignment: Some(horizontal.to_string()),
                    vertical_alignment: Some(VerticalAlignment::Middle.to_string()),
                    text_format: Some(TextFormat {
                        bold: Some(false),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            fields: Some(field_mask(&[
                "userEnteredFormat.horizontalAlignment",
                "userEnteredFormat.verticalAlignment",
                "userEnteredFormat.textFormat",
            ])),
        }),
        ..Default::default()
    }
}

fn currency(range: GridRange) -> Request {
    Request {
        repeat_cell: Some(RepeatCellRequest {
            range: Some(range),
            cell: Some(CellData {
                user_entered_format: Some(CellFormat {
                    number_format: Some(NumberFormat {
                        type_: Some("CURRENCY".to_string()),
                        pattern: Some(CURRENCY_PATTERN.to_string()),
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            fields: Some(field_mask(&["userEnteredFormat.numberFormat"])),
        }),
        ..Default::default()
    }
}

/// Borders around the recap blocks and the data table, per-zone alignment
/// of the data rows, and rupiah formatting of the money cells.
///
/// `last_row` is the last data row (1-based); tables shorter than the
/// header block are treated as ending on row 10.
pub fn border_and_format_requests(sheet_id: i32, last_row: u32) -> Vec<Request> {
    use HorizontalAlignment::{Center, Left};

    let end = last_row.max(10);
    let data = 9..end;
    let table_width = columns::LAST.number();

    let mut requests = vec![
        full_border(grid(sheet_id, 0..5, 5..7)),
        full_border(grid(sheet_id, 0..5, 8..10)),
        full_border(grid(sheet_id, 8..end, 0..table_width)),
        alignment(grid(sheet_id, 0..5, 5..10), Center),
    ];

    let zones = [
        (0..2, Center),
        (2..5, Left),
        (5..7, Center),
        (7..9, Left),
        (9..10, Center),
        (10..24, Left),
        (24..table_width, Center),
    ];
    requests.extend(
        zones
            .into_iter()
            .map(|(cols, horizontal)| alignment(grid(sheet_id, data.clone(), cols), horizontal)),
    );

    requests.extend(
        [
            grid(sheet_id, 2..4, 6..7),
            grid(sheet_id, 3..4, 9..10),
        ]
        .into_iter()
        .map(currency),
    );

    requests
}

/// Basic filter over the header row, `A9` to the last header cell.
/// Returns `None` when the header row is empty.
pub fn header_filter_request(sheet_id: i32, header_width: u32) -> Option<(CellRange, Request)> {
    if header_width == 0 {
        return None;
    }
    let range = CellRange::new(
        CellPosition::new(Column::from_index(0), HEADER_ROW),
        CellPosition::new(Column::from_index(header_width - 1), HEADER_ROW),
    );
    let request = Request {
        set_basic_filter: Some(SetBasicFilterRequest {
            filter: Some(BasicFilter {
                range: Some(range.to_grid_range(sheet_id)),
                ..Default::default()
            }),
        }),
        ..Default::default()
    };
    Some((range, request))
}

pub fn freeze_request(sheet_id: i32) -> Request {
    Request {
        update_sheet_properties: Some(UpdateSheetPropertiesRequest {
            properties: Some(SheetProperties {
                sheet_id: Some(sheet_id),
                grid_properties: Some(GridProperties {
                    frozen_row_count: Some(FROZEN_ROWS),
                    frozen_column_count: Some(FROZEN_COLUMNS),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            fields: Some(field_mask(&[
                "gridProperties.frozenRowCount",
                "gridProperties.frozenColumnCount",
            ])),
        }),
        ..Default::default()
    }
}

pub fn rename_request(sheet_id: i32, title: &str) -> Request {
    Request {
        update_sheet_properties: Some(UpdateSheetPropertiesRequest {
            properties: Some(SheetProperties {
                sheet_id: Some(sheet_id),
                title: Some(title.to_string()),
                ..Default::default()
            }),
            fields: Some(field_mask(&["title"])),
        }),
        ..Default::default()
    }
}

/// Replaces (or creates) the named range `name`. Deleting the old one and
/// adding the new one happen in the same batch.
pub fn named_range_requests(
    sheet_id: i32,
    name: &str,
    existing_id: Option<String>,
    range: &CellRange,
) -> Vec<Request> {
    let delete = existing_id.map(|named_range_id| Request {
        delete_named_range: Some(DeleteNamedRangeRequest {
            named_range_id: Some(named_range_id),
        }),
        ..Default::default()
    });
    let add = Request {
        add_named_range: Some(AddNamedRangeRequest {
            named_range: Some(NamedRange {
                name: Some(name.to_string()),
                range: Some(range.to_grid_range(sheet_id)),
                ..Default::default()
            }),
        }),
        ..Default::default()
    };
    delete.into_iter().chain(std::iter::once(add)).collect()
}
