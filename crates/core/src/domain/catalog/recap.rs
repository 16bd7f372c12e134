use crate::domain::sheets::{
    a1_notation::{A1Notation, ToA1Notation},
    cell_position::CellPosition,
    column::Column,
    row::Row,
};

/// Summary block in G2:G4 / J2:J5: item counts, totals and averages of the
/// data rows 10..=`last_row`.
pub fn recap_formulas(sheet_title: &str, last_row: u32) -> Vec<(A1Notation, String)> {
    let n = last_row;
    let cell = |col: u32, row: u32| {
        CellPosition::new(Column::from_index(col), Row::from_number(row))
            .to_a1_notation(Some(sheet_title))
    };

    vec![
        (cell(6, 2), format!("=COUNTA(C10:C{n})")),
        (cell(6, 3), format!("=SUM(Y10:Y{n})")),
        (cell(6, 4), format!("=AVERAGE(Y10:Y{n})")),
        (cell(9, 2), format!("=COUNTA(Z10:Z{n})")),
        (cell(9, 3), format!("=SUM(Z10:Z{n})")),
        (cell(9, 4), format!("=SUM(AA10:AA{n})")),
        (
            cell(9, 5),
            format!("=AVERAGEIF(Z10:Z{n}, \">0\", AA10:AA{n})"),
        ),
    ]
}
