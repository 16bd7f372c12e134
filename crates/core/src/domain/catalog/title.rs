use super::layout::SEQUENCE_ZERO_PAD;

/// Title a catalog worksheet should carry for its sequence number.
///
/// An existing `NNN.` prefix is replaced; any other `.` in the title is
/// dropped so the prefix stays unambiguous.
///
/// ```
/// use catalog_sheets_core::domain::catalog::title::sequenced_title;
/// assert_eq!(sequenced_title("Fiksi Anak", 70), "070.Fiksi Anak");
/// assert_eq!(sequenced_title("12. Sains", 13), "013.Sains");
/// ```
pub fn sequenced_title(current: &str, number: u32) -> String {
    let base = match current.split_once('.') {
        Some((prefix, rest)) if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) => {
            rest.trim()
        }
        _ => current,
    };
    format!(
        "{:0width$}.{}",
        number,
        base.replace('.', ""),
        width = SEQUENCE_ZERO_PAD
    )
}

/// Named range label derived from a worksheet title: ASCII letters only.
/// Returns `None` when nothing is left.
pub fn named_range_name(sheet_title: &str) -> Option<String> {
    let name: String = sheet_title
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();
    (!name.is_empty()).then_some(name)
}
