use std::fmt::Formatter;

/// A spreadsheet column. Stored 1-based (`A` is 1), so a `Column` can never
/// be the invalid column zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u32);

impl Column {
    /// Builds a column from its zero-based index, the convention used by
    /// `GridRange` and by row vectors returned from the API.
    ///
    /// ```
    /// use catalog_sheets_core::domain::sheets::column::Column;
    /// assert_eq!(Column::from_index(0).to_string(), "A");
    /// assert_eq!(Column::from_index(27).to_string(), "AB");
    /// ```
    pub const fn from_index(index: u32) -> Self {
        Column(index + 1)
    }

    pub const fn number(&self) -> u32 {
        self.0
    }

    pub const fn index(&self) -> u32 {
        self.0 - 1
    }

    pub fn letters(&self) -> String {
        number_to_letters(self.0)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters())
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column(number: {}, letters: {})", self.0, self)
    }
}

fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut result = Vec::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        result.push((remainder as u8 + b'A') as char);
        number = (number - 1) / 26;
    }
    result.iter().rev().collect()
}
