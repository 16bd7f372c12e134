use std::fmt::Formatter;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub const fn from_index(index: u32) -> Self {
        Row { index }
    }

    /// Builds a row from its 1-based number as shown in the sheet UI.
    /// Row number zero saturates to the first row.
    pub const fn from_number(number: u32) -> Self {
        Row {
            index: number.saturating_sub(1),
        }
    }

    /// Returns the row number as a 1-based index.
    /// # Examples
    /// ```
    /// use catalog_sheets_core::domain::sheets::row::Row;
    /// assert_eq!(Row::from_index(0).number(), 1);
    /// assert_eq!(Row::from_index(8).number(), 9);
    /// ```
    pub const fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    /// Returns the row index as a zero-based index, the convention of
    /// `GridRange` and `DimensionRange`.
    /// # Examples
    /// ```
    /// use catalog_sheets_core::domain::sheets::row::Row;
    /// assert_eq!(Row::from_number(10).index(), 9);
    /// ```
    pub const fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, number: {})", self.index(), self.number())
    }
}
