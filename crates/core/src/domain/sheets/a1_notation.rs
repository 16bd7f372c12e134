use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct A1Notation(String);

impl A1Notation {
    /// Prefixes a local range (`A1:AB9000`) with a quoted sheet title.
    ///
    /// ```
    /// use catalog_sheets_core::domain::sheets::a1_notation::A1Notation;
    /// let a1 = A1Notation::on_sheet(Some("001.Fiksi"), "A1:AB9000");
    /// assert_eq!(a1.as_ref(), "'001.Fiksi'!A1:AB9000");
    /// ```
    pub fn on_sheet(sheet_title: Option<&str>, local: &str) -> Self {
        match sheet_title {
            Some(title) => A1Notation(format!("{}!{}", quote_sheet_title(title), local)),
            None => A1Notation(local.to_owned()),
        }
    }
}

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

/// Sheet titles are always quoted; embedded single quotes are doubled.
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}
