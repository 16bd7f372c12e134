/// Canonical form used for every key comparison: whitespace and hyphens are
/// dropped and the rest is lower-cased.
///
/// ```
/// use catalog_sheets_core::domain::catalog::candidate::normalize_key;
/// assert_eq!(normalize_key(" ABC-123 "), "abc123");
/// assert_eq!(normalize_key("978-602 1234 56-7"), "9786021234567");
/// ```
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// The three identifiers a catalog row can be matched on, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogKeys {
    uuid: String,
    isbn_print: String,
    isbn_electronic: String,
}

impl CatalogKeys {
    pub fn new(uuid: &str, isbn_print: &str, isbn_electronic: &str) -> Self {
        CatalogKeys {
            uuid: normalize_key(uuid),
            isbn_print: normalize_key(isbn_print),
            isbn_electronic: normalize_key(isbn_electronic),
        }
    }

    pub fn uuid(&self) -> Option<&str> {
        non_empty(&self.uuid)
    }

    pub fn isbn_print(&self) -> Option<&str> {
        non_empty(&self.isbn_print)
    }

    pub fn isbn_electronic(&self) -> Option<&str> {
        non_empty(&self.isbn_electronic)
    }

    pub fn is_empty(&self) -> bool {
        self.uuid().is_none() && self.isbn_print().is_none() && self.isbn_electronic().is_none()
    }

    /// True when any field is non-empty on both sides and equal.
    pub fn matches(&self, other: &CatalogKeys) -> bool {
        let same = |a: Option<&str>, b: Option<&str>| matches!((a, b), (Some(a), Some(b)) if a == b);
        same(self.uuid(), other.uuid())
            || same(self.isbn_print(), other.isbn_print())
            || same(self.isbn_electronic(), other.isbn_electronic())
    }
}

impl std::fmt::Display for CatalogKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UUID='{}' ISBN='{}' e-ISBN='{}'",
            self.uuid, self.isbn_print, self.isbn_electronic
        )
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// One row of the user-supplied deletion table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    /// 1-based row in the input file, for log messages.
    pub source_row: usize,
    pub keys: CatalogKeys,
}
