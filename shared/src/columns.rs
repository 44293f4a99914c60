use derive_more::Deref;

use crate::error::ReadError;
use crate::file::UploadFile;

/// Column names from a CSV header line, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct ColumnSet(Vec<String>);

pub(crate) static NO_COLUMNS: ColumnSet = ColumnSet(Vec::new());

impl ColumnSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the first line of `text`. Fields are comma separated, trimmed,
    /// and dropped when blank. Duplicates are kept.
    pub fn from_header(text: &str) -> Self {
        let header = text.split('\n').next().unwrap_or_default().replace('\r', "");
        let columns = header
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(String::from)
            .collect();
        Self(columns)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.iter().any(|c| c == column)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for ColumnSet {
    fn from(columns: Vec<String>) -> Self {
        Self(columns)
    }
}

/// Columns derived from one CSV, plus the reason they are empty when the
/// file could not be read.
#[derive(Debug)]
pub struct Introspection {
    pub columns: ColumnSet,
    pub diagnostic: Option<ReadError>,
}

/// Reads `file` and derives its header columns. Never fails: unreadable
/// content degrades to an empty set with a diagnostic.
pub async fn derive_columns<F: UploadFile>(file: &F) -> Introspection {
    match file.read_text().await {
        Ok(text) => {
            let columns = ColumnSet::from_header(&text);
            log::debug!("Derived {} column(s) from {}", columns.len(), file.name());
            Introspection {
                columns,
                diagnostic: None,
            }
        }
        Err(e) => {
            log::warn!("Could not read columns from {}: {}", file.name(), e);
            Introspection {
                columns: ColumnSet::empty(),
                diagnostic: Some(e),
            }
        }
    }
}
