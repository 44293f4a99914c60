use std::future::Future;
use std::rc::Rc;

use crate::error::ReadError;
use crate::mode::FileClass;

/// A user-selected file as the browser (or a test) hands it over.
///
/// Implementations are cheap handles: cloning must not copy the content.
pub trait UploadFile: Clone {
    fn name(&self) -> String;

    /// Declared media type, as reported by the file picker.
    fn media_type(&self) -> String;

    fn size(&self) -> u64;

    /// Reads the whole content as UTF-8 text.
    fn read_text(&self) -> impl Future<Output = Result<String, ReadError>>;
}

/// File held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryFile {
    name: String,
    media_type: String,
    content: Rc<[u8]>,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let content: Vec<u8> = content.into();
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content: Rc::from(content),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.content
    }
}

impl UploadFile for InMemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }

    fn size(&self) -> u64 {
        self.content.len() as u64
    }

    async fn read_text(&self) -> Result<String, ReadError> {
        Ok(String::from_utf8(self.content.to_vec())?)
    }
}

/// Display row for a file assigned to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub class: FileClass,
    pub size: u64,
}

impl SelectedFile {
    pub fn of<F: UploadFile>(file: &F, class: FileClass) -> Self {
        Self {
            name: file.name(),
            class,
            size: file.size(),
        }
    }
}

/// Human-readable size, e.g. `12.3 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
