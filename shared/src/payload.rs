use crate::file::UploadFile;

/// One multipart field.
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue<F> {
    File(F),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart<F> {
    pub name: String,
    pub value: PartValue<F>,
}

/// A fully built multipart POST, ready for a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest<F> {
    pub url: String,
    pub parts: Vec<FormPart<F>>,
}

impl<F: UploadFile> SubmissionRequest<F> {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            parts: Vec::new(),
        }
    }

    pub fn file(mut self, name: &str, file: F) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: PartValue::File(file),
        });
        self
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    pub fn part(&self, name: &str) -> Option<&PartValue<F>> {
        self.parts.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        match self.part(name)? {
            PartValue::Text(value) => Some(value),
            PartValue::File(_) => None,
        }
    }

    pub fn file_name(&self, name: &str) -> Option<String> {
        match self.part(name)? {
            PartValue::File(file) => Some(file.name()),
            PartValue::Text(_) => None,
        }
    }

    /// Field names in insertion order, for logging.
    pub fn field_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }
}
