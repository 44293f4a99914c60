use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Which analysis the form is preparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(EnumString, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UploadMode {
    Dataset,
    ChartImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(EnumString, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskType {
    #[default]
    Regression,
    Classification,
}

/// Role a file can play in a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum FileClass {
    #[strum(serialize = "CSV")]
    Csv,
    #[strum(serialize = "PDF")]
    Pdf,
    #[strum(serialize = "image")]
    Image,
}

pub const CSV_MEDIA_TYPE: &str = "text/csv";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const IMAGE_PREFIX: &str = "image/";

/// Lowercased media type without parameters, e.g. `text/csv; charset=utf-8` -> `text/csv`.
pub fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

impl FileClass {
    pub fn of(media_type: &str) -> Option<Self> {
        let essence = essence(media_type);
        match essence.as_str() {
            CSV_MEDIA_TYPE => Some(Self::Csv),
            PDF_MEDIA_TYPE => Some(Self::Pdf),
            other if other.starts_with(IMAGE_PREFIX) && other.len() > IMAGE_PREFIX.len() => {
                Some(Self::Image)
            }
            _ => None,
        }
    }
}

impl UploadMode {
    pub fn accepted_classes(&self) -> &'static [FileClass] {
        match self {
            Self::Dataset => &[FileClass::Csv, FileClass::Pdf],
            Self::ChartImage => &[FileClass::Image],
        }
    }

    /// The file class that must be present before a submit.
    pub fn primary_class(&self) -> FileClass {
        match self {
            Self::Dataset => FileClass::Csv,
            Self::ChartImage => FileClass::Image,
        }
    }

    pub fn accepts(&self, media_type: &str) -> bool {
        FileClass::of(media_type).is_some_and(|class| self.accepted_classes().contains(&class))
    }

    /// Value for an HTML `accept` attribute.
    pub fn accept_attribute(&self) -> &'static str {
        match self {
            Self::Dataset => ".csv,.pdf,text/csv,application/pdf",
            Self::ChartImage => "image/*",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dataset => "Dataset",
            Self::ChartImage => "Chart Image",
        }
    }
}

impl TaskType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regression => "Regression",
            Self::Classification => "Classification",
        }
    }
}
