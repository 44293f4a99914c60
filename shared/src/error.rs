use std::string::FromUtf8Error;

use strum_macros::{AsRefStr, Display};
use thiserror::Error;

use crate::mode::{FileClass, UploadMode};

/// Fallback shown when the analysis service gives no usable `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Upload failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", missing_primary_message(.mode))]
    MissingPrimaryFile { mode: UploadMode },
    #[error("Please select the target column.")]
    MissingTargetColumn,
    #[error("Please choose a valid task type (regression or classification), got '{0}'.")]
    InvalidTaskType(String),
}

fn missing_primary_message(mode: &UploadMode) -> &'static str {
    match mode {
        UploadMode::Dataset => "Please upload a CSV file.",
        UploadMode::ChartImage => "Please upload a chart image.",
    }
}

/// A file intake refused to assign.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeRejection {
    #[error("Skipped '{file_name}': {media_type} is not accepted in {mode} mode.")]
    UnsupportedType {
        file_name: String,
        media_type: String,
        mode: UploadMode,
    },
    #[error("Skipped '{file_name}': only one {class} file can be uploaded at a time.")]
    Duplicate { file_name: String, class: FileClass },
}

impl IntakeRejection {
    pub fn file_name(&self) -> &str {
        match self {
            Self::UnsupportedType { file_name, .. } | Self::Duplicate { file_name, .. } => file_name,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("File could not be read: {0}")]
    Unreadable(String),
    #[error("File is not valid UTF-8 text: {0}")]
    Decode(#[from] FromUtf8Error),
}

/// The request failed before any response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Network error: {0}")]
pub struct TransportError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("API base URL must not be empty")]
    MissingBaseUrl,
    #[error("Endpoint '{0}' must not be empty")]
    MissingEndpoint(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorCategory {
    Validation,
    Network,
    Server,
    Concurrency,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{message}")]
    Network { message: String },
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("An upload is already in progress.")]
    InProgress,
    #[error("The form changed while uploading; the response was discarded.")]
    Superseded,
}

impl SubmissionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Network { .. } => ErrorCategory::Network,
            Self::Server { .. } => ErrorCategory::Server,
            Self::InProgress | Self::Superseded => ErrorCategory::Concurrency,
        }
    }

    /// Whether resubmitting the same form can succeed without user edits.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Server { .. })
    }
}

impl From<TransportError> for SubmissionError {
    fn from(err: TransportError) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}
