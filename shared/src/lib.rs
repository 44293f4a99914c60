//! Upload workflow shared by the InsightForge front-end: file intake, CSV
//! header introspection, and single-flight submission to the analysis service.

pub mod columns;
pub mod config;
pub mod error;
pub mod file;
pub mod form;
pub mod intake;
pub mod intent;
pub mod mode;
pub mod notify;
pub mod payload;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use columns::{ColumnSet, derive_columns};
pub use config::{ApiConfig, FieldNames};
pub use error::{
    ConfigError, ErrorCategory, IntakeRejection, ReadError, SubmissionError, TransportError,
    ValidationError,
};
pub use file::{InMemoryFile, SelectedFile, UploadFile};
pub use form::{DropReport, IntrospectionTicket, PreparedSubmission, SubmissionState, UploadForm};
pub use intent::{ChartIntent, DatasetIntent, UploadIntent};
pub use mode::{FileClass, TaskType, UploadMode};
pub use notify::{IconHint, LogSink, NotificationSink};
pub use payload::{FormPart, PartValue, SubmissionRequest};
pub use session::UploadSession;
pub use transport::{RemoteResponse, Transport, UploadReceipt};
