use std::future::Future;

use serde_json::Value;

use crate::error::{GENERIC_FAILURE_MESSAGE, SubmissionError, TransportError};
use crate::file::UploadFile;
use crate::payload::SubmissionRequest;

/// Sends a built submission to the analysis service.
pub trait Transport<F: UploadFile> {
    fn send(
        &self,
        request: &SubmissionRequest<F>,
    ) -> impl Future<Output = Result<RemoteResponse, TransportError>>;
}

/// Raw HTTP answer from the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: String,
}

impl RemoteResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as JSON; a non-JSON body is kept as a JSON string.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }

    /// The `detail` field of a JSON error body, verbatim.
    pub fn detail(&self) -> Option<String> {
        let body: Value = serde_json::from_str(&self.body).ok()?;
        match body.get("detail")? {
            Value::Null => None,
            Value::String(detail) if detail.trim().is_empty() => None,
            Value::String(detail) => Some(detail.clone()),
            structured => Some(structured.to_string()),
        }
    }
}

/// Whatever the analysis service answered on success, passed through to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub status: u16,
    pub body: Value,
}

/// Maps one transport outcome onto the submission result.
pub fn interpret(outcome: Result<RemoteResponse, TransportError>) -> Result<UploadReceipt, SubmissionError> {
    let response = outcome?;
    if response.is_success() {
        Ok(UploadReceipt {
            status: response.status,
            body: response.json(),
        })
    } else {
        let message = response
            .detail()
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        Err(SubmissionError::Server {
            status: response.status,
            message,
        })
    }
}
