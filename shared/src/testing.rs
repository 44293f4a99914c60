//! In-memory collaborators for exercising sessions without a browser.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use futures::channel::oneshot;

use crate::error::TransportError;
use crate::file::InMemoryFile;
use crate::notify::{IconHint, NotificationSink};
use crate::payload::SubmissionRequest;
use crate::transport::{RemoteResponse, Transport};

type Outcome = Result<RemoteResponse, TransportError>;

pub enum Reply {
    Ready(Outcome),
    /// Resolves when the test sends on the paired sender.
    Pending(oneshot::Receiver<Outcome>),
}

/// Transport answering from a script, recording every request it was given.
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    sent: RefCell<Vec<SubmissionRequest<InMemoryFile>>>,
    calls: Cell<usize>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            sent: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    pub fn sent(&self) -> Vec<SubmissionRequest<InMemoryFile>> {
        self.sent.borrow().clone()
    }
}

impl Transport<InMemoryFile> for ScriptedTransport {
    async fn send(&self, request: &SubmissionRequest<InMemoryFile>) -> Outcome {
        self.calls.set(self.calls.get() + 1);
        self.sent.borrow_mut().push(request.clone());
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(outcome)) => outcome,
            Some(Reply::Pending(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError("reply dropped".into()))),
            None => Err(TransportError("no scripted reply".into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String, IconHint),
}

#[derive(Default)]
pub struct RecordingSink {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingSink {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn error_count(&self) -> usize {
        self.notices
            .borrow()
            .iter()
            .filter(|n| matches!(n, Notice::Error(..)))
            .count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify_success(&self, message: &str) {
        self.notices.borrow_mut().push(Notice::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str, icon: IconHint) {
        self.notices
            .borrow_mut()
            .push(Notice::Error(message.to_string(), icon));
    }
}
