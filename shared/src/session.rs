use std::cell::{Ref, RefCell};

use crate::columns::derive_columns;
use crate::error::{IntakeRejection, SubmissionError};
use crate::file::UploadFile;
use crate::form::{DropReport, IntrospectionTicket, UploadForm};
use crate::mode::UploadMode;
use crate::notify::{IconHint, NotificationSink};
use crate::transport::{Transport, UploadReceipt};

/// Drives one [`UploadForm`] against a transport, reporting every outcome to
/// the notification sink exactly once.
///
/// Borrows of the form never live across an `.await`, so the session can be
/// shared (`Rc`) between UI callbacks while a request or file read is pending.
pub struct UploadSession<F, T, N> {
    form: RefCell<UploadForm<F>>,
    transport: T,
    sink: N,
}

impl<F, T, N> UploadSession<F, T, N>
where
    F: UploadFile,
    T: Transport<F>,
    N: NotificationSink,
{
    pub fn new(form: UploadForm<F>, transport: T, sink: N) -> Self {
        Self {
            form: RefCell::new(form),
            transport,
            sink,
        }
    }

    pub fn form(&self) -> Ref<'_, UploadForm<F>> {
        self.form.borrow()
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn switch_mode(&self, mode: UploadMode) -> bool {
        let result = self.form.borrow_mut().switch_mode(mode);
        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    pub fn select_target_column(&self, column: &str) -> bool {
        let result = self.form.borrow_mut().select_target_column(column);
        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    pub fn select_task_type(&self, raw: &str) -> bool {
        let result = self.form.borrow_mut().select_task_type(raw);
        match result {
            Ok(_) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    pub fn discard_files(&self) {
        self.form.borrow_mut().discard_files();
    }

    pub fn acknowledge(&self) {
        self.form.borrow_mut().acknowledge();
    }

    /// Assigns dropped files and reports each rejected one. The returned
    /// ticket, if any, should be passed to [`Self::introspect`]. A drop made
    /// while a request is in flight is reported and leaves the form unchanged.
    pub fn accept_drop(&self, files: Vec<F>) -> DropReport<F> {
        let result = self.form.borrow_mut().accept_drop(files);
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                self.report(&e);
                return DropReport::noop();
            }
        };
        for rejection in &report.rejections {
            self.report_rejection(rejection);
        }
        report
    }

    /// Reads the ticket's CSV header and applies it if still current.
    pub async fn introspect(&self, ticket: IntrospectionTicket<F>) -> bool {
        let introspection = derive_columns(&ticket.file).await;
        let applied = self
            .form
            .borrow_mut()
            .apply_columns(ticket.generation, introspection.columns);

        if applied {
            if let Some(diagnostic) = introspection.diagnostic {
                self.sink.notify_error(
                    &format!("Could not read the columns of {}: {}", ticket.file.name(), diagnostic),
                    IconHint::Warning,
                );
            }
        }
        applied
    }

    /// Intake followed by introspection of a newly assigned CSV.
    pub async fn drop_files(&self, files: Vec<F>) -> DropReport<F> {
        let mut report = self.accept_drop(files);
        if let Some(ticket) = report.introspection.take() {
            self.introspect(ticket).await;
        }
        report
    }

    /// Validates and sends the current intent. A call made while another
    /// submission is pending fails immediately with
    /// [`SubmissionError::InProgress`].
    pub async fn submit(&self) -> Result<UploadReceipt, SubmissionError> {
        let prepared = self.form.borrow_mut().begin_submission();
        let prepared = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.report(&e);
                return Err(e);
            }
        };

        log::info!(
            "Submitting {} with fields {:?}",
            prepared.request.url,
            prepared.request.field_names()
        );
        let outcome = self.transport.send(&prepared.request).await;
        let (result, mode) = {
            let mut form = self.form.borrow_mut();
            (form.finish_submission(prepared.generation, outcome), form.mode())
        };

        match &result {
            Ok(_) => self.sink.notify_success(success_message(mode)),
            Err(e) => self.report(e),
        }
        result
    }

    fn report(&self, err: &SubmissionError) {
        let icon = match err {
            SubmissionError::Network { .. } => IconHint::Offline,
            SubmissionError::InProgress | SubmissionError::Superseded => IconHint::Warning,
            SubmissionError::Validation(_) | SubmissionError::Server { .. } => IconHint::Alert,
        };
        self.sink.notify_error(&err.to_string(), icon);
    }

    fn report_rejection(&self, rejection: &IntakeRejection) {
        self.sink.notify_error(&rejection.to_string(), IconHint::Warning);
    }
}

fn success_message(mode: UploadMode) -> &'static str {
    match mode {
        UploadMode::Dataset => "File uploaded successfully!",
        UploadMode::ChartImage => "Chart submitted for analysis!",
    }
}
