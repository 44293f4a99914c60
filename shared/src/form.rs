use std::str::FromStr;

use strum_macros::Display;

use crate::columns::ColumnSet;
use crate::config::ApiConfig;
use crate::error::{IntakeRejection, SubmissionError, TransportError, ValidationError};
use crate::file::{SelectedFile, UploadFile};
use crate::intake;
use crate::intent::UploadIntent;
use crate::mode::{FileClass, TaskType, UploadMode};
use crate::payload::SubmissionRequest;
use crate::transport::{self, RemoteResponse, UploadReceipt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SubmissionState {
    Idle,
    /// Only held inside `begin_submission`; callers never observe it.
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// A CSV whose columns still have to be read. Only applies while the form's
/// generation is unchanged.
#[derive(Debug, Clone)]
pub struct IntrospectionTicket<F> {
    pub generation: u64,
    pub file: F,
}

/// What a drop changed.
#[derive(Debug, Clone)]
pub struct DropReport<F> {
    pub accepted: Vec<SelectedFile>,
    pub rejections: Vec<IntakeRejection>,
    pub introspection: Option<IntrospectionTicket<F>>,
}

impl<F> DropReport<F> {
    pub(crate) fn noop() -> Self {
        Self {
            accepted: Vec::new(),
            rejections: Vec::new(),
            introspection: None,
        }
    }
}

/// A validated request that is now in flight.
#[derive(Debug, Clone)]
pub struct PreparedSubmission<F> {
    pub generation: u64,
    pub request: SubmissionRequest<F>,
}

/// State of one upload form: the intent being assembled, the submission
/// cycle, and the generation counter that invalidates late async results.
#[derive(Debug)]
pub struct UploadForm<F> {
    config: ApiConfig,
    intent: UploadIntent<F>,
    state: SubmissionState,
    generation: u64,
}

impl<F: UploadFile> UploadForm<F> {
    pub fn new(config: ApiConfig, mode: UploadMode) -> Self {
        let intent = UploadIntent::empty(mode, config.default_task_type);
        Self {
            config,
            intent,
            state: SubmissionState::Idle,
            generation: 0,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn intent(&self) -> &UploadIntent<F> {
        &self.intent
    }

    pub fn mode(&self) -> UploadMode {
        self.intent.mode()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn columns(&self) -> &ColumnSet {
        self.intent.columns()
    }

    pub fn task_type(&self) -> Option<TaskType> {
        match &self.intent {
            UploadIntent::Dataset(dataset) => dataset.task_type(),
            UploadIntent::Chart(_) => None,
        }
    }

    pub fn target_column(&self) -> Option<&str> {
        match &self.intent {
            UploadIntent::Dataset(dataset) => dataset.target_column(),
            UploadIntent::Chart(_) => None,
        }
    }

    pub fn selected_files(&self) -> Vec<SelectedFile> {
        self.intent.selected_files()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    pub fn can_select_target(&self) -> bool {
        !self.is_submitting() && !self.columns().is_empty()
    }

    fn bump_generation(&mut self) {
        self.generation += 1;
    }

    fn reset_intent(&mut self) {
        self.intent = UploadIntent::empty(self.mode(), self.config.default_task_type);
        self.bump_generation();
    }

    fn leave_terminal_state(&mut self) {
        if self.state.is_terminal() {
            self.state = SubmissionState::Idle;
        }
    }

    pub fn switch_mode(&mut self, mode: UploadMode) -> Result<(), SubmissionError> {
        if self.is_submitting() {
            return Err(SubmissionError::InProgress);
        }
        if mode != self.mode() {
            log::debug!("Switching upload mode to {}", mode);
            self.intent = UploadIntent::empty(mode, self.config.default_task_type);
            self.bump_generation();
        }
        self.state = SubmissionState::Idle;
        Ok(())
    }

    /// Classifies and assigns dropped files. A new CSV clears the columns and
    /// target column right away and returns a ticket for reading the new header.
    /// Refused while a request is in flight, since a success would reset the
    /// unsent selection.
    pub fn accept_drop(&mut self, files: Vec<F>) -> Result<DropReport<F>, SubmissionError> {
        if files.is_empty() {
            return Ok(DropReport::noop());
        }
        if self.is_submitting() {
            log::warn!("Drop of {} file(s) refused: an upload is in flight", files.len());
            return Err(SubmissionError::InProgress);
        }

        let mut result = intake::accept_drop(files, self.mode());
        let mut report = DropReport {
            accepted: Vec::new(),
            rejections: std::mem::take(&mut result.rejections),
            introspection: None,
        };
        if result.accepted_count() == 0 {
            return Ok(report);
        }

        match &mut self.intent {
            UploadIntent::Dataset(dataset) => {
                if let Some(csv) = result.csv {
                    report.accepted.push(SelectedFile::of(&csv, FileClass::Csv));
                    dataset.assign_csv(csv.clone());
                    self.generation += 1;
                    report.introspection = Some(IntrospectionTicket {
                        generation: self.generation,
                        file: csv,
                    });
                }
                if let Some(pdf) = result.pdf {
                    report.accepted.push(SelectedFile::of(&pdf, FileClass::Pdf));
                    dataset.pdf = Some(pdf);
                }
            }
            UploadIntent::Chart(chart) => {
                if let Some(image) = result.image {
                    report.accepted.push(SelectedFile::of(&image, FileClass::Image));
                    chart.image = Some(image);
                    self.generation += 1;
                }
            }
        }

        self.leave_terminal_state();
        Ok(report)
    }

    /// Stores introspected columns unless the CSV changed since the ticket was
    /// issued. Returns whether they were applied.
    pub fn apply_columns(&mut self, generation: u64, columns: ColumnSet) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding columns from generation {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        match &mut self.intent {
            UploadIntent::Dataset(dataset) => {
                dataset.columns = columns;
                true
            }
            UploadIntent::Chart(_) => false,
        }
    }

    pub fn select_target_column(&mut self, column: &str) -> Result<(), SubmissionError> {
        if self.is_submitting() {
            return Err(SubmissionError::InProgress);
        }
        match &mut self.intent {
            UploadIntent::Dataset(dataset) if dataset.columns.contains(column) => {
                dataset.target_column = Some(column.to_string());
                Ok(())
            }
            _ => Err(ValidationError::MissingTargetColumn.into()),
        }
    }

    /// Parses a task type coming from the UI. Unknown values clear the
    /// selection so a later submit fails validation.
    pub fn select_task_type(&mut self, raw: &str) -> Result<TaskType, SubmissionError> {
        if self.is_submitting() {
            return Err(SubmissionError::InProgress);
        }
        let parsed = TaskType::from_str(raw.trim());
        if let UploadIntent::Dataset(dataset) = &mut self.intent {
            dataset.task_type = parsed.as_ref().ok().copied();
        }
        parsed.map_err(|_| ValidationError::InvalidTaskType(raw.to_string()).into())
    }

    /// Drops every selected file and derived column.
    pub fn discard_files(&mut self) {
        self.reset_intent();
        self.leave_terminal_state();
    }

    pub fn acknowledge(&mut self) {
        self.leave_terminal_state();
    }

    fn build_request(&self) -> Result<SubmissionRequest<F>, ValidationError> {
        let fields = &self.config.fields;
        let url = self.config.endpoint_url(self.mode());
        let primary = self
            .intent
            .primary_file()
            .ok_or(ValidationError::MissingPrimaryFile { mode: self.mode() })?;

        match &self.intent {
            UploadIntent::Dataset(dataset) => {
                let target = dataset
                    .target_column()
                    .filter(|t| !t.is_empty() && dataset.columns().contains(t))
                    .ok_or(ValidationError::MissingTargetColumn)?;
                let task_type = dataset
                    .task_type()
                    .ok_or_else(|| ValidationError::InvalidTaskType(String::new()))?;

                let mut request = SubmissionRequest::new(url).file(&fields.file, primary.clone());
                if let Some(pdf) = dataset.pdf() {
                    request = request.file(&fields.pdf_file, pdf.clone());
                }
                Ok(request
                    .text(&fields.task_type, task_type.to_string())
                    .text(&fields.target_column, target))
            }
            UploadIntent::Chart(_) => Ok(SubmissionRequest::new(url).file(&fields.file, primary.clone())),
        }
    }

    /// Validates the intent and marks the form as submitting.
    pub fn begin_submission(&mut self) -> Result<PreparedSubmission<F>, SubmissionError> {
        if self.is_submitting() {
            log::warn!("Submit ignored: an upload is already in flight");
            return Err(SubmissionError::InProgress);
        }

        self.state = SubmissionState::Validating;
        match self.build_request() {
            Ok(request) => {
                self.state = SubmissionState::Submitting;
                Ok(PreparedSubmission {
                    generation: self.generation,
                    request,
                })
            }
            Err(e) => {
                log::warn!("Submission rejected: {}", e);
                self.state = SubmissionState::Failed;
                Err(e.into())
            }
        }
    }

    /// Applies the outcome of the request started at `generation`.
    pub fn finish_submission(
        &mut self,
        generation: u64,
        outcome: Result<RemoteResponse, TransportError>,
    ) -> Result<UploadReceipt, SubmissionError> {
        if !self.is_submitting() || generation != self.generation {
            log::warn!(
                "Discarding response for generation {} (current {})",
                generation,
                self.generation
            );
            if self.is_submitting() {
                self.state = SubmissionState::Idle;
            }
            return Err(SubmissionError::Superseded);
        }

        match transport::interpret(outcome) {
            Ok(receipt) => {
                log::info!("Upload accepted with status {}", receipt.status);
                self.state = SubmissionState::Succeeded;
                self.reset_intent();
                Ok(receipt)
            }
            Err(e) => {
                log::error!("Upload failed ({}): {}", e.category(), e);
                self.state = SubmissionState::Failed;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::file::InMemoryFile;
    use crate::payload::PartValue;

    fn csv(name: &str, content: &str) -> InMemoryFile {
        InMemoryFile::new(name, "text/csv", content)
    }

    fn dataset_form() -> UploadForm<InMemoryFile> {
        UploadForm::new(ApiConfig::default(), UploadMode::Dataset)
    }

    /// Drops `file` and applies its header as if the read had completed.
    fn load_csv(form: &mut UploadForm<InMemoryFile>, file: InMemoryFile) {
        let ticket = form.accept_drop(vec![file]).unwrap().introspection.unwrap();
        let header = String::from_utf8(ticket.file.bytes().to_vec()).unwrap();
        assert!(form.apply_columns(ticket.generation, ColumnSet::from_header(&header)));
    }

    fn ready_form() -> UploadForm<InMemoryFile> {
        let mut form = dataset_form();
        load_csv(&mut form, csv("houses.csv", "area,rooms,price\n1,2,3"));
        form.select_target_column("price").unwrap();
        form
    }

    #[test]
    fn test_new_csv_clears_target_and_columns() {
        let mut form = ready_form();
        assert_eq!(form.target_column(), Some("price"));

        let report = form.accept_drop(vec![csv("cars.csv", "make,year\n")]).unwrap();
        assert!(report.introspection.is_some());
        assert_eq!(form.target_column(), None);
        assert!(form.columns().is_empty());
        assert!(!form.can_select_target());
    }

    #[test]
    fn test_stale_introspection_is_discarded() {
        let mut form = dataset_form();
        let first = form.accept_drop(vec![csv("a.csv", "x,y")]).unwrap().introspection.unwrap();
        let second = form.accept_drop(vec![csv("a.csv", "p,q")]).unwrap().introspection.unwrap();
        assert_ne!(first.generation, second.generation);

        assert!(form.apply_columns(second.generation, ColumnSet::from_header("p,q")));
        assert!(!form.apply_columns(first.generation, ColumnSet::from_header("x,y")));
        assert_eq!(form.columns().clone().into_inner(), vec!["p", "q"]);
    }

    #[test]
    fn test_pdf_drop_keeps_pending_introspection_valid() {
        let mut form = dataset_form();
        let ticket = form.accept_drop(vec![csv("a.csv", "x,y")]).unwrap().introspection.unwrap();
        let pdf = InMemoryFile::new("dash.pdf", "application/pdf", "%PDF");
        let report = form.accept_drop(vec![pdf]).unwrap();
        assert!(report.introspection.is_none());
        assert!(form.apply_columns(ticket.generation, ColumnSet::from_header("x,y")));
        assert_eq!(form.selected_files().len(), 2);
    }

    #[test]
    fn test_target_must_come_from_columns() {
        let mut form = ready_form();
        assert_eq!(
            form.select_target_column("Price"),
            Err(SubmissionError::Validation(ValidationError::MissingTargetColumn))
        );
        assert_eq!(form.target_column(), Some("price"));
    }

    #[test]
    fn test_missing_csv_fails_first() {
        let mut form = dataset_form();
        let _ = form.select_task_type("bogus");
        let err = form.begin_submission().unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Validation(ValidationError::MissingPrimaryFile {
                mode: UploadMode::Dataset
            })
        );
        assert_eq!(form.state(), SubmissionState::Failed);
    }

    #[test]
    fn test_missing_target_column() {
        let mut form = dataset_form();
        load_csv(&mut form, csv("houses.csv", "area,price"));
        let err = form.begin_submission().unwrap_err();
        assert_eq!(err, SubmissionError::Validation(ValidationError::MissingTargetColumn));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_invalid_task_type() {
        let mut form = ready_form();
        assert!(form.select_task_type("clustering").is_err());
        assert_eq!(form.task_type(), None);
        assert!(matches!(
            form.begin_submission(),
            Err(SubmissionError::Validation(ValidationError::InvalidTaskType(_)))
        ));

        assert_eq!(form.select_task_type("classification"), Ok(TaskType::Classification));
        assert!(form.begin_submission().is_ok());
    }

    #[test]
    fn test_dataset_payload_fields() {
        let mut form = ready_form();
        let pdf = InMemoryFile::new("powerbi.pdf", "application/pdf", "%PDF");
        form.accept_drop(vec![pdf]).unwrap();

        let prepared = form.begin_submission().unwrap();
        let request = &prepared.request;
        assert_eq!(request.url, "http://localhost:8000/upload");
        assert_eq!(request.field_names(), vec!["file", "pdf_file", "task_type", "target_col"]);
        assert_eq!(request.file_name("file").as_deref(), Some("houses.csv"));
        assert_eq!(request.file_name("pdf_file").as_deref(), Some("powerbi.pdf"));
        assert_eq!(request.text_value("task_type"), Some("regression"));
        assert_eq!(request.text_value("target_col"), Some("price"));
        assert_eq!(form.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_configured_field_names() {
        let yaml = "dataset_endpoint: /upload-dataset\nfields:\n  target_column: target_column\n";
        let mut form = UploadForm::new(ApiConfig::from_yaml(yaml).unwrap(), UploadMode::Dataset);
        load_csv(&mut form, csv("d.csv", "a,b"));
        form.select_target_column("b").unwrap();

        let prepared = form.begin_submission().unwrap();
        assert!(prepared.request.url.ends_with("/upload-dataset"));
        assert_eq!(prepared.request.text_value("target_column"), Some("b"));
        assert!(prepared.request.part("target_col").is_none());
    }

    #[test]
    fn test_chart_payload_has_no_metadata() {
        let mut form = UploadForm::new(ApiConfig::default(), UploadMode::ChartImage);
        assert!(matches!(
            form.begin_submission(),
            Err(SubmissionError::Validation(ValidationError::MissingPrimaryFile {
                mode: UploadMode::ChartImage
            }))
        ));

        form.accept_drop(vec![InMemoryFile::new("bar.png", "image/png", vec![1, 2, 3])]).unwrap();
        let prepared = form.begin_submission().unwrap();
        assert_eq!(prepared.request.url, "http://localhost:8000/analyze-chart");
        assert_eq!(prepared.request.parts.len(), 1);
        assert!(matches!(prepared.request.part("file"), Some(PartValue::File(_))));
    }

    #[test]
    fn test_second_begin_is_rejected_while_submitting() {
        let mut form = ready_form();
        let first = form.begin_submission().unwrap();
        assert_eq!(form.begin_submission().unwrap_err(), SubmissionError::InProgress);
        assert_eq!(form.state(), SubmissionState::Submitting);
        assert_eq!(form.switch_mode(UploadMode::ChartImage), Err(SubmissionError::InProgress));

        let receipt = form
            .finish_submission(first.generation, Ok(RemoteResponse::new(200, "{}")))
            .unwrap();
        assert_eq!(receipt.status, 200);
    }

    #[test]
    fn test_success_resets_everything() {
        let mut form = ready_form();
        form.select_task_type("classification").unwrap();
        let prepared = form.begin_submission().unwrap();

        form.finish_submission(prepared.generation, Ok(RemoteResponse::new(200, r#"{"status":"success"}"#)))
            .unwrap();

        assert_eq!(form.state(), SubmissionState::Succeeded);
        assert!(form.selected_files().is_empty());
        assert!(form.columns().is_empty());
        assert_eq!(form.target_column(), None);
        assert_eq!(form.task_type(), Some(TaskType::Regression));
        assert_eq!(form.mode(), UploadMode::Dataset);
    }

    #[test]
    fn test_failure_keeps_selection() {
        let mut form = ready_form();
        let prepared = form.begin_submission().unwrap();
        let err = form
            .finish_submission(prepared.generation, Ok(RemoteResponse::new(400, r#"{"detail":"Too few unique values"}"#)))
            .unwrap_err();

        assert_eq!(err.to_string(), "Too few unique values");
        assert_eq!(form.state(), SubmissionState::Failed);
        assert_eq!(form.target_column(), Some("price"));
        assert_eq!(form.columns().len(), 3);
        assert_eq!(form.selected_files()[0].name, "houses.csv");

        let retry = form.begin_submission().unwrap();
        let err = form
            .finish_submission(retry.generation, Err(TransportError("offline".into())))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(form.target_column(), Some("price"));
    }

    #[test]
    fn test_response_after_reset_is_discarded() {
        let mut form = ready_form();
        let prepared = form.begin_submission().unwrap();
        form.discard_files();
        assert!(form.selected_files().is_empty());

        let err = form
            .finish_submission(prepared.generation, Ok(RemoteResponse::new(200, "{}")))
            .unwrap_err();
        assert_eq!(err, SubmissionError::Superseded);
        assert_eq!(form.state(), SubmissionState::Idle);

        load_csv(&mut form, csv("next.csv", "k,v"));
        assert_eq!(form.selected_files()[0].name, "next.csv");
        assert_eq!(form.columns().len(), 2);
    }

    #[test]
    fn test_edits_are_refused_while_submitting() {
        let mut form = ready_form();
        let prepared = form.begin_submission().unwrap();

        let pdf = InMemoryFile::new("new.pdf", "application/pdf", "%PDF");
        assert_eq!(form.accept_drop(vec![pdf]).unwrap_err(), SubmissionError::InProgress);
        assert_eq!(form.select_target_column("area"), Err(SubmissionError::InProgress));
        assert_eq!(form.select_task_type("classification"), Err(SubmissionError::InProgress));
        assert!(!form.can_select_target());
        assert!(prepared.request.file_name("pdf_file").is_none());

        form.finish_submission(prepared.generation, Ok(RemoteResponse::new(200, "{}")))
            .unwrap();
        assert!(form.selected_files().is_empty());

        let pdf = InMemoryFile::new("new.pdf", "application/pdf", "%PDF");
        let report = form.accept_drop(vec![pdf]).unwrap();
        assert_eq!(report.accepted[0].name, "new.pdf");
        assert_eq!(form.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_drop_after_terminal_state_restarts_cycle() {
        let mut form = dataset_form();
        assert!(form.begin_submission().is_err());
        assert_eq!(form.state(), SubmissionState::Failed);

        let empty = form.accept_drop(Vec::new()).unwrap();
        assert!(empty.accepted.is_empty());
        assert_eq!(form.state(), SubmissionState::Failed);

        form.accept_drop(vec![csv("a.csv", "x")]).unwrap();
        assert_eq!(form.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_switch_mode_replaces_intent() {
        let mut form = ready_form();
        form.switch_mode(UploadMode::ChartImage).unwrap();
        assert_eq!(form.mode(), UploadMode::ChartImage);
        assert!(form.selected_files().is_empty());
        assert_eq!(form.task_type(), None);
        assert!(form.select_target_column("price").is_err());
    }

    #[test]
    fn test_acknowledge_returns_to_idle() {
        let mut form = ready_form();
        let prepared = form.begin_submission().unwrap();
        form.finish_submission(prepared.generation, Ok(RemoteResponse::new(201, "{}")))
            .unwrap();
        assert_eq!(form.state(), SubmissionState::Succeeded);

        form.acknowledge();
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(form.selected_files().is_empty());
    }

    #[test]
    fn test_discard_files_clears_dataset() {
        let mut form = ready_form();
        let before = form.generation();
        form.discard_files();

        assert!(form.selected_files().is_empty());
        assert!(form.columns().is_empty());
        assert_eq!(form.target_column(), None);
        assert_eq!(form.task_type(), Some(TaskType::Regression));
        assert!(form.generation() > before);
    }
}
