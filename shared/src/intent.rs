use crate::columns::{ColumnSet, NO_COLUMNS};
use crate::file::{SelectedFile, UploadFile};
use crate::mode::{FileClass, TaskType, UploadMode};

/// Dataset analysis request: a CSV, an optional PDF and the modelling choices.
#[derive(Debug, Clone)]
pub struct DatasetIntent<F> {
    pub(crate) task_type: Option<TaskType>,
    pub(crate) target_column: Option<String>,
    pub(crate) csv: Option<F>,
    pub(crate) pdf: Option<F>,
    pub(crate) columns: ColumnSet,
}

/// Chart recognition request: one image.
#[derive(Debug, Clone)]
pub struct ChartIntent<F> {
    pub(crate) image: Option<F>,
}

/// What the user is about to submit. Dataset-only fields are unreachable in
/// chart mode.
#[derive(Debug, Clone)]
pub enum UploadIntent<F> {
    Dataset(DatasetIntent<F>),
    Chart(ChartIntent<F>),
}

impl<F> DatasetIntent<F> {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type: Some(task_type),
            target_column: None,
            csv: None,
            pdf: None,
            columns: ColumnSet::empty(),
        }
    }

    pub fn task_type(&self) -> Option<TaskType> {
        self.task_type
    }

    pub fn target_column(&self) -> Option<&str> {
        self.target_column.as_deref()
    }

    pub fn csv(&self) -> Option<&F> {
        self.csv.as_ref()
    }

    pub fn pdf(&self) -> Option<&F> {
        self.pdf.as_ref()
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Replaces the CSV. The old columns and target no longer apply.
    pub(crate) fn assign_csv(&mut self, csv: F) {
        self.csv = Some(csv);
        self.columns = ColumnSet::empty();
        self.target_column = None;
    }
}

impl<F> ChartIntent<F> {
    pub fn image(&self) -> Option<&F> {
        self.image.as_ref()
    }
}

impl<F: UploadFile> UploadIntent<F> {
    pub fn empty(mode: UploadMode, task_type: TaskType) -> Self {
        match mode {
            UploadMode::Dataset => Self::Dataset(DatasetIntent::new(task_type)),
            UploadMode::ChartImage => Self::Chart(ChartIntent { image: None }),
        }
    }

    pub fn mode(&self) -> UploadMode {
        match self {
            Self::Dataset(_) => UploadMode::Dataset,
            Self::Chart(_) => UploadMode::ChartImage,
        }
    }

    pub fn primary_file(&self) -> Option<&F> {
        match self {
            Self::Dataset(dataset) => dataset.csv(),
            Self::Chart(chart) => chart.image(),
        }
    }

    pub fn columns(&self) -> &ColumnSet {
        match self {
            Self::Dataset(dataset) => dataset.columns(),
            Self::Chart(_) => &NO_COLUMNS,
        }
    }

    pub fn selected_files(&self) -> Vec<SelectedFile> {
        match self {
            Self::Dataset(dataset) => [
                dataset.csv().map(|f| SelectedFile::of(f, FileClass::Csv)),
                dataset.pdf().map(|f| SelectedFile::of(f, FileClass::Pdf)),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::Chart(chart) => chart
                .image()
                .map(|f| SelectedFile::of(f, FileClass::Image))
                .into_iter()
                .collect(),
        }
    }

    pub fn has_files(&self) -> bool {
        match self {
            Self::Dataset(dataset) => dataset.csv.is_some() || dataset.pdf.is_some(),
            Self::Chart(chart) => chart.image.is_some(),
        }
    }
}
