use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mode::{TaskType, UploadMode};

/// Where and how submissions are sent to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub dataset_endpoint: String,
    pub chart_endpoint: String,
    pub default_task_type: TaskType,
    pub fields: FieldNames,
}

/// Multipart field names expected by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub file: String,
    pub pdf_file: String,
    pub task_type: String,
    pub target_column: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            dataset_endpoint: "/upload".to_string(),
            chart_endpoint: "/analyze-chart".to_string(),
            default_task_type: TaskType::default(),
            fields: FieldNames::default(),
        }
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            file: "file".to_string(),
            pdf_file: "pdf_file".to_string(),
            task_type: "task_type".to_string(),
            target_column: "target_col".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: ApiConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if self.dataset_endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint("dataset_endpoint"));
        }
        if self.chart_endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint("chart_endpoint"));
        }
        Ok(())
    }

    pub fn endpoint(&self, mode: UploadMode) -> &str {
        match mode {
            UploadMode::Dataset => &self.dataset_endpoint,
            UploadMode::ChartImage => &self.chart_endpoint,
        }
    }

    /// Absolute URL for the mode's endpoint, joined with a single `/`.
    pub fn endpoint_url(&self, mode: UploadMode) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            self.endpoint(mode).trim().trim_start_matches('/')
        )
    }
}
