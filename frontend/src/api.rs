use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{
    PartValue, ReadError, RemoteResponse, SubmissionRequest, Transport, TransportError, UploadFile,
};
use wasm_bindgen::JsValue;
use web_sys::FormData;

/// A file picked or dropped in the browser.
#[derive(Clone)]
pub struct BrowserFile(pub GlooFile);

impl From<GlooFile> for BrowserFile {
    fn from(file: GlooFile) -> Self {
        Self(file)
    }
}

impl UploadFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn media_type(&self) -> String {
        self.0.raw_mime_type()
    }

    fn size(&self) -> u64 {
        self.0.size()
    }

    async fn read_text(&self) -> Result<String, ReadError> {
        gloo_file::futures::read_as_text(&self.0)
            .await
            .map_err(|e| ReadError::Unreadable(e.to_string()))
    }
}

/// Posts submissions as `multipart/form-data` with the browser's fetch.
#[derive(Clone, Copy, Default)]
pub struct BrowserTransport;

impl Transport<BrowserFile> for BrowserTransport {
    async fn send(
        &self,
        request: &SubmissionRequest<BrowserFile>,
    ) -> Result<RemoteResponse, TransportError> {
        let form_data = build_form_data(request)?;

        let response = Request::post(&request.url)
            .header("Accept", "application/json")
            .body(form_data)
            .map_err(|e| TransportError(e.to_string()))?
            .send()
            .await
            .map_err(|e| {
                log::error!("Upload to {} failed: {}", request.url, e);
                TransportError(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !response.ok() {
            log::error!("Upload error status {}: {}", status, body);
        }
        Ok(RemoteResponse::new(status, body))
    }
}

fn build_form_data(request: &SubmissionRequest<BrowserFile>) -> Result<FormData, TransportError> {
    let form_data = FormData::new().map_err(js_error)?;

    for part in &request.parts {
        match &part.value {
            PartValue::File(file) => {
                let raw: &web_sys::File = file.0.as_ref();
                form_data.append_with_blob_and_filename(&part.name, raw, &file.name())
            }
            PartValue::Text(value) => form_data.append_with_str(&part.name, value),
        }
        .map_err(js_error)?;
    }

    Ok(form_data)
}

fn js_error(err: JsValue) -> TransportError {
    TransportError(format!("{:?}", err))
}
