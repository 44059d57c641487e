//! HTTP endpoint speaking the parsing server's multipart upload contract.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

use super::{PeriodBounds, UploadEndpoint, UploadError, UploadResponse};
use crate::core::series::SelectedFile;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// FastAPI-style failure body; `detail` is surfaced verbatim when present.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

pub struct HttpEndpoint {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpEndpoint {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: build_client(),
            upload_url: format!("{}/api/upload", base_url.trim_end_matches('/')),
        }
    }

    /// Base URL from `HT810_API_URL` on native builds, the local default
    /// otherwise.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let base = std::env::var("HT810_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        #[cfg(target_arch = "wasm32")]
        let base = DEFAULT_BASE_URL.to_string();
        Self::new(&base)
    }
}

fn build_client() -> reqwest::Client {
    #[cfg(not(target_arch = "wasm32"))]
    {
        // Large spreadsheets take the server a while to parse.
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }
    #[cfg(target_arch = "wasm32")]
    {
        reqwest::Client::new()
    }
}

impl UploadEndpoint for HttpEndpoint {
    async fn upload(
        &self,
        file: &SelectedFile,
        bounds: &PeriodBounds,
    ) -> Result<UploadResponse, UploadError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let mut form = Form::new().part("file", part);
        if let Some(start) = &bounds.start {
            form = form.text("start", start.clone());
        }
        if let Some(end) = &bounds.end {
            form = form.text("end", end.clone());
        }

        info!(file = file.name.as_str(), "uploading datalogger export");

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(match detail {
                Some(detail) => UploadError::Server(detail),
                None => UploadError::Transport(format!("server returned HTTP {status}")),
            });
        }

        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| UploadError::Decode(e.to_string()))
    }
}
