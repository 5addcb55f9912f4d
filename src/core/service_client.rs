// src/core/service_client.rs
//! HTTP client for the analysis backend - multipart upload, history, checklist downloads

use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::types::{AnalysisRequest, AnalysisResult, DocumentUpload, HistoryRecord};
use crate::utils::{basename, normalize_base_url};

const ANALYZE_ENDPOINT: &str = "/analyze";
const HISTORY_ENDPOINT: &str = "/history";
const DOWNLOAD_ENDPOINT: &str = "/download";

/// Anything that can run one analysis round trip.
#[rocket::async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client. No request timeout unless one is given.
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Link to the checklist artifact named by `checklist_file` (a server-side path)
    pub fn download_url(&self, checklist_file: &str) -> String {
        download_url(&self.base_url, checklist_file)
    }

    /// List the most recent analyses stored by the backend
    pub async fn history(&self, limit: u32) -> Result<Vec<HistoryRecord>, ClientError> {
        let url = format!("{}{}", self.base_url, HISTORY_ENDPOINT);
        debug!("Fetching analysis history: {} (limit {})", url, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("History request failed with status {}", status);
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json::<Vec<HistoryRecord>>().await?)
    }

    /// Fetch the checklist artifact bytes
    pub async fn download(&self, checklist_file: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.download_url(checklist_file);
        info!("Downloading checklist: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Download failed with status {}", status);
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn file_part(upload: &DocumentUpload) -> Result<Part, ClientError> {
        Ok(Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.content_type)?)
    }

    fn build_form(request: &AnalysisRequest) -> Result<Form, ClientError> {
        let mut form = Form::new()
            .part("resume", Self::file_part(&request.resume)?)
            .part("jd", Self::file_part(&request.jd)?);

        for (name, value) in request.text_fields() {
            form = form.text(name, value);
        }

        Ok(form)
    }
}

#[rocket::async_trait]
impl AnalysisBackend for ServiceClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);
        let form = Self::build_form(request)?;

        info!(
            "Calling analysis service: {} (resume: {}, jd: {}, use_hf: {}, model: {})",
            url,
            request.resume.file_name,
            request.jd.file_name,
            request.use_hf,
            request.model.as_deref().unwrap_or("-")
        );

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            warn!("Analysis service returned error status {}", status);
            return Err(ClientError::Status(status.as_u16()));
        }

        let result = response.json::<AnalysisResult>().await?;
        info!(
            "Analysis complete: score {:.3}, {} suggestions, {} questions",
            result.match_score,
            result.suggestions.len(),
            result.interview_questions.len()
        );
        Ok(result)
    }
}

/// `<base>/download/<basename>`
pub fn download_url(base_url: &str, checklist_file: &str) -> String {
    format!(
        "{}{}/{}",
        normalize_base_url(base_url),
        DOWNLOAD_ENDPOINT,
        basename(checklist_file)
    )
}
