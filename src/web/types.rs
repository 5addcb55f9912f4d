// src/web/types.rs
use rocket::form::FromForm;
use rocket::fs::TempFile;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::AnalysisBackend;
use crate::form::AnalysisForm;

/// Multipart body posted by the page's upload form
#[derive(FromForm)]
pub struct AnalyzeUpload<'f> {
    pub resume: Option<TempFile<'f>>,
    pub jd: Option<TempFile<'f>>,
    pub model: Option<String>,
    pub custom_model: Option<String>,
}

/// Managed state: one form per server process, plus the backend it submits to
pub struct WebState {
    pub form: Arc<Mutex<AnalysisForm>>,
    pub backend: Arc<dyn AnalysisBackend>,
    pub service_url: String,
}

impl WebState {
    pub fn new(backend: Arc<dyn AnalysisBackend>, service_url: String) -> Self {
        Self {
            form: Arc::new(Mutex::new(AnalysisForm::new())),
            backend,
            service_url,
        }
    }
}
