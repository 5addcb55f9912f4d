// src/form.rs
//! Analysis form state: chosen files, model choice, busy flag, last result and notice

use tracing::{info, warn};

use crate::core::AnalysisBackend;
use crate::error::{ClientError, SubmitError};
use crate::model_choice::ModelChoice;
use crate::types::{AnalysisRequest, AnalysisResult, DocumentUpload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Non-blocking message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl From<&SubmitError> for Notice {
    fn from(err: &SubmitError) -> Self {
        let level = match err {
            SubmitError::AlreadyRunning => NoticeLevel::Info,
            _ => NoticeLevel::Error,
        };
        Self {
            level,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AnalysisForm {
    resume: Option<DocumentUpload>,
    jd: Option<DocumentUpload>,
    model: ModelChoice,
    custom_text: String,
    busy: bool,
    result: Option<AnalysisResult>,
    notice: Option<Notice>,
}

impl AnalysisForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_resume(&mut self, upload: DocumentUpload) {
        self.resume = Some(upload);
    }

    pub fn select_jd(&mut self, upload: DocumentUpload) {
        self.jd = Some(upload);
    }

    pub fn resume(&self) -> Option<&DocumentUpload> {
        self.resume.as_ref()
    }

    pub fn jd(&self) -> Option<&DocumentUpload> {
        self.jd.as_ref()
    }

    pub fn select_preset(&mut self, id: &str) {
        self.model = ModelChoice::Preset(id.to_string());
    }

    /// Switch to the custom entry, restoring whatever was typed there before
    pub fn select_custom(&mut self) {
        self.model = ModelChoice::Custom(self.custom_text.clone());
    }

    /// Remember the custom text; it only becomes the model while custom is selected
    pub fn set_custom_text(&mut self, text: &str) {
        self.custom_text = text.to_string();
        if self.model.is_custom() {
            self.model = ModelChoice::Custom(self.custom_text.clone());
        }
    }

    pub fn clear_model(&mut self) {
        self.model = ModelChoice::None;
    }

    /// Apply a whole choice at once, as the web form posts it
    pub fn set_model(&mut self, choice: ModelChoice) {
        if let ModelChoice::Custom(text) = &choice {
            self.custom_text = text.clone();
        }
        self.model = choice;
    }

    pub fn model(&self) -> &ModelChoice {
        &self.model
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn generation_enabled(&self) -> bool {
        self.model.generation_enabled()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Validate and enter the busy state. On success the caller owns the
    /// in-flight request and must hand its outcome to [`finish_submit`].
    ///
    /// [`finish_submit`]: AnalysisForm::finish_submit
    pub fn begin_submit(&mut self) -> Result<AnalysisRequest, SubmitError> {
        if self.busy {
            return Err(self.reject(SubmitError::AlreadyRunning));
        }

        let (Some(resume), Some(jd)) = (self.resume.clone(), self.jd.clone()) else {
            return Err(self.reject(SubmitError::MissingInput));
        };

        let use_hf = self.model.generation_enabled();
        let request = AnalysisRequest {
            resume,
            jd,
            use_hf,
            model: self.model.effective_model().map(str::to_string),
        };

        self.busy = true;
        self.notice = None;
        Ok(request)
    }

    /// Leave the busy state and apply the outcome. A failure never touches
    /// the previously displayed result.
    pub fn finish_submit(
        &mut self,
        outcome: Result<AnalysisResult, ClientError>,
    ) -> Result<&AnalysisResult, SubmitError> {
        self.busy = false;

        match outcome {
            Ok(result) => {
                self.notice = None;
                Ok(&*self.result.insert(result))
            }
            Err(err) => {
                let err = SubmitError::from(err);
                warn!("Analysis failed: {}", err);
                self.notice = Some(Notice::from(&err));
                Err(err)
            }
        }
    }

    /// Run one full submission against `backend`
    pub async fn submit<B>(&mut self, backend: &B) -> Result<&AnalysisResult, SubmitError>
    where
        B: AnalysisBackend + ?Sized,
    {
        let request = self.begin_submit()?;
        info!(
            "Submitting {} and {} (model: {})",
            request.resume.file_name, request.jd.file_name, self.model
        );

        let mut in_flight = InFlight {
            form: &mut *self,
            settled: false,
        };
        let outcome = backend.analyze(&request).await;
        in_flight.settled = true;
        drop(in_flight);

        self.finish_submit(outcome)
    }

    /// Leave the busy state for a submission that will never report back.
    /// The displayed result and notice are left as they were.
    pub fn abandon_submit(&mut self) {
        if self.busy {
            warn!("Analysis abandoned before the service answered");
            self.busy = false;
        }
    }

    fn reject(&mut self, err: SubmitError) -> SubmitError {
        warn!("Submission rejected: {}", err);
        self.notice = Some(Notice::from(&err));
        err
    }
}

/// Releases the busy flag when a submission future is dropped mid-request
struct InFlight<'a> {
    form: &'a mut AnalysisForm,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.form.abandon_submit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every request and replays canned outcomes
    struct MockBackend {
        requests: Mutex<Vec<AnalysisRequest>>,
        status: Option<u16>,
        result: AnalysisResult,
    }

    impl MockBackend {
        fn ok(result: AnalysisResult) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                status: None,
                result,
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                status: Some(status),
                ..Self::ok(sample_result(0.0))
            }
        }

        fn requests(&self) -> Vec<AnalysisRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[rocket::async_trait]
    impl AnalysisBackend for MockBackend {
        async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.status {
                Some(status) => Err(ClientError::Status(status)),
                None => Ok(self.result.clone()),
            }
        }
    }

    fn sample_result(score: f64) -> AnalysisResult {
        AnalysisResult {
            match_score: score,
            suggestions: vec!["X".to_string()],
            interview_questions: vec!["Q1".to_string()],
            model_used: None,
            checklist_file: None,
        }
    }

    /// Never answers
    struct StalledBackend;

    #[rocket::async_trait]
    impl AnalysisBackend for StalledBackend {
        async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
            std::future::pending().await
        }
    }

    fn form_with_files() -> AnalysisForm {
        let mut form = AnalysisForm::new();
        form.select_resume(DocumentUpload::new("A.pdf", b"A".to_vec()));
        form.select_jd(DocumentUpload::new("B.txt", b"B".to_vec()));
        form
    }

    #[tokio::test]
    async fn test_missing_files_never_call_backend() {
        let backend = MockBackend::ok(sample_result(0.5));

        let mut empty = AnalysisForm::new();
        let err = empty.submit(&backend).await.unwrap_err();
        assert!(matches!(err, SubmitError::MissingInput));
        assert_eq!(empty.notice().unwrap().message, "Upload both files");

        let mut only_resume = AnalysisForm::new();
        only_resume.select_resume(DocumentUpload::new("A.pdf", vec![]));
        assert!(only_resume.submit(&backend).await.is_err());

        let mut only_jd = AnalysisForm::new();
        only_jd.select_jd(DocumentUpload::new("B.pdf", vec![]));
        assert!(only_jd.submit(&backend).await.is_err());
        assert_eq!(only_jd.notice().unwrap().level, NoticeLevel::Error);

        assert!(backend.requests().is_empty());
        assert!(!empty.is_busy());
    }

    #[test]
    fn test_preset_enables_generation() {
        let mut form = AnalysisForm::new();
        assert!(!form.generation_enabled());

        form.select_preset("google/flan-t5-xl");
        assert!(form.generation_enabled());
        assert_eq!(form.model().effective_model(), Some("google/flan-t5-xl"));
    }

    #[test]
    fn test_custom_text_flow() {
        let mut form = AnalysisForm::new();
        form.select_custom();
        assert!(!form.generation_enabled());

        form.set_custom_text("org/model");
        assert!(form.generation_enabled());
        assert_eq!(form.model().effective_model(), Some("org/model"));

        form.set_custom_text("");
        assert!(!form.generation_enabled());
    }

    #[test]
    fn test_custom_text_ignored_while_preset_selected() {
        let mut form = AnalysisForm::new();
        form.select_custom();
        form.set_custom_text("org/draft");
        form.select_preset("google/flan-ul2");

        form.set_custom_text("org/other");
        assert_eq!(form.model().effective_model(), Some("google/flan-ul2"));

        form.select_custom();
        assert_eq!(form.model().effective_model(), Some("org/other"));
    }

    #[tokio::test]
    async fn test_submit_with_preset_sends_one_request() {
        let backend = MockBackend::ok(sample_result(0.42));
        let mut form = form_with_files();
        form.select_preset("google/flan-t5-base");

        form.submit(&backend).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.resume.file_name, "A.pdf");
        assert_eq!(request.resume.bytes, b"A");
        assert_eq!(request.jd.file_name, "B.txt");
        assert!(request.use_hf);
        assert_eq!(request.model.as_deref(), Some("google/flan-t5-base"));
        assert_eq!(
            request.text_fields(),
            vec![
                ("use_hf", "true".to_string()),
                ("model", "google/flan-t5-base".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_without_model() {
        let backend = MockBackend::ok(sample_result(0.42));
        let mut form = form_with_files();

        form.submit(&backend).await.unwrap();

        let request = &backend.requests()[0];
        assert!(!request.use_hf);
        assert!(request.model.is_none());
        assert_eq!(request.text_fields(), vec![("use_hf", "false".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_custom_sends_no_model() {
        let backend = MockBackend::ok(sample_result(0.42));
        let mut form = form_with_files();
        form.select_custom();

        form.submit(&backend).await.unwrap();

        let request = &backend.requests()[0];
        assert!(!request.use_hf);
        assert!(request.model.is_none());
    }

    #[tokio::test]
    async fn test_success_replaces_result() {
        let mut form = form_with_files();

        form.submit(&MockBackend::ok(sample_result(0.2))).await.unwrap();
        assert_eq!(form.result().unwrap().match_score, 0.2);

        let result = form.submit(&MockBackend::ok(sample_result(0.9))).await.unwrap();
        assert_eq!(result.match_score, 0.9);
        assert_eq!(form.result().unwrap().match_score, 0.9);
        assert!(form.notice().is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result() {
        let mut form = form_with_files();
        form.submit(&MockBackend::ok(sample_result(0.42))).await.unwrap();

        let err = form.submit(&MockBackend::failing(503)).await.unwrap_err();

        assert!(matches!(err, SubmitError::Request(ClientError::Status(503))));
        assert_eq!(form.result().unwrap().match_score, 0.42);
        let notice = form.notice().unwrap();
        assert!(notice.message.contains("503"));
        assert_eq!(notice.message, "Request failed: Server responded 503");
        assert!(!form.is_busy());
    }

    #[test]
    fn test_busy_spans_begin_to_finish() {
        let mut form = form_with_files();
        assert!(!form.is_busy());

        form.begin_submit().unwrap();
        assert!(form.is_busy());

        form.finish_submit(Err(ClientError::Status(500))).unwrap_err();
        assert!(!form.is_busy());

        form.begin_submit().unwrap();
        assert!(form.is_busy());
        form.finish_submit(Ok(sample_result(0.3))).unwrap();
        assert!(!form.is_busy());
    }

    #[tokio::test]
    async fn test_cancelled_submit_releases_busy() {
        let mut form = form_with_files();
        form.submit(&MockBackend::ok(sample_result(0.42))).await.unwrap();

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            form.submit(&StalledBackend),
        )
        .await;
        assert!(timed_out.is_err());

        assert!(!form.is_busy());
        assert_eq!(form.result().unwrap().match_score, 0.42);
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn test_abandon_submit() {
        let mut form = form_with_files();
        form.abandon_submit();
        assert!(!form.is_busy());

        form.begin_submit().unwrap();
        form.abandon_submit();
        assert!(!form.is_busy());
        assert!(form.result().is_none());
        assert!(form.notice().is_none());
    }

    #[test]
    fn test_second_submit_while_busy_is_ignored() {
        let mut form = form_with_files();
        form.begin_submit().unwrap();

        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, SubmitError::AlreadyRunning));
        assert_eq!(form.notice().unwrap().level, NoticeLevel::Info);
        assert!(form.is_busy());

        form.finish_submit(Ok(sample_result(0.6))).unwrap();
        assert!(!form.is_busy());
        assert!(form.notice().is_none());
    }

    #[test]
    fn test_set_model_remembers_custom_text() {
        let mut form = AnalysisForm::new();
        form.set_model(ModelChoice::Custom("org/x".to_string()));
        assert_eq!(form.custom_text(), "org/x");

        form.set_model(ModelChoice::Preset("google/flan-t5-base".to_string()));
        assert_eq!(form.custom_text(), "org/x");

        form.clear_model();
        assert!(!form.generation_enabled());
    }

    #[test]
    fn test_take_notice_clears_it() {
        let mut form = AnalysisForm::new();
        form.begin_submit().unwrap_err();
        assert!(form.take_notice().is_some());
        assert!(form.notice().is_none());
    }
}
