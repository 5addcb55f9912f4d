//! Client for a resume / job description analysis service: form state,
//! HTTP round trip, and text or HTML rendering of the result.

pub mod cli;
pub mod core;
pub mod error;
pub mod form;
pub mod model_choice;
pub mod render;
pub mod sample;
pub mod types;
pub mod utils;
pub mod web;

pub use crate::core::{AnalysisBackend, ConfigManager, ServiceClient};
pub use error::{ClientError, SubmitError};
pub use form::{AnalysisForm, Notice, NoticeLevel};
pub use model_choice::{ModelChoice, MODEL_PRESETS};
pub use types::{AnalysisRequest, AnalysisResult, DocumentUpload, HistoryRecord};
