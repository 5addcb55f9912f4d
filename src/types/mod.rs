pub mod request;
pub mod response;

pub use request::{AnalysisRequest, DocumentUpload};
pub use response::{AnalysisResult, HistoryRecord};
