use serde::{Deserialize, Serialize};

// ===== Service Response Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_score: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub interview_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist_file: Option<String>,
}

/// One stored analysis as listed by `GET /history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub resume_filename: Option<String>,
    pub jd_filename: Option<String>,
    pub timestamp: i64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub interview_questions: Vec<String>,
    pub model_used: Option<String>,
}

impl HistoryRecord {
    pub fn recorded_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.timestamp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_optional_fields() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"match_score":0.42,"suggestions":["X"],"interview_questions":["Q1"]}"#,
        )
        .unwrap();

        assert_eq!(result.match_score, 0.42);
        assert_eq!(result.suggestions, vec!["X"]);
        assert_eq!(result.interview_questions, vec!["Q1"]);
        assert!(result.model_used.is_none());
        assert!(result.checklist_file.is_none());
    }

    #[test]
    fn test_result_null_optionals_and_missing_lists() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"match_score":0.1,"model_used":null,"checklist_file":"data_outputs/checklist_1.txt"}"#,
        )
        .unwrap();

        assert!(result.suggestions.is_empty());
        assert!(result.interview_questions.is_empty());
        assert_eq!(
            result.checklist_file.as_deref(),
            Some("data_outputs/checklist_1.txt")
        );
    }

    #[test]
    fn test_history_record_timestamp() {
        let record: HistoryRecord = serde_json::from_str(
            r#"{"_id":"abc","resume_filename":"cv.pdf","jd_filename":"jd.txt",
                "timestamp":1700000000,"suggestions":["rust"],
                "interview_questions":[],"model_used":null}"#,
        )
        .unwrap();

        assert_eq!(record.id, "abc");
        assert_eq!(
            record.recorded_at().unwrap().format("%Y-%m-%d").to_string(),
            "2023-11-14"
        );
    }
}
