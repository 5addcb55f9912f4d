// src/render.rs
//! Text rendering of analysis results for the terminal

use std::fmt::Write;

use crate::core::service_client::download_url;
use crate::types::{AnalysisResult, HistoryRecord};

/// Rounded percentage shown for a score in [0, 1]
pub fn score_percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Reading guide for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Moderate,
    Strong,
    VeryStrong,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match score_percent(score) {
            0..=29 => ScoreBand::Low,
            30..=59 => ScoreBand::Moderate,
            60..=84 => ScoreBand::Strong,
            _ => ScoreBand::VeryStrong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Low => "Low overlap",
            ScoreBand::Moderate => "Moderate",
            ScoreBand::Strong => "Strong",
            ScoreBand::VeryStrong => "Very strong",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            ScoreBand::Low => "consider tailoring your resume to the role.",
            ScoreBand::Moderate => "add missing skills/keywords and align experience bullets.",
            ScoreBand::Strong => "you likely match many requirements; refine achievements.",
            ScoreBand::VeryStrong => {
                "high textual overlap; still ensure authenticity and clarity."
            }
        }
    }
}

/// Full plain-text report, lists in server order
pub fn render_text(result: &AnalysisResult, base_url: &str) -> String {
    let band = ScoreBand::from_score(result.match_score);
    let mut out = String::new();

    let _ = writeln!(out, "Match Score: {}%", score_percent(result.match_score));
    let _ = writeln!(out, "  {}: {}", band.label(), band.advice());

    let _ = writeln!(out);
    let _ = writeln!(out, "Top Suggestions:");
    for suggestion in &result.suggestions {
        let _ = writeln!(out, "  - {}", suggestion);
    }

    let _ = writeln!(out);
    match &result.model_used {
        Some(model) => {
            let _ = writeln!(out, "Interview Questions [{}]:", model);
        }
        None => {
            let _ = writeln!(out, "Interview Questions:");
        }
    }
    for (i, question) in result.interview_questions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, question);
    }

    if let Some(checklist) = &result.checklist_file {
        let _ = writeln!(out);
        let _ = writeln!(out, "Checklist: {}", download_url(base_url, checklist));
    }

    out
}

pub fn render_history(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return "No analyses recorded yet.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let when = record
            .recorded_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| record.timestamp.to_string());
        let _ = writeln!(
            out,
            "{}  {} vs {}  model: {}  ({} suggestions, {} questions)",
            when,
            record.resume_filename.as_deref().unwrap_or("?"),
            record.jd_filename.as_deref().unwrap_or("?"),
            record.model_used.as_deref().unwrap_or("-"),
            record.suggestions.len(),
            record.interview_questions.len()
        );
    }
    out
}
