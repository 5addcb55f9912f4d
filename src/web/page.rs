// src/web/page.rs
//! Server-side rendering of the single page

use std::fmt::Write;

use crate::core::service_client::download_url;
use crate::form::{AnalysisForm, Notice, NoticeLevel};
use crate::model_choice::{ModelChoice, CUSTOM_CHOICE, MODEL_PRESETS};
use crate::render::{score_percent, ScoreBand};
use crate::sample::{sample_result, SAMPLE_JD, SAMPLE_RESUME};
use crate::types::AnalysisResult;
use crate::utils::escape_html;

const STYLE: &str = "
body{font-family:system-ui,sans-serif;background:#0f172a;color:#e2e8f0;margin:0}
.container{max-width:1100px;margin:0 auto;padding:24px}
.card{background:#1e293b;border-radius:12px;padding:16px;margin-bottom:16px}
.grid{display:grid;grid-template-columns:1fr 1fr;gap:16px}
.results{display:grid;grid-template-columns:repeat(auto-fit,minmax(280px,1fr));gap:16px}
.score-number{font-size:2.5rem;font-weight:700;margin-right:8px}
.chips label{display:inline-block;border:1px solid #475569;border-radius:999px;padding:4px 10px;margin:4px}
.badge{background:#334155;border-radius:6px;padding:2px 8px;font-size:.8rem}
.notice{border-radius:8px;padding:10px;margin-bottom:12px}
.notice.error{background:#7f1d1d}
.notice.info{background:#1e3a8a}
pre{white-space:pre-wrap;font-size:.85rem}
.link{color:#38bdf8}
";

/// Everything the page needs, copied out of the form so the lock can be released
#[derive(Debug, Clone)]
pub struct PageView {
    pub resume_name: Option<String>,
    pub jd_name: Option<String>,
    pub model: ModelChoice,
    pub custom_text: String,
    pub busy: bool,
    pub result: Option<AnalysisResult>,
    pub notice: Option<Notice>,
}

impl PageView {
    /// Snapshot the form. The notice is consumed: it is shown once.
    pub fn capture(form: &mut AnalysisForm) -> Self {
        Self {
            resume_name: form.resume().map(|f| f.file_name.clone()),
            jd_name: form.jd().map(|f| f.file_name.clone()),
            model: form.model().clone(),
            custom_text: form.custom_text().to_string(),
            busy: form.is_busy(),
            result: form.result().cloned(),
            notice: form.take_notice(),
        }
    }
}

pub fn render_page(view: &PageView, service_url: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Insightify</title><style>{}</style></head><body><div class=\"container\">",
        STYLE
    );
    html.push_str(
        "<header class=\"header\"><h1>Insightify</h1>\
         <p class=\"subtitle\">Resume &harr; Job Description match, suggestions, and interview prep</p></header>",
    );

    render_preview(&mut html);
    render_upload_form(&mut html, view);
    render_help(&mut html);

    if let Some(result) = &view.result {
        render_result(&mut html, result, service_url);
    }

    html.push_str("</div></body></html>");
    html
}

fn render_list(html: &mut String, tag: &str, items: &[String]) {
    let _ = write!(html, "<{} class=\"list\">", tag);
    for item in items {
        let _ = write!(html, "<li>{}</li>", escape_html(item));
    }
    let _ = write!(html, "</{}>", tag);
}

fn render_preview(html: &mut String) {
    let sample = sample_result();

    html.push_str("<section class=\"card\" id=\"preview\"><h2>Result Preview</h2><div class=\"results\">");
    let _ = write!(
        html,
        "<div class=\"card\"><h3>Match Score</h3><div class=\"score\">\
         <span class=\"score-number\">{}%</span><span class=\"score-caption\">Illustrative score</span></div></div>",
        score_percent(sample.match_score)
    );
    html.push_str("<div class=\"card\"><h3>Top Suggestions</h3>");
    render_list(html, "ul", &sample.suggestions);
    html.push_str("</div><div class=\"card\"><h3>Interview Questions</h3>");
    render_list(html, "ol", &sample.interview_questions);
    html.push_str("</div></div>");

    let _ = write!(
        html,
        "<div class=\"grid\"><div class=\"card\"><h3>Resume</h3><pre>{}</pre></div>\
         <div class=\"card\"><h3>Job Description</h3><pre>{}</pre></div></div></section>",
        escape_html(SAMPLE_RESUME),
        escape_html(SAMPLE_JD)
    );
}

fn render_file_field(html: &mut String, name: &str, label: &str, current: Option<&str>) {
    let _ = write!(
        html,
        "<div class=\"field\"><label>{} (PDF / TXT)</label>\
         <input type=\"file\" name=\"{}\" accept=\".pdf,.txt\">",
        label, name
    );
    if let Some(current) = current {
        let _ = write!(html, "<small class=\"current\">Selected: {}</small>", escape_html(current));
    }
    html.push_str("</div>");
}

fn render_model_option(html: &mut String, value: &str, label: &str, checked: bool) {
    let _ = write!(
        html,
        "<label title=\"{v}\"><input type=\"radio\" name=\"model\" value=\"{v}\"{c}> {l}</label>",
        v = escape_html(value),
        c = if checked { " checked" } else { "" },
        l = escape_html(label)
    );
}

fn render_upload_form(html: &mut String, view: &PageView) {
    html.push_str(
        "<section class=\"card\" id=\"upload\"><h2>Upload Files</h2>\
         <form method=\"post\" action=\"/analyze\" enctype=\"multipart/form-data\">",
    );

    if let Some(notice) = &view.notice {
        let class = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        let _ = write!(
            html,
            "<div class=\"notice {}\" role=\"alert\">{}</div>",
            class,
            escape_html(&notice.message)
        );
    }

    html.push_str("<div class=\"grid\">");
    render_file_field(html, "resume", "Resume", view.resume_name.as_deref());
    render_file_field(html, "jd", "Job Description", view.jd_name.as_deref());
    html.push_str("</div>");

    html.push_str("<div class=\"models\"><div class=\"label\">Choose a model</div><div class=\"chips\">");
    render_model_option(html, "", "None", view.model == ModelChoice::None);
    for preset in MODEL_PRESETS {
        render_model_option(html, preset, preset, view.model.is_preset(preset));
    }
    render_model_option(html, CUSTOM_CHOICE, "Custom\u{2026}", view.model.is_custom());
    let _ = write!(
        html,
        "</div><input type=\"text\" name=\"custom_model\" value=\"{}\" \
         placeholder=\"Enter model id, e.g. google/flan-t5-xl\">\
         <p class=\"help\">Model selection is optional. If none selected, analysis still runs without generation.</p></div>",
        escape_html(&view.custom_text)
    );

    let (disabled, label) = if view.busy {
        (" disabled", "Analyzing\u{2026}")
    } else {
        ("", "Analyze Match")
    };
    let _ = write!(
        html,
        "<div class=\"actions\"><button class=\"btn\" type=\"submit\"{}>{}</button></div></form></section>",
        disabled, label
    );
}

fn render_help(html: &mut String) {
    html.push_str(
        "<section class=\"card\" id=\"help\"><h2>How it works</h2>\
         <details><summary>What does the match score mean?</summary>\
         <p>The score is a similarity between your resume and the job description using TF&#8209;IDF cosine similarity.</p>\
         <ul>",
    );
    for band in [
        (ScoreBand::Low, "0&ndash;30%"),
        (ScoreBand::Moderate, "30&ndash;60%"),
        (ScoreBand::Strong, "60&ndash;85%"),
        (ScoreBand::VeryStrong, "85&ndash;100%"),
    ] {
        let _ = write!(
            html,
            "<li>{}: {} &mdash; {}</li>",
            band.1,
            band.0.label(),
            escape_html(band.0.advice())
        );
    }
    html.push_str(
        "</ul><p class=\"note\">This is a text-based proxy, not a guarantee of ATS pass or fit.</p></details>\
         <details><summary>ATS suggestions</summary>\
         <p>Important keywords from the job description that are missing or under-emphasized in your resume.</p>\
         <ul><li>Weigh these against your real experience; do not add anything you did not do.</li>\
         <li>Integrate keywords naturally into Skills and Experience bullet points.</li>\
         <li>Use standard section headers (Experience, Education, Skills, Projects).</li></ul></details>\
         <details><summary>Interview prep</summary>\
         <p>Questions are tailored to the role and your resume.</p>\
         <ul><li>Practice with the STAR method (Situation, Task, Action, Result).</li>\
         <li>If a model is selected, questions may be generated by that model; otherwise a curated set is used.</li></ul>\
         </details></section>",
    );
}

fn render_result(html: &mut String, result: &AnalysisResult, service_url: &str) {
    let band = ScoreBand::from_score(result.match_score);

    html.push_str("<section class=\"results\" id=\"result\">");
    let _ = write!(
        html,
        "<div class=\"card\"><h2>Match Score</h2><div class=\"score\">\
         <span class=\"score-number\">{}%</span>\
         <span class=\"score-caption\">Similarity via TF&#8209;IDF cosine</span></div>\
         <p class=\"band\">{}: {}</p></div>",
        score_percent(result.match_score),
        band.label(),
        escape_html(band.advice())
    );

    html.push_str("<div class=\"card\"><h2>Top Suggestions</h2>");
    render_list(html, "ul", &result.suggestions);
    html.push_str("</div><div class=\"card\"><div class=\"title-row\"><h2>Interview Questions</h2>");
    if let Some(model) = &result.model_used {
        let _ = write!(
            html,
            "<span class=\"badge\" title=\"Model used\">{}</span>",
            escape_html(model)
        );
    }
    html.push_str("</div>");
    render_list(html, "ol", &result.interview_questions);
    html.push_str("</div>");

    if let Some(checklist) = &result.checklist_file {
        let _ = write!(
            html,
            "<div class=\"card\"><h2>Checklist</h2><a class=\"link\" href=\"{}\" \
             target=\"_blank\" rel=\"noopener noreferrer\">Download Checklist</a></div>",
            escape_html(&download_url(service_url, checklist))
        );
    }

    html.push_str("</section>");
}
