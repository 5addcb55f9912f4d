// src/web/handlers/analysis_handlers.rs
//! Upload form handler

use crate::model_choice::ModelChoice;
use crate::types::DocumentUpload;
use crate::utils::basename;
use crate::web::page::{render_page, PageView};
use crate::web::types::{AnalyzeUpload, WebState};

use anyhow::{Context, Result};
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::response::content::RawHtml;
use rocket::State;
use tracing::{error, info, info_span, warn, Instrument};

pub async fn analyze_handler(
    mut upload: Form<AnalyzeUpload<'_>>,
    state: &State<WebState>,
) -> RawHtml<String> {
    let resume = read_optional_upload(upload.resume.as_mut(), "resume").await;
    let jd = read_optional_upload(upload.jd.as_mut(), "jd").await;
    let choice = ModelChoice::from_form(upload.model.as_deref(), upload.custom_model.as_deref());
    let custom_text = upload.custom_model.clone();

    // The lock is released before the request goes out so the page stays
    // viewable (with a disabled button) while it is in flight.
    let pending = {
        let mut form = state.form.lock().await;
        if let Some(resume) = resume {
            form.select_resume(resume);
        }
        if let Some(jd) = jd {
            form.select_jd(jd);
        }
        form.set_model(choice);
        if let Some(text) = &custom_text {
            form.set_custom_text(text);
        }
        form.begin_submit()
    };

    if let Ok(request) = pending {
        let span = info_span!(
            "analysis_request",
            resume = %request.resume.file_name,
            jd = %request.jd.file_name,
            use_hf = request.use_hf
        );
        let backend = state.backend.clone();
        let form = state.form.clone();

        // Runs detached so a dropped connection still settles the busy flag
        let task = tokio::spawn(
            async move {
                let outcome = backend.analyze(&request).await;
                let mut form = form.lock().await;
                if let Ok(result) = form.finish_submit(outcome) {
                    info!("Analysis stored, score {:.3}", result.match_score);
                }
            }
            .instrument(span),
        );

        if let Err(e) = task.await {
            error!("Analysis task failed: {}", e);
            state.form.lock().await.abandon_submit();
        }
    }

    let view = {
        let mut form = state.form.lock().await;
        PageView::capture(&mut form)
    };
    RawHtml(render_page(&view, &state.service_url))
}

/// Browsers post an empty part for an untouched file input; that counts as no file
async fn read_optional_upload(
    file: Option<&mut TempFile<'_>>,
    fallback_name: &str,
) -> Option<DocumentUpload> {
    let file = file?;
    if file.len() == 0 {
        return None;
    }

    match read_upload(file, fallback_name).await {
        Ok(upload) => Some(upload),
        Err(e) => {
            error!("Failed to read uploaded {}: {:#}", fallback_name, e);
            None
        }
    }
}

async fn read_upload(file: &mut TempFile<'_>, fallback_name: &str) -> Result<DocumentUpload> {
    let file_name = upload_file_name(file, fallback_name);
    let temp_path = std::env::temp_dir().join(format!("insightify_upload_{}", uuid::Uuid::new_v4()));

    file.persist_to(&temp_path)
        .await
        .context("Failed to save uploaded file")?;

    let bytes = tokio::fs::read(&temp_path)
        .await
        .with_context(|| format!("Failed to read {}", temp_path.display()));
    if let Err(e) = tokio::fs::remove_file(&temp_path).await {
        warn!("Failed to remove {}: {}", temp_path.display(), e);
    }

    Ok(DocumentUpload::new(file_name, bytes?))
}

/// File name exactly as the browser sent it, minus any directory part.
/// It is only forwarded to the service, never used as a local path.
fn upload_file_name(file: &TempFile<'_>, fallback_name: &str) -> String {
    let client_name = file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str())
        .map(|raw| basename(raw).rsplit('\\').next().unwrap_or(raw))
        .filter(|name| !name.is_empty());

    if let Some(name) = client_name {
        return name.to_string();
    }

    match file.content_type().and_then(|ct| ct.extension()) {
        Some(ext) => format!("{}.{}", fallback_name, ext),
        None => fallback_name.to_string(),
    }
}
