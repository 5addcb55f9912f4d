// src/web/mod.rs
pub mod handlers;
pub mod page;
pub mod types;

pub use types::*;

use anyhow::{Context, Result};
use rocket::config::LogLevel;
use rocket::data::{Limits, ToByteUnit};
use rocket::form::Form;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, post, routes, Build, Request, Rocket, State};
use std::sync::Arc;
use tracing::info;

use crate::core::{ConfigManager, ServiceClient};

/// Largest accepted resume / job description upload
const MAX_FILE_MB: usize = 10;

#[get("/")]
pub async fn index(state: &State<WebState>) -> RawHtml<String> {
    handlers::index_handler(state).await
}

#[post("/analyze", data = "<upload>")]
pub async fn analyze(upload: Form<AnalyzeUpload<'_>>, state: &State<WebState>) -> RawHtml<String> {
    handlers::analyze_handler(upload, state).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> RawHtml<&'static str> {
    RawHtml("<h1>Invalid request</h1><p>Check the upload form and try again. <a href=\"/\">Back</a></p>")
}

#[rocket::catch(413)]
pub fn payload_too_large() -> RawHtml<String> {
    RawHtml(format!(
        "<h1>File too large</h1><p>Each file must be at most {} MB. <a href=\"/\">Back</a></p>",
        MAX_FILE_MB
    ))
}

#[rocket::catch(500)]
pub fn internal_error(req: &Request<'_>) -> RawHtml<&'static str> {
    tracing::error!("Internal error serving {}", req.uri());
    RawHtml("<h1>Internal server error</h1><p>Try again in a few moments. <a href=\"/\">Back</a></p>")
}

/// Assemble the rocket instance around an already-built state
pub fn build_rocket(state: WebState, port: u16) -> Rocket<Build> {
    let limits = Limits::default()
        .limit("file", MAX_FILE_MB.mebibytes())
        .limit("data-form", (2 * MAX_FILE_MB + 1).mebibytes());

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("limits", limits))
        .merge(("log_level", LogLevel::Critical));

    rocket::custom(figment)
        .manage(state)
        .register("/", catchers![bad_request, payload_too_large, internal_error])
        .mount("/", routes![index, analyze, health])
}

// Main server start function
pub async fn start_web_server(config: &ConfigManager) -> Result<()> {
    let client = ServiceClient::new(
        &config.service.service_url,
        config.service.timeout_seconds,
    )
    .context("Failed to create HTTP client")?;

    let state = WebState::new(Arc::new(client), config.service.service_url.clone());

    info!("Starting Insightify web UI");
    info!("Environment: {}", config.environment);
    info!("Analysis service: {}", config.service.service_url);
    info!("Server: http://127.0.0.1:{}", config.web.port);

    let _rocket = build_rocket(state, config.web.port)
        .launch()
        .await
        .context("Web server failed")?;

    Ok(())
}
