// src/web/handlers/system_handlers.rs
use crate::web::page::{render_page, PageView};
use crate::web::types::WebState;

use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::debug;

pub async fn index_handler(state: &State<WebState>) -> RawHtml<String> {
    let view = {
        let mut form = state.form.lock().await;
        PageView::capture(&mut form)
    };
    debug!("Rendering page (busy: {})", view.busy);
    RawHtml(render_page(&view, &state.service_url))
}

pub async fn health_handler() -> Json<&'static str> {
    Json("OK")
}
