pub mod index;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::empty::Empty;

#[derive(Debug, Serialize)]
pub struct TemplateViewModel {
    pub title: String,
    pub refresh: bool,
    pub body: String,
}

/// Renders `name` with `data` and wraps it in the page layout.
pub fn render_page<T: Serialize>(
    registry: &Handlebars<'_>,
    title: &str,
    name: &str,
    data: &T,
    refresh: bool,
) -> Result<Html<String>, AppError> {
    let page = TemplateViewModel {
        title: title.into(),
        refresh,
        body: registry.render(name, data)?,
    };

    Ok(Html(registry.render("template", &page)?))
}

pub fn get_error_page(registry: &Handlebars<'_>, status: StatusCode) -> Response {
    match render_page(registry, "Error", "errors/500", &Empty {}, false) {
        Ok(page) => (status, page).into_response(),
        Err(e) => e.into_response(),
    }
}
