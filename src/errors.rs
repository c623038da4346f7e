use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Failure of a lookup, shown to the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error("User not found")]
    ProfileNotFound,
    #[error("Repositories not found")]
    RepositoriesNotFound,
}

/// Failure while building a page.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("{}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>500</h1><p>Something went wrong.</p>".to_string()),
        )
            .into_response()
    }
}
