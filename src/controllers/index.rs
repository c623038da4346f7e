use std::sync::Arc;

use axum::extract::State;
use axum::headers::Cookie;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, TypedHeader};
use serde::Deserialize;

use crate::mappers::card_mapper;
use crate::models::empty::Empty;
use crate::sessions::{self, SessionHandle, SESSION_COOKIE};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    username: String,
}

fn session_id(cookie: &Option<TypedHeader<Cookie>>) -> Option<&str> {
    cookie.as_ref().and_then(|TypedHeader(c)| c.get(SESSION_COOKIE))
}

fn with_session_cookie(mut response: Response, handle: &SessionHandle) -> Response {
    if !handle.created {
        return response;
    }
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, handle.id
    );
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().insert(SET_COOKIE, value);
        }
        Err(e) => log::error!("Invalid session cookie {:?}: {}", cookie, e),
    }
    response
}

#[axum_macros::debug_handler]
pub async fn get_index(
    State(state): State<Arc<AppState>>,
    cookie: Option<TypedHeader<Cookie>>,
) -> Response {
    let handle = state.sessions.view_for(session_id(&cookie)).await;
    let model = card_mapper::to_view_model(&*handle.view.lock().await);

    let response = match super::render_page(
        &state.registry,
        "GitHub Profile Explorer",
        "index",
        &model,
        model.loading,
    ) {
        Ok(page) => page.into_response(),
        Err(e) => {
            log::error!("{}", e);
            super::get_error_page(&state.registry, StatusCode::INTERNAL_SERVER_ERROR)
        }
    };
    with_session_cookie(response, &handle)
}

#[axum_macros::debug_handler]
pub async fn post_index(
    State(state): State<Arc<AppState>>,
    cookie: Option<TypedHeader<Cookie>>,
    Form(form): Form<SearchForm>,
) -> Response {
    let handle = state.sessions.view_for(session_id(&cookie)).await;
    sessions::submit(handle.view.clone(), state.source.clone(), &form.username).await;

    with_session_cookie(Redirect::to("/").into_response(), &handle)
}

pub async fn get_about(State(state): State<Arc<AppState>>) -> Response {
    match super::render_page(&state.registry, "About", "about", &Empty {}, false) {
        Ok(page) => page.into_response(),
        Err(e) => {
            log::error!("{}", e);
            super::get_error_page(&state.registry, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
