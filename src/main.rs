use std::{sync::Arc, net::{SocketAddr, IpAddr, Ipv4Addr}, str::FromStr};
use clap::Parser;
use axum::{routing::get, Router};
use axum::http::{Request, Response, StatusCode};
use axum::body::{boxed, Body};
use handlebars::{Handlebars, TemplateError};
use tower::{ServiceBuilder, ServiceExt};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use reqwest::Client;

pub mod controllers;
pub mod errors;
pub mod mappers;
pub mod models;
pub mod services;
pub mod sessions;
pub mod validators;
pub mod views;

use controllers::index;
use services::github_service::{GitHubService, ProfileSource, GITHUB_API_BASE};
use sessions::SessionStore;


// Command line interface
#[derive(Parser, Debug)]
#[clap(name="github-profile-explorer", about="Look up a GitHub account and browse its repositories.")]
struct Opt {
    #[clap(short = 'l', long = "log", env = "EXPLORER_LOG", default_value = "info")]
    log_level: String,

    #[clap(short = 'a', long = "addr", env = "EXPLORER_ADDR", default_value = "::1")]
    addr: String,

    #[clap(short = 'p', long = "port", env = "EXPLORER_PORT", default_value = "8080")]
    port: u16,

    #[clap(long = "static_dir", env = "EXPLORER_STATIC_DIR", default_value = "static")]
    static_dir: String,

    #[clap(long = "api_base", env = "EXPLORER_API_BASE", default_value = GITHUB_API_BASE)]
    api_base: String,

    /// Seconds a browser session may sit idle before it is dropped
    #[clap(long = "session_ttl_secs", env = "EXPLORER_SESSION_TTL_SECS", default_value = "1800")]
    session_ttl_secs: u64,
}

pub struct AppState {
    registry: Handlebars<'static>,
    source: Arc<dyn ProfileSource>,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(registry: Handlebars<'static>, source: Arc<dyn ProfileSource>, session_ttl: chrono::Duration) -> Self {
        Self {
            registry,
            source,
            sessions: SessionStore::new(session_ttl),
        }
    }
}

/// Converts the idle timeout flag, rejecting values chrono cannot represent.
pub fn session_ttl(secs: u64) -> anyhow::Result<chrono::Duration> {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .ok_or_else(|| anyhow::anyhow!("Session TTL of {} seconds is out of range", secs))
}

pub fn build_registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_template_string("template", include_str!("templates/template.hbs"))?;
    handlebars.register_template_string("index", include_str!("templates/index.hbs"))?;
    handlebars.register_template_string("about", include_str!("templates/about.hbs"))?;
    handlebars.register_template_string("errors/500", include_str!("templates/errors/500.hbs"))?;
    Ok(handlebars)
}

pub fn build_router(state: Arc<AppState>, static_dir: String) -> Router {
    Router::new()
        .route("/", get(index::get_index).post(index::post_index))
        .route("/about", get(index::get_about))
        .fallback_service(get(move |req: Request<Body>| {
            let static_dir = static_dir.clone();
            async move {
                match ServeDir::new(static_dir).oneshot(req).await {
                    Ok(res) => res.map(boxed),
                    Err(err) => Response::builder()
                        .status(StatusCode::INTERNAL_SERVER_ERROR)
                        .body(boxed(Body::from(format!("error: {err}"))))
                        .expect("error response"),
                }
            }
        }))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Fetch console arguments
    let opt = Opt::parse();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", format!("{},hyper=info,mio=info", opt.log_level));
    }
    // Enable console logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let session_ttl = session_ttl(opt.session_ttl_secs)?;
    let registry = build_registry()?;
    let source = GitHubService::new(Client::new(), &opt.api_base);
    log::info!("Using GitHub API at {}", opt.api_base);

    let app_state = Arc::new(AppState::new(
        registry,
        Arc::new(source),
        session_ttl,
    ));
    let app = build_router(app_state, opt.static_dir);

    let sock_addr = SocketAddr::from((
        IpAddr::from_str(opt.addr.as_str()).unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        opt.port
    ));
    log::info!("Now listening on http://{}", sock_addr);

    axum::Server::bind(&sock_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
