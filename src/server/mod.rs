//! Local server
//!
//! Pages are composed per request from the in-memory content, so the
//! server does not need a generated public directory. The contact form is
//! the only page that accepts a POST.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Form, State},
    http::{header, Method, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::contact::{ContactForm, ContactPageState, ContactService};
use crate::helpers::normalize_path;
use crate::pages::{PageComposer, PageStatus, RenderedPage, Route};
use crate::templates::STYLESHEET;
use crate::Folio;

/// Server state shared by every request
struct ServerState {
    composer: PageComposer,
    contact: ContactService,
    static_dir: PathBuf,
    root: String,
}

/// Build the application router for a site
pub fn router(folio: &Folio) -> Result<Router> {
    let root = normalize_path(&folio.config.root);

    let state = Arc::new(ServerState {
        composer: PageComposer::new(folio)?,
        contact: ContactService::new(folio.config.contact.submit_delay()),
        static_dir: folio.static_dir.clone(),
        root: root.clone(),
    });

    let contact = get(page_handler).post(contact_handler);
    let app = Router::new()
        .route(&format!("{}contact", root), contact.clone())
        .route(&format!("{}contact/", root), contact)
        .route(&format!("{}css/style.css", root), get(stylesheet_handler))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(folio)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, normalize_path(&folio.config.root));
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Compose the page for a path, falling back to static assets
async fn page_handler(State(state): State<Arc<ServerState>>, request: Request<Body>) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = request.uri().path();
    let Some(site_path) = strip_root(&state.root, path) else {
        return page_response(state.composer.compose(&Route::NotFound));
    };

    let route = Route::parse(&site_path);
    if route != Route::NotFound {
        tracing::debug!("{} -> {:?}", path, route);
        return page_response(state.composer.compose(&route));
    }

    match serve_static(&state.static_dir, &site_path).await {
        Some(response) => response,
        None => page_response(state.composer.compose(&Route::NotFound)),
    }
}

async fn contact_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<ContactForm>,
) -> Response {
    let page_state = ContactPageState::after_submit(&state.contact, form).await;
    let status = if page_state.is_success() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    match state.composer.contact(&page_state) {
        Ok(page) => (status, Html(page.html)).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn stylesheet_handler() -> Response {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET).into_response()
}

/// Serve a file from the static directory, or `None` when there is no such file
async fn serve_static(static_dir: &Path, site_path: &str) -> Option<Response> {
    if !static_dir.is_dir() {
        return None;
    }

    let request = Request::builder().uri(site_path).body(Body::empty()).ok()?;
    let mut service = ServeDir::new(static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => {
            Some(response.into_response())
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Failed to serve {}: {}", site_path, e);
            None
        }
    }
}

/// The request path relative to the site root, or `None` outside of it
fn strip_root(root: &str, path: &str) -> Option<String> {
    if root == "/" {
        return Some(path.to_string());
    }
    if path == root.trim_end_matches('/') {
        return Some("/".to_string());
    }
    path.strip_prefix(root.trim_end_matches('/'))
        .filter(|rest| rest.starts_with('/'))
        .map(|rest| rest.to_string())
}

fn page_response(page: Result<RenderedPage>) -> Response {
    match page {
        Ok(page) => {
            let status = match page.status {
                PageStatus::Found => StatusCode::OK,
                PageStatus::NotFound => StatusCode::NOT_FOUND,
            };
            (status, Html(page.html)).into_response()
        }
        Err(e) => internal_error(e),
    }
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::error!("Failed to render page: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
