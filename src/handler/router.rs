//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: health probes, route matching,
//! handler dispatch, error rendering and access logging.

use crate::config::AppState;
use crate::error::AppError;
use crate::handler::{home, students};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, Action, RouteMatch};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let mut entry = state.access_log().then(|| {
        let mut entry = AccessLogEntry::new(
            remote_addr.map_or_else(|| "-".to_string(), |a| a.ip().to_string()),
            method.to_string(),
            path.clone(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = format!("{:?}", req.version())
            .trim_start_matches("HTTP/")
            .to_string();
        entry.referer = header_string(&req, REFERER);
        entry.user_agent = header_string(&req, USER_AGENT);
        entry
    });

    let mut response = route_request(req, &state, &method, &path, is_head).await;

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().lower()).unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Route request based on path and method
async fn route_request<B>(
    req: Request<B>,
    state: &Arc<AppState>,
    method: &Method,
    path: &str,
    is_head: bool,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    // 0. Health check endpoints (highest priority, always fast)
    let health = &state.config.health;
    if health.enabled && (*method == Method::GET || is_head) {
        if path == health.liveness_path {
            return home::liveness();
        }
        if path == health.readiness_path {
            return home::readiness(state).await;
        }
    }

    // 1. Route table
    let result = match routing::match_route(method, path) {
        RouteMatch::Found { action, id } => dispatch(action, id, req, state, is_head).await,
        RouteMatch::MethodNotAllowed { allow } => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            return http::build_405_response(&allow, is_head);
        }
        RouteMatch::NotFound => Err(AppError::NotFound(format!("Page {path}"))),
    };

    result.unwrap_or_else(|e| e.into_response(is_head))
}

/// Dispatch to the handler bound to the matched action
async fn dispatch<B>(
    action: Action,
    id: Option<&str>,
    req: Request<B>,
    state: &AppState,
    is_head: bool,
) -> Result<Response<Full<Bytes>>, AppError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match action {
        Action::Home => Ok(home::home(is_head)),
        Action::ListStudents => students::list(state, is_head).await,
        Action::AddForm => students::add_form(is_head),
        Action::CreateStudent => students::create(req, state).await,
        Action::ShowStudent => students::detail(state, students::parse_id(id)?, is_head).await,
        Action::EditForm => students::edit_form(state, students::parse_id(id)?, is_head).await,
        Action::UpdateStudent => students::update(req, state, students::parse_id(id)?).await,
        Action::DeleteStudent => students::delete(state, students::parse_id(id)?).await,
    }
}
