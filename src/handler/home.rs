//! Landing page and health probes

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::views;

/// `GET /`
pub fn home(is_head: bool) -> Response<Full<Bytes>> {
    http::build_html_response(StatusCode::OK, views::home_page(), is_head)
}

/// Liveness: the process is serving requests
pub fn liveness() -> Response<Full<Bytes>> {
    http::build_text_response(StatusCode::OK, "ok")
}

/// Readiness: the student collection is reachable
pub async fn readiness(state: &AppState) -> Response<Full<Bytes>> {
    match state.students.ping().await {
        Ok(()) => {
            logger::log_debug(&format!(
                "Readiness ok, {} students stored",
                state.students.count().await
            ));
            http::build_text_response(StatusCode::OK, "ok")
        }
        Err(e) => {
            logger::log_warning(&format!("Readiness check failed: {e}"));
            http::build_text_response(StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}
