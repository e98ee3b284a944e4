//! Request-level error taxonomy
//!
//! Every handler failure ends up here and is turned into an HTML response.
//! Store failures are logged in full but shown to the client generically.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

use crate::http;
use crate::logger;
use crate::model::ValidationErrors;
use crate::store::StoreError;
use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid student: {0}")]
    Validation(ValidationErrors),

    #[error("{0} not found")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(u64),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(format!("Student {id}")),
            StoreError::Validation(errors) => Self::Validation(errors),
            other => Self::Store(other),
        }
    }
}

impl AppError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error as an HTML page
    pub fn into_response(self, is_head: bool) -> Response<Full<Bytes>> {
        let status = self.status();
        let message = match &self {
            Self::Store(err) => {
                logger::log_error(&format!("Store failure: {err}"));
                "Something went wrong while talking to the database.".to_string()
            }
            Self::NotFound(what) => format!("{what} does not exist."),
            other => {
                logger::log_warning(&other.to_string());
                other.to_string()
            }
        };
        http::build_html_response(status, views::error_page(status, &message), is_head)
    }
}
