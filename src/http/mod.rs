//! HTTP protocol layer module
//!
//! Response builders and request body decoding, independent of the
//! student handlers that use them.

pub mod body;
pub mod response;

pub use body::decode_body;
pub use response::{
    build_405_response, build_html_response, build_redirect_response, build_text_response,
};
