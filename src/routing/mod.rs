//! Routing module
//!
//! Maps method + path to a handler action:
//! - Ordered, static route table with literal and `:id` segments
//! - Literal segments take precedence over the identifier parameter
//! - `HEAD` served by `GET` routes, 405 with `Allow` for known paths

mod matcher;
mod table;

pub use matcher::{match_route, RouteMatch};
pub use table::Action;
