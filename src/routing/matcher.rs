//! Route matching module
//!
//! Matches a method and path against the ordered route table.
//!
//! Precedence: among the routes whose pattern fits the path, only those with
//! the most literal segments are considered, and within those the first in
//! table order wins. `/students/add` therefore always resolves to the add
//! form and is never read as a student id, whatever the method.

use hyper::Method;

use super::table::{Action, Route, Segment, ROUTES};

/// Outcome of matching a request against the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch<'p> {
    Found {
        action: Action,
        /// Value bound by the `:id` segment, if the pattern has one
        id: Option<&'p str>,
    },
    /// The path exists but not for this method
    MethodNotAllowed { allow: String },
    NotFound,
}

/// Resolve a request against the built-in route table
pub fn match_route<'p>(method: &Method, path: &'p str) -> RouteMatch<'p> {
    match_in(ROUTES, method, path)
}

/// Resolve a request against an arbitrary ordered table
pub fn match_in<'p>(routes: &[Route], method: &Method, path: &'p str) -> RouteMatch<'p> {
    let segments = split_path(path);

    let candidates: Vec<(&Route, Option<&'p str>)> = routes
        .iter()
        .filter_map(|route| match_pattern(route.pattern, &segments).map(|id| (route, id)))
        .collect();

    let Some(best) = candidates.iter().map(|(r, _)| literal_count(r)).max() else {
        return RouteMatch::NotFound;
    };
    let candidates: Vec<_> = candidates
        .into_iter()
        .filter(|(r, _)| literal_count(r) == best)
        .collect();

    // HEAD is served by read-only GET routes
    let accepts = |route: &Route| {
        if method == Method::HEAD {
            route.method == Method::GET && route.action.allows_head()
        } else {
            route.method == *method
        }
    };

    if let Some((route, id)) = candidates.iter().find(|(r, _)| accepts(r)) {
        return RouteMatch::Found {
            action: route.action,
            id: *id,
        };
    }

    let mut allow: Vec<&str> = Vec::new();
    for (route, _) in &candidates {
        let name = route.method.as_str();
        if !allow.contains(&name) {
            allow.push(name);
        }
        if route.method == Method::GET
            && route.action.allows_head()
            && !allow.contains(&"HEAD")
        {
            allow.push("HEAD");
        }
    }
    RouteMatch::MethodNotAllowed {
        allow: allow.join(", "),
    }
}

/// Split a path into segments, ignoring a trailing slash
fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .strip_prefix('/')
        .unwrap_or(trimmed)
        .split('/')
        .collect()
}

/// Returns the bound parameter (if any) when the pattern fits
fn match_pattern<'p>(pattern: &[Segment], segments: &[&'p str]) -> Option<Option<&'p str>> {
    if pattern.len() != segments.len() {
        return None;
    }

    let mut param = None;
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected {
            Segment::Literal(lit) if lit == actual => {}
            Segment::Param if !actual.is_empty() => param = Some(*actual),
            _ => return None,
        }
    }
    Some(param)
}

fn literal_count(route: &Route) -> usize {
    route
        .pattern
        .iter()
        .filter(|s| matches!(s, Segment::Literal(_)))
        .count()
}
