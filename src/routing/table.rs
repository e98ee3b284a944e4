//! Route table
//!
//! Literal routes are listed before parameterised routes of the same shape.

use hyper::Method;

/// Handler selected by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Home,
    ListStudents,
    CreateStudent,
    AddForm,
    ShowStudent,
    UpdateStudent,
    EditForm,
    DeleteStudent,
}

impl Action {
    /// Whether a `HEAD` request may run this action's `GET` handler.
    /// Actions that mutate the collection never answer `HEAD`.
    pub const fn allows_head(self) -> bool {
        !matches!(self, Self::DeleteStudent)
    }
}

/// One path segment of a route pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    /// `:id`
    Param,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: &'static [Segment],
    pub action: Action,
}

const STUDENTS: Segment = Segment::Literal("students");

pub static ROUTES: &[Route] = &[
    Route {
        method: Method::GET,
        pattern: &[],
        action: Action::Home,
    },
    Route {
        method: Method::GET,
        pattern: &[STUDENTS],
        action: Action::ListStudents,
    },
    Route {
        method: Method::POST,
        pattern: &[STUDENTS],
        action: Action::CreateStudent,
    },
    Route {
        method: Method::GET,
        pattern: &[STUDENTS, Segment::Literal("add")],
        action: Action::AddForm,
    },
    Route {
        method: Method::GET,
        pattern: &[STUDENTS, Segment::Param],
        action: Action::ShowStudent,
    },
    Route {
        method: Method::POST,
        pattern: &[STUDENTS, Segment::Param],
        action: Action::UpdateStudent,
    },
    Route {
        method: Method::GET,
        pattern: &[STUDENTS, Segment::Param, Segment::Literal("edit")],
        action: Action::EditForm,
    },
    Route {
        method: Method::GET,
        pattern: &[STUDENTS, Segment::Param, Segment::Literal("delete")],
        action: Action::DeleteStudent,
    },
];
