//! Request handler module
//!
//! Request dispatch plus the student and landing page handlers.

pub mod home;
pub mod router;
pub mod students;

// Re-export main entry point
pub use router::handle_request;
