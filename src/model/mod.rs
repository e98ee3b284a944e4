//! Student record schema
//!
//! Defines the student document, its identifier, and the validation that
//! every candidate record passes before it is written.

mod grade;
mod student;

pub use grade::Grade;
pub use student::{Student, StudentId, StudentInput, ValidationErrors, MAX_AGE, MIN_AGE};

#[cfg(test)]
pub use student::{AgeValue, NewStudent};
