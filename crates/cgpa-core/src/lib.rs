//! Domain core of the CGPA record keeper.
//!
//! Holds the session/semester/course model, the grade scale, the GPA engine
//! and the persistence traits. Nothing here performs I/O.

pub mod config;
pub mod error;
pub mod gpa;
pub mod grade;
pub mod identity;
pub mod record;

// Re-export common types
pub use error::CgpaError;
pub use gpa::GpaSummary;
pub use grade::{Grade, GradeScale};
pub use identity::{Identity, UserId};
pub use record::{Mutation, RecordModel, RecordState};
