//! Academic record domain module.
//!
//! # Module Structure
//!
//! - `model`: `Course`, `Semester`, `Session` and the `RecordState` snapshot
//! - `mutation`: `Mutation` and `CoursePatch`, the requests the UI issues
//! - `operations`: pure state transformations (add/rename/delete at each level)
//! - `selection`: `ActiveSelection`, the transient active session/semester
//! - `record_model`: `RecordModel`, state and selection updated together
//! - `repository`: persistence traits implemented by the infrastructure crate
//!
//! # Usage
//!
//! ```ignore
//! use cgpa_core::record::{Mutation, RecordModel};
//!
//! let model = RecordModel::seeded().apply(&Mutation::AddSession);
//! ```

mod model;
mod mutation;
pub mod operations;
mod record_model;
mod repository;
mod selection;

// Re-export public API
pub use model::{
    Course, DEFAULT_SEMESTER_NAME, MAX_SEMESTERS_PER_SESSION, RecordState, Semester, Session,
};
pub use mutation::{CoursePatch, Mutation};
pub use record_model::RecordModel;
pub use repository::{RecordRepository, UserDocumentStore};
pub use selection::ActiveSelection;
