//! Mutations the UI layer can request against the record model.

use crate::grade::{Grade, parse_units};

/// Field-wise patch merged onto an existing course. `None` keeps the field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub grade: Option<Grade>,
    pub units: Option<u32>,
}

impl CoursePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn grade(grade: Grade) -> Self {
        Self {
            grade: Some(grade),
            ..Self::default()
        }
    }

    pub fn units(units: u32) -> Self {
        Self {
            units: Some(units),
            ..Self::default()
        }
    }

    /// Builds a patch from raw form text. Units that do not parse become 0.
    pub fn from_input(name: Option<&str>, grade: Option<&str>, units: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            grade: grade.map(Grade::parse),
            units: units.map(parse_units),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.grade.is_none() && self.units.is_none()
    }
}

/// One requested change to the record model.
///
/// Selection variants only move the active session/semester and never touch
/// the persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AddSession,
    DeleteSession {
        session_id: String,
    },
    RenameSession {
        session_id: String,
        name: String,
    },
    AddSemester {
        session_id: String,
    },
    DeleteSemester {
        session_id: String,
        semester_id: String,
    },
    AddCourse {
        semester_id: String,
    },
    UpdateCourse {
        semester_id: String,
        index: usize,
        patch: CoursePatch,
    },
    DeleteCourse {
        semester_id: String,
        index: usize,
    },
    SelectSession {
        session_id: String,
    },
    SelectSemester {
        semester_id: String,
    },
}

impl Mutation {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::AddSession => "add_session",
            Mutation::DeleteSession { .. } => "delete_session",
            Mutation::RenameSession { .. } => "rename_session",
            Mutation::AddSemester { .. } => "add_semester",
            Mutation::DeleteSemester { .. } => "delete_semester",
            Mutation::AddCourse { .. } => "add_course",
            Mutation::UpdateCourse { .. } => "update_course",
            Mutation::DeleteCourse { .. } => "delete_course",
            Mutation::SelectSession { .. } => "select_session",
            Mutation::SelectSemester { .. } => "select_semester",
        }
    }
}
