//! Record state plus selection, updated together.

use super::model::{Course, RecordState, Semester, Session};
use super::mutation::Mutation;
use super::operations;
use super::selection::ActiveSelection;
use crate::gpa::GpaSummary;

/// The value the UI reads and the sync controller owns.
///
/// [`RecordModel::apply`] never mutates `self`; it returns the next model, so
/// the state and its selection always change in one step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordModel {
    pub state: RecordState,
    pub selection: ActiveSelection,
}

impl RecordModel {
    /// Wraps `state` as-is, selecting its first session and semester.
    pub fn new(state: RecordState) -> Self {
        let selection = ActiveSelection::first_of(&state);
        Self { state, selection }
    }

    /// A model holding the default session and semester.
    pub fn seeded() -> Self {
        Self::new(RecordState::seeded())
    }

    /// Replaces the state wholesale with data loaded from a backend.
    ///
    /// The data is normalized first, the first session/semester becomes
    /// active and the per-session semester memory is cleared.
    pub fn adopt(state: RecordState) -> Self {
        Self::new(state.normalized())
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.selection
            .active_session_id
            .as_deref()
            .and_then(|id| self.state.session(id))
    }

    pub fn active_semester(&self) -> Option<&Semester> {
        let semester_id = self.selection.active_semester_id.as_deref()?;
        self.active_session().and_then(|s| s.semester(semester_id))
    }

    /// Courses of the active semester.
    pub fn active_courses(&self) -> &[Course] {
        self.selection
            .active_semester_id
            .as_deref()
            .map(|id| self.state.courses(id))
            .unwrap_or(&[])
    }

    pub fn summary(&self) -> GpaSummary {
        GpaSummary::from_state(&self.state)
    }

    /// Applies one mutation and returns the resulting model.
    pub fn apply(&self, mutation: &Mutation) -> RecordModel {
        let mut next = self.clone();
        match mutation {
            Mutation::AddSession => {
                next.state = operations::add_session(&self.state);
                if let Some(added) = next.state.sessions.last() {
                    next.selection.focus(&added.id, added.first_semester_id());
                }
            }
            Mutation::DeleteSession { session_id } => {
                next.state = operations::delete_session(&self.state, session_id);
                if next.state != self.state {
                    next.selection.reset_to_first(&next.state);
                }
            }
            Mutation::RenameSession { session_id, name } => {
                next.state = operations::rename_session(&self.state, session_id, name);
            }
            Mutation::AddSemester { session_id } => {
                next.state = operations::add_semester(&self.state, session_id);
                if next.state != self.state {
                    let added = next
                        .state
                        .session(session_id)
                        .and_then(|s| s.semesters.last())
                        .map(|s| s.id.clone());
                    if let Some(added) = added {
                        next.selection.focus(session_id, Some(&added));
                    }
                }
            }
            Mutation::DeleteSemester {
                session_id,
                semester_id,
            } => {
                next.state = operations::delete_semester(&self.state, session_id, semester_id);
                if next.state != self.state {
                    let first = next
                        .state
                        .session(session_id)
                        .and_then(|s| s.first_semester_id())
                        .map(str::to_string);
                    next.selection.focus(session_id, first.as_deref());
                }
            }
            Mutation::AddCourse { semester_id } => {
                next.state = operations::add_course(&self.state, semester_id);
            }
            Mutation::UpdateCourse {
                semester_id,
                index,
                patch,
            } => {
                next.state = operations::update_course(&self.state, semester_id, *index, patch);
            }
            Mutation::DeleteCourse { semester_id, index } => {
                next.state = operations::delete_course(&self.state, semester_id, *index);
            }
            Mutation::SelectSession { session_id } => {
                next.selection.select_session(&self.state, session_id);
            }
            Mutation::SelectSemester { semester_id } => {
                next.selection.select_semester(&self.state, semester_id);
            }
        }
        next.selection.prune(&next.state);
        next
    }
}
